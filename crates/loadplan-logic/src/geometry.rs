//! Footprint geometry for packages on the trailer floor.
//!
//! Pure functions over plain data: rotation only ever swaps the two
//! horizontal extents, so everything here stays axis-aligned.

use serde::{Deserialize, Serialize};

use crate::error::InvalidRotation;
use crate::package::Package;

/// Tolerance for boundary comparisons on accumulated float sums.
pub const EPSILON: f64 = 1e-9;

/// One of the four quarter-turn orientations about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Normalize any multiple of 90 (negative or past 360) to an orientation.
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Advance by +90 degrees, wrapping at 360.
    pub fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// True when the footprint's width and height trade places.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

impl TryFrom<i64> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: i64) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees).ok_or(InvalidRotation(degrees))
    }
}

/// Effective (x-extent, y-extent) of a `width × height` footprint.
pub fn rotated_footprint(width: f64, height: f64, rotation: Rotation) -> (f64, f64) {
    if rotation.swaps_axes() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Sum of declared box volumes. Rotation never changes volume.
pub fn total_volume(packages: &[Package]) -> f64 {
    packages.iter().map(|p| p.width * p.height * p.depth).sum()
}

pub fn total_weight(packages: &[Package]) -> f64 {
    packages.iter().map(|p| p.weight).sum()
}

/// Axis-aligned floor rectangle occupied by a package.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Footprint {
    pub fn of(package: &Package) -> Self {
        let (w, h) = package.footprint();
        Self {
            min_x: package.x,
            min_y: package.y,
            max_x: package.x + w,
            max_y: package.y + h,
        }
    }

    /// Strict separating-axis test: rectangles that only share an edge do
    /// not overlap.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        let apart_x = self.max_x <= other.min_x || self.min_x >= other.max_x;
        let apart_y = self.max_y <= other.min_y || self.min_y >= other.max_y;
        !(apart_x || apart_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_package(id: u32, x: f64, y: f64, w: f64, h: f64, rotation: Rotation) -> Package {
        let mut p = Package::with_defaults(id);
        p.x = x;
        p.y = y;
        p.width = w;
        p.height = h;
        p.rotation = rotation;
        p
    }

    #[test]
    fn test_quarter_turn_swaps() {
        assert_eq!(rotated_footprint(3.0, 1.2, Rotation::Deg90), (1.2, 3.0));
        assert_eq!(rotated_footprint(3.0, 1.2, Rotation::Deg270), (1.2, 3.0));
        assert_eq!(rotated_footprint(3.0, 1.2, Rotation::Deg0), (3.0, 1.2));
        assert_eq!(rotated_footprint(3.0, 1.2, Rotation::Deg180), (3.0, 1.2));
    }

    #[test]
    fn test_footprint_periodic_in_360() {
        for r in Rotation::ALL {
            let deg = r.degrees() as i64;
            let wrapped = Rotation::from_degrees(deg + 360).unwrap();
            assert_eq!(wrapped, r);
            assert_eq!(
                rotated_footprint(2.0, 0.7, r),
                rotated_footprint(2.0, 0.7, wrapped),
                "rotation {deg}"
            );
        }
    }

    #[test]
    fn test_from_degrees_rejects_oblique() {
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(720), Some(Rotation::Deg0));
        assert_eq!(Rotation::try_from(100_i64), Err(InvalidRotation(100)));
    }

    #[test]
    fn test_next_cycles_back() {
        let mut r = Rotation::Deg90;
        for _ in 0..4 {
            r = r.next();
        }
        assert_eq!(r, Rotation::Deg90);
    }

    #[test]
    fn test_volume_ignores_rotation() {
        let a = make_package(1, 0.0, 0.0, 2.0, 1.0, Rotation::Deg0);
        let b = make_package(2, 0.0, 0.0, 2.0, 1.0, Rotation::Deg90);
        let va = total_volume(std::slice::from_ref(&a));
        let vb = total_volume(std::slice::from_ref(&b));
        assert!((va - vb).abs() < EPSILON);
        assert!((total_volume(&[a, b]) - 2.0 * va).abs() < EPSILON);
    }

    #[test]
    fn test_total_weight() {
        let mut a = Package::with_defaults(1);
        let mut b = Package::with_defaults(2);
        a.weight = 120.0;
        b.weight = 80.5;
        assert!((total_weight(&[a, b]) - 200.5).abs() < EPSILON);
        assert_eq!(total_weight(&[]), 0.0);
    }

    #[test]
    fn test_overlap_strict_edges() {
        let a = Footprint::of(&make_package(1, 0.0, 0.0, 3.0, 1.2, Rotation::Deg0));
        let touching = Footprint::of(&make_package(2, 3.0, 0.0, 3.0, 1.2, Rotation::Deg0));
        let inside = Footprint::of(&make_package(3, 1.0, 0.5, 1.0, 0.2, Rotation::Deg0));
        let beside = Footprint::of(&make_package(4, 0.0, 1.2, 3.0, 1.2, Rotation::Deg0));
        assert!(!a.overlaps(&touching));
        assert!(!a.overlaps(&beside));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_overlap_uses_rotated_extent() {
        // Rotated 90°, a 3.0 × 1.2 package only reaches x = 1.2.
        let a = Footprint::of(&make_package(1, 0.0, 0.0, 3.0, 1.2, Rotation::Deg90));
        let b = Footprint::of(&make_package(2, 2.0, 0.0, 1.0, 1.0, Rotation::Deg0));
        assert!(!a.overlaps(&b));
        assert!((a.max_y - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_serde_as_degrees() {
        let json = serde_json::to_string(&Rotation::Deg270).unwrap();
        assert_eq!(json, "270");
        let back: Rotation = serde_json::from_str("450").unwrap();
        assert_eq!(back, Rotation::Deg90);
        assert!(serde_json::from_str::<Rotation>("30").is_err());
    }
}
