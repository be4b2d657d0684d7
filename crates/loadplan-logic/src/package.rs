//! Package and container records.

use serde::{Deserialize, Serialize};

use crate::constants::{package_defaults, palette, truck};
use crate::error::PlacementError;
use crate::geometry::{rotated_footprint, Footprint, Rotation, EPSILON};

/// The trailer interior. `x` runs along `length`, `y` along `width`,
/// `z` along `height`; the origin is a floor corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            length: truck::LENGTH,
            width: truck::WIDTH,
            height: truck::HEIGHT,
        }
    }
}

impl Container {
    /// Build a container from user input, enforcing the resize ranges.
    pub fn new(length: f64, width: f64, height: f64) -> Result<Self, PlacementError> {
        check_range("length", length, truck::MIN_LENGTH, truck::MAX_LENGTH)?;
        check_range("width", width, truck::MIN_WIDTH, truck::MAX_WIDTH)?;
        check_range("height", height, truck::MIN_HEIGHT, truck::MAX_HEIGHT)?;
        Ok(Self {
            length,
            width,
            height,
        })
    }

    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }
}

/// Reject NaN/inf, then anything outside `min..=max`.
pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), PlacementError> {
    if !value.is_finite() {
        return Err(PlacementError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(PlacementError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// A rectangular package placed in the trailer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: u32,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Footprint along x before rotation.
    pub width: f64,
    /// Footprint along y before rotation.
    pub height: f64,
    /// Vertical extent; unaffected by rotation.
    pub depth: f64,
    #[serde(default)]
    pub rotation: Rotation,
    pub weight: f64,
    #[serde(default)]
    pub stackable: bool,
    pub color: String,
}

impl Package {
    /// A new package at the origin with the standard size.
    pub fn with_defaults(id: u32) -> Self {
        Self {
            id,
            name: format!("{} {}", package_defaults::NAME_PREFIX, id),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            width: package_defaults::WIDTH,
            height: package_defaults::HEIGHT,
            depth: package_defaults::DEPTH,
            rotation: Rotation::Deg0,
            weight: package_defaults::WEIGHT,
            stackable: false,
            color: palette::color_for(id).to_string(),
        }
    }

    /// Effective (x-extent, y-extent) after rotation.
    pub fn footprint(&self) -> (f64, f64) {
        rotated_footprint(self.width, self.height, self.rotation)
    }

    pub fn footprint_rect(&self) -> Footprint {
        Footprint::of(self)
    }

    /// Height of the top surface.
    pub fn top(&self) -> f64 {
        self.z + self.depth
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    /// Check a package that arrived from outside the editor (bulk load,
    /// deserialized snapshot): finite position, positive dimensions,
    /// non-negative weight.
    pub fn validate(&self) -> Result<(), PlacementError> {
        for (field, value) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if !value.is_finite() {
                return Err(PlacementError::NotFinite { field });
            }
        }
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() {
                return Err(PlacementError::NotFinite { field });
            }
            if value <= 0.0 {
                return Err(PlacementError::NotPositive { field, value });
            }
        }
        check_range("weight", self.weight, 0.0, f64::INFINITY)
    }

    /// Whether the occupied box lies inside `container` on every axis.
    pub fn fits_within(&self, container: &Container) -> bool {
        let (w, h) = self.footprint();
        self.x >= 0.0
            && self.y >= 0.0
            && self.z >= 0.0
            && self.x + w <= container.length + EPSILON
            && self.y + h <= container.width + EPSILON
            && self.top() <= container.height + EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_package_at_origin() {
        let p = Package::with_defaults(4);
        assert_eq!((p.x, p.y, p.z), (0.0, 0.0, 0.0));
        assert_eq!(p.name, "SROR 4");
        assert_eq!(p.rotation, Rotation::Deg0);
        assert!(!p.stackable);
        assert!(p.fits_within(&Container::default()));
    }

    #[test]
    fn test_footprint_follows_rotation() {
        let mut p = Package::with_defaults(1);
        assert_eq!(p.footprint(), (3.0, 1.2));
        p.rotation = Rotation::Deg90;
        assert_eq!(p.footprint(), (1.2, 3.0));
        // 3.0 m along y no longer fits a 2.45 m wide trailer.
        assert!(!p.fits_within(&Container::default()));
    }

    #[test]
    fn test_validate_loaded_package() {
        assert_eq!(Package::with_defaults(1).validate(), Ok(()));

        let mut p = Package::with_defaults(1);
        p.depth = f64::NAN;
        assert_eq!(p.validate(), Err(PlacementError::NotFinite { field: "depth" }));

        let mut p = Package::with_defaults(1);
        p.width = 0.0;
        assert_eq!(
            p.validate(),
            Err(PlacementError::NotPositive {
                field: "width",
                value: 0.0
            })
        );

        let mut p = Package::with_defaults(1);
        p.weight = -5.0;
        assert!(matches!(
            p.validate(),
            Err(PlacementError::OutOfRange { field: "weight", .. })
        ));

        let mut p = Package::with_defaults(1);
        p.y = f64::INFINITY;
        assert_eq!(p.validate(), Err(PlacementError::NotFinite { field: "y" }));
    }

    #[test]
    fn test_container_ranges() {
        assert!(Container::new(13.6, 2.45, 2.7).is_ok());
        assert!(matches!(
            Container::new(3.0, 2.45, 2.7),
            Err(PlacementError::OutOfRange { field: "length", .. })
        ));
        assert!(matches!(
            Container::new(13.6, 11.0, 2.7),
            Err(PlacementError::OutOfRange { field: "width", .. })
        ));
        assert_eq!(
            Container::new(13.6, 2.45, f64::NAN),
            Err(PlacementError::NotFinite { field: "height" })
        );
    }

    #[test]
    fn test_container_volume() {
        let c = Container::new(10.0, 2.0, 2.5).unwrap();
        assert!((c.volume() - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_package_json_shape() {
        let json = r#"{"id":9,"name":"crate","x":1.0,"y":0.5,"z":0.0,
            "width":1.0,"height":0.8,"depth":0.6,"weight":120.0,"color":"red"}"#;
        let p: Package = serde_json::from_str(json).unwrap();
        assert_eq!(p.rotation, Rotation::Deg0);
        assert!(!p.stackable);
        assert_eq!(p.top(), 0.6);
    }
}
