//! Auto-stack resolution.
//!
//! When a stackable package moves horizontally its height is derived from
//! what it now sits over: the floor if its footprint overlaps nothing,
//! otherwise the highest top surface underneath plus a clearance gap.
//! The supporting package only has to overlap the footprint; nothing checks
//! that it could carry the load.

use crate::constants::steps;
use crate::geometry::EPSILON;
use crate::package::Package;

/// Whether moves should resolve height automatically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutoStack {
    Off,
    On { clearance: f64 },
}

impl AutoStack {
    /// Enabled with the standard clearance gap.
    pub fn on() -> Self {
        AutoStack::On {
            clearance: steps::STACK_CLEARANCE,
        }
    }

    /// Clearance to use for `package`, or `None` if stacking does not
    /// apply to it.
    pub fn clearance_for(self, package: &Package) -> Option<f64> {
        match self {
            AutoStack::On { clearance } if package.stackable => Some(clearance),
            _ => None,
        }
    }
}

/// Outcome of resolving a package's height from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StackResolution {
    /// Nothing with height underneath.
    Ground,
    /// Resting above the highest overlapping package.
    Supported { z: f64, support_height: f64 },
    /// Stacking would exceed the container height; keep the current z.
    Overflow { required_top: f64 },
}

impl StackResolution {
    /// New z, or `None` when the stack was rejected.
    pub fn target_z(&self) -> Option<f64> {
        match *self {
            StackResolution::Ground => Some(0.0),
            StackResolution::Supported { z, .. } => Some(z),
            StackResolution::Overflow { .. } => None,
        }
    }
}

/// Highest top surface among packages whose footprint overlaps `package`.
///
/// Returns `None` when nothing overlaps. `others` may include `package`
/// itself; entries with the same id are skipped.
pub fn support_height(package: &Package, others: &[Package]) -> Option<f64> {
    let rect = package.footprint_rect();
    others
        .iter()
        .filter(|o| o.id != package.id)
        .filter(|o| rect.overlaps(&o.footprint_rect()))
        .map(Package::top)
        .reduce(f64::max)
}

/// Resolve the resting height of `package` at its current x/y.
pub fn resolve_stack(
    package: &Package,
    others: &[Package],
    container_height: f64,
    clearance: f64,
) -> StackResolution {
    let support = match support_height(package, others) {
        Some(h) if h > 0.0 => h,
        _ => return StackResolution::Ground,
    };

    let z = support + clearance;
    let required_top = z + package.depth;
    if required_top > container_height + EPSILON {
        return StackResolution::Overflow { required_top };
    }

    StackResolution::Supported {
        // absorb float drift so the top never pokes through the roof
        z: z.min(container_height - package.depth),
        support_height: support,
    }
}
