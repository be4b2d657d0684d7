//! Placement engine: validated edits to a package's position, orientation
//! and size.
//!
//! Every operation takes the target id, the full package list and the
//! container, and returns a fresh list. Nothing is mutated in place, so the
//! caller's previous list stays authoritative whenever an edit is rejected.
//!
//! Algorithm: "apply then clamp"
//! 1. Apply the requested change to a copy of the target package
//! 2. Clamp x/y against the *rotated* footprint and z against raw depth,
//!    so the box never leaves the container (edits are clamped, not rejected)
//! 3. For horizontal moves of stackable packages with auto-stack on,
//!    resolve z from whatever the new footprint overlaps

use serde::{Deserialize, Serialize};

use crate::constants::package_limits;
use crate::error::{PlacementError, PlacementWarning};
use crate::package::{check_range, Container, Package};
use crate::stacking::{resolve_stack, AutoStack, StackResolution};

/// Result of an accepted edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub packages: Vec<Package>,
    /// Set when part of the edit was held back (stack overflow).
    pub warning: Option<PlacementWarning>,
}

impl Placement {
    fn quiet(packages: Vec<Package>) -> Self {
        Self {
            packages,
            warning: None,
        }
    }

    pub fn package(&self, id: u32) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }
}

/// Trailer wall (or floor) to push a package against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wall {
    /// y = 0
    Left,
    /// y = width − footprint
    Right,
    /// x = 0
    Front,
    /// x = length − footprint
    Back,
    /// z = 0
    Floor,
}

impl Wall {
    pub const ALL: [Wall; 5] = [Wall::Left, Wall::Right, Wall::Front, Wall::Back, Wall::Floor];
}

/// Requested dimension/weight changes; `None` leaves a field as is.
///
/// `width`/`height` are the footprint before rotation, `depth` is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl ResizeRequest {
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.depth.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }

    /// All provided values must meet their minimum, or nothing changes.
    fn validate(&self) -> Result<(), PlacementError> {
        let fields = [
            ("width", self.width, package_limits::MIN_WIDTH),
            ("depth", self.depth, package_limits::MIN_DEPTH),
            ("height", self.height, package_limits::MIN_HEIGHT),
            ("weight", self.weight, package_limits::MIN_WEIGHT),
        ];
        for (field, value, min) in fields {
            if let Some(v) = value {
                check_range(field, v, min, f64::INFINITY)?;
            }
        }
        Ok(())
    }
}

/// Clamp a coordinate to `[0, extent − size]`. Oversized boxes pin to 0.
pub fn clamp_axis(value: f64, extent: f64, size: f64) -> f64 {
    value.min(extent - size).max(0.0)
}

/// Pull a package back inside `container` on all three axes.
pub fn clamp_package(package: &mut Package, container: &Container) {
    let (w, h) = package.footprint();
    package.x = clamp_axis(package.x, container.length, w);
    package.y = clamp_axis(package.y, container.width, h);
    package.z = clamp_axis(package.z, container.height, package.depth);
}

/// Re-clamp every package, e.g. after the container shrank.
pub fn clamp_all(packages: &[Package], container: &Container) -> Vec<Package> {
    let mut next = packages.to_vec();
    for p in &mut next {
        clamp_package(p, container);
    }
    next
}

fn locate(packages: &[Package], id: u32) -> Result<usize, PlacementError> {
    packages
        .iter()
        .position(|p| p.id == id)
        .ok_or(PlacementError::UnknownPackage(id))
}

fn check_finite(values: &[(&'static str, f64)]) -> Result<(), PlacementError> {
    for &(field, value) in values {
        if !value.is_finite() {
            return Err(PlacementError::NotFinite { field });
        }
    }
    Ok(())
}

/// Resolve the height of `packages[idx]` from its neighbours, if stacking
/// applies to it. On overflow z is left untouched.
fn settle(
    packages: &mut [Package],
    idx: usize,
    container: &Container,
    stack: AutoStack,
) -> Option<PlacementWarning> {
    let clearance = stack.clearance_for(&packages[idx])?;
    let resolution = {
        let all: &[Package] = packages;
        resolve_stack(&all[idx], all, container.height, clearance)
    };
    match resolution {
        StackResolution::Ground => {
            packages[idx].z = 0.0;
            None
        }
        StackResolution::Supported { z, .. } => {
            packages[idx].z = z;
            None
        }
        StackResolution::Overflow { required_top } => Some(PlacementWarning::StackOverflow {
            id: packages[idx].id,
            required_top,
            container_height: container.height,
        }),
    }
}

/// Nudge by `(dx, dy, dz)`. Auto-stack runs only when the clamped x or y
/// differs from where the package started; pure z nudges and nudges into a
/// wall keep their height.
pub fn translate(
    id: u32,
    packages: &[Package],
    container: &Container,
    delta: (f64, f64, f64),
    stack: AutoStack,
) -> Result<Placement, PlacementError> {
    let (dx, dy, dz) = delta;
    check_finite(&[("dx", dx), ("dy", dy), ("dz", dz)])?;
    let idx = locate(packages, id)?;

    let mut next = packages.to_vec();
    let p = &mut next[idx];
    let before = (p.x, p.y);
    p.x += dx;
    p.y += dy;
    p.z += dz;
    clamp_package(p, container);
    let moved = p.x != before.0 || p.y != before.1;

    let warning = if moved {
        settle(&mut next, idx, container, stack)
    } else {
        None
    };
    Ok(Placement {
        packages: next,
        warning,
    })
}

/// Set `(x, y, z)` directly (numeric inputs, sliders). Auto-stack only runs
/// when x or y actually changed.
pub fn set_absolute_position(
    id: u32,
    packages: &[Package],
    container: &Container,
    position: (f64, f64, f64),
    stack: AutoStack,
) -> Result<Placement, PlacementError> {
    let (x, y, z) = position;
    check_finite(&[("x", x), ("y", y), ("z", z)])?;
    let idx = locate(packages, id)?;

    let mut next = packages.to_vec();
    let p = &mut next[idx];
    let before = (p.x, p.y);
    p.x = x;
    p.y = y;
    p.z = z;
    clamp_package(p, container);
    let moved = p.x != before.0 || p.y != before.1;

    let warning = if moved {
        settle(&mut next, idx, container, stack)
    } else {
        None
    };
    Ok(Placement {
        packages: next,
        warning,
    })
}

/// Drop a package onto a floor-grid cell, then auto-stack.
///
/// Grid cells always lie inside the container, but the footprint may not;
/// the result is clamped like every other edit.
pub fn set_grid_position(
    id: u32,
    packages: &[Package],
    container: &Container,
    cell: (f64, f64),
    stack: AutoStack,
) -> Result<Placement, PlacementError> {
    let (cell_x, cell_y) = cell;
    check_finite(&[("cell_x", cell_x), ("cell_y", cell_y)])?;
    let idx = locate(packages, id)?;

    let mut next = packages.to_vec();
    let p = &mut next[idx];
    p.x = cell_x;
    p.y = cell_y;
    clamp_package(p, container);

    let warning = settle(&mut next, idx, container, stack);
    Ok(Placement {
        packages: next,
        warning,
    })
}

/// Quarter turn clockwise. Never rejected: the package slides back toward
/// the origin if the new footprint would overflow.
pub fn rotate90(
    id: u32,
    packages: &[Package],
    container: &Container,
) -> Result<Placement, PlacementError> {
    let idx = locate(packages, id)?;
    let mut next = packages.to_vec();
    let p = &mut next[idx];
    p.rotation = p.rotation.next();
    clamp_package(p, container);
    Ok(Placement::quiet(next))
}

/// Push against a wall or the floor. No auto-stack side effect.
pub fn align_to_wall(
    id: u32,
    packages: &[Package],
    container: &Container,
    wall: Wall,
) -> Result<Placement, PlacementError> {
    let idx = locate(packages, id)?;
    let mut next = packages.to_vec();
    let p = &mut next[idx];
    let (w, h) = p.footprint();
    match wall {
        Wall::Left => p.y = 0.0,
        Wall::Right => p.y = (container.width - h).max(0.0),
        Wall::Front => p.x = 0.0,
        Wall::Back => p.x = (container.length - w).max(0.0),
        Wall::Floor => p.z = 0.0,
    }
    Ok(Placement::quiet(next))
}

/// Change dimensions and/or weight, then re-clamp in the current container.
pub fn resize(
    id: u32,
    packages: &[Package],
    container: &Container,
    request: &ResizeRequest,
) -> Result<Placement, PlacementError> {
    request.validate()?;
    let idx = locate(packages, id)?;
    if request.is_empty() {
        return Ok(Placement::quiet(packages.to_vec()));
    }

    let mut next = packages.to_vec();
    let p = &mut next[idx];
    if let Some(v) = request.width {
        p.width = v;
    }
    if let Some(v) = request.depth {
        p.depth = v;
    }
    if let Some(v) = request.height {
        p.height = v;
    }
    if let Some(v) = request.weight {
        p.weight = v;
    }
    clamp_package(p, container);
    Ok(Placement::quiet(next))
}

/// Remove a package. Unknown ids leave the list unchanged.
pub fn delete(id: u32, packages: &[Package]) -> Vec<Package> {
    packages.iter().filter(|p| p.id != id).cloned().collect()
}
