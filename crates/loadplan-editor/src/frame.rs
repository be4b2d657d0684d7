//! Render frames: everything a front end needs to draw one state.

use serde::Serialize;

use loadplan_logic::command::EditorState;
use loadplan_logic::geometry::Rotation;
use loadplan_logic::package::{Container, Package};
use loadplan_logic::summary::LoadSummary;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageView {
    pub id: u32,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub rotation: Rotation,
    /// Extent along x after rotation.
    pub footprint_x: f64,
    /// Extent along y after rotation.
    pub footprint_y: f64,
    pub weight: f64,
    pub stackable: bool,
    pub color: String,
    pub selected: bool,
}

impl PackageView {
    fn of(package: &Package, selected: Option<u32>) -> Self {
        let (footprint_x, footprint_y) = package.footprint();
        Self {
            id: package.id,
            name: package.name.clone(),
            x: package.x,
            y: package.y,
            z: package.z,
            width: package.width,
            height: package.height,
            depth: package.depth,
            rotation: package.rotation,
            footprint_x,
            footprint_y,
            weight: package.weight,
            stackable: package.stackable,
            color: package.color.clone(),
            selected: selected == Some(package.id),
        }
    }
}

/// Clickable floor cell; `(x, y)` is the corner nearest the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridCell {
    pub x: f64,
    pub y: f64,
}

/// Largest grid a frame carries: the biggest trailer at the smallest
/// configurable cell.
pub const MAX_GRID_CELLS: usize = 50_000;

/// Whole cells covering the floor: `floor(L / cell) × floor(W / cell)`.
///
/// Empty when `cell` is not a positive number or the grid would exceed
/// [`MAX_GRID_CELLS`].
pub fn grid_cells(container: &Container, cell: f64) -> Vec<GridCell> {
    if !(cell > 0.0 && cell.is_finite()) {
        return Vec::new();
    }
    let along = (container.length / cell).floor() as usize;
    let across = (container.width / cell).floor() as usize;
    let count = match along.checked_mul(across) {
        Some(count) if count <= MAX_GRID_CELLS => count,
        _ => return Vec::new(),
    };
    let mut cells = Vec::with_capacity(count);
    for i in 0..along {
        for j in 0..across {
            cells.push(GridCell {
                x: i as f64 * cell,
                y: j as f64 * cell,
            });
        }
    }
    cells
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub container: Container,
    pub packages: Vec<PackageView>,
    pub summary: LoadSummary,
    pub utilization_percent: f64,
    pub selected: Option<u32>,
    pub auto_stack: bool,
    /// Order the current set was loaded for, if any.
    pub order: Option<String>,
    /// Last rejection or warning, for a status line.
    pub warning: Option<String>,
    pub grid: Vec<GridCell>,
}

impl Frame {
    pub fn build(state: &EditorState, order: Option<&str>, warning: Option<&str>) -> Self {
        let container = *state.store.container();
        let summary = state.store.summary();
        Self {
            container,
            packages: state
                .store
                .list()
                .iter()
                .map(|p| PackageView::of(p, state.selected))
                .collect(),
            summary,
            utilization_percent: summary.utilization_percent(),
            selected: state.selected,
            auto_stack: state.auto_stack,
            order: order.map(str::to_string),
            warning: warning.map(str::to_string),
            grid: grid_cells(&container, state.config.grid_cell),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
