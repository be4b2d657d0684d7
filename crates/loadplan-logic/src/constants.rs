//! Editor constants: trailer defaults, edit steps, package limits, colours.
//!
//! These are plain `f64`/`&str` constants with no runtime dependency.
//! Both the editor shell and the headless harness use these.

/// Standard semi-trailer interior, in meters.
pub mod truck {
    pub const LENGTH: f64 = 13.6;
    pub const WIDTH: f64 = 2.45;
    pub const HEIGHT: f64 = 2.7;

    // Accepted ranges when the user resizes the trailer
    pub const MIN_LENGTH: f64 = 4.0;
    pub const MAX_LENGTH: f64 = 50.0;
    pub const MIN_WIDTH: f64 = 2.0;
    pub const MAX_WIDTH: f64 = 10.0;
    pub const MIN_HEIGHT: f64 = 2.0;
    pub const MAX_HEIGHT: f64 = 10.0;
}

pub mod steps {
    /// Keyboard / button nudge distance.
    pub const MOVE: f64 = 0.25;
    /// Gap left between a stacked package and the one supporting it.
    pub const STACK_CLEARANCE: f64 = 0.1;
    /// Edge length of one floor-grid cell.
    pub const GRID_CELL: f64 = 1.0;
    /// Smallest grid cell a configuration may ask for.
    pub const MIN_GRID_CELL: f64 = 0.1;
}

/// Smallest values a resize may set.
pub mod package_limits {
    pub const MIN_WIDTH: f64 = 0.1;
    pub const MIN_DEPTH: f64 = 0.5;
    pub const MIN_HEIGHT: f64 = 0.5;
    pub const MIN_WEIGHT: f64 = 50.0;
}

/// Shape of a freshly added package.
pub mod package_defaults {
    pub const WIDTH: f64 = 3.0;
    pub const HEIGHT: f64 = 1.2;
    pub const DEPTH: f64 = 0.86;
    pub const WEIGHT: f64 = 300.0;
    pub const NAME_PREFIX: &str = "SROR";
}

pub mod palette {
    pub const BLUE: &str = "rgb(59, 130, 246)";
    pub const ORANGE: &str = "rgb(234, 88, 12)";
    pub const GREEN: &str = "rgb(34, 197, 94)";
    pub const PURPLE: &str = "rgb(168, 85, 247)";
    pub const PINK: &str = "rgb(236, 72, 153)";

    pub const ALL: [&str; 5] = [BLUE, ORANGE, GREEN, PURPLE, PINK];

    /// Stable colour for a package id (ids start at 1).
    pub fn color_for(id: u32) -> &'static str {
        ALL[(id.saturating_sub(1) as usize) % ALL.len()]
    }
}
