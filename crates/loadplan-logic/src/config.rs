//! Editor configuration and its validation.
//!
//! A front end builds an `EditorConfig` (usually `Default`, or read from
//! JSON) before opening a session. Validation returns every problem found,
//! independent of any UI.
//!
//! ```
//! use loadplan_logic::config::{validate_config, EditorConfig};
//!
//! let mut config = EditorConfig::default();
//! config.move_step = 0.1;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{steps, truck};
use crate::package::Container;
use crate::stacking::AutoStack;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Trailer a session opens with, and what "reset" returns to.
    pub container: Container,
    /// Nudge distance for keyboard/button moves (m).
    pub move_step: f64,
    /// Gap between a stacked package and its support (m).
    pub stack_clearance: f64,
    /// Floor-grid cell size (m).
    pub grid_cell: f64,
    /// Whether auto-stack starts enabled.
    pub auto_stack: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            container: Container::default(),
            move_step: steps::MOVE,
            stack_clearance: steps::STACK_CLEARANCE,
            grid_cell: steps::GRID_CELL,
            auto_stack: false,
        }
    }
}

impl EditorConfig {
    /// Stacking rule for the current toggle state.
    pub fn auto_stack_rule(&self, enabled: bool) -> AutoStack {
        if enabled {
            AutoStack::On {
                clearance: self.stack_clearance,
            }
        } else {
            AutoStack::Off
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("move step must be positive, got {0}")]
    NonPositiveStep(f64),
    #[error("stack clearance must not be negative, got {0}")]
    NegativeClearance(f64),
    #[error("grid cell must be at least {min} m, got {0}", min = steps::MIN_GRID_CELL)]
    GridCellTooSmall(f64),
    /// Default trailer outside the range a user could resize to.
    #[error("default container {length}×{width}×{height} is outside the accepted ranges")]
    ContainerOutOfRange { length: f64, width: f64, height: f64 },
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &EditorConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !(config.move_step > 0.0 && config.move_step.is_finite()) {
        errors.push(ConfigError::NonPositiveStep(config.move_step));
    }
    if !(config.stack_clearance >= 0.0 && config.stack_clearance.is_finite()) {
        errors.push(ConfigError::NegativeClearance(config.stack_clearance));
    }
    if !(config.grid_cell >= steps::MIN_GRID_CELL && config.grid_cell.is_finite()) {
        errors.push(ConfigError::GridCellTooSmall(config.grid_cell));
    }

    let c = &config.container;
    let in_range = (truck::MIN_LENGTH..=truck::MAX_LENGTH).contains(&c.length)
        && (truck::MIN_WIDTH..=truck::MAX_WIDTH).contains(&c.width)
        && (truck::MIN_HEIGHT..=truck::MAX_HEIGHT).contains(&c.height);
    if !in_range {
        errors.push(ConfigError::ContainerOutOfRange {
            length: c.length,
            width: c.width,
            height: c.height,
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&EditorConfig::default()).is_empty());
    }

    #[test]
    fn test_collects_every_error() {
        let config = EditorConfig {
            container: Container {
                length: 60.0,
                width: 2.45,
                height: 2.7,
            },
            move_step: 0.0,
            stack_clearance: -0.1,
            grid_cell: f64::NAN,
            auto_stack: true,
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert_eq!(errors[0], ConfigError::NonPositiveStep(0.0));
        assert!(matches!(errors[3], ConfigError::ContainerOutOfRange { .. }));
    }

    #[test]
    fn test_grid_cell_floor() {
        let tiny = EditorConfig {
            grid_cell: 1e-4,
            ..Default::default()
        };
        assert_eq!(validate_config(&tiny), vec![ConfigError::GridCellTooSmall(1e-4)]);

        let smallest = EditorConfig {
            grid_cell: steps::MIN_GRID_CELL,
            ..Default::default()
        };
        assert!(validate_config(&smallest).is_empty());
    }

    #[test]
    fn test_broken_container_is_refused() {
        let config = EditorConfig {
            container: Container {
                length: f64::NAN,
                width: -1.0,
                height: 0.0,
            },
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(matches!(errors[0], ConfigError::ContainerOutOfRange { .. }));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"move_step": 0.5, "auto_stack": true}"#).unwrap();
        assert_eq!(config.move_step, 0.5);
        assert!(config.auto_stack);
        assert_eq!(config.container, Container::default());
        assert_eq!(config.stack_clearance, steps::STACK_CLEARANCE);
    }

    #[test]
    fn test_auto_stack_rule() {
        let config = EditorConfig {
            stack_clearance: 0.2,
            ..Default::default()
        };
        assert_eq!(config.auto_stack_rule(false), AutoStack::Off);
        assert_eq!(config.auto_stack_rule(true), AutoStack::On { clearance: 0.2 });
    }
}
