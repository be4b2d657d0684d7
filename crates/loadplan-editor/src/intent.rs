//! Raw UI events, before they are validated into commands.
//!
//! Text fields arrive as strings and keyboard events as key names; turning
//! them into numbers and directions happens here so every front end shares
//! the same rules.

use serde::{Deserialize, Serialize};

use loadplan_logic::command::Direction;
use loadplan_logic::error::PlacementError;
use loadplan_logic::placement::Wall;

/// Coordinate driven by a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Field of the resize form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeField {
    Width,
    Depth,
    Height,
    Weight,
}

impl ResizeField {
    pub fn name(self) -> &'static str {
        match self {
            ResizeField::Width => "width",
            ResizeField::Depth => "depth",
            ResizeField::Height => "height",
            ResizeField::Weight => "weight",
        }
    }
}

/// One user interaction as the front end reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    AddPackage,
    Delete(u32),
    Select(u32),
    Deselect,
    /// Key name as reported by the browser/toolkit (`"ArrowLeft"`, `"r"`).
    Key(String),
    Nudge(Direction),
    PositionInput { x: String, y: String, z: String },
    Slider(Axis, f64),
    GridClick { cell_x: f64, cell_y: f64 },
    Rotate,
    Align(Wall),
    ResizeInput(ResizeField, String),
    ContainerInput {
        length: String,
        width: String,
        height: String,
    },
    ResetContainer,
    ToggleAutoStack,
    ToggleStackable,
    /// Full page URL; its query decides what gets loaded.
    LoadUrl(String),
    /// Order number typed into the order box.
    LoadOrder(String),
}

/// What a key press does to the selected package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Nudge(Direction),
    Rotate,
}

/// Map a key name to an action. Case-insensitive; unknown keys give `None`.
///
/// Left/right run across the trailer (y), up/down along it (x), and
/// PageUp/PageDown lift and lower.
pub fn key_action(key: &str) -> Option<KeyAction> {
    let action = match key.to_ascii_lowercase().as_str() {
        "arrowleft" => KeyAction::Nudge(Direction::YMinus),
        "arrowright" => KeyAction::Nudge(Direction::YPlus),
        "arrowup" => KeyAction::Nudge(Direction::XMinus),
        "arrowdown" => KeyAction::Nudge(Direction::XPlus),
        "pageup" => KeyAction::Nudge(Direction::ZPlus),
        "pagedown" => KeyAction::Nudge(Direction::ZMinus),
        "r" => KeyAction::Rotate,
        _ => return None,
    };
    Some(action)
}

/// Parse a numeric text field. Empty or unparsable text is rejected.
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, PlacementError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| PlacementError::InvalidNumber {
            field,
            raw: raw.to_string(),
        })?;
    if !value.is_finite() {
        return Err(PlacementError::NotFinite { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_action("ArrowLeft"), Some(KeyAction::Nudge(Direction::YMinus)));
        assert_eq!(key_action("ARROWDOWN"), Some(KeyAction::Nudge(Direction::XPlus)));
        assert_eq!(key_action("PageUp"), Some(KeyAction::Nudge(Direction::ZPlus)));
        assert_eq!(key_action("R"), Some(KeyAction::Rotate));
        assert_eq!(key_action("q"), None);
        assert_eq!(key_action(""), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("x", " 2.5 ").unwrap(), 2.5);
        assert_eq!(
            parse_number("x", ""),
            Err(PlacementError::InvalidNumber {
                field: "x",
                raw: String::new()
            })
        );
        assert!(matches!(
            parse_number("y", "abc"),
            Err(PlacementError::InvalidNumber { field: "y", .. })
        ));
        assert_eq!(
            parse_number("z", "inf"),
            Err(PlacementError::NotFinite { field: "z" })
        );
    }
}
