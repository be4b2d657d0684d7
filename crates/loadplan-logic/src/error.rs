//! Validation outcomes for placement edits.
//!
//! None of these are faults: an `Err` means "nothing happened" and the
//! caller keeps its previous state, a warning means the edit went through
//! with one component held back.

use thiserror::Error;

/// Why an edit was rejected. The prior state stays authoritative.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// No package with this id in the collection.
    #[error("package #{0} does not exist")]
    UnknownPackage(u32),

    /// The command needs a selected package and none is selected.
    #[error("no package selected")]
    NoSelection,

    /// Numeric value outside the accepted range.
    #[error("{field} = {value} is outside the accepted range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A package dimension of zero or less.
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// NaN or infinite input.
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    /// Text input that does not parse as a number (or is empty).
    #[error("{field}: {raw:?} is not a number")]
    InvalidNumber { field: &'static str, raw: String },
}

/// The edit was applied, but part of it was held back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementWarning {
    /// Auto-stack would push the package through the roof; its height was
    /// left where it was while the horizontal move still applied.
    #[error(
        "cannot stack package #{id}: top would reach {required_top:.2} m, container height is {container_height:.2} m"
    )]
    StackOverflow {
        id: u32,
        required_top: f64,
        container_height: f64,
    },
}

/// An external package descriptor that failed to parse. Only that
/// descriptor is skipped; the rest of the batch still loads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("package descriptor #{index}: {reason}")]
pub struct MalformedDescriptor {
    /// Zero-based position of the descriptor in the batch.
    pub index: usize,
    pub reason: String,
}

/// Rotation that is not one of the four quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rotation must be a multiple of 90 degrees, got {0}")]
pub struct InvalidRotation(pub i64);
