//! Contract-violation error types with miette diagnostics.
//!
//! These cover programmer errors only: bad construction parameters and
//! out-of-range inputs. Expected per-item outcomes (an element that cannot
//! be placed, a curved wall that cannot be dimensioned) are recorded as
//! data on the result types, never as errors.

use miette::Diagnostic;
use thiserror::Error;

/// A violated input contract. These fail fast and are never coerced,
/// clamped, or silently defaulted.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("buffer margin must be non-negative, got {value}")]
    #[diagnostic(
        code(tagline::collision::negative_margin),
        help("a zero margin disables clearance checking; use 0.0 instead of a negative value")
    )]
    NegativeBufferMargin { value: f64 },

    #[error("tag footprint must have positive extents, got {width} x {height}")]
    #[diagnostic(code(tagline::collision::invalid_footprint))]
    InvalidFootprint { width: f64, height: f64 },

    #[error("base offset distance must be positive, got {value}")]
    #[diagnostic(code(tagline::strategy::non_positive_offset))]
    NonPositiveOffset { value: f64 },

    #[error("alternative attempt number must be in 2..=10, got {attempt}")]
    #[diagnostic(
        code(tagline::strategy::attempt_out_of_range),
        help("attempt 1 is reserved for the preferred placement; use `preferred` for it")
    )]
    AttemptOutOfRange { attempt: u8 },

    #[error("dimension offset distance must be positive, got {value} mm")]
    #[diagnostic(code(tagline::dimension::non_positive_offset))]
    NonPositiveDimensionOffset { value: f64 },

    #[error("unknown view type: {name:?}")]
    #[diagnostic(
        code(tagline::strategy::unknown_view_type),
        help("expected one of: FloorPlan, Elevation, Section, ThreeD")
    )]
    UnknownViewType { name: String },
}
