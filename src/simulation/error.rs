//! Error types for the dilation core
//!
//! `DomainError` covers invalid physical input caught at the model boundary,
//! so NaN/Infinity never reaches an accumulated clock

use thiserror::Error;

/// Invalid physical input rejected by the dilation model
///
/// Each variant is local to one observer and one tick; the surrounding
/// tick loop records it and continues with the previous valid state
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("speed {speed} is at or beyond the speed of light {c}")]
    SuperluminalSpeed { speed: f64, c: f64 },

    #[error("distance to gravity source must be positive, got {0}")]
    NonPositiveDistance(f64),

    #[error("gravity source mass must be positive, got {0}")]
    NonPositiveMass(f64),
}
