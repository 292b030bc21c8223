//! Error types for tween activation, configuration loading and request decoding.
//!
//! Ticking never fails: inactive records are skipped silently and numeric
//! payloads are not validated on the hot path.

use thiserror::Error;

use crate::api::types::EntityId;

/// Alias for `std::result::Result<T, TweenError>`.
pub type Result<T> = std::result::Result<T, TweenError>;

/// Why a tween configuration was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigIssue {
    /// Duration was zero, negative or not finite.
    #[error("duration must be a finite value > 0 (got {0})")]
    NonPositiveDuration(f32),

    /// Loop count below zero.
    #[error("loop count must be >= 0 (got {0})")]
    NegativeLoopCount(i32),

    /// Delay was negative or not finite.
    #[error("delay must be a finite value >= 0 (got {0})")]
    NegativeDelay(f32),

    /// Incremental looping on a tweener whose payload is not a target value.
    #[error("incremental looping is not supported by this tweener")]
    UnchainableLoopMode,
}

/// The main error type of the tween engine.
#[derive(Error, Debug)]
pub enum TweenError {
    /// Rejected at `build` time, before any record is touched.
    #[error("invalid tween config: {0}")]
    InvalidConfig(#[from] ConfigIssue),

    /// A request named an entity the store does not hold.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    /// A flat wire record carried a value that does not decode.
    #[error("malformed tween request: bad {field} value {value}")]
    MalformedRequest {
        /// Which field of the record was bad.
        field: &'static str,
        /// The raw value read from the buffer.
        value: f32,
    },

    /// Settings JSON could not be parsed.
    #[error("failed to parse tween settings: {0}")]
    Parse(#[from] serde_json::Error),
}
