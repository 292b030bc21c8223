pub mod api;
pub mod bridge;
pub mod components;
pub mod config;
pub mod core;
pub mod extensions;
pub mod input;
pub mod tweeners;

// Re-export key types at crate root for convenience
pub use api::error::{ConfigIssue, Result, TweenError};
pub use api::types::EntityId;
pub use bridge::protocol::{decode_requests, encode_requests, RequestRecord, REQUEST_FLOATS};
pub use components::transform::Transform;
pub use config::{ShakePositionConfigs, ShakePositionType, TweenPositionConfigs, TweenPositionType, TweenSettings};
pub use crate::core::store::TweenStore;
pub use input::queue::{CommandQueue, TweenCommand, TweenRequest};
pub use tweeners::{PositionTweener, RotationTweener, ScaleTweener, ShakeAxes, ShakePositionTweener, Tweener};

pub use extensions::{
    ease, lerp, resolve, tick_record,
    Easing, LoopMode, LoopResolution,
    TickOutcome, TweenBuilder, TweenConfig, TweenData, TweenPhase,
};
