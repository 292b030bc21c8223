// extensions/mod.rs
//
// Tween core: easing curves, loop policy, tween records and their builder.
// Nothing here owns storage — records and components are borrowed from the host
// or from `core::store::TweenStore`.

pub mod builder;
pub mod easing;
pub mod loop_policy;
pub mod tween;

pub use builder::TweenBuilder;
pub use easing::{ease, lerp, Easing};
pub use loop_policy::{resolve, LoopMode, LoopResolution};
pub use tween::{tick_record, TickOutcome, TweenConfig, TweenData, TweenPhase};
