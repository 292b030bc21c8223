// config.rs
//
// Host-facing tween settings, loaded from JSON. Missing fields take defaults;
// values are validated only when a builder is built.
//
// Usage:
//   let settings = TweenSettings::from_json(&json)?;
//   if let Some(builder) = settings.position.to_builder() {
//       store.push_request(TweenRequest::new(id, builder));
//   }

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::Result;
use crate::extensions::builder::TweenBuilder;
use crate::extensions::easing::Easing;
use crate::extensions::loop_policy::LoopMode;
use crate::tweeners::{ShakeAxes, ShakePositionTweener};

/// Which position tween a trigger should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TweenPositionType {
    /// Position triggers are ignored.
    None,
    #[default]
    Xyz,
}

/// Which shake a trigger should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShakePositionType {
    /// Shake triggers are ignored.
    None,
    #[default]
    Xy,
    Xyz,
}

/// Settings for position tweens started by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenPositionConfigs {
    pub tween_position_type: TweenPositionType,
    pub duration: f32,
    pub target_value: Vec3,
    pub easing: Easing,
    pub loop_mode: LoopMode,
    pub loop_count: i32,
    pub delay_seconds: f32,
    /// Start from `start_value` instead of the entity's current position.
    pub use_custom_start_value: bool,
    pub start_value: Vec3,
}

impl Default for TweenPositionConfigs {
    fn default() -> Self {
        Self {
            tween_position_type: TweenPositionType::Xyz,
            duration: 1.0,
            target_value: Vec3::ZERO,
            easing: Easing::Linear,
            loop_mode: LoopMode::None,
            loop_count: 0,
            delay_seconds: 0.0,
            use_custom_start_value: false,
            start_value: Vec3::ZERO,
        }
    }
}

impl TweenPositionConfigs {
    /// Builder for a position tween, or `None` when position tweens are disabled.
    pub fn to_builder(&self) -> Option<TweenBuilder<Vec3>> {
        if self.tween_position_type == TweenPositionType::None {
            return None;
        }
        let builder = TweenBuilder::new(self.duration, self.target_value)
            .with_ease(self.easing)
            .with_loops(self.loop_mode, self.loop_count)
            .with_delay(self.delay_seconds);
        Some(if self.use_custom_start_value {
            builder.with_start_value(self.start_value)
        } else {
            builder
        })
    }
}

/// Settings for position shakes started by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakePositionConfigs {
    pub shake_position_type: ShakePositionType,
    pub duration: f32,
    /// Noise cells crossed over the whole shake.
    pub frequency: f32,
    /// Peak offset in world units.
    pub intensity: f32,
    pub delay_seconds: f32,
    pub use_custom_start_value: bool,
    pub start_value: Vec3,
}

impl Default for ShakePositionConfigs {
    fn default() -> Self {
        Self {
            shake_position_type: ShakePositionType::Xy,
            duration: 0.5,
            frequency: 20.0,
            intensity: 0.25,
            delay_seconds: 0.0,
            use_custom_start_value: false,
            start_value: Vec3::ZERO,
        }
    }
}

impl ShakePositionConfigs {
    /// Tweener matching `shake_position_type`, or `None` when shakes are disabled.
    pub fn tweener(&self) -> Option<ShakePositionTweener> {
        match self.shake_position_type {
            ShakePositionType::None => None,
            ShakePositionType::Xy => Some(ShakePositionTweener::new(ShakeAxes::Xy)),
            ShakePositionType::Xyz => Some(ShakePositionTweener::new(ShakeAxes::Xyz)),
        }
    }

    /// Builder for a shake, or `None` when shakes are disabled.
    ///
    /// The returned builder does not loop. Adding `LoopMode::Incremental` to it
    /// fails at build time with `ConfigIssue::UnchainableLoopMode`.
    pub fn to_builder(&self) -> Option<TweenBuilder<Vec3>> {
        if self.shake_position_type == ShakePositionType::None {
            return None;
        }
        let builder = TweenBuilder::new(self.duration, ShakePositionTweener::payload(self.frequency, self.intensity))
            .with_delay(self.delay_seconds);
        Some(if self.use_custom_start_value {
            builder.with_start_value(self.start_value)
        } else {
            builder
        })
    }
}

/// All tween settings a host passes into its activation calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenSettings {
    pub position: TweenPositionConfigs,
    pub shake: ShakePositionConfigs,
}

impl TweenSettings {
    /// Parse settings from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings = serde_json::from_str(json)?;
        log::info!("tween settings loaded");
        Ok(settings)
    }
}
