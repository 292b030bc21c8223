// extensions/builder.rs
//
// Fluent tween configuration and activation.
//
// Usage:
//   TweenBuilder::new(duration, target)
//       .with_ease(Easing::CubicOut)
//       .with_loops(LoopMode::PingPong, 4)
//       .with_delay(0.2)
//       .build(&PositionTweener, &mut data, &transform)?;

use super::easing::Easing;
use super::loop_policy::LoopMode;
use super::tween::{TweenConfig, TweenData};
use crate::api::error::{ConfigIssue, Result};
use crate::tweeners::Tweener;

/// Accumulates tween options; validated and snapshotted by [`TweenBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenBuilder<V> {
    duration: f32,
    target: V,
    easing: Easing,
    loop_mode: LoopMode,
    loop_count: i32,
    delay: f32,
    start: Option<V>,
}

impl<V: Copy> TweenBuilder<V> {
    /// A linear, non-looping tween toward `target` over `duration` seconds.
    pub fn new(duration: f32, target: V) -> Self {
        Self {
            duration,
            target,
            easing: Easing::Linear,
            loop_mode: LoopMode::None,
            loop_count: 0,
            delay: 0.0,
            start: None,
        }
    }

    // -- Builder methods --

    pub fn with_target(mut self, target: V) -> Self {
        self.target = target;
        self
    }

    pub fn with_ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Loop `count` times (0 = forever unless `mode` is `None`).
    pub fn with_loops(mut self, mode: LoopMode, count: i32) -> Self {
        self.loop_mode = mode;
        self.loop_count = count;
        self
    }

    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    /// Start from `start` instead of the component's current value.
    pub fn with_start_value(mut self, start: V) -> Self {
        self.start = Some(start);
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn target(&self) -> V {
        self.target
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn loop_count(&self) -> i32 {
        self.loop_count
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn start(&self) -> Option<V> {
        self.start
    }

    /// Validate and snapshot the accumulated options.
    pub fn config(&self) -> Result<TweenConfig<V>> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ConfigIssue::NonPositiveDuration(self.duration).into());
        }
        if self.loop_count < 0 {
            return Err(ConfigIssue::NegativeLoopCount(self.loop_count).into());
        }
        if !(self.delay.is_finite() && self.delay >= 0.0) {
            return Err(ConfigIssue::NegativeDelay(self.delay).into());
        }

        Ok(TweenConfig {
            duration: self.duration,
            target: self.target,
            easing: self.easing,
            loop_mode: self.loop_mode,
            loop_count: self.loop_count as u32,
            delay: self.delay,
            start: self.start,
        })
    }

    /// Seed `data` and raise its enable flag.
    ///
    /// All-or-nothing: an invalid configuration returns an error and leaves
    /// `data` untouched. Building over a running record restarts it.
    /// `LoopMode::Incremental` is rejected for tweeners that cannot chain end values.
    pub fn build<T>(&self, tweener: &T, data: &mut TweenData<V>, component: &T::Component) -> Result<()>
    where
        T: Tweener<Value = V>,
    {
        let config = self.config()?;
        if config.loop_mode == LoopMode::Incremental && !T::CHAINS_END_VALUES {
            return Err(ConfigIssue::UnchainableLoopMode.into());
        }
        let start = match config.start {
            Some(start) => start,
            None => tweener.default_start_value(component),
        };
        data.activate(config, start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::TweenError;
    use crate::components::transform::Transform;
    use crate::extensions::tween::{tick_record, TweenPhase};
    use crate::tweeners::{PositionTweener, ShakeAxes, ShakePositionTweener};
    use glam::Vec3;

    #[test]
    fn build_snapshots_options() {
        let transform = Transform::from_position(Vec3::Y);
        let mut data = TweenData::default();
        TweenBuilder::new(2.0, Vec3::X)
            .with_ease(Easing::SineOut)
            .with_loops(LoopMode::PingPong, 3)
            .with_delay(0.25)
            .build(&PositionTweener, &mut data, &transform)
            .unwrap();

        let config = data.config();
        assert_eq!(config.duration, 2.0);
        assert_eq!(config.easing, Easing::SineOut);
        assert_eq!(config.loop_mode, LoopMode::PingPong);
        assert_eq!(config.loop_count, 3);
        assert_eq!(config.delay, 0.25);
        assert_eq!(data.start_value(), Vec3::Y);
        assert_eq!(data.elapsed(), 0.0);
        assert!(data.is_active());
    }

    #[test]
    fn explicit_start_overrides_component() {
        let transform = Transform::from_position(Vec3::Y);
        let mut data = TweenData::default();
        TweenBuilder::new(1.0, Vec3::X)
            .with_start_value(Vec3::Z)
            .build(&PositionTweener, &mut data, &transform)
            .unwrap();
        assert_eq!(data.start_value(), Vec3::Z);
    }

    #[test]
    fn invalid_config_leaves_record_untouched() {
        let transform = Transform::default();
        let mut data: TweenData<Vec3> = TweenData::default();

        for builder in [
            TweenBuilder::new(-1.0, Vec3::X),
            TweenBuilder::new(0.0, Vec3::X),
            TweenBuilder::new(f32::NAN, Vec3::X),
            TweenBuilder::new(1.0, Vec3::X).with_loops(LoopMode::Restart, -1),
            TweenBuilder::new(1.0, Vec3::X).with_delay(-0.5),
        ] {
            let err = builder.build(&PositionTweener, &mut data, &transform).unwrap_err();
            assert!(matches!(err, TweenError::InvalidConfig(_)));
            assert!(!data.is_active());
            assert_eq!(data, TweenData::default());
        }
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let builder = TweenBuilder::new(1.5, Vec3::ZERO).with_ease(Easing::BackOut);

        let mut first = TweenData::default();
        let mut second = TweenData::default();
        builder.build(&PositionTweener, &mut first, &transform).unwrap();
        builder.build(&PositionTweener, &mut second, &transform).unwrap();
        builder.build(&PositionTweener, &mut second, &transform).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rebuild_restarts_running_tween() {
        let mut transform = Transform::default();
        let mut data = TweenData::default();
        let builder = TweenBuilder::new(1.0, Vec3::X);
        builder.build(&PositionTweener, &mut data, &transform).unwrap();
        tick_record(&PositionTweener, &mut data, &mut transform, 0.6);

        builder.build(&PositionTweener, &mut data, &transform).unwrap();
        assert_eq!(data.elapsed(), 0.0);
        assert_eq!(data.phase(), TweenPhase::Running);
        assert!((data.start_value().x - 0.6).abs() < 1e-5);
    }

    #[test]
    fn rebuild_revives_finished_record() {
        let mut transform = Transform::default();
        let mut data = TweenData::default();
        let builder = TweenBuilder::new(0.5, Vec3::X);
        builder.build(&PositionTweener, &mut data, &transform).unwrap();
        tick_record(&PositionTweener, &mut data, &mut transform, 1.0);
        assert_eq!(data.phase(), TweenPhase::Finished);

        builder.build(&PositionTweener, &mut data, &transform).unwrap();
        assert!(data.is_active());
    }

    #[test]
    fn zero_loop_count_is_valid() {
        assert!(TweenBuilder::new(1.0, Vec3::X).with_loops(LoopMode::Restart, 0).config().is_ok());
    }

    #[test]
    fn shake_rejects_incremental_loops() {
        let shaker = ShakePositionTweener::new(ShakeAxes::Xy);
        let transform = Transform::default();
        let mut data: TweenData<Vec3> = TweenData::default();

        let err = TweenBuilder::new(1.0, ShakePositionTweener::payload(10.0, 0.5))
            .with_loops(LoopMode::Incremental, 3)
            .build(&shaker, &mut data, &transform)
            .unwrap_err();
        assert!(matches!(err, TweenError::InvalidConfig(ConfigIssue::UnchainableLoopMode)));
        assert_eq!(data, TweenData::default());

        // Repeating a shake is fine.
        TweenBuilder::new(1.0, ShakePositionTweener::payload(10.0, 0.5))
            .with_loops(LoopMode::Restart, 3)
            .build(&shaker, &mut data, &transform)
            .unwrap();
        assert!(data.is_active());
    }

    #[test]
    fn blending_tweeners_accept_incremental_loops() {
        let transform = Transform::default();
        let mut data = TweenData::default();
        TweenBuilder::new(1.0, Vec3::X)
            .with_loops(LoopMode::Incremental, 2)
            .build(&PositionTweener, &mut data, &transform)
            .unwrap();
        assert!(data.is_active());
    }
}
