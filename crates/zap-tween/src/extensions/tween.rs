// extensions/tween.rs
//
// Tween records and the per-record update step.
// A record is a reusable slot: the host owns its storage, `TweenBuilder::build`
// fills it, `tick_record` advances it until it finishes or is cancelled.
//
// Usage:
//   let mut data = TweenData::default();
//   TweenBuilder::new(0.5, target).with_ease(Easing::QuadOut)
//       .build(&PositionTweener, &mut data, &transform)?;
//   tick_record(&PositionTweener, &mut data, &mut transform, dt);

use super::easing::Easing;
use super::loop_policy::{self, LoopMode, SNAP_TOLERANCE};
use crate::tweeners::Tweener;

/// Immutable snapshot of a validated tween configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenConfig<V> {
    /// Seconds per cycle, always > 0.
    pub duration: f32,
    /// Target value, or tweener-specific payload.
    pub target: V,
    pub easing: Easing,
    pub loop_mode: LoopMode,
    /// Number of cycles; 0 loops forever when `loop_mode` is not `None`.
    pub loop_count: u32,
    /// Seconds to wait before the first cycle.
    pub delay: f32,
    /// Explicit start value; `None` means read it from the component at activation.
    pub start: Option<V>,
}

impl<V: Default> Default for TweenConfig<V> {
    fn default() -> Self {
        Self {
            duration: 1.0,
            target: V::default(),
            easing: Easing::Linear,
            loop_mode: LoopMode::None,
            loop_count: 0,
            delay: 0.0,
            start: None,
        }
    }
}

/// Lifecycle phase of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenPhase {
    /// Never activated, or cancelled.
    #[default]
    Idle,
    /// Activated; burning through the start delay.
    Delaying,
    /// Interpolating.
    Running,
    /// Played all cycles. Inert until rebuilt.
    Finished,
}

/// What one tick did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Record was inactive; nothing touched.
    Skipped,
    /// Still inside the start delay; component untouched.
    Delaying,
    /// Component written, tween continues.
    Running,
    /// Component written with the final value and the record deactivated.
    Finished,
}

/// Per-entity animation state. One slot per entity per tweener kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TweenData<V> {
    config: TweenConfig<V>,
    /// Seconds of playback since the delay ran out. Kept in f64 so long runs of
    /// f32 frame deltas still sum onto cycle boundaries.
    elapsed: f64,
    delay_remaining: f64,
    /// Start value frozen at activation.
    start: V,
    /// Incremental chaining: cycle the `cycle_start`/`cycle_target` pair belongs to.
    cycle: u32,
    cycle_start: V,
    cycle_target: V,
    phase: TweenPhase,
    active: bool,
}

impl<V: Copy> TweenData<V> {
    /// Seed the record for a new run. Overwrites whatever was there.
    pub(crate) fn activate(&mut self, config: TweenConfig<V>, start: V) {
        self.config = config;
        self.elapsed = 0.0;
        self.delay_remaining = config.delay as f64;
        self.start = start;
        self.cycle = 0;
        self.cycle_start = start;
        self.cycle_target = config.target;
        self.phase = if config.delay > 0.0 {
            TweenPhase::Delaying
        } else {
            TweenPhase::Running
        };
        self.active = true;
    }

    /// Clear the enable flag. The component keeps its last written value.
    pub fn cancel(&mut self) {
        if self.active {
            self.active = false;
            self.phase = TweenPhase::Idle;
        }
    }

    pub fn config(&self) -> &TweenConfig<V> {
        &self.config
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds of start delay still to burn.
    pub fn delay_remaining(&self) -> f64 {
        self.delay_remaining
    }

    /// Start value resolved at activation.
    pub fn start_value(&self) -> V {
        self.start
    }

    pub fn phase(&self) -> TweenPhase {
        self.phase
    }

    /// The enable flag; only active records are advanced.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start and end of the incremental cycle `cycle`, chained from end values.
    fn chain_to<T>(&mut self, tweener: &T, cycle: u32) -> (V, V)
    where
        T: Tweener<Value = V>,
    {
        if cycle < self.cycle {
            self.cycle = 0;
            self.cycle_start = self.start;
        }
        let step = tweener.difference(self.config.target, self.start);
        while self.cycle < cycle {
            self.cycle_start = tweener.sum(self.cycle_start, step);
            self.cycle += 1;
        }
        self.cycle_target = tweener.sum(self.cycle_start, step);
        (self.cycle_start, self.cycle_target)
    }
}

/// Advance one record by `dt` seconds and write the result into `component`.
///
/// Inactive records are a silent no-op. Time spent in the start delay does not
/// count toward the loop clock; leftover delta after the delay runs out does.
pub fn tick_record<T>(
    tweener: &T,
    data: &mut TweenData<T::Value>,
    component: &mut T::Component,
    dt: f32,
) -> TickOutcome
where
    T: Tweener,
{
    if !data.active {
        return TickOutcome::Skipped;
    }

    let mut dt = dt.max(0.0) as f64;
    if data.phase == TweenPhase::Delaying {
        let slack = SNAP_TOLERANCE * data.delay_remaining.max(1.0);
        if dt < data.delay_remaining - slack {
            data.delay_remaining -= dt;
            return TickOutcome::Delaying;
        }
        dt = (dt - data.delay_remaining).max(0.0);
        data.delay_remaining = 0.0;
        data.phase = TweenPhase::Running;
    }

    data.elapsed += dt;

    let config = data.config;
    let resolved = loop_policy::resolve(data.elapsed, config.duration, config.loop_mode, config.loop_count);

    let (start, payload) = match config.loop_mode {
        LoopMode::Incremental => data.chain_to(tweener, resolved.cycle_index),
        _ => (data.start, config.target),
    };

    tweener.tween(component, resolved.normalized_time, config.easing, start, payload);

    if resolved.finished {
        data.active = false;
        data.phase = TweenPhase::Finished;
        TickOutcome::Finished
    } else {
        TickOutcome::Running
    }
}
