// extensions/loop_policy.rs
//
// Loop policy — translates raw elapsed time into normalized time, cycle index
// and a finished flag. Stateless; callers own the elapsed clock.

use serde::{Deserialize, Serialize};

/// What happens when a tween cycle completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoopMode {
    /// Play once and finish.
    #[default]
    None,
    /// Jump back to the start value every cycle.
    Restart,
    /// Reverse direction every cycle.
    PingPong,
    /// Each cycle starts where the previous one ended.
    Incremental,
}

impl LoopMode {
    /// Look up a loop mode by its wire code.
    pub fn from_code(code: u32) -> Option<LoopMode> {
        match code {
            0 => Some(LoopMode::None),
            1 => Some(LoopMode::Restart),
            2 => Some(LoopMode::PingPong),
            3 => Some(LoopMode::Incremental),
            _ => None,
        }
    }

    /// Wire code of this mode.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn is_looping(self) -> bool {
        self != LoopMode::None
    }
}

/// Result of resolving elapsed time against a loop policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopResolution {
    /// Position inside the current cycle, in [0, 1]. Mirrored on odd ping-pong cycles.
    pub normalized_time: f32,
    /// Zero-based index of the cycle `normalized_time` belongs to.
    pub cycle_index: u32,
    /// The tween has played all of its cycles.
    pub finished: bool,
}

/// Relative distance from a cycle boundary that still counts as on it.
///
/// Frame deltas like `1.0 / 60.0` are not exact in f32; their sum lands a hair
/// short of the boundary it was meant to hit.
pub const SNAP_TOLERANCE: f64 = 1e-6;

/// Resolve `raw_elapsed` seconds into a position within the loop.
///
/// Each cycle covers the half-open interval `(k·d, (k+1)·d]`, so an elapsed time
/// landing on a boundary (within [`SNAP_TOLERANCE`]) completes the prior cycle
/// instead of starting the next one. `count == 0` loops forever for every mode
/// except `None`.
///
/// `duration` must be > 0; the builder guarantees this for every live record.
pub fn resolve(raw_elapsed: f64, duration: f32, mode: LoopMode, count: u32) -> LoopResolution {
    let cycles = snap(raw_elapsed.max(0.0) / duration as f64);

    if mode == LoopMode::None {
        return LoopResolution {
            normalized_time: cycles.min(1.0) as f32,
            cycle_index: 0,
            finished: cycles >= 1.0,
        };
    }

    let completed = cycles.floor();
    let finished = count > 0 && completed >= count as f64;

    let (cycle_index, frac) = if finished {
        (count - 1, 1.0)
    } else {
        let frac = (cycles - completed) as f32;
        if frac == 0.0 && completed > 0.0 {
            (completed as u32 - 1, 1.0)
        } else {
            (completed as u32, frac)
        }
    };

    let normalized_time = match mode {
        LoopMode::PingPong if cycle_index % 2 == 1 => 1.0 - frac,
        _ => frac,
    };

    LoopResolution {
        normalized_time,
        cycle_index,
        finished,
    }
}

/// Pull a cycle count sitting within tolerance of a whole number onto it.
fn snap(cycles: f64) -> f64 {
    let nearest = cycles.round();
    if (cycles - nearest).abs() <= SNAP_TOLERANCE * nearest.max(1.0) {
        nearest
    } else {
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_clamps_and_is_monotonic() {
        let mut last = 0.0;
        for i in 0..=40 {
            let r = resolve(i as f64 * 0.1, 2.0, LoopMode::None, 0);
            assert!(r.normalized_time >= last);
            last = r.normalized_time;
        }
        let r = resolve(3.0, 2.0, LoopMode::None, 0);
        assert_eq!(r.normalized_time, 1.0);
        assert!(r.finished);
        assert!(!resolve(1.999, 2.0, LoopMode::None, 0).finished);
    }

    #[test]
    fn restart_finishes_on_last_boundary() {
        assert!(resolve(6.0, 2.0, LoopMode::Restart, 3).finished);
        assert!(!resolve(5.999, 2.0, LoopMode::Restart, 3).finished);

        let r = resolve(6.0, 2.0, LoopMode::Restart, 3);
        assert_eq!(r.cycle_index, 2);
        assert_eq!(r.normalized_time, 1.0);
    }

    #[test]
    fn restart_wraps_each_cycle() {
        let r = resolve(2.5, 2.0, LoopMode::Restart, 0);
        assert_eq!(r.cycle_index, 1);
        assert!((r.normalized_time - 0.25).abs() < 1e-6);
        assert!(!r.finished);
    }

    #[test]
    fn boundary_completes_prior_cycle() {
        let r = resolve(4.0, 2.0, LoopMode::Restart, 0);
        assert_eq!(r.cycle_index, 1);
        assert_eq!(r.normalized_time, 1.0);
    }

    #[test]
    fn ping_pong_mirrors_odd_cycles() {
        let d = 2.0_f32;
        let r = resolve(d as f64 * 1.25, d, LoopMode::PingPong, 0);
        assert_eq!(r.cycle_index, 1);
        assert!((r.normalized_time - 0.75).abs() < 1e-6);

        let r = resolve(d as f64 * 0.25, d, LoopMode::PingPong, 0);
        assert!((r.normalized_time - 0.25).abs() < 1e-6);

        // End of the backward leg lands on the start.
        let r = resolve(d as f64 * 2.0, d, LoopMode::PingPong, 2);
        assert!(r.finished);
        assert_eq!(r.normalized_time, 0.0);
    }

    #[test]
    fn infinite_loops_never_finish() {
        for mode in [LoopMode::Restart, LoopMode::PingPong, LoopMode::Incremental] {
            assert!(!resolve(1_000.0, 1.0, mode, 0).finished);
        }
    }

    #[test]
    fn incremental_matches_restart_timing() {
        for elapsed in [0.3, 1.0, 1.7, 2.0, 4.9] {
            assert_eq!(
                resolve(elapsed, 1.0, LoopMode::Incremental, 4),
                resolve(elapsed, 1.0, LoopMode::Restart, 4)
            );
        }
    }

    #[test]
    fn zero_elapsed_starts_first_cycle() {
        let r = resolve(0.0, 1.0, LoopMode::Restart, 2);
        assert_eq!(r.cycle_index, 0);
        assert_eq!(r.normalized_time, 0.0);
        assert!(!r.finished);
    }

    #[test]
    fn summed_frame_deltas_hit_the_boundary() {
        // 60 f32 steps of 1/60 add up to a little under 1.0.
        let elapsed: f32 = (0..60).map(|_| 1.0_f32 / 60.0).sum();
        assert!(elapsed < 1.0);

        let r = resolve(elapsed as f64, 1.0, LoopMode::None, 0);
        assert!(r.finished);
        assert_eq!(r.normalized_time, 1.0);

        let elapsed: f32 = (0..120).map(|_| 1.0_f32 / 60.0).sum();
        let r = resolve(elapsed as f64, 1.0, LoopMode::Restart, 2);
        assert!(r.finished);
        assert_eq!(r.cycle_index, 1);
        assert_eq!(r.normalized_time, 1.0);
    }

    #[test]
    fn tolerance_does_not_swallow_real_progress() {
        let r = resolve(0.9999, 1.0, LoopMode::None, 0);
        assert!(!r.finished);
        assert!(r.normalized_time < 1.0);
    }
}
