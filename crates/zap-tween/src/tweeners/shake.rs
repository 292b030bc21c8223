//! Procedural position shake.
//!
//! The offset comes from 1D value noise sampled at `normalized_time × frequency`,
//! so a replay with the same timeline produces the same shake. Amplitude fades
//! out with the eased progress, leaving the entity on its start value at t = 1.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::Tweener;
use crate::components::transform::Transform;
use crate::extensions::easing::{lerp, Easing};

/// Per-axis noise seeds.
const SEED_X: u64 = 0x5EED_0001;
const SEED_Y: u64 = 0x5EED_0002;
const SEED_Z: u64 = 0x5EED_0003;

/// Which axes a shake displaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShakeAxes {
    /// Screen-plane shake; z stays on the start value.
    #[default]
    Xy,
    Xyz,
}

/// Noise-driven offset of `Transform::position`.
///
/// The payload is `(frequency, intensity, _)`: frequency is the number of noise
/// cells crossed over one cycle, intensity the peak offset in world units.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakePositionTweener {
    pub axes: ShakeAxes,
}

impl ShakePositionTweener {
    pub fn new(axes: ShakeAxes) -> Self {
        Self { axes }
    }

    /// Payload for a shake with the given frequency and intensity.
    pub fn payload(frequency: f32, intensity: f32) -> Vec3 {
        Vec3::new(frequency, intensity, 0.0)
    }
}

impl Tweener for ShakePositionTweener {
    type Component = Transform;
    type Value = Vec3;

    // The payload is (frequency, intensity), not a target to chain from.
    const CHAINS_END_VALUES: bool = false;

    fn default_start_value(&self, component: &Transform) -> Vec3 {
        component.position
    }

    fn sum(&self, a: Vec3, b: Vec3) -> Vec3 {
        a + b
    }

    fn difference(&self, a: Vec3, b: Vec3) -> Vec3 {
        a - b
    }

    fn tween(&self, component: &mut Transform, normalized_time: f32, easing: Easing, start: Vec3, shake: Vec3) {
        let (frequency, intensity) = (shake.x, shake.y);
        let amplitude = intensity * (1.0 - easing.apply(normalized_time));
        let phase = normalized_time * frequency;

        let mut offset = Vec3::new(value_noise(SEED_X, phase), value_noise(SEED_Y, phase), 0.0);
        if self.axes == ShakeAxes::Xyz {
            offset.z = value_noise(SEED_Z, phase);
        }

        component.position = start + offset * amplitude;
    }
}

/// Smooth 1D value noise in [-1, 1].
fn value_noise(seed: u64, x: f32) -> f32 {
    let cell = x.floor();
    let f = x - cell;
    let s = f * f * (3.0 - 2.0 * f);
    let i = cell as i64;
    lerp(lattice(seed, i), lattice(seed, i.wrapping_add(1)), s)
}

/// Hash a lattice point to [-1, 1] with an xorshift64 mix.
fn lattice(seed: u64, cell: i64) -> f32 {
    let mut x = (cell as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ seed;
    if x == 0 {
        x = 1;
    }
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    ((x >> 40) as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_bounded_and_deterministic() {
        for i in 0..500 {
            let x = i as f32 * 0.37;
            let a = value_noise(SEED_X, x);
            assert!((-1.0..=1.0).contains(&a), "noise({}) = {}", x, a);
            assert_eq!(a, value_noise(SEED_X, x));
        }
    }

    #[test]
    fn settles_on_start_at_end() {
        let mut t = Transform::default();
        let start = Vec3::new(2.0, 3.0, 4.0);
        ShakePositionTweener::default().tween(&mut t, 1.0, Easing::Linear, start, ShakePositionTweener::payload(10.0, 1.0));
        assert!((t.position - start).length() < 1e-6);
    }

    #[test]
    fn xy_shake_keeps_z() {
        let shaker = ShakePositionTweener::new(ShakeAxes::Xy);
        let start = Vec3::new(0.0, 0.0, 7.0);
        for i in 0..20 {
            let mut t = Transform::default();
            shaker.tween(&mut t, i as f32 / 20.0, Easing::Linear, start, ShakePositionTweener::payload(8.0, 2.0));
            assert_eq!(t.position.z, 7.0);
            assert!((t.position - start).length() <= 2.0 * 2f32.sqrt() + 1e-4);
        }
    }

    #[test]
    fn xyz_shake_moves_z() {
        let shaker = ShakePositionTweener::new(ShakeAxes::Xyz);
        let moved = (1..20).any(|i| {
            let mut t = Transform::default();
            shaker.tween(&mut t, i as f32 / 20.0, Easing::Linear, Vec3::ZERO, ShakePositionTweener::payload(8.0, 2.0));
            t.position.z.abs() > 1e-3
        });
        assert!(moved);
    }

    #[test]
    fn same_inputs_same_output() {
        let shaker = ShakePositionTweener::new(ShakeAxes::Xyz);
        let mut a = Transform::default();
        let mut b = Transform::default();
        shaker.tween(&mut a, 0.42, Easing::QuadOut, Vec3::ONE, ShakePositionTweener::payload(12.0, 0.5));
        shaker.tween(&mut b, 0.42, Easing::QuadOut, Vec3::ONE, ShakePositionTweener::payload(12.0, 0.5));
        assert_eq!(a.position, b.position);
    }
}
