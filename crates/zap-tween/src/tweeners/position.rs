use glam::Vec3;

use super::Tweener;
use crate::components::transform::Transform;
use crate::extensions::easing::Easing;

/// Linear blend of `Transform::position` toward a target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionTweener;

impl Tweener for PositionTweener {
    type Component = Transform;
    type Value = Vec3;

    fn default_start_value(&self, component: &Transform) -> Vec3 {
        component.position
    }

    fn sum(&self, a: Vec3, b: Vec3) -> Vec3 {
        a + b
    }

    fn difference(&self, a: Vec3, b: Vec3) -> Vec3 {
        a - b
    }

    #[inline]
    fn tween(&self, component: &mut Transform, normalized_time: f32, easing: Easing, start: Vec3, target: Vec3) {
        component.position = start.lerp(target, easing.apply(normalized_time));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blends_toward_target() {
        let mut t = Transform::default();
        PositionTweener.tween(&mut t, 0.5, Easing::Linear, Vec3::ZERO, Vec3::new(100.0, 0.0, -10.0));
        assert!((t.position - Vec3::new(50.0, 0.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn default_start_reads_position_only() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).with_scale(Vec3::splat(4.0));
        assert_eq!(PositionTweener.default_start_value(&t), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn difference_inverts_sum() {
        let a = Vec3::new(3.0, -1.0, 2.0);
        let b = Vec3::new(0.5, 4.0, 1.0);
        assert_eq!(PositionTweener.sum(b, PositionTweener.difference(a, b)), a);
    }
}
