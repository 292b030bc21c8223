use glam::Vec3;

use super::Tweener;
use crate::components::transform::Transform;
use crate::extensions::easing::Easing;

/// Linear blend of `Transform::scale`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleTweener;

impl Tweener for ScaleTweener {
    type Component = Transform;
    type Value = Vec3;

    fn default_start_value(&self, component: &Transform) -> Vec3 {
        component.scale
    }

    fn sum(&self, a: Vec3, b: Vec3) -> Vec3 {
        a + b
    }

    fn difference(&self, a: Vec3, b: Vec3) -> Vec3 {
        a - b
    }

    #[inline]
    fn tween(&self, component: &mut Transform, normalized_time: f32, easing: Easing, start: Vec3, target: Vec3) {
        component.scale = start.lerp(target, easing.apply(normalized_time));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_position_untouched() {
        let mut t = Transform::from_position(Vec3::X);
        ScaleTweener.tween(&mut t, 1.0, Easing::QuadInOut, Vec3::ONE, Vec3::splat(3.0));
        assert_eq!(t.position, Vec3::X);
        assert!((t.scale - Vec3::splat(3.0)).length() < 1e-5);
    }
}
