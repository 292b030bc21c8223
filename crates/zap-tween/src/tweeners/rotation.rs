use glam::Quat;

use super::Tweener;
use crate::components::transform::Transform;
use crate::extensions::easing::Easing;

/// Spherical blend of `Transform::rotation`.
///
/// Sum and difference are rotation composition: `sum(a, d)` applies `d` after
/// `a`, and `difference(a, b)` is the rotation taking `b` to `a`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationTweener;

impl Tweener for RotationTweener {
    type Component = Transform;
    type Value = Quat;

    fn default_start_value(&self, component: &Transform) -> Quat {
        component.rotation
    }

    fn sum(&self, a: Quat, b: Quat) -> Quat {
        (b * a).normalize()
    }

    fn difference(&self, a: Quat, b: Quat) -> Quat {
        (a * b.inverse()).normalize()
    }

    #[inline]
    fn tween(&self, component: &mut Transform, normalized_time: f32, easing: Easing, start: Quat, target: Quat) {
        component.rotation = start.slerp(target, easing.apply(normalized_time));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn slerps_halfway() {
        let mut t = Transform::default();
        let target = Quat::from_rotation_z(FRAC_PI_2);
        RotationTweener.tween(&mut t, 0.5, Easing::Linear, Quat::IDENTITY, target);
        let expected = Quat::from_rotation_z(FRAC_PI_2 / 2.0);
        assert!(t.rotation.angle_between(expected) < 1e-4);
    }

    #[test]
    fn difference_inverts_sum() {
        let a = Quat::from_rotation_y(0.7);
        let b = Quat::from_rotation_x(-0.3);
        let back = RotationTweener.sum(b, RotationTweener.difference(a, b));
        assert!(back.angle_between(a) < 1e-4);
    }
}
