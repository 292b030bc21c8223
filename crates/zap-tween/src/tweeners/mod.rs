//! Value tweeners — the per-value-kind strategies the update engine drives.
//!
//! A tweener knows how to read a default start value out of its component,
//! how to add and subtract its values (used to chain incremental loops) and
//! how to write an interpolated value back. The engine is generic over
//! [`Tweener`], so dispatch is static on the per-tick path.

pub mod position;
pub mod rotation;
pub mod scale;
pub mod shake;

pub use position::PositionTweener;
pub use rotation::RotationTweener;
pub use scale::ScaleTweener;
pub use shake::{ShakeAxes, ShakePositionTweener};

use crate::extensions::easing::Easing;

/// Capability set of a tweenable value kind.
///
/// Implementations must be deterministic: identical inputs always write the
/// same component value, whichever worker runs them.
pub trait Tweener {
    /// Host component the tweener writes into.
    type Component;
    /// Value carried as start, target and payload.
    type Value: Copy;

    /// Whether `LoopMode::Incremental` makes sense: the payload is a target
    /// that can be chained cycle after cycle. Procedural tweeners opt out.
    const CHAINS_END_VALUES: bool = true;

    /// Read the value a tween starts from when no explicit start is given.
    fn default_start_value(&self, component: &Self::Component) -> Self::Value;

    /// `a + b` in the value's own algebra.
    fn sum(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// `a - b` in the value's own algebra, so that `sum(b, difference(a, b)) == a`.
    fn difference(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// Write the value at `normalized_time` into `component`.
    ///
    /// `payload` is the target value for blending tweeners, or tweener-specific
    /// parameters (e.g. shake frequency and intensity) for procedural ones.
    fn tween(
        &self,
        component: &mut Self::Component,
        normalized_time: f32,
        easing: Easing,
        start: Self::Value,
        payload: Self::Value,
    );
}
