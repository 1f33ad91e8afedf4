use crate::animation::ease::Ease;
use crate::foundation::math::lerp;

/// A single time-based interpolation of a scalar from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Value at progress 0.
    pub from: f64,
    /// Value at progress 1.
    pub to: f64,
    /// Total duration in seconds. Non-positive durations complete immediately.
    pub duration_secs: f64,
    /// Curve applied to normalized progress.
    pub ease: Ease,
    elapsed_secs: f64,
}

impl Tween {
    /// Create a tween that has not advanced yet.
    pub fn new(from: f64, to: f64, duration_secs: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_secs,
            ease,
            elapsed_secs: 0.0,
        }
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration_secs.is_nan() || self.duration_secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0)
    }

    /// Current interpolated value. Returns `to` exactly once complete.
    pub fn value(&self) -> f64 {
        let p = self.progress();
        if p >= 1.0 {
            return self.to;
        }
        lerp(self.from, self.to, self.ease.apply(p))
    }

    /// Return `true` once the full duration has elapsed.
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt_secs` (negative and non-finite steps are ignored).
    pub fn advance(&mut self, dt_secs: f64) {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed_secs += dt_secs;
        }
    }
}

/// Interpolation driver for a single numeric property.
///
/// Starting a new animation overrides any in-flight one on the same property: the new tween
/// starts from whatever value the caller passes as `from`, normally the property's current value.
pub trait TweenDriver: Send {
    /// Start interpolating from `from` towards `to` over `duration_secs` using `ease`.
    fn animate(&mut self, from: f64, to: f64, duration_secs: f64, ease: Ease);

    /// Advance time and call `on_update` with the new value if an animation is in flight.
    fn step(&mut self, dt_secs: f64, on_update: &mut dyn FnMut(f64));

    /// Drop the in-flight animation, if any, without emitting an update.
    fn cancel(&mut self);

    /// Return `true` while an animation is in flight.
    fn is_active(&self) -> bool;

    /// Destination value of the in-flight animation.
    fn target(&self) -> Option<f64>;
}

/// Default [`TweenDriver`]: one tween slot, last caller wins.
#[derive(Clone, Debug, Default)]
pub struct Tweener {
    active: Option<Tween>,
}

impl Tweener {
    /// Create an idle driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the in-flight tween.
    pub fn active(&self) -> Option<&Tween> {
        self.active.as_ref()
    }
}

impl TweenDriver for Tweener {
    fn animate(&mut self, from: f64, to: f64, duration_secs: f64, ease: Ease) {
        self.active = Some(Tween::new(from, to, duration_secs, ease));
    }

    fn step(&mut self, dt_secs: f64, on_update: &mut dyn FnMut(f64)) {
        let Some(tween) = self.active.as_mut() else {
            return;
        };
        tween.advance(dt_secs);
        on_update(tween.value());
        if tween.is_complete() {
            self.active = None;
        }
    }

    fn cancel(&mut self) {
        self.active = None;
    }

    fn is_active(&self) -> bool {
        self.active.is_some()
    }

    fn target(&self) -> Option<f64> {
        self.active.map(|t| t.to)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
