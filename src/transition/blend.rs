/// The single mutable value of a transition: how far image 2 has replaced image 1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlendState {
    factor: f64,
}

impl BlendState {
    /// Blend state showing image 1 only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current factor, always in `[0, 1]`.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Store `value` clamped to `[0, 1]`. Non-finite values are ignored.
    pub(crate) fn set(&mut self, value: f64) {
        if value.is_finite() {
            self.factor = value.clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/blend.rs"]
mod tests;
