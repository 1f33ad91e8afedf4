use crate::foundation::error::{DistortError, DistortResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Absolute 0-based frame index in render-loop order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> DistortResult<Self> {
        if den == 0 {
            return Err(DistortError::configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(DistortError::configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to frame count using ceil semantics.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a validated, non-degenerate size.
    pub fn new(width: u32, height: u32) -> DistortResult<Self> {
        if width == 0 || height == 0 {
            return Err(DistortError::render(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        self.pixel_count().saturating_mul(4)
    }
}

/// Largest drawing surface, in pixels (8192 x 8192).
pub const MAX_SURFACE_PIXELS: u64 = 8192 * 8192;

/// Container dimensions in device-independent pixels, as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContainerSize {
    /// Width in device-independent pixels.
    pub width: f64,
    /// Height in device-independent pixels.
    pub height: f64,
}

impl ContainerSize {
    /// Create a container size without validation.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Return `false` for zero, negative or non-finite dimensions.
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Pixel size of the backing surface, rounding to the nearest pixel (minimum 1).
    ///
    /// Returns `None` when the container is not drawable or exceeds [`MAX_SURFACE_PIXELS`].
    pub fn to_surface_size(self) -> Option<Size> {
        if !self.is_drawable() {
            return None;
        }
        let w = self.width.round().clamp(1.0, f64::from(u32::MAX)) as u32;
        let h = self.height.round().clamp(1.0, f64::from(u32::MAX)) as u32;
        if u64::from(w) * u64::from(h) > MAX_SURFACE_PIXELS {
            return None;
        }
        Some(Size {
            width: w,
            height: h,
        })
    }
}

impl From<Size> for ContainerSize {
    fn from(size: Size) -> Self {
        Self::new(f64::from(size.width), f64::from(size.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
