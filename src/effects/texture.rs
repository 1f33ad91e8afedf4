use std::sync::Arc;

use crate::foundation::core::{Size, Vec2};
use crate::foundation::error::{DistortError, DistortResult};

/// An RGBA8 image bound as a shader input.
///
/// Source images are stored premultiplied; displacement maps keep straight channels since their
/// values are offsets, not colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    size: Size,
    rgba8: Arc<Vec<u8>>,
    premultiplied: bool,
}

impl Texture {
    /// Wrap tightly packed row-major RGBA8 bytes.
    pub fn from_rgba8(
        width: u32,
        height: u32,
        rgba8: Vec<u8>,
        premultiplied: bool,
    ) -> DistortResult<Self> {
        let size = Size::new(width, height)
            .map_err(|_| DistortError::asset_load("texture must have non-zero dimensions"))?;
        if rgba8.len() != size.rgba8_len() {
            return Err(DistortError::asset_load(format!(
                "texture byte length {} does not match {width}x{height} rgba8",
                rgba8.len()
            )));
        }
        Ok(Self {
            size,
            rgba8: Arc::new(rgba8),
            premultiplied,
        })
    }

    /// A single-color texture.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4], premultiplied: bool) -> DistortResult<Self> {
        let size = Size::new(width, height)?;
        let mut data = Vec::with_capacity(size.rgba8_len());
        for _ in 0..size.pixel_count() {
            data.extend_from_slice(&rgba);
        }
        Self::from_rgba8(width, height, data, premultiplied)
    }

    /// Texture dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether color channels are premultiplied by alpha.
    pub fn is_premultiplied(&self) -> bool {
        self.premultiplied
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba8
    }

    /// Fetch one texel with clamp-to-edge addressing, channels in `[0, 255]`.
    pub fn texel(&self, x: i64, y: i64) -> [f32; 4] {
        let x = x.clamp(0, i64::from(self.size.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.size.height) - 1) as usize;
        let i = (y * self.size.width as usize + x) * 4;
        let px = &self.rgba8[i..i + 4];
        [
            f32::from(px[0]),
            f32::from(px[1]),
            f32::from(px[2]),
            f32::from(px[3]),
        ]
    }

    /// Bilinear sample at normalized `uv` (origin top-left, texel centres at `(k + 0.5) / n`).
    ///
    /// Coordinates outside `[0, 1]` clamp to the edge texels. Channels in `[0, 255]`.
    pub fn sample(&self, uv: Vec2) -> [f32; 4] {
        let u = if uv.x.is_finite() { uv.x } else { 0.0 };
        let v = if uv.y.is_finite() { uv.y } else { 0.0 };

        // Past one texel beyond either edge every tap clamps to the same edge texel.
        let (w, h) = (f64::from(self.size.width), f64::from(self.size.height));
        let fx = (u * w - 0.5).clamp(-1.0, w);
        let fy = (v * h - 0.5).clamp(-1.0, h);
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x0 + 1, y0);
        let c01 = self.texel(x0, y0 + 1);
        let c11 = self.texel(x0 + 1, y0 + 1);

        let mut out = [0.0f32; 4];
        for i in 0..4 {
            let top = c00[i] * (1.0 - tx) + c10[i] * tx;
            let bottom = c01[i] * (1.0 - tx) + c11[i] * tx;
            out[i] = top * (1.0 - ty) + bottom * ty;
        }
        out
    }

    /// Like [`Texture::sample`] with channels normalized to `[0, 1]`.
    pub fn sample_unit(&self, uv: Vec2) -> [f32; 4] {
        self.sample(uv).map(|c| c / 255.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/texture.rs"]
mod tests;
