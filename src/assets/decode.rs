use anyhow::Context;

use crate::effects::texture::Texture;
use crate::foundation::error::DistortResult;
use crate::foundation::math::premultiply_rgba8_in_place;

/// How decoded channels are stored in the resulting [`Texture`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphaMode {
    /// Multiply color by alpha (source images).
    Premultiplied,
    /// Keep channels as encoded (displacement maps).
    Straight,
}

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGBA8 texture.
pub fn decode_image(bytes: &[u8], alpha: AlphaMode) -> DistortResult<Texture> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    let premultiplied = match alpha {
        AlphaMode::Premultiplied => {
            premultiply_rgba8_in_place(&mut data);
            true
        }
        AlphaMode::Straight => false,
    };

    Texture::from_rgba8(width, height, data, premultiplied)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
