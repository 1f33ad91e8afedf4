use std::str::FromStr;

use crate::effects::texture::Texture;
use crate::foundation::core::Vec2;
use crate::foundation::error::{DistortError, DistortResult};
use crate::foundation::math::channel_to_u8;

/// How the displacement map perturbs sampling coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistortionDirection {
    /// Offset along both axes by the map's red/green channels, centred on 0.5.
    #[default]
    TwoAxis,
    /// Offset along x only, scaled by the map's red channel.
    SingleAxis,
}

impl DistortionDirection {
    /// Intensity used when the configuration leaves it unset.
    pub fn default_intensity(self) -> f64 {
        match self {
            Self::TwoAxis => 0.5,
            Self::SingleAxis => 1.0,
        }
    }
}

impl FromStr for DistortionDirection {
    type Err = DistortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "two_axis" | "twoaxis" | "radial" | "xy" => Ok(Self::TwoAxis),
            "single_axis" | "singleaxis" | "x" | "horizontal" => Ok(Self::SingleAxis),
            other => Err(DistortError::configuration(format!(
                "unknown distortion direction '{other}'"
            ))),
        }
    }
}

/// Per-frame scalar inputs of the displacement shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniforms {
    /// Maximum displacement strength (the configured intensity).
    pub effect_factor: f64,
    /// Blend factor in `[0, 1]`: 0 shows image 1, 1 shows image 2.
    pub disp_factor: f64,
    /// Displacement variant.
    pub direction: DistortionDirection,
}

impl Uniforms {
    /// Uniforms at blend factor 0.
    pub fn new(effect_factor: f64, direction: DistortionDirection) -> Self {
        Self {
            effect_factor,
            disp_factor: 0.0,
            direction,
        }
    }

    /// Sampling offsets for image 1 and image 2 given a displacement sample in `[0, 1]`.
    pub fn offsets(&self, disp: [f32; 4]) -> (Vec2, Vec2) {
        let f = self.disp_factor.clamp(0.0, 1.0);
        let e = self.effect_factor;
        let r = f64::from(disp[0]);
        let g = f64::from(disp[1]);
        match self.direction {
            DistortionDirection::TwoAxis => {
                let d = Vec2::new(r - 0.5, g - 0.5);
                (d * (e * f), d * (-e * (1.0 - f)))
            }
            DistortionDirection::SingleAxis => (
                Vec2::new(e * f * r, 0.0),
                Vec2::new(-e * (1.0 - f) * r, 0.0),
            ),
        }
    }
}

/// The three textures bound to the shader.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureSet {
    /// Visible at blend factor 0.
    pub image1: Texture,
    /// Visible at blend factor 1.
    pub image2: Texture,
    /// Offset field, sampled with straight channels.
    pub displacement: Texture,
}

impl TextureSet {
    /// Bundle the three inputs. Source images must be premultiplied.
    pub fn new(image1: Texture, image2: Texture, displacement: Texture) -> DistortResult<Self> {
        if !image1.is_premultiplied() || !image2.is_premultiplied() {
            return Err(DistortError::asset_load(
                "source images must be premultiplied rgba8",
            ));
        }
        Ok(Self {
            image1,
            image2,
            displacement,
        })
    }
}

/// Evaluate the fragment stage at `uv`, returning premultiplied channels in `[0, 255]`.
///
/// At blend factor 0 this is exactly `image1(uv)`, at 1 exactly `image2(uv)`. The two colors are
/// mixed premultiplied, so for semi-transparent sources intermediate frames weight color by alpha
/// instead of mixing straight texels.
pub fn shade(uv: Vec2, textures: &TextureSet, uniforms: &Uniforms) -> [f32; 4] {
    let disp = textures.displacement.sample_unit(uv);
    let (offset_a, offset_b) = uniforms.offsets(disp);

    let color_a = textures.image1.sample(uv + offset_a);
    let color_b = textures.image2.sample(uv + offset_b);

    let t = uniforms.disp_factor.clamp(0.0, 1.0) as f32;
    let mut out = [0.0f32; 4];
    for i in 0..4 {
        out[i] = color_a[i] * (1.0 - t) + color_b[i] * t;
    }
    out
}

/// [`shade`] rounded to premultiplied RGBA8.
pub fn shade_rgba8(uv: Vec2, textures: &TextureSet, uniforms: &Uniforms) -> [u8; 4] {
    shade(uv, textures, uniforms).map(channel_to_u8)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/displacement.rs"]
mod tests;
