use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::animation::ease::Ease;
use crate::assets::loader::{ImageSource, TextureSlot};
use crate::effects::displacement::DistortionDirection;
use crate::foundation::core::{ContainerSize, MAX_SURFACE_PIXELS};
use crate::foundation::error::{DistortError, DistortResult};

/// Default forward duration in seconds.
pub const DEFAULT_SPEED_IN: f64 = 1.6;
/// Default reverse duration in seconds.
pub const DEFAULT_SPEED_OUT: f64 = 1.2;
/// Default easing curve.
pub const DEFAULT_EASING: Ease = Ease::OutExpo;

/// Raw construction parameters. Every field is optional here; [`TransitionOptions::validate`]
/// applies defaults and rejects missing required inputs.
///
/// Deserializes from JSON using camelCase keys (`displacementImage`, `speedIn`, ...); `parent`
/// is accepted for `container`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransitionOptions {
    /// Container the effect fills.
    #[serde(alias = "parent")]
    pub container: Option<ContainerSize>,
    /// Image shown at rest.
    pub image1: Option<ImageSource>,
    /// Image shown while hovered.
    pub image2: Option<ImageSource>,
    /// Displacement map.
    #[serde(alias = "displacement")]
    pub displacement_image: Option<ImageSource>,
    /// Maximum displacement strength.
    pub intensity: Option<f64>,
    /// Shorthand for both `speed_in` and `speed_out`.
    pub speed: Option<f64>,
    /// Forward duration in seconds.
    pub speed_in: Option<f64>,
    /// Reverse duration in seconds.
    pub speed_out: Option<f64>,
    /// Bind pointer enter/leave automatically.
    pub hover: Option<bool>,
    /// Easing curve, by name (`OutExpo`, `expo.out`, ...).
    #[serde(default, deserialize_with = "deserialize_ease")]
    pub easing: Option<Ease>,
    /// Distortion variant.
    pub direction: Option<DistortionDirection>,
}

fn deserialize_ease<'de, D>(de: D) -> Result<Option<Ease>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    raw.map(|s| s.parse::<Ease>().map_err(serde::de::Error::custom))
        .transpose()
}

impl TransitionOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON string.
    pub fn from_json_str(json: &str) -> DistortResult<Self> {
        serde_json::from_str(json).map_err(|e| DistortError::serde(e.to_string()))
    }

    /// Read options from a JSON file; relative image paths are rebased onto the file's directory.
    pub fn from_json_file(path: &Path) -> DistortResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("open transition config '{}'", path.display()))?;
        let opts = Self::from_json_str(&text)?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(opts.with_root(root))
    }

    /// Rebase relative image paths onto `root`.
    pub fn with_root(mut self, root: &Path) -> Self {
        for src in [
            &mut self.image1,
            &mut self.image2,
            &mut self.displacement_image,
        ]
        .into_iter()
        .flatten()
        {
            *src = src.resolved_against(root);
        }
        self
    }

    /// Set the container size in device-independent pixels.
    pub fn container(mut self, width: f64, height: f64) -> Self {
        self.container = Some(ContainerSize::new(width, height));
        self
    }

    /// Set the image shown at rest.
    pub fn image1(mut self, src: impl Into<ImageSource>) -> Self {
        self.image1 = Some(src.into());
        self
    }

    /// Set the image shown while hovered.
    pub fn image2(mut self, src: impl Into<ImageSource>) -> Self {
        self.image2 = Some(src.into());
        self
    }

    /// Set the displacement map.
    pub fn displacement_image(mut self, src: impl Into<ImageSource>) -> Self {
        self.displacement_image = Some(src.into());
        self
    }

    /// Set the displacement strength.
    pub fn intensity(mut self, intensity: f64) -> Self {
        self.intensity = Some(intensity);
        self
    }

    /// Set both durations at once.
    pub fn speed(mut self, secs: f64) -> Self {
        self.speed = Some(secs);
        self
    }

    /// Set the forward duration.
    pub fn speed_in(mut self, secs: f64) -> Self {
        self.speed_in = Some(secs);
        self
    }

    /// Set the reverse duration.
    pub fn speed_out(mut self, secs: f64) -> Self {
        self.speed_out = Some(secs);
        self
    }

    /// Enable or disable automatic pointer binding.
    pub fn hover(mut self, hover: bool) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Set the easing curve.
    pub fn easing(mut self, ease: Ease) -> Self {
        self.easing = Some(ease);
        self
    }

    /// Set the distortion variant.
    pub fn direction(mut self, direction: DistortionDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Apply defaults and check every field, failing on the first problem.
    pub fn validate(&self) -> DistortResult<TransitionConfig> {
        let container = self
            .container
            .ok_or_else(|| DistortError::configuration("container is required"))?;
        if !container.is_drawable() {
            return Err(DistortError::configuration(format!(
                "container must have positive finite dimensions, got {}x{}",
                container.width, container.height
            )));
        }
        if container.to_surface_size().is_none() {
            return Err(DistortError::configuration(format!(
                "container {}x{} exceeds the {MAX_SURFACE_PIXELS} pixel surface limit",
                container.width, container.height
            )));
        }

        let image1 = required(&self.image1, TextureSlot::Image1)?;
        let image2 = required(&self.image2, TextureSlot::Image2)?;
        let displacement_image = required(&self.displacement_image, TextureSlot::Displacement)?;

        let direction = self.direction.unwrap_or_default();
        let intensity = self
            .intensity
            .unwrap_or_else(|| direction.default_intensity());
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(DistortError::configuration(format!(
                "intensity must be finite and >= 0, got {intensity}"
            )));
        }

        let speed_in = self.speed_in.or(self.speed).unwrap_or(DEFAULT_SPEED_IN);
        let speed_out = self.speed_out.or(self.speed).unwrap_or(DEFAULT_SPEED_OUT);
        for (name, v) in [("speed_in", speed_in), ("speed_out", speed_out)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(DistortError::configuration(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }

        Ok(TransitionConfig {
            container,
            image1,
            image2,
            displacement_image,
            intensity,
            speed_in,
            speed_out,
            easing: self.easing.unwrap_or(DEFAULT_EASING),
            hover: self.hover.unwrap_or(true),
            direction,
        })
    }
}

fn required(src: &Option<ImageSource>, slot: TextureSlot) -> DistortResult<ImageSource> {
    src.clone().ok_or_else(|| {
        DistortError::configuration(format!("{} is required", option_name(slot)))
    })
}

fn option_name(slot: TextureSlot) -> &'static str {
    match slot {
        TextureSlot::Image1 => "image1",
        TextureSlot::Image2 => "image2",
        TextureSlot::Displacement => "displacementImage",
    }
}

/// Validated, immutable transition parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionConfig {
    container: ContainerSize,
    image1: ImageSource,
    image2: ImageSource,
    displacement_image: ImageSource,
    intensity: f64,
    speed_in: f64,
    speed_out: f64,
    easing: Ease,
    hover: bool,
    direction: DistortionDirection,
}

impl TryFrom<TransitionOptions> for TransitionConfig {
    type Error = DistortError;

    fn try_from(opts: TransitionOptions) -> Result<Self, Self::Error> {
        opts.validate()
    }
}

impl TransitionConfig {
    /// Container size at construction time.
    pub fn container(&self) -> ContainerSize {
        self.container
    }

    /// Source for a texture slot.
    pub fn source(&self, slot: TextureSlot) -> &ImageSource {
        match slot {
            TextureSlot::Image1 => &self.image1,
            TextureSlot::Image2 => &self.image2,
            TextureSlot::Displacement => &self.displacement_image,
        }
    }

    /// Maximum displacement strength.
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Forward duration in seconds.
    pub fn speed_in(&self) -> f64 {
        self.speed_in
    }

    /// Reverse duration in seconds.
    pub fn speed_out(&self) -> f64 {
        self.speed_out
    }

    /// Easing curve for both directions.
    pub fn easing(&self) -> Ease {
        self.easing
    }

    /// Whether pointer enter/leave drive the transition.
    pub fn hover(&self) -> bool {
        self.hover
    }

    /// Distortion variant.
    pub fn direction(&self) -> DistortionDirection {
        self.direction
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/config.rs"]
mod tests;
