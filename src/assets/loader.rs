use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};

use anyhow::Context;

use crate::assets::decode::{AlphaMode, decode_image};
use crate::effects::displacement::TextureSet;
use crate::effects::texture::Texture;
use crate::foundation::error::{DistortError, DistortResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Where a texture's pixels come from.
#[derive(Clone, PartialEq, serde::Deserialize)]
#[serde(from = "PathBuf")]
pub enum ImageSource {
    /// Encoded image file on disk. Relative paths resolve against the loader root.
    Path(PathBuf),
    /// Encoded image bytes held in memory.
    Encoded(Arc<Vec<u8>>),
    /// Already decoded pixels.
    Decoded(Texture),
}

impl ImageSource {
    /// Rebase a relative [`ImageSource::Path`] onto `root`; other sources are returned unchanged.
    pub fn resolved_against(&self, root: &Path) -> Self {
        match self {
            Self::Path(p) if p.is_relative() => Self::Path(root.join(p)),
            other => other.clone(),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&str> for ImageSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Texture> for ImageSource {
    fn from(texture: Texture) -> Self {
        Self::Decoded(texture)
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Encoded(bytes) => f.debug_struct("Encoded").field("len", &bytes.len()).finish(),
            Self::Decoded(t) => f.debug_struct("Decoded").field("size", &t.size()).finish(),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "'{}'", p.display()),
            Self::Encoded(bytes) => write!(f, "<{} encoded bytes>", bytes.len()),
            Self::Decoded(t) => write!(f, "<{}x{} texture>", t.size().width, t.size().height),
        }
    }
}

/// The three shader inputs a transition waits for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Image visible at blend factor 0.
    Image1,
    /// Image visible at blend factor 1.
    Image2,
    /// Displacement map.
    Displacement,
}

impl TextureSlot {
    /// All slots, in declaration order.
    pub const ALL: [TextureSlot; 3] = [Self::Image1, Self::Image2, Self::Displacement];

    /// Storage mode the slot's texture is decoded into.
    pub fn alpha_mode(self) -> AlphaMode {
        match self {
            Self::Image1 | Self::Image2 => AlphaMode::Premultiplied,
            Self::Displacement => AlphaMode::Straight,
        }
    }

    /// Stable name used in logs and errors.
    pub fn label(self) -> &'static str {
        match self {
            Self::Image1 => "image1",
            Self::Image2 => "image2",
            Self::Displacement => "displacement",
        }
    }
}

/// Loads textures for a transition. Called concurrently from worker threads.
pub trait TextureLoader: Send + Sync {
    /// Produce the texture for `source` stored in `alpha` mode.
    fn load(&self, source: &ImageSource, alpha: AlphaMode) -> DistortResult<Texture>;
}

/// Filesystem-backed [`TextureLoader`].
#[derive(Clone, Debug, Default)]
pub struct FsTextureLoader {
    root: PathBuf,
}

impl FsTextureLoader {
    /// Resolve relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root used for relative paths.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureLoader for FsTextureLoader {
    fn load(&self, source: &ImageSource, alpha: AlphaMode) -> DistortResult<Texture> {
        match source.resolved_against(&self.root) {
            ImageSource::Path(path) => {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read image '{}'", path.display()))?;
                decode_image(&bytes, alpha)
            }
            ImageSource::Encoded(bytes) => decode_image(&bytes, alpha),
            ImageSource::Decoded(texture) => Ok(convert_alpha(texture, alpha)),
        }
    }
}

fn convert_alpha(texture: Texture, alpha: AlphaMode) -> Texture {
    if alpha == AlphaMode::Premultiplied && !texture.is_premultiplied() {
        let size = texture.size();
        let mut data = texture.as_bytes().to_vec();
        premultiply_rgba8_in_place(&mut data);
        // Same dimensions and length as the source, so this cannot fail.
        return Texture::from_rgba8(size.width, size.height, data, true).unwrap_or(texture);
    }
    texture
}

/// Run one load per request concurrently and return the results in completion order.
///
/// Errors are normalized to [`DistortError::AssetLoad`] naming the slot and source.
pub fn load_textures(
    loader: &dyn TextureLoader,
    requests: &[(TextureSlot, ImageSource)],
) -> Vec<(TextureSlot, DistortResult<Texture>)> {
    let (tx, rx) = mpsc::channel();
    rayon::scope(|s| {
        for (slot, source) in requests {
            let tx = tx.clone();
            s.spawn(move |_| {
                let result = loader.load(source, slot.alpha_mode()).map_err(|e| {
                    DistortError::asset_load(format!("{} {source}: {e:#}", slot.label()))
                });
                // The receiver outlives the scope; a send can only fail after a panic upstream.
                let _ = tx.send((*slot, result));
            });
        }
    });
    drop(tx);
    rx.into_iter().collect()
}

/// Collects texture completions that may arrive in any order.
#[derive(Clone, Debug, Default)]
pub struct PendingTextures {
    image1: Option<Texture>,
    image2: Option<Texture>,
    displacement: Option<Texture>,
}

impl PendingTextures {
    /// Nothing loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful load. A repeated completion for a slot replaces the earlier one.
    pub fn complete(&mut self, slot: TextureSlot, texture: Texture) {
        let target = match slot {
            TextureSlot::Image1 => &mut self.image1,
            TextureSlot::Image2 => &mut self.image2,
            TextureSlot::Displacement => &mut self.displacement,
        };
        *target = Some(texture);
    }

    /// Slots still waiting for a texture.
    pub fn missing(&self) -> Vec<TextureSlot> {
        TextureSlot::ALL
            .into_iter()
            .filter(|slot| match slot {
                TextureSlot::Image1 => self.image1.is_none(),
                TextureSlot::Image2 => self.image2.is_none(),
                TextureSlot::Displacement => self.displacement.is_none(),
            })
            .collect()
    }

    /// Return `true` once every slot has a texture.
    pub fn is_complete(&self) -> bool {
        self.image1.is_some() && self.image2.is_some() && self.displacement.is_some()
    }

    /// Build the shader inputs once all three textures are present.
    pub fn try_assemble(&self) -> Option<DistortResult<TextureSet>> {
        match (&self.image1, &self.image2, &self.displacement) {
            (Some(a), Some(b), Some(d)) => {
                Some(TextureSet::new(a.clone(), b.clone(), d.clone()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
