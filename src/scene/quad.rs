use std::sync::Arc;

use crate::effects::displacement::{TextureSet, Uniforms};
use crate::foundation::core::{ContainerSize, Point, Rect, Vec2};

/// Shader inputs attached to a quad.
#[derive(Clone, Debug)]
pub struct DisplacementMaterial {
    /// Bound textures.
    pub textures: Arc<TextureSet>,
    /// Per-frame uniforms.
    pub uniforms: Uniforms,
}

/// A flat rectangle in world space rendered with the displacement material.
#[derive(Clone, Debug)]
pub struct Quad {
    /// World-space extent.
    pub rect: Rect,
    /// Material evaluated for every covered pixel.
    pub material: DisplacementMaterial,
}

impl Quad {
    /// Quad spanning the full container, centred on the world origin.
    pub fn filling(container: ContainerSize, material: DisplacementMaterial) -> Self {
        Self {
            rect: centred_rect(container),
            material,
        }
    }

    /// Resize the quad so it spans `container` again.
    pub fn fit_container(&mut self, container: ContainerSize) {
        self.rect = centred_rect(container);
    }

    /// Texture coordinate at world point `p` (origin top-left), or `None` outside the quad.
    pub fn uv_at(&self, p: Point) -> Option<Vec2> {
        let r = self.rect;
        if !r.contains(p) || r.width() <= 0.0 || r.height() <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (p.x - r.x0) / r.width(),
            (r.y1 - p.y) / r.height(),
        ))
    }
}

fn centred_rect(container: ContainerSize) -> Rect {
    let (hw, hh) = (container.width / 2.0, container.height / 2.0);
    Rect::new(-hw, -hh, hw, hh)
}

/// Everything drawn in one frame: at most one quad.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    quad: Option<Quad>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or replace) the quad.
    pub fn set_quad(&mut self, quad: Quad) {
        self.quad = Some(quad);
    }

    /// Borrow the quad.
    pub fn quad(&self) -> Option<&Quad> {
        self.quad.as_ref()
    }

    /// Mutably borrow the quad.
    pub fn quad_mut(&mut self) -> Option<&mut Quad> {
        self.quad.as_mut()
    }

    /// Drop all geometry.
    pub fn clear(&mut self) {
        self.quad = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/quad.rs"]
mod tests;
