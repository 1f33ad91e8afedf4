use rayon::prelude::*;

use crate::effects::displacement::shade_rgba8;
use crate::foundation::core::{Affine, Point, Size};
use crate::foundation::error::{DistortError, DistortResult};
use crate::render::backend::{FrameRGBA, RenderSettings, Renderer};
use crate::scene::camera::OrthoCamera;
use crate::scene::quad::{Quad, Scene};

/// Software renderer: every pixel centre is unprojected into world space and, when it lands on
/// the quad, shaded with the displacement material.
#[derive(Debug)]
pub struct CpuRenderer {
    settings: RenderSettings,
    surface: Option<Size>,
    frames_rendered: u64,
}

impl CpuRenderer {
    /// Create a renderer without a surface.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            surface: None,
            frames_rendered: 0,
        }
    }

    /// Number of successful [`Renderer::render`] calls.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn clear_px(&self) -> [u8; 4] {
        self.settings.clear_rgba.unwrap_or([0, 0, 0, 0])
    }
}

impl Renderer for CpuRenderer {
    fn create_surface(&mut self, size: Size) -> DistortResult<()> {
        tracing::debug!(width = size.width, height = size.height, "cpu surface created");
        self.surface = Some(size);
        Ok(())
    }

    fn resize(&mut self, size: Size) -> DistortResult<()> {
        if self.surface.is_none() {
            return Err(DistortError::render("resize without a drawing surface"));
        }
        self.surface = Some(size);
        Ok(())
    }

    fn surface_size(&self) -> Option<Size> {
        self.surface
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn render(&mut self, scene: &Scene, camera: &OrthoCamera) -> DistortResult<FrameRGBA> {
        let size = self
            .surface
            .ok_or_else(|| DistortError::render("render without a drawing surface"))?;

        let clear = self.clear_px();
        let mut data = vec![0u8; size.rgba8_len()];
        let row_len = size.width as usize * 4;

        match scene.quad() {
            None => {
                for px in data.chunks_exact_mut(4) {
                    px.copy_from_slice(&clear);
                }
            }
            Some(quad) => {
                let to_world = camera.pixel_to_world(size);
                if self.settings.parallel {
                    data.par_chunks_mut(row_len)
                        .enumerate()
                        .for_each(|(y, row)| shade_row(row, y as u32, quad, to_world, clear));
                } else {
                    for (y, row) in data.chunks_mut(row_len).enumerate() {
                        shade_row(row, y as u32, quad, to_world, clear);
                    }
                }
            }
        }

        self.frames_rendered += 1;
        Ok(FrameRGBA {
            width: size.width,
            height: size.height,
            data,
            premultiplied: true,
        })
    }

    fn release(&mut self) {
        self.surface = None;
    }
}

fn shade_row(row: &mut [u8], y: u32, quad: &Quad, to_world: Affine, clear: [u8; 4]) {
    let material = &quad.material;
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let world = to_world * Point::new(x as f64 + 0.5, f64::from(y) + 0.5);
        let out = match quad.uv_at(world) {
            Some(uv) => shade_rgba8(uv, &material.textures, &material.uniforms),
            None => clear,
        };
        px.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
