use crate::foundation::core::Size;
use crate::foundation::error::DistortResult;
use crate::scene::camera::OrthoCamera;
use crate::scene::quad::Scene;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Drawing-surface owner that turns a [`Scene`] seen through an [`OrthoCamera`] into pixels.
pub trait Renderer: Send {
    /// Allocate the drawing surface. Replaces any previous surface.
    fn create_surface(&mut self, size: Size) -> DistortResult<()>;

    /// Change the pixel dimensions of the existing surface.
    fn resize(&mut self, size: Size) -> DistortResult<()>;

    /// Current surface dimensions, `None` before creation or after release.
    fn surface_size(&self) -> Option<Size>;

    /// Render one frame.
    fn render(&mut self, scene: &Scene, camera: &OrthoCamera) -> DistortResult<FrameRGBA>;

    /// Free the drawing surface. Rendering afterwards fails until a new surface is created.
    fn release(&mut self);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn create_surface(&mut self, size: Size) -> DistortResult<()> {
        (**self).create_surface(size)
    }

    fn resize(&mut self, size: Size) -> DistortResult<()> {
        (**self).resize(size)
    }

    fn surface_size(&self) -> Option<Size> {
        (**self).surface_size()
    }

    fn render(&mut self, scene: &Scene, camera: &OrthoCamera) -> DistortResult<FrameRGBA> {
        (**self).render(scene, camera)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Software rasterizer evaluating the displacement shader per pixel.
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Color for pixels not covered by the quad. `None` leaves them transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Shade rows on the rayon pool when `true`.
    pub parallel: bool,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind, settings: &RenderSettings) -> Box<dyn Renderer> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuRenderer::new(settings.clone())),
    }
}
