use std::sync::Arc;

use crate::animation::tween::{TweenDriver, Tweener};
use crate::assets::loader::{self, PendingTextures, TextureLoader, TextureSlot};
use crate::effects::displacement::{TextureSet, Uniforms};
use crate::effects::texture::Texture;
use crate::foundation::core::{ContainerSize, Size};
use crate::foundation::error::{DistortError, DistortResult};
use crate::render::backend::{FrameRGBA, Renderer};
use crate::scene::camera::OrthoCamera;
use crate::scene::quad::{DisplacementMaterial, Quad, Scene};
use crate::session::frame_loop::LoopHandle;
use crate::transition::blend::BlendState;
use crate::transition::config::{TransitionConfig, TransitionOptions};
use crate::transition::events::HostEvent;

/// Lifecycle of a [`DistortionTransition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Surface allocated, waiting for textures.
    Loading,
    /// Shader assembled; triggers and pointer events are live.
    Ready,
    /// A texture failed to load. Terminal.
    Failed,
    /// Torn down. Terminal.
    Disposed,
}

/// Hover-driven displacement transition between two images.
///
/// Owns the blend factor, the shader inputs and the mapping from host events to tweens. Drawing
/// and interpolation are delegated to a [`Renderer`] and a [`TweenDriver`].
pub struct DistortionTransition<R: Renderer> {
    config: TransitionConfig,
    renderer: R,
    camera: OrthoCamera,
    container: ContainerSize,
    surface: Size,
    scene: Scene,
    pending: PendingTextures,
    blend: BlendState,
    tween: Box<dyn TweenDriver>,
    status: TransitionStatus,
    hover_bound: bool,
    loop_handle: LoopHandle,
}

impl<R: Renderer> DistortionTransition<R> {
    /// Allocate the drawing surface for a validated configuration. Textures are not loaded yet.
    pub fn new(config: TransitionConfig, mut renderer: R) -> DistortResult<Self> {
        let container = config.container();
        let surface = container.to_surface_size().ok_or_else(|| {
            DistortError::configuration("container must have positive finite dimensions")
        })?;
        renderer.create_surface(surface)?;
        tracing::info!(
            width = surface.width,
            height = surface.height,
            hover = config.hover(),
            direction = ?config.direction(),
            "distortion transition created"
        );

        Ok(Self {
            camera: OrthoCamera::for_container(container),
            container,
            surface,
            scene: Scene::new(),
            pending: PendingTextures::new(),
            blend: BlendState::new(),
            tween: Box::new(Tweener::new()),
            status: TransitionStatus::Loading,
            hover_bound: false,
            loop_handle: LoopHandle::new(),
            config,
            renderer,
        })
    }

    /// Validate `options` first; nothing is allocated when validation fails.
    pub fn from_options(options: &TransitionOptions, renderer: R) -> DistortResult<Self> {
        Self::new(options.validate()?, renderer)
    }

    /// Replace the tween driver. Any in-flight animation of the previous driver is dropped.
    pub fn with_tween_driver(mut self, driver: Box<dyn TweenDriver>) -> Self {
        self.tween = driver;
        self
    }

    /// Completion callback for one texture load. Completions may arrive in any order.
    ///
    /// The shader is assembled only once all three textures have arrived. A failure is terminal
    /// and returned; completions after a failure or disposal are ignored.
    pub fn texture_loaded(
        &mut self,
        slot: TextureSlot,
        result: DistortResult<Texture>,
    ) -> DistortResult<()> {
        if self.status != TransitionStatus::Loading {
            tracing::debug!(slot = slot.label(), status = ?self.status, "ignoring texture completion");
            return Ok(());
        }

        let texture = match result {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(slot = slot.label(), error = %e, "texture load failed");
                self.status = TransitionStatus::Failed;
                return Err(e);
            }
        };
        tracing::debug!(
            slot = slot.label(),
            width = texture.size().width,
            height = texture.size().height,
            "texture loaded"
        );
        self.pending.complete(slot, texture);

        match self.pending.try_assemble() {
            None => Ok(()),
            Some(Ok(textures)) => {
                self.assemble(textures);
                Ok(())
            }
            Some(Err(e)) => {
                self.status = TransitionStatus::Failed;
                Err(e)
            }
        }
    }

    /// Load all three textures concurrently and feed them to [`Self::texture_loaded`] in
    /// completion order. Returns the first failure.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn load_textures(&mut self, loader: &dyn TextureLoader) -> DistortResult<()> {
        if self.status != TransitionStatus::Loading {
            return Err(DistortError::lifecycle(format!(
                "textures can only be loaded while loading, status is {:?}",
                self.status
            )));
        }

        let requests: Vec<_> = TextureSlot::ALL
            .into_iter()
            .map(|slot| (slot, self.config.source(slot).clone()))
            .collect();

        let mut first_err = None;
        for (slot, result) in loader::load_textures(loader, &requests) {
            if let Err(e) = self.texture_loaded(slot, result) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn assemble(&mut self, textures: TextureSet) {
        let material = DisplacementMaterial {
            textures: Arc::new(textures),
            uniforms: Uniforms::new(self.config.intensity(), self.config.direction()),
        };
        self.scene.set_quad(Quad::filling(self.container, material));
        self.status = TransitionStatus::Ready;
        self.hover_bound = self.config.hover();
        tracing::info!(hover_bound = self.hover_bound, "shader assembled");
    }

    /// Animate the blend factor towards 1 over `speed_in`, overriding any in-flight animation.
    pub fn trigger_forward(&mut self) {
        self.animate_to(1.0, self.config.speed_in());
    }

    /// Animate the blend factor towards 0 over `speed_out`, overriding any in-flight animation.
    pub fn trigger_backward(&mut self) {
        self.animate_to(0.0, self.config.speed_out());
    }

    /// Alias of [`Self::trigger_forward`].
    pub fn next(&mut self) {
        self.trigger_forward();
    }

    /// Alias of [`Self::trigger_backward`].
    pub fn previous(&mut self) {
        self.trigger_backward();
    }

    fn animate_to(&mut self, target: f64, duration_secs: f64) {
        if self.status != TransitionStatus::Ready {
            tracing::debug!(to = target, status = ?self.status, "trigger ignored");
            return;
        }
        let from = self.blend.factor();
        tracing::debug!(from, to = target, duration_secs, "blend animation started");
        self.tween
            .animate(from, target, duration_secs, self.config.easing());
    }

    /// Pointer entered the container. Ignored unless hover is bound.
    pub fn pointer_enter(&mut self) {
        if self.hover_bound {
            self.trigger_forward();
        }
    }

    /// Pointer left the container. Ignored unless hover is bound.
    pub fn pointer_leave(&mut self) {
        if self.hover_bound {
            self.trigger_backward();
        }
    }

    /// Dispatch one host event.
    pub fn handle_event(&mut self, event: HostEvent) -> DistortResult<()> {
        match event {
            HostEvent::PointerEnter => self.pointer_enter(),
            HostEvent::PointerLeave => self.pointer_leave(),
            HostEvent::Next => self.next(),
            HostEvent::Previous => self.previous(),
            HostEvent::Resize { width, height } => {
                self.on_resize(width, height)?;
            }
            HostEvent::Dispose => self.dispose(),
        }
        Ok(())
    }

    /// Advance the tween driver by `dt_secs`; its updates are the only writes to the blend factor.
    pub fn tick(&mut self, dt_secs: f64) {
        let blend = &mut self.blend;
        self.tween.step(dt_secs, &mut |v| blend.set(v));
    }

    /// Refit camera, surface and quad to a resized container. The blend factor is untouched.
    ///
    /// Degenerate or oversized sizes and repeats of the current size are no-ops; returns whether anything
    /// changed.
    pub fn on_resize(&mut self, width: f64, height: f64) -> DistortResult<bool> {
        if self.status == TransitionStatus::Disposed {
            return Ok(false);
        }
        let container = ContainerSize::new(width, height);
        let Some(surface) = container.to_surface_size() else {
            tracing::debug!(width, height, "ignoring degenerate resize");
            return Ok(false);
        };
        if container == self.container && surface == self.surface {
            return Ok(false);
        }

        self.renderer.resize(surface)?;
        self.camera.fit_container(container);
        if let Some(quad) = self.scene.quad_mut() {
            quad.fit_container(container);
        }
        self.container = container;
        self.surface = surface;
        tracing::debug!(width = surface.width, height = surface.height, "resized");
        Ok(true)
    }

    /// Feed the current blend factor to the shader and render one frame.
    ///
    /// Before the shader is assembled this yields the cleared surface.
    pub fn render_frame(&mut self) -> DistortResult<FrameRGBA> {
        match self.status {
            TransitionStatus::Disposed => {
                return Err(DistortError::lifecycle("render after dispose"));
            }
            TransitionStatus::Failed => {
                return Err(DistortError::lifecycle("render after failed texture load"));
            }
            TransitionStatus::Loading | TransitionStatus::Ready => {}
        }
        if let Some(quad) = self.scene.quad_mut() {
            quad.material.uniforms.disp_factor = self.blend.factor();
        }
        self.renderer.render(&self.scene, &self.camera)
    }

    /// Stop the render loop, drop any in-flight animation and release the drawing surface.
    pub fn dispose(&mut self) {
        if self.status == TransitionStatus::Disposed {
            return;
        }
        self.loop_handle.cancel();
        self.tween.cancel();
        self.scene.clear();
        self.renderer.release();
        self.hover_bound = false;
        self.status = TransitionStatus::Disposed;
        tracing::info!("distortion transition disposed");
    }

    /// Current blend factor in `[0, 1]`.
    pub fn factor(&self) -> f64 {
        self.blend.factor()
    }

    /// Lifecycle state.
    pub fn status(&self) -> TransitionStatus {
        self.status
    }

    /// Whether pointer enter/leave currently drive the transition.
    pub fn is_hover_bound(&self) -> bool {
        self.hover_bound
    }

    /// Whether a blend animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.tween.is_active()
    }

    /// Validated configuration.
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Current container size.
    pub fn container(&self) -> ContainerSize {
        self.container
    }

    /// Current drawing-surface size.
    pub fn surface_size(&self) -> Size {
        self.surface
    }

    /// Camera used for rendering.
    pub fn camera(&self) -> &OrthoCamera {
        &self.camera
    }

    /// Scene graph (empty until the shader is assembled).
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Borrow the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Cancellation handle of the render loop driving this transition.
    pub fn loop_handle(&self) -> LoopHandle {
        self.loop_handle.clone()
    }
}

impl<R: Renderer> Drop for DistortionTransition<R> {
    fn drop(&mut self) {
        self.loop_handle.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/effect.rs"]
mod tests;
