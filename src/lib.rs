//! hover-distort renders a hover-triggered displacement-map transition between two images.
//!
//! Two source images and a displacement map feed a displacement shader evaluated over a
//! full-surface quad seen through an orthographic camera. A single blend factor in `[0, 1]` is
//! tweened on pointer enter/leave (or manual triggers) and the effect is re-rendered every frame.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: `TransitionOptions -> TransitionConfig` (validated, fail fast)
//! 2. **Load**: three textures decoded concurrently, assembled into the shader inputs once all
//!    of them arrived
//! 3. **Animate**: host events start tweens on the blend factor; `tick` advances them
//! 4. **Render**: `DistortionTransition::render_frame -> FrameRGBA` (CPU backend)
//! 5. **Drive** (optional): a [`RenderLoop`] replays scripted events and pushes frames to a
//!    [`FrameSink`]
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: for a given event script and frame rate, output frames are identical.
//! - **Premultiplied RGBA8** end-to-end: renderers output premultiplied pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod effects;
mod foundation;
mod render;
mod scene;
mod session;
mod transition;

pub use animation::ease::Ease;
pub use animation::tween::{Tween, TweenDriver, Tweener};
pub use assets::decode::{AlphaMode, decode_image};
pub use assets::loader::{
    FsTextureLoader, ImageSource, PendingTextures, TextureLoader, TextureSlot, load_textures,
};
pub use effects::displacement::{DistortionDirection, TextureSet, Uniforms, shade, shade_rgba8};
pub use effects::texture::Texture;
pub use foundation::core::{
    Affine, ContainerSize, Fps, FrameIndex, MAX_SURFACE_PIXELS, Point, Rect, Size, Vec2,
};
pub use foundation::error::{DistortError, DistortResult};
pub use foundation::math::unpremultiply_rgba8_in_place;
pub use render::backend::{BackendKind, FrameRGBA, RenderSettings, Renderer, create_backend};
pub use render::cpu::CpuRenderer;
pub use scene::camera::OrthoCamera;
pub use scene::quad::{DisplacementMaterial, Quad, Scene};
pub use session::frame_loop::{
    EventScript, LoopHandle, LoopStats, Pacing, RenderLoop, ScriptedEvent,
};
pub use session::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use transition::blend::BlendState;
pub use transition::config::{
    DEFAULT_EASING, DEFAULT_SPEED_IN, DEFAULT_SPEED_OUT, TransitionConfig, TransitionOptions,
};
pub use transition::effect::{DistortionTransition, TransitionStatus};
pub use transition::events::HostEvent;
