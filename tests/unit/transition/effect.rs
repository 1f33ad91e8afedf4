use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::animation::ease::Ease;
use crate::assets::loader::ImageSource;
use crate::render::backend::RenderSettings;
use crate::render::cpu::CpuRenderer;

#[derive(Debug)]
struct CountingRenderer {
    inner: CpuRenderer,
    creates: Arc<AtomicUsize>,
    resizes: usize,
    releases: usize,
}

impl CountingRenderer {
    fn new(creates: Arc<AtomicUsize>) -> Self {
        Self {
            inner: CpuRenderer::new(RenderSettings::default()),
            creates,
            resizes: 0,
            releases: 0,
        }
    }
}

impl Renderer for CountingRenderer {
    fn create_surface(&mut self, size: Size) -> DistortResult<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create_surface(size)
    }

    fn resize(&mut self, size: Size) -> DistortResult<()> {
        self.resizes += 1;
        self.inner.resize(size)
    }

    fn surface_size(&self) -> Option<Size> {
        self.inner.surface_size()
    }

    fn render(&mut self, scene: &Scene, camera: &OrthoCamera) -> DistortResult<FrameRGBA> {
        self.inner.render(scene, camera)
    }

    fn release(&mut self) {
        self.releases += 1;
        self.inner.release();
    }
}

fn tex(rgba: [u8; 4], premultiplied: bool) -> Texture {
    Texture::solid(8, 6, rgba, premultiplied).unwrap()
}

fn options() -> TransitionOptions {
    TransitionOptions::new()
        .container(8.0, 6.0)
        .image1(tex([255, 0, 0, 255], true))
        .image2(tex([0, 0, 255, 255], true))
        .displacement_image(tex([128, 128, 128, 255], false))
        .speed(1.0)
        .easing(Ease::Linear)
}

fn transition(opts: &TransitionOptions) -> DistortionTransition<CountingRenderer> {
    DistortionTransition::from_options(opts, CountingRenderer::new(Arc::default())).unwrap()
}

fn ready(opts: &TransitionOptions) -> DistortionTransition<CountingRenderer> {
    let mut t = transition(opts);
    for slot in TextureSlot::ALL {
        let src = t.config().source(slot).clone();
        let ImageSource::Decoded(texture) = src else {
            panic!("test sources are decoded");
        };
        t.texture_loaded(slot, Ok(texture)).unwrap();
    }
    assert_eq!(t.status(), TransitionStatus::Ready);
    t
}

#[test]
fn missing_image2_fails_before_any_surface_exists() {
    let creates = Arc::new(AtomicUsize::new(0));
    let opts = TransitionOptions {
        image2: None,
        ..options()
    };
    let err = DistortionTransition::from_options(&opts, CountingRenderer::new(creates.clone()))
        .err()
        .unwrap();
    assert!(err.is_configuration());
    assert_eq!(creates.load(Ordering::SeqCst), 0);
}

#[test]
fn construction_allocates_container_sized_surface() {
    let creates = Arc::new(AtomicUsize::new(0));
    let t = DistortionTransition::from_options(&options(), CountingRenderer::new(creates.clone()))
        .unwrap();
    assert_eq!(creates.load(Ordering::SeqCst), 1);
    assert_eq!(t.surface_size(), Size::new(8, 6).unwrap());
    assert_eq!(t.renderer().surface_size(), Some(Size::new(8, 6).unwrap()));
    assert_eq!(t.status(), TransitionStatus::Loading);
    assert!(t.scene().quad().is_none());
    assert_eq!(t.factor(), 0.0);
}

#[test]
fn shader_waits_for_all_three_textures_in_any_order() {
    let mut t = transition(&options());
    t.texture_loaded(TextureSlot::Displacement, Ok(tex([128, 128, 128, 255], false)))
        .unwrap();
    assert_eq!(t.status(), TransitionStatus::Loading);
    assert!(t.scene().quad().is_none());

    t.texture_loaded(TextureSlot::Image2, Ok(tex([0, 0, 255, 255], true)))
        .unwrap();
    assert!(t.scene().quad().is_none());

    t.texture_loaded(TextureSlot::Image1, Ok(tex([255, 0, 0, 255], true)))
        .unwrap();
    assert_eq!(t.status(), TransitionStatus::Ready);
    assert!(t.is_hover_bound());
    assert_eq!(t.scene().quad().unwrap().rect.width(), 8.0);
}

#[test]
fn load_failure_is_terminal_and_surfaced() {
    let mut t = transition(&options());
    t.texture_loaded(TextureSlot::Image1, Ok(tex([255, 0, 0, 255], true)))
        .unwrap();
    let err = t
        .texture_loaded(
            TextureSlot::Image2,
            Err(DistortError::asset_load("image2 gone")),
        )
        .unwrap_err();
    assert!(matches!(err, DistortError::AssetLoad(_)));
    assert_eq!(t.status(), TransitionStatus::Failed);

    // Late completions never assemble a partial shader.
    t.texture_loaded(TextureSlot::Image2, Ok(tex([0, 0, 255, 255], true)))
        .unwrap();
    t.texture_loaded(TextureSlot::Displacement, Ok(tex([128, 128, 128, 255], false)))
        .unwrap();
    assert_eq!(t.status(), TransitionStatus::Failed);
    assert!(t.scene().quad().is_none());

    t.trigger_forward();
    assert!(!t.is_animating());
    assert!(matches!(t.render_frame(), Err(DistortError::Lifecycle(_))));
    assert!(t.load_textures(&crate::assets::loader::FsTextureLoader::default()).is_err());
}

#[test]
fn triggers_before_ready_are_ignored() {
    let mut t = transition(&options());
    t.trigger_forward();
    t.pointer_enter();
    t.tick(0.5);
    assert_eq!(t.factor(), 0.0);
    assert!(!t.is_animating());
    // The cleared surface still renders while loading.
    let frame = t.render_frame().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn forward_then_immediate_backward_settles_at_zero() {
    let mut t = ready(&options());
    t.trigger_forward();
    t.trigger_backward();
    for _ in 0..20 {
        t.tick(0.1);
    }
    assert_eq!(t.factor(), 0.0);
    assert!(!t.is_animating());
}

#[test]
fn pointer_leave_mid_flight_reverses_from_current_value() {
    let mut t = ready(&options());
    t.pointer_enter();
    for _ in 0..5 {
        t.tick(0.1);
    }
    let mid = t.factor();
    assert!((mid - 0.5).abs() < 1e-9, "{mid}");

    t.pointer_leave();
    t.tick(0.0);
    assert!((t.factor() - mid).abs() < 1e-9);
    t.tick(0.25);
    assert!((t.factor() - mid * 0.75).abs() < 1e-9);
    t.tick(1.0);
    assert_eq!(t.factor(), 0.0);
}

#[test]
fn factor_stays_clamped_under_overlapping_triggers() {
    let mut t = ready(&options().easing(Ease::InOutCubic).speed_in(0.3).speed_out(0.7));
    for i in 0..200u32 {
        if i % 3 == 0 {
            t.trigger_forward();
        }
        if i % 5 == 0 {
            t.trigger_backward();
        }
        t.tick(f64::from(i % 7) * 0.013);
        let f = t.factor();
        assert!((0.0..=1.0).contains(&f), "{f}");
    }
}

#[test]
fn hover_disabled_ignores_pointer_but_accepts_manual_triggers() {
    let mut t = ready(&options().hover(false));
    assert!(!t.is_hover_bound());
    t.handle_event(HostEvent::PointerEnter).unwrap();
    t.tick(2.0);
    assert_eq!(t.factor(), 0.0);

    t.handle_event(HostEvent::Next).unwrap();
    t.tick(2.0);
    assert_eq!(t.factor(), 1.0);
    t.handle_event(HostEvent::Previous).unwrap();
    t.tick(2.0);
    assert_eq!(t.factor(), 0.0);
}

#[test]
fn resize_is_idempotent_and_keeps_blend() {
    let mut t = ready(&options());
    t.next();
    t.tick(0.4);
    let factor = t.factor();

    assert!(t.on_resize(4.0, 3.0).unwrap());
    let camera = *t.camera();
    assert!(!t.on_resize(4.0, 3.0).unwrap());
    assert_eq!(t.renderer().resizes, 1);
    assert_eq!(*t.camera(), camera);
    assert_eq!(t.factor(), factor);

    assert_eq!(t.surface_size(), Size::new(4, 3).unwrap());
    let quad = t.scene().quad().unwrap();
    assert_eq!((quad.rect.width(), quad.rect.height()), (4.0, 3.0));
    assert_eq!((camera.left, camera.right, camera.top, camera.bottom), (-2.0, 2.0, 1.5, -1.5));

    let frame = t.render_frame().unwrap();
    assert_eq!((frame.width, frame.height), (4, 3));
}

#[test]
fn degenerate_resize_is_a_no_op() {
    let mut t = ready(&options());
    for (w, h) in [(0.0, 10.0), (10.0, -3.0), (f64::NAN, 2.0), (1e6, 1e6)] {
        assert!(!t.on_resize(w, h).unwrap());
    }
    assert_eq!(t.renderer().resizes, 0);
    assert_eq!(t.surface_size(), Size::new(8, 6).unwrap());
}

#[test]
fn rendered_endpoints_show_each_source_image() {
    let mut t = ready(&options());
    let frame = t.render_frame().unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [255, 0, 0, 255]));

    t.next();
    t.tick(1.0);
    let frame = t.render_frame().unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 255, 255]));
}

#[test]
fn dispose_cancels_loop_and_releases_surface() {
    let mut t = ready(&options());
    let handle = t.loop_handle();
    t.next();
    t.handle_event(HostEvent::Dispose).unwrap();
    assert!(handle.is_cancelled());
    assert_eq!(t.status(), TransitionStatus::Disposed);
    assert!(!t.is_animating());
    assert_eq!(t.renderer().releases, 1);
    assert_eq!(t.renderer().surface_size(), None);
    assert!(matches!(t.render_frame(), Err(DistortError::Lifecycle(_))));
    assert!(!t.on_resize(100.0, 100.0).unwrap());

    t.dispose();
    assert_eq!(t.renderer().releases, 1);
}

#[test]
fn dropping_the_transition_cancels_its_loop() {
    let t = ready(&options());
    let handle = t.loop_handle();
    drop(t);
    assert!(handle.is_cancelled());
}
