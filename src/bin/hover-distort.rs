use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use hover_distort::{
    BackendKind, DistortionTransition, Ease, EventScript, Fps, FsTextureLoader, Pacing,
    PngSequenceSink, RenderLoop, RenderSettings, Renderer, TransitionOptions, TweenDriver,
    create_backend, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "hover-distort", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame at a fixed blend factor as a PNG.
    Frame(FrameArgs),
    /// Replay an event script and write every frame as a PNG sequence.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Transition JSON config. Relative image paths resolve against its directory.
    #[arg(long)]
    config: PathBuf,

    /// Blend factor in [0, 1].
    #[arg(long)]
    factor: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Transition JSON config. Relative image paths resolve against its directory.
    #[arg(long)]
    config: PathBuf,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Comma-separated events, e.g. `enter@0,leave@0.5,resize@1:400x300`.
    #[arg(long, default_value = "enter@0")]
    script: String,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Length of the run in seconds.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    /// Sleep to each frame deadline instead of rendering as fast as possible.
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Shade rows on the calling thread only.
    #[arg(long, default_value_t = false)]
    serial: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(path: &Path) -> anyhow::Result<TransitionOptions> {
    TransitionOptions::from_json_file(path)
        .with_context(|| format!("load config '{}'", path.display()))
}

fn open_transition(
    opts: &TransitionOptions,
    settings: &RenderSettings,
) -> anyhow::Result<DistortionTransition<Box<dyn Renderer>>> {
    let renderer = create_backend(BackendKind::Cpu, settings);
    let transition = DistortionTransition::from_options(opts, renderer)?;
    Ok(transition)
}

/// Emits one fixed value on the next step and ignores animation requests.
struct HoldFactor {
    pending: Option<f64>,
}

impl TweenDriver for HoldFactor {
    fn animate(&mut self, _from: f64, _to: f64, _duration_secs: f64, _ease: Ease) {}

    fn step(&mut self, _dt_secs: f64, on_update: &mut dyn FnMut(f64)) {
        if let Some(v) = self.pending.take() {
            on_update(v);
        }
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    fn target(&self) -> Option<f64> {
        self.pending
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.factor) {
        anyhow::bail!("--factor must be within [0, 1], got {}", args.factor);
    }
    let opts = load_options(&args.config)?;
    let settings = RenderSettings {
        parallel: true,
        ..RenderSettings::default()
    };
    let mut transition = open_transition(&opts, &settings)?
        .with_tween_driver(Box::new(HoldFactor {
            pending: Some(args.factor),
        }));
    transition.load_textures(&FsTextureLoader::default())?;
    transition.tick(0.0);
    let frame = transition.render_frame()?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&args.out, &frame)?;
    transition.dispose();

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        anyhow::bail!("--seconds must be finite and >= 0, got {}", args.seconds);
    }
    let fps = Fps::new(args.fps, 1)?;
    let script = EventScript::parse(&args.script)?;
    let opts = load_options(&args.config)?;

    let settings = RenderSettings {
        parallel: !args.serial,
        ..RenderSettings::default()
    };
    let mut transition = open_transition(&opts, &settings)?;
    transition.load_textures(&FsTextureLoader::default())?;

    let pacing = if args.realtime {
        Pacing::Realtime
    } else {
        Pacing::Offline
    };
    let render_loop = RenderLoop::new(fps)
        .with_pacing(pacing)
        .with_max_frames(fps.secs_to_frames_ceil(args.seconds).max(1));

    let mut sink = PngSequenceSink::new(&args.out_dir);
    let stats = render_loop.run(&mut transition, script, &mut sink)?;
    transition.dispose();

    eprintln!(
        "wrote {} frames to {}{}",
        stats.frames,
        args.out_dir.display(),
        if stats.cancelled { " (disposed)" } else { "" }
    );
    Ok(())
}
