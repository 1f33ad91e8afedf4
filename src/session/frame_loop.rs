use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{DistortError, DistortResult};
use crate::render::backend::Renderer;
use crate::session::sink::{FrameSink, SinkConfig};
use crate::transition::effect::DistortionTransition;
use crate::transition::events::HostEvent;

/// Shared cancellation flag for a render loop. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    cancelled: Arc<AtomicBool>,
}

impl LoopHandle {
    /// A handle that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop before its next frame. Safe to call from any thread.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether [`LoopHandle::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A host event scheduled at a loop time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptedEvent {
    /// Loop time in seconds.
    pub at_secs: f64,
    /// Event delivered at that time.
    pub event: HostEvent,
}

/// Time-ordered host events replayed by a [`RenderLoop`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventScript {
    events: Vec<ScriptedEvent>,
    next: usize,
}

impl EventScript {
    /// Build a script; events are stably sorted by time.
    pub fn new(mut events: Vec<ScriptedEvent>) -> Self {
        events.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Self { events, next: 0 }
    }

    /// Parse a comma-separated script such as `enter@0,leave@0.5,resize@1:400x300,dispose@2`.
    ///
    /// Event names: `enter`, `leave`, `next`, `previous`, `resize` (with `:WxH`), `dispose`.
    pub fn parse(script: &str) -> DistortResult<Self> {
        let mut events = Vec::new();
        for item in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (head, args) = match item.split_once(':') {
                Some((h, a)) => (h, Some(a)),
                None => (item, None),
            };
            let (name, at) = head.split_once('@').ok_or_else(|| {
                DistortError::configuration(format!("script item '{item}' needs '@<seconds>'"))
            })?;
            let at_secs: f64 = at.trim().parse().map_err(|_| {
                DistortError::configuration(format!("invalid time in script item '{item}'"))
            })?;
            if !at_secs.is_finite() || at_secs < 0.0 {
                return Err(DistortError::configuration(format!(
                    "script time must be finite and >= 0 in '{item}'"
                )));
            }

            let event = match (name.trim().to_ascii_lowercase().as_str(), args) {
                ("enter", None) => HostEvent::PointerEnter,
                ("leave", None) => HostEvent::PointerLeave,
                ("next", None) => HostEvent::Next,
                ("previous" | "prev", None) => HostEvent::Previous,
                ("dispose", None) => HostEvent::Dispose,
                ("resize", Some(dims)) => {
                    let (w, h) = dims
                        .split_once(['x', 'X'])
                        .and_then(|(w, h)| {
                            Some((w.trim().parse::<f64>().ok()?, h.trim().parse::<f64>().ok()?))
                        })
                        .ok_or_else(|| {
                            DistortError::configuration(format!(
                                "resize expects ':<width>x<height>' in '{item}'"
                            ))
                        })?;
                    HostEvent::Resize {
                        width: w,
                        height: h,
                    }
                }
                _ => {
                    return Err(DistortError::configuration(format!(
                        "unknown script item '{item}'"
                    )));
                }
            };
            events.push(ScriptedEvent { at_secs, event });
        }
        Ok(Self::new(events))
    }

    /// Number of events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len() - self.next
    }

    /// Remove and return every undelivered event due at or before `now_secs`.
    pub fn take_due(&mut self, now_secs: f64) -> Vec<HostEvent> {
        let start = self.next;
        while self.next < self.events.len() && self.events[self.next].at_secs <= now_secs {
            self.next += 1;
        }
        self.events[start..self.next]
            .iter()
            .map(|e| e.event)
            .collect()
    }
}

/// How loop time relates to wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pacing {
    /// Step time by one frame interval per iteration without waiting.
    #[default]
    Offline,
    /// Sleep until each frame's deadline.
    Realtime,
}

/// Counters reported by [`RenderLoop::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoopStats {
    /// Frames rendered and pushed.
    pub frames: u64,
    /// Host events delivered.
    pub events: u64,
    /// Loop time of the last rendered frame, in seconds.
    pub last_frame_secs: f64,
    /// Whether the loop stopped because its handle was cancelled.
    pub cancelled: bool,
}

/// Repeating render task: advance the tween, deliver due events, render, push.
///
/// Frame `i` is rendered at loop time `i / fps`. Events are delivered on the first frame whose
/// time is at or after their timestamp. The loop runs until the transition's [`LoopHandle`] is
/// cancelled or `max_frames` frames have been pushed.
#[derive(Clone, Copy, Debug)]
pub struct RenderLoop {
    fps: Fps,
    pacing: Pacing,
    max_frames: Option<u64>,
}

impl RenderLoop {
    /// Offline loop without a frame limit.
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            pacing: Pacing::Offline,
            max_frames: None,
        }
    }

    /// Set the pacing mode.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Stop after `frames` frames.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Drive `transition` until cancelled or the frame limit is reached.
    ///
    /// The sink is ended even when a frame fails.
    #[tracing::instrument(level = "debug", skip_all, fields(fps = self.fps.as_f64()))]
    pub fn run<R: Renderer>(
        &self,
        transition: &mut DistortionTransition<R>,
        mut script: EventScript,
        sink: &mut dyn FrameSink,
    ) -> DistortResult<LoopStats> {
        let surface = transition.surface_size();
        sink.begin(SinkConfig {
            width: surface.width,
            height: surface.height,
            fps: self.fps,
        })?;

        tracing::info!(
            max_frames = ?self.max_frames,
            scripted_events = script.remaining(),
            "render loop started"
        );
        let result = self.drive(transition, &mut script, sink);
        let ended = sink.end();
        let stats = result?;
        ended?;

        tracing::info!(
            frames = stats.frames,
            events = stats.events,
            cancelled = stats.cancelled,
            "render loop stopped"
        );
        Ok(stats)
    }

    fn drive<R: Renderer>(
        &self,
        transition: &mut DistortionTransition<R>,
        script: &mut EventScript,
        sink: &mut dyn FrameSink,
    ) -> DistortResult<LoopStats> {
        let handle = transition.loop_handle();
        let dt = self.fps.frame_duration_secs();
        let started = Instant::now();
        let mut stats = LoopStats::default();
        let mut frame = 0u64;

        loop {
            if self.max_frames.is_some_and(|max| frame >= max) {
                break;
            }
            let now = self.fps.frames_to_secs(frame);
            if frame > 0 {
                transition.tick(dt);
            }
            for event in script.take_due(now) {
                tracing::debug!(?event, at = now, "delivering event");
                transition.handle_event(event)?;
                stats.events += 1;
            }
            if handle.is_cancelled() {
                stats.cancelled = true;
                break;
            }

            if self.pacing == Pacing::Realtime {
                let deadline = started + Duration::from_secs_f64(now);
                if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                    std::thread::sleep(wait);
                }
            }

            let pixels = transition.render_frame()?;
            sink.push_frame(FrameIndex(frame), &pixels)?;
            stats.frames += 1;
            stats.last_frame_secs = now;
            frame += 1;
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/frame_loop.rs"]
mod tests;
