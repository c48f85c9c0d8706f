//! Stroke session: the state machine tying capture, transform and playback
//! together.
//!
//! A session is always in exactly one of three states. `Idle` before any
//! stroke and after a failed capture, `Capturing` while samples arrive, and
//! `Playing` while the epicycle reconstruction of the last stroke animates.
//! The transform itself runs synchronously inside [`StrokeSession::end_stroke`];
//! for the few thousand samples a stroke produces it finishes well within a
//! frame.

use std::sync::mpsc::Receiver;

use crate::controllers::{PlaybackController, PlaybackInfo};
use crate::data::epicycles::{reconstruct_frame, HarmonicRounding, Segment};
use crate::data::fft::{Polar, Spectrum};
use crate::data::resample::Interpolation;
use crate::data::stroke::{uniform_len, Stroke, StrokeSample, UniformSeries, MIN_TIME_STEP};
use crate::data::timebase::{PlaybackState, TimeBase};
use crate::data::trail::Trail;
use crate::error::InvalidInput;
use crate::sink::StrokeCommand;

/// Observable session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Capturing,
    Playing,
}

/// Everything derived from one finished stroke.
struct Playback {
    series: UniformSeries,
    coeffs: Polar,
    /// Fundamental frequency in cycles per second.
    f0: f64,
    /// Extended stroke period in seconds; also the trail window.
    period: f64,
    timebase: TimeBase,
    trail: Trail,
}

/// One reconstructed instant, ready for a render sink.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameScene {
    pub elapsed: f64,
    pub paused: bool,
    /// Tip of the epicycle chain.
    pub position: [f64; 2],
    pub segments: Vec<Segment>,
}

/// Capture / transform / playback state machine.
pub struct StrokeSession {
    interpolation: Interpolation,
    rounding: HarmonicRounding,
    oversampling: usize,
    /// Speed multiplier applied per speed_up / slow_down request.
    speed_step: f64,
    /// Visible-fraction increment for more_circles / fewer_circles.
    circle_step: f64,
    state: SessionState,
    samples: Vec<StrokeSample>,
    playback: Option<Playback>,
    visible_fraction: f64,
    rx: Option<Receiver<StrokeCommand>>,
    controller: Option<PlaybackController>,
}

impl StrokeSession {
    pub fn new(
        interpolation: Interpolation,
        rounding: HarmonicRounding,
        oversampling: usize,
        speed_step: f64,
        circle_step: f64,
    ) -> Self {
        Self {
            interpolation,
            rounding,
            oversampling,
            speed_step,
            circle_step,
            state: SessionState::Idle,
            samples: Vec::new(),
            playback: None,
            visible_fraction: 1.0,
            rx: None,
            controller: None,
        }
    }

    /// Attach a stroke command channel; drained at the start of every frame.
    pub fn set_receiver(&mut self, rx: Receiver<StrokeCommand>) {
        self.rx = Some(rx);
    }

    /// Attach a playback controller; its requests are drained every frame
    /// and per-frame snapshots are published to its subscribers.
    pub fn set_controller(&mut self, controller: PlaybackController) {
        self.controller = Some(controller);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Samples of the stroke currently being captured.
    pub fn samples(&self) -> &[StrokeSample] {
        &self.samples
    }

    /// Uniform series of the stroke currently playing, if any.
    pub fn series(&self) -> Option<&UniformSeries> {
        self.playback.as_ref().map(|p| &p.series)
    }

    pub fn trail(&self) -> Option<&Trail> {
        self.playback.as_ref().map(|p| &p.trail)
    }

    pub fn period(&self) -> Option<f64> {
        self.playback.as_ref().map(|p| p.period)
    }

    pub fn visible_fraction(&self) -> f64 {
        self.visible_fraction
    }

    // ────────────────────────────────────────────────────────────────────
    // Capture
    // ────────────────────────────────────────────────────────────────────

    /// Start a new stroke. Any playback in progress is stopped and
    /// discarded, per-stroke view settings reset, and the first sample
    /// recorded.
    pub fn begin_stroke(&mut self, t: f64, x: f64, y: f64) {
        if let Some(playback) = &mut self.playback {
            playback.timebase.stop();
        }
        self.playback = None;
        self.visible_fraction = 1.0;
        self.samples.clear();
        self.samples.push(StrokeSample { t, x, y });
        self.state = SessionState::Capturing;
    }

    /// Append a sample. A timestamp at or before the previous one is
    /// perturbed forward by 2^-10 s so the captured stroke always satisfies
    /// the strictly-ascending contract.
    pub fn add_sample(&mut self, t: f64, x: f64, y: f64) {
        if self.state != SessionState::Capturing {
            return;
        }
        let t = match self.samples.last() {
            Some(last) if t <= last.t => last.t + MIN_TIME_STEP,
            _ => t,
        };
        self.samples.push(StrokeSample { t, x, y });
    }

    /// Finish the stroke: resample, transform, and enter playback.
    ///
    /// On error (for example `End` without `Begin`) the session is left
    /// `Idle` with no playback.
    pub fn end_stroke(&mut self) -> Result<(), InvalidInput> {
        self.state = SessionState::Idle;
        let stroke = Stroke::new(std::mem::take(&mut self.samples))?;

        let n = uniform_len(stroke.len(), self.oversampling);
        let span = stroke.duration();
        // Extend the period by one grid step so the replay wraps exactly
        // when the grid does. A single-sample stroke has no span; give it a
        // nominal one-second period instead of a division by zero.
        let period = if span > 0.0 {
            span * n as f64 / (n - 1) as f64
        } else {
            1.0
        };
        let f0 = n as f64 / period;

        let series = self.interpolation.resample(&stroke, n)?;
        let spectrum = Spectrum::forward(series.xs(), series.ys())?;
        let coeffs = spectrum.to_polar().scaled(1.0 / n as f64);

        self.playback = Some(Playback {
            series,
            coeffs,
            f0,
            period,
            timebase: TimeBase::new(),
            trail: Trail::new(),
        });
        self.state = SessionState::Playing;
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────
    // Per-frame driving
    // ────────────────────────────────────────────────────────────────────

    /// Advance the session by one display frame.
    ///
    /// Drains the stroke channel and controller requests, ticks the time
    /// base, reconstructs the epicycle chain and extends the trail. Returns
    /// `None` unless the session is playing.
    pub fn frame(&mut self, now: f64) -> Option<FrameScene> {
        self.drain_commands();
        self.drain_controller();

        let visible_fraction = self.visible_fraction;
        let rounding = self.rounding;
        let playback = self.playback.as_mut()?;
        if self.state != SessionState::Playing {
            return None;
        }

        let tick = playback.timebase.tick(now)?;
        let frame = reconstruct_frame(
            &playback.coeffs,
            tick.elapsed,
            playback.f0,
            visible_fraction,
            rounding,
        );
        if !tick.paused {
            playback
                .trail
                .push(frame.position[0], frame.position[1], tick.elapsed);
            playback.trail.trim_before(tick.elapsed, playback.period);
        }

        if let Some(ctrl) = &self.controller {
            ctrl.publish(PlaybackInfo {
                state: playback.timebase.state(),
                elapsed: tick.elapsed,
                speed: playback.timebase.speed(),
                visible_fraction,
            });
        }

        Some(FrameScene {
            elapsed: tick.elapsed,
            paused: tick.paused,
            position: frame.position,
            segments: frame.segments,
        })
    }

    fn drain_commands(&mut self) {
        let Some(rx) = self.rx.take() else { return };
        while let Ok(cmd) = rx.try_recv() {
            match cmd {
                StrokeCommand::Begin { t, x, y } => self.begin_stroke(t, x, y),
                StrokeCommand::Sample { t, x, y } => self.add_sample(t, x, y),
                StrokeCommand::End => {
                    if let Err(e) = self.end_stroke() {
                        eprintln!("fourier-paint: discarding stroke: {}", e);
                    }
                }
            }
        }
        self.rx = Some(rx);
    }

    fn drain_controller(&mut self) {
        let Some(ctrl) = &self.controller else { return };
        let pending = ctrl.take_pending();
        if let Some(fraction) = pending.visible_fraction {
            self.visible_fraction = fraction;
        }
        let Some(playback) = &mut self.playback else { return };
        match pending.pause {
            Some(true) => playback.timebase.pause(),
            Some(false) => playback.timebase.resume(),
            None => {}
        }
        if pending.toggle {
            playback.timebase.toggle();
        }
        if pending.speed_steps != 0 {
            playback
                .timebase
                .scale_speed(self.speed_step.powi(pending.speed_steps));
        }
        if pending.stop {
            playback.timebase.stop();
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Direct playback controls (used by the UI hotkeys)
    // ────────────────────────────────────────────────────────────────────

    pub fn toggle_pause(&mut self) {
        if let Some(p) = &mut self.playback {
            p.timebase.toggle();
        }
    }

    pub fn speed_up(&mut self) {
        if let Some(p) = &mut self.playback {
            p.timebase.scale_speed(self.speed_step);
        }
    }

    pub fn slow_down(&mut self) {
        if let Some(p) = &mut self.playback {
            p.timebase.scale_speed(1.0 / self.speed_step);
        }
    }

    pub fn playback_state(&self) -> Option<PlaybackState> {
        self.playback.as_ref().map(|p| p.timebase.state())
    }

    pub fn more_circles(&mut self) {
        self.visible_fraction = (self.visible_fraction + self.circle_step).clamp(0.0, 1.0);
    }

    pub fn fewer_circles(&mut self) {
        self.visible_fraction = (self.visible_fraction - self.circle_step).clamp(0.0, 1.0);
    }
}
