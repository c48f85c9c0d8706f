//! Native window host: pointer capture on a canvas plus per-frame scene
//! painting.
//!
//! The [`run`] / [`run_with_strokes`] functions are the entry points for
//! launching the application. They wire the config, controllers and stroke
//! channel into a [`PaintApp`] and enter the eframe event loop.

use eframe::egui;

use crate::config::PaintConfig;
use crate::data::epicycles::Segment;
use crate::data::session::{SessionState, StrokeSession};
use crate::hotkeys::{detect_hotkey_actions, HotkeyAction, Hotkeys};
use crate::sink::StrokeCommand;

/// The interactive application: capture strokes with the primary mouse
/// button, watch the epicycle replay, steer it with the hotkeys.
pub struct PaintApp {
    session: StrokeSession,
    hotkeys: Hotkeys,
    /// Follow mode: the view tracks the pen tip and `zoom` applies.
    follow: bool,
    zoom: f32,
    zoom_step: f32,
    /// Wall-clock time of the current stroke's first sample.
    stroke_started: Option<f64>,
}

impl PaintApp {
    pub fn new(cfg: &PaintConfig) -> Self {
        let mut session = StrokeSession::new(
            cfg.interpolation,
            cfg.harmonic_rounding,
            cfg.oversampling,
            cfg.speed_step,
            cfg.circle_step,
        );
        if let Some(ctrl) = cfg.controllers.playback.clone() {
            session.set_controller(ctrl);
        }
        let hotkeys = cfg
            .hotkeys
            .clone()
            .or_else(|| Hotkeys::load_from_default_path().ok())
            .unwrap_or_default();
        Self {
            session,
            hotkeys,
            follow: false,
            zoom: 1.0,
            zoom_step: cfg.zoom_step,
            stroke_started: None,
        }
    }

    pub fn with_strokes(
        rx: std::sync::mpsc::Receiver<StrokeCommand>,
        cfg: &PaintConfig,
    ) -> Self {
        let mut app = Self::new(cfg);
        app.session.set_receiver(rx);
        app
    }

    fn apply_hotkeys(&mut self, ctx: &egui::Context) {
        for action in detect_hotkey_actions(&self.hotkeys, ctx) {
            match action {
                HotkeyAction::Pause => self.session.toggle_pause(),
                HotkeyAction::Follow => self.follow = !self.follow,
                HotkeyAction::ZoomIn => self.zoom *= self.zoom_step,
                HotkeyAction::ZoomOut => self.zoom /= self.zoom_step,
                HotkeyAction::SpeedUp => self.session.speed_up(),
                HotkeyAction::SlowDown => self.session.slow_down(),
                HotkeyAction::MoreCircles => self.session.more_circles(),
                HotkeyAction::FewerCircles => self.session.fewer_circles(),
            }
        }
    }

    fn handle_pointer(&mut self, response: &egui::Response, center: egui::Pos2, now: f64) {
        let pos = response.interact_pointer_pos();
        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(p) = pos {
                self.session
                    .begin_stroke(0.0, (p.x - center.x) as f64, (p.y - center.y) as f64);
                self.stroke_started = Some(now);
            }
        } else if response.dragged_by(egui::PointerButton::Primary) {
            if let (Some(p), Some(start)) = (pos, self.stroke_started) {
                self.session
                    .add_sample(now - start, (p.x - center.x) as f64, (p.y - center.y) as f64);
            }
        } else if response.drag_stopped_by(egui::PointerButton::Primary) {
            self.stroke_started = None;
            if let Err(e) = self.session.end_stroke() {
                eprintln!("fourier-paint: discarding stroke: {}", e);
            }
        }
    }

    fn paint_scene(
        &self,
        scene: &crate::data::session::FrameScene,
        painter: &egui::Painter,
        center: egui::Pos2,
    ) {
        // Follow mode keeps the pen tip at the canvas center and scales
        // everything by the zoom factor.
        let scale = if self.follow { self.zoom } else { 1.0 };
        let pen = scene.position;
        let to_screen = |p: [f64; 2]| -> egui::Pos2 {
            if self.follow {
                egui::pos2(
                    center.x + (p[0] - pen[0]) as f32 * scale,
                    center.y + (p[1] - pen[1]) as f32 * scale,
                )
            } else {
                egui::pos2(center.x + p[0] as f32, center.y + p[1] as f32)
            }
        };

        if let Some(trail) = self.session.trail() {
            let len = trail.len();
            let points: Vec<egui::Pos2> = trail.iter().map(|p| to_screen([p.x, p.y])).collect();
            for (i, pair) in points.windows(2).enumerate() {
                let color = egui::Color32::WHITE
                    .gamma_multiply(crate::data::trail::Trail::alpha(i + 1, len));
                painter.line_segment([pair[0], pair[1]], egui::Stroke::new(2.0, color));
            }
        }

        let circle_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE.gamma_multiply(0.3));
        let line_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE.gamma_multiply(0.8));
        for segment in &scene.segments {
            match *segment {
                Segment::Circle { center: c, radius } => {
                    painter.circle_stroke(to_screen(c), radius as f32 * scale, circle_stroke);
                }
                Segment::Line { from, to } => {
                    painter.line_segment([to_screen(from), to_screen(to)], line_stroke);
                }
            }
        }
    }

    fn paint_capture(&self, painter: &egui::Painter, center: egui::Pos2) {
        let points: Vec<egui::Pos2> = self
            .session
            .samples()
            .iter()
            .map(|s| egui::pos2(center.x + s.x as f32, center.y + s.y as f32))
            .collect();
        if points.len() >= 2 {
            painter.add(egui::Shape::line(
                points,
                egui::Stroke::new(2.0, egui::Color32::WHITE),
            ));
        }
    }
}

impl eframe::App for PaintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.apply_hotkeys(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::drag());
                let center = response.rect.center();

                self.handle_pointer(&response, center, now);

                // frame() also drains the stroke channel and controller
                // requests, so it runs every update regardless of state.
                let scene = self.session.frame(now);
                if self.session.state() == SessionState::Capturing {
                    self.paint_capture(&painter, center);
                } else if let Some(scene) = &scene {
                    self.paint_scene(scene, &painter, center);
                }
            });

        // Keep ticking even without input events.
        ctx.request_repaint();
    }
}

/// Launch the application in a native window. Blocks until the window is
/// closed.
pub fn run(cfg: PaintConfig) -> eframe::Result<()> {
    let (_sink, rx) = crate::sink::channel_strokes();
    run_with_strokes(rx, cfg)
}

/// Launch with an external stroke channel so headless producers can feed
/// strokes alongside (or instead of) pointer input.
pub fn run_with_strokes(
    rx: std::sync::mpsc::Receiver<StrokeCommand>,
    mut cfg: PaintConfig,
) -> eframe::Result<()> {
    let app = PaintApp::with_strokes(rx, &cfg);
    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1000.0, 800.0));
    }
    eframe::run_native(&title, opts, Box::new(|_cc| Ok(Box::new(app))))
}
