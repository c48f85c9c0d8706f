//! Configuration passed to [`crate::run`] / [`crate::run_with_strokes`].

use crate::controllers::PlaybackController;
use crate::data::epicycles::HarmonicRounding;
use crate::data::resample::Interpolation;
use crate::hotkeys::Hotkeys;

/// Optional controller handles the host keeps after launching the app.
#[derive(Clone, Default)]
pub struct Controllers {
    pub playback: Option<PlaybackController>,
}

/// Top-level configuration.
///
/// | Field              | Meaning                                          |
/// |--------------------|--------------------------------------------------|
/// | `interpolation`    | Resampling scheme applied to each stroke         |
/// | `harmonic_rounding`| Integer-snap vs. smooth replay phase             |
/// | `oversampling`     | Uniform samples per raw sample (power-of-two rounded up) |
/// | `speed_step`       | Multiplier per speed_up / slow_down press        |
/// | `zoom_step`        | Multiplier per zoom_in / zoom_out press          |
/// | `circle_step`      | Visible-fraction increment per circles press     |
/// | `title`            | Window title                                     |
/// | `native_options`   | Overrides for the eframe window                  |
/// | `hotkeys`          | Key bindings; `None` loads saved ones or defaults|
/// | `controllers`      | Programmatic control handles                     |
#[derive(Clone)]
pub struct PaintConfig {
    pub interpolation: Interpolation,
    pub harmonic_rounding: HarmonicRounding,
    pub oversampling: usize,
    pub speed_step: f64,
    pub zoom_step: f32,
    pub circle_step: f64,
    pub title: String,
    pub native_options: Option<eframe::NativeOptions>,
    pub hotkeys: Option<Hotkeys>,
    pub controllers: Controllers,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::CatmullRom,
            harmonic_rounding: HarmonicRounding::Continuous,
            oversampling: 16,
            speed_step: 1.1,
            zoom_step: 1.1,
            circle_step: 1.0 / 16.0,
            title: "Fourier Paint".to_string(),
            native_options: None,
            hotkeys: None,
            controllers: Controllers::default(),
        }
    }
}
