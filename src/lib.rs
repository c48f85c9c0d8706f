//! fourier-paint: draw a free-hand stroke and watch it redrawn by a chain of
//! rotating epicycles computed from its discrete Fourier transform.
//!
//! The numerical core lives under [`data`]: resampling of the irregular
//! pointer samples onto a uniform grid, a radix-2 FFT over parallel real
//! arrays, and the epicycle reconstruction with its playback state machines.
//! The [`app`] module hosts it in an egui canvas.
//!
//! Quick start:
//!
//! ```no_run
//! fn main() -> eframe::Result<()> {
//!     fourier_paint::run(fourier_paint::PaintConfig::default())
//! }
//! ```
//!
//! Headless producers can feed strokes over a channel instead of the mouse:
//!
//! ```no_run
//! let (sink, rx) = fourier_paint::channel_strokes();
//! std::thread::spawn(move || {
//!     let _ = sink.begin(0.0, 0.0, 0.0);
//!     let _ = sink.sample(0.5, 100.0, 0.0);
//!     let _ = sink.sample(1.0, 100.0, 100.0);
//!     let _ = sink.end();
//! });
//! fourier_paint::run_with_strokes(rx, fourier_paint::PaintConfig::default()).unwrap();
//! ```

pub mod app;
pub mod config;
pub mod controllers;
pub mod data;
pub mod error;
pub mod hotkeys;
pub mod sink;

pub use app::{run, run_with_strokes, PaintApp};
pub use config::{Controllers, PaintConfig};
pub use controllers::{PlaybackController, PlaybackInfo};
pub use data::epicycles::{reconstruct_frame, Frame, HarmonicRounding, Segment};
pub use data::fft::{Polar, Spectrum};
pub use data::resample::Interpolation;
pub use data::session::{FrameScene, SessionState, StrokeSession};
pub use data::stroke::{Stroke, StrokeSample, UniformSeries};
pub use data::timebase::{PlaybackState, TimeBase};
pub use data::trail::{Trail, TrailPoint};
pub use error::InvalidInput;
pub use hotkeys::{Hotkey, Hotkeys, Modifier};
pub use sink::{channel_strokes, StrokeCommand, StrokeSink};
