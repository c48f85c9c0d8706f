//! Raw stroke samples and the uniform series derived from them.

use crate::error::InvalidInput;

/// One pointer sample of a free-hand stroke: a timestamp in seconds
/// (relative to the stroke's start, so `t = 0` for the first sample) and a
/// canvas-centered position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

/// Minimal timestamp increment used by capture code to keep timestamps
/// strictly ascending when two pointer events share a clock reading.
pub const MIN_TIME_STEP: f64 = 0.0009765625; // 2^-10

/// A completed stroke: non-empty, timestamps strictly ascending.
///
/// Both invariants are checked once here so the resampler and everything
/// downstream can rely on them instead of re-validating per call.
#[derive(Debug, Clone)]
pub struct Stroke {
    samples: Vec<StrokeSample>,
}

impl Stroke {
    pub fn new(samples: Vec<StrokeSample>) -> Result<Self, InvalidInput> {
        if samples.is_empty() {
            return Err(InvalidInput::Empty);
        }
        for i in 1..samples.len() {
            if samples[i - 1].t >= samples[i].t {
                return Err(InvalidInput::NonAscendingTimestamps { index: i });
            }
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[StrokeSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        false // non-empty by construction
    }

    pub fn first(&self) -> StrokeSample {
        self.samples[0]
    }

    pub fn last(&self) -> StrokeSample {
        self.samples[self.samples.len() - 1]
    }

    /// Raw time span `t_last - t_first`. Zero for a single-sample stroke.
    pub fn duration(&self) -> f64 {
        self.last().t - self.first().t
    }
}

/// A stroke resampled onto a uniform time grid: three parallel arrays of
/// equal length. Immutable once built; one instance per stroke session.
#[derive(Debug, Clone)]
pub struct UniformSeries {
    xs: Vec<f64>,
    ys: Vec<f64>,
    ts: Vec<f64>,
}

impl UniformSeries {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, ts: Vec<f64>) -> Result<Self, InvalidInput> {
        if xs.len() != ys.len() {
            return Err(InvalidInput::LengthMismatch {
                left: xs.len(),
                right: ys.len(),
            });
        }
        if xs.len() != ts.len() {
            return Err(InvalidInput::LengthMismatch {
                left: xs.len(),
                right: ts.len(),
            });
        }
        Ok(Self { xs, ys, ts })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn ts(&self) -> &[f64] {
        &self.ts
    }
}

/// Output grid size for a stroke of `sample_count` raw points: the next
/// power of two at or above `oversampling` times the raw count.
pub fn uniform_len(sample_count: usize, oversampling: usize) -> usize {
    (sample_count * oversampling).max(1).next_power_of_two()
}
