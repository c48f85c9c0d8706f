//! Resampling of irregular stroke samples onto a uniform time grid.
//!
//! The spectral transform needs equally spaced input, but pointer events
//! arrive whenever the OS delivers them. Two interpolation schemes are
//! offered: plain linear (fast, angular) and a periodic Catmull-Rom spline
//! that treats the stroke as a closed loop and rounds the seam where the
//! replay wraps from the last sample back to the first.

use crate::data::stroke::{Stroke, UniformSeries};
use crate::error::InvalidInput;

/// Interpolation scheme used when resampling a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Straight lines between consecutive samples.
    Linear,
    /// Periodic Catmull-Rom spline: C1-continuous, including across the
    /// wrap-around from the last sample back to the first.
    CatmullRom,
}

impl Interpolation {
    /// All interpolation schemes, for UI iteration.
    pub const ALL: [Interpolation; 2] = [Interpolation::Linear, Interpolation::CatmullRom];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Interpolation::Linear => "Linear",
            Interpolation::CatmullRom => "Catmull-Rom",
        }
    }

    /// Resample `stroke` onto a uniform grid of `n` points spanning the
    /// stroke's time range.
    ///
    /// The grid is `t0 + i * (t_last - t0) / (n - 1)` for `i in 0..n`, so the
    /// first output equals the first sample exactly. A single-sample stroke
    /// yields `n` copies of that sample. `n == 0` is rejected.
    pub fn resample(&self, stroke: &Stroke, n: usize) -> Result<UniformSeries, InvalidInput> {
        if n == 0 {
            return Err(InvalidInput::ZeroOutputCount);
        }
        if stroke.len() == 1 || n == 1 {
            let s = stroke.first();
            return UniformSeries::new(vec![s.x; n], vec![s.y; n], vec![s.t; n]);
        }
        let ts = uniform_grid(stroke.first().t, stroke.last().t, n);
        let (xs, ys) = match self {
            Interpolation::Linear => linear(stroke, &ts),
            Interpolation::CatmullRom => catmull_rom(stroke, &ts),
        };
        UniformSeries::new(xs, ys, ts)
    }
}

/// `n >= 2` equally spaced values from `t0` to `t1` inclusive.
fn uniform_grid(t0: f64, t1: f64, n: usize) -> Vec<f64> {
    let step = (t1 - t0) / (n - 1) as f64;
    (0..n).map(|i| t0 + i as f64 * step).collect()
}

/// Linear interpolation with a two-sample sliding window. O(n + l).
fn linear(stroke: &Stroke, grid: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let s = stroke.samples();
    let l = s.len();

    let mut seg = 0usize;
    let (mut t1, mut x1, mut y1) = (s[0].t, s[0].x, s[0].y);
    let (mut t2, mut x2, mut y2) = (s[1].t, s[1].x, s[1].y);
    // A capture glitch can leave the first interval with zero width; widen
    // its right edge toward the third sample so the slope stays finite.
    if l > 2 && t2 <= t1 {
        t2 = 0.5 * (t1 + s[2].t);
    }
    let mut kx = (x2 - x1) / (t2 - t1);
    let mut ky = (y2 - y1) / (t2 - t1);

    let mut xs = Vec::with_capacity(grid.len());
    let mut ys = Vec::with_capacity(grid.len());
    for &t in grid {
        while t > t2 && seg + 2 < l {
            seg += 1;
            t1 = s[seg].t;
            x1 = s[seg].x;
            y1 = s[seg].y;
            t2 = s[seg + 1].t;
            x2 = s[seg + 1].x;
            y2 = s[seg + 1].y;
            kx = (x2 - x1) / (t2 - t1);
            ky = (y2 - y1) / (t2 - t1);
        }
        let u = t - t1;
        xs.push(x1 + kx * u);
        ys.push(y1 + ky * u);
    }
    (xs, ys)
}

/// Periodic Catmull-Rom interpolation.
///
/// The sample arrays are extended with phantom wrap-around control points:
/// the last sample is prepended and the first two samples are appended, with
/// synthetic timestamps one average inter-sample spacing outside the real
/// range. The spline then sees the closed loop and stays smooth across the
/// seam.
fn catmull_rom(stroke: &Stroke, grid: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let s = stroke.samples();
    let l = s.len();
    let t0 = s[0].t;
    let tl = s[l - 1].t;
    let avg = (tl - t0) / (l - 1) as f64;

    let mut px = Vec::with_capacity(l + 3);
    let mut py = Vec::with_capacity(l + 3);
    let mut pt = Vec::with_capacity(l + 3);
    px.push(s[l - 1].x);
    py.push(s[l - 1].y);
    pt.push(t0 - avg);
    for smp in s {
        px.push(smp.x);
        py.push(smp.y);
        pt.push(smp.t);
    }
    px.push(s[0].x);
    py.push(s[0].y);
    pt.push(tl + avg);
    px.push(s[1].x);
    py.push(s[1].y);
    pt.push(tl + avg + (s[1].t - s[0].t));

    let mut seg = 0usize;
    let mut cx = segment_coeffs(&pt, &px, seg);
    let mut cy = segment_coeffs(&pt, &py, seg);

    let mut xs = Vec::with_capacity(grid.len());
    let mut ys = Vec::with_capacity(grid.len());
    for &t in grid {
        while seg + 3 < pt.len() - 1 && t > pt[seg + 2] {
            seg += 1;
            cx = segment_coeffs(&pt, &px, seg);
            cy = segment_coeffs(&pt, &py, seg);
        }
        let u = t - pt[seg + 1];
        xs.push(((cx[3] * u + cx[2]) * u + cx[1]) * u + cx[0]);
        ys.push(((cy[3] * u + cy[2]) * u + cy[1]) * u + cy[0]);
    }
    (xs, ys)
}

/// Cubic coefficients for the span between control points `seg+1` and
/// `seg+2`, parameterized by `u = t - t[seg+1]`.
///
/// Tangents are finite differences over the flanking points (the classic
/// non-uniform Catmull-Rom construction), so adjacent spans share tangents
/// and the curve is C1 at every knot.
fn segment_coeffs(t: &[f64], p: &[f64], seg: usize) -> [f64; 4] {
    let t20 = t[seg + 2] - t[seg];
    let t21 = t[seg + 2] - t[seg + 1];
    let t31 = t[seg + 3] - t[seg + 1];
    let m20 = (p[seg + 2] - p[seg]) / t20;
    let m21 = (p[seg + 2] - p[seg + 1]) / t21;
    let m31 = (p[seg + 3] - p[seg + 1]) / t31;
    [
        p[seg + 1],
        m20,
        (3.0 * m21 - 2.0 * m20 - m31) / t21,
        (m20 + m31 - 2.0 * m21) / (t21 * t21),
    ]
}
