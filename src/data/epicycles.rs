//! Epicycle reconstruction: turn polar Fourier coefficients into a chain of
//! rotating circles whose tip traces the original drawing.
//!
//! Bins are visited in a zig-zag order (0, n-1, 1, n-2, …) so that low
//! frequencies, which carry most of the energy, come first and the chain
//! shrinks from big circles to small ones. Each bin rotates at its signed
//! harmonic index times the fundamental frequency.

use std::f64::consts::TAU;

use crate::data::fft::Polar;

/// How the cycle count `elapsed · f0` is treated before the per-bin phase
/// multiply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmonicRounding {
    /// Round to the nearest whole cycle; the reconstruction then always sits
    /// exactly on one of the `n` resampled points.
    Integer,
    /// Use the raw product; the chain sweeps smoothly between grid points.
    Continuous,
}

impl HarmonicRounding {
    pub const ALL: [HarmonicRounding; 2] = [HarmonicRounding::Integer, HarmonicRounding::Continuous];

    pub fn label(&self) -> &'static str {
        match self {
            HarmonicRounding::Integer => "Integer",
            HarmonicRounding::Continuous => "Continuous",
        }
    }
}

/// One drawable piece of the epicycle chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// The orbit of one harmonic, centered on the accumulated position of
    /// all previous harmonics.
    Circle { center: [f64; 2], radius: f64 },
    /// The rotating radius vector from that center to the next one.
    Line { from: [f64; 2], to: [f64; 2] },
}

/// One rendered instant of the reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Tip of the chain, the reconstructed pen position.
    pub position: [f64; 2],
    /// Circles and radius lines, in drawing order (largest harmonics first).
    pub segments: Vec<Segment>,
}

/// Zig-zag bin walk: 0, n-1, 1, n-2, 2, … visiting every bin exactly once.
pub fn zigzag_bins(n: usize) -> impl Iterator<Item = usize> {
    let mut k = 0usize;
    (0..n).map(move |_| {
        let cur = k;
        k = n - k - usize::from(k < n / 2);
        cur
    })
}

/// Signed harmonic index of bin `k`: bins in the upper half alias to
/// negative frequencies.
pub fn signed_index(k: usize, n: usize) -> f64 {
    if k >= n / 2 {
        k as f64 - n as f64
    } else {
        k as f64
    }
}

/// Build the epicycle chain at time `elapsed` from normalized polar
/// coefficients.
///
/// `f0` is the fundamental frequency in cycles per second and
/// `visible_fraction` in `[0, 1]` limits the chain to `n^visible_fraction`
/// bins (1.0 shows everything). Infallible for any finite `elapsed`.
pub fn reconstruct_frame(
    coeffs: &Polar,
    elapsed: f64,
    f0: f64,
    visible_fraction: f64,
    rounding: HarmonicRounding,
) -> Frame {
    let n = coeffs.len();
    if n == 0 {
        return Frame {
            position: [0.0, 0.0],
            segments: Vec::new(),
        };
    }

    let cycles = match rounding {
        HarmonicRounding::Integer => (elapsed * f0).round(),
        HarmonicRounding::Continuous => elapsed * f0,
    };
    let phase_unit = TAU * cycles / n as f64;
    let visible = (n as f64).powf(visible_fraction.clamp(0.0, 1.0));

    let mut x = 0.0;
    let mut y = 0.0;
    let mut segments = Vec::new();
    for (i, k) in zigzag_bins(n).enumerate() {
        if i as f64 >= visible {
            break;
        }
        let r = coeffs.r[k];
        let phase = coeffs.theta[k] + phase_unit * signed_index(k, n);
        let from = [x, y];
        segments.push(Segment::Circle {
            center: from,
            radius: r,
        });
        x += r * phase.cos();
        y += r * phase.sin();
        segments.push(Segment::Line { from, to: [x, y] });
    }

    Frame {
        position: [x, y],
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_visits_every_bin_once() {
        let order: Vec<usize> = zigzag_bins(16).collect();
        assert_eq!(
            order,
            vec![0, 15, 1, 14, 2, 13, 3, 12, 4, 11, 5, 10, 6, 9, 7, 8]
        );
    }

    #[test]
    fn zigzag_small_sizes() {
        assert_eq!(zigzag_bins(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(zigzag_bins(2).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(zigzag_bins(4).collect::<Vec<_>>(), vec![0, 3, 1, 2]);
    }

    #[test]
    fn signed_index_aliases_upper_half() {
        assert_eq!(signed_index(0, 8), 0.0);
        assert_eq!(signed_index(3, 8), 3.0);
        assert_eq!(signed_index(4, 8), -4.0);
        assert_eq!(signed_index(7, 8), -1.0);
    }

    #[test]
    fn position_at_time_zero_is_phase_sum() {
        let coeffs = Polar {
            r: vec![2.0, 1.0, 0.5, 0.25],
            theta: vec![0.0, std::f64::consts::FRAC_PI_2, std::f64::consts::PI, 0.0],
        };
        let frame = reconstruct_frame(&coeffs, 0.0, 1.0, 1.0, HarmonicRounding::Continuous);
        let ex: f64 = coeffs.r.iter().zip(&coeffs.theta).map(|(r, t)| r * t.cos()).sum();
        let ey: f64 = coeffs.r.iter().zip(&coeffs.theta).map(|(r, t)| r * t.sin()).sum();
        assert!((frame.position[0] - ex).abs() < 1e-12);
        assert!((frame.position[1] - ey).abs() < 1e-12);
        // one circle and one line per visited bin
        assert_eq!(frame.segments.len(), 8);
    }

    #[test]
    fn integer_rounding_snaps_to_nearest_cycle() {
        let coeffs = Polar {
            r: vec![1.0, 0.5, 0.25, 0.125],
            theta: vec![0.1, 0.2, 0.3, 0.4],
        };
        // 0.4 cycles rounds down to 0
        let a = reconstruct_frame(&coeffs, 0.4, 1.0, 1.0, HarmonicRounding::Integer);
        let b = reconstruct_frame(&coeffs, 0.0, 1.0, 1.0, HarmonicRounding::Integer);
        assert_eq!(a.position, b.position);
        // 0.6 cycles rounds up to 1
        let c = reconstruct_frame(&coeffs, 0.6, 1.0, 1.0, HarmonicRounding::Integer);
        let d = reconstruct_frame(&coeffs, 1.0, 1.0, 1.0, HarmonicRounding::Continuous);
        assert!((c.position[0] - d.position[0]).abs() < 1e-12);
        assert!((c.position[1] - d.position[1]).abs() < 1e-12);
    }

    #[test]
    fn visible_fraction_limits_the_chain() {
        let coeffs = Polar {
            r: vec![1.0; 16],
            theta: vec![0.0; 16],
        };
        // 16^0.5 = 4 visible bins, 2 segments each
        let frame = reconstruct_frame(&coeffs, 0.0, 1.0, 0.5, HarmonicRounding::Continuous);
        assert_eq!(frame.segments.len(), 8);
        // fraction 0 still shows the DC bin
        let frame = reconstruct_frame(&coeffs, 0.0, 1.0, 0.0, HarmonicRounding::Continuous);
        assert_eq!(frame.segments.len(), 2);
    }

    #[test]
    fn empty_coefficients_yield_origin() {
        let coeffs = Polar {
            r: vec![],
            theta: vec![],
        };
        let frame = reconstruct_frame(&coeffs, 1.0, 1.0, 1.0, HarmonicRounding::Continuous);
        assert_eq!(frame.position, [0.0, 0.0]);
        assert!(frame.segments.is_empty());
    }
}
