//! Radix-2 discrete Fourier transform over parallel real arrays.
//!
//! The complex sequence is kept as two `Vec<f64>` (real and imaginary parts)
//! rather than a vector of complex structs, so the butterfly inner loop works
//! on flat arrays. The kernel is the iterative decimation-in-time
//! Cooley-Tukey transform: a bit-reverse permutation followed by log2(n)
//! butterfly stages. Power-of-two lengths only.

use crate::error::InvalidInput;

/// A complex sequence stored as two parallel real vectors.
///
/// The length invariant (equal lengths, power of two or zero) is checked
/// once at construction so transform code never has to.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    re: Vec<f64>,
    im: Vec<f64>,
}

impl Spectrum {
    pub fn new(re: Vec<f64>, im: Vec<f64>) -> Result<Self, InvalidInput> {
        if re.len() != im.len() {
            return Err(InvalidInput::LengthMismatch {
                left: re.len(),
                right: im.len(),
            });
        }
        if !re.is_empty() && !re.len().is_power_of_two() {
            return Err(InvalidInput::NotPowerOfTwo { len: re.len() });
        }
        Ok(Self { re, im })
    }

    /// Forward transform of the complex sequence `xs + i·ys`.
    ///
    /// No normalization is applied; bin 0 of a constant input `c` is `c·n`.
    pub fn forward(xs: &[f64], ys: &[f64]) -> Result<Self, InvalidInput> {
        let mut out = Spectrum::new(xs.to_vec(), ys.to_vec())?;
        transform(&mut out.re, &mut out.im, 1.0);
        Ok(out)
    }

    /// Inverse transform, returning the time-domain parts. Divides by `n`,
    /// so `Spectrum::forward(x, y)?.inverse()` reproduces the input up to
    /// float rounding.
    pub fn inverse(&self) -> (Vec<f64>, Vec<f64>) {
        let mut re = self.re.clone();
        let mut im = self.im.clone();
        transform(&mut re, &mut im, -1.0);
        let n = re.len() as f64;
        for v in re.iter_mut().chain(im.iter_mut()) {
            *v /= n;
        }
        (re, im)
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn re(&self) -> &[f64] {
        &self.re
    }

    pub fn im(&self) -> &[f64] {
        &self.im
    }

    /// Map every bin to polar form: `r = hypot(re, im)`,
    /// `theta = atan2(im, re)`.
    pub fn to_polar(&self) -> Polar {
        let r = self
            .re
            .iter()
            .zip(&self.im)
            .map(|(&re, &im)| re.hypot(im))
            .collect();
        let theta = self
            .re
            .iter()
            .zip(&self.im)
            .map(|(&re, &im)| im.atan2(re))
            .collect();
        Polar { r, theta }
    }
}

/// Per-bin magnitude and phase of a spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct Polar {
    pub r: Vec<f64>,
    pub theta: Vec<f64>,
}

impl Polar {
    /// Scale every magnitude by `factor`. Phases are untouched.
    pub fn scaled(mut self, factor: f64) -> Self {
        for r in &mut self.r {
            *r *= factor;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }
}

/// In-place iterative radix-2 DIT transform. `sign = 1.0` for forward
/// (twiddle `exp(-2πi·j/m)`), `-1.0` for inverse. Length must be a power of
/// two; zero length is a no-op.
fn transform(re: &mut [f64], im: &mut [f64], sign: f64) {
    let n = re.len();
    if n < 2 {
        return;
    }
    let bits = n.trailing_zeros();

    for i in 0..n {
        let j = bit_reverse(i, bits);
        if j > i {
            re.swap(i, j);
            im.swap(i, j);
        }
    }

    let mut m = 2;
    while m <= n {
        let half = m / 2;
        for start in (0..n).step_by(m) {
            for j in 0..half {
                let ang = -sign * std::f64::consts::TAU * j as f64 / m as f64;
                let (s, c) = ang.sin_cos();
                let lo = start + j;
                let hi = lo + half;
                let tr = re[hi] * c - im[hi] * s;
                let ti = re[hi] * s + im[hi] * c;
                re[hi] = re[lo] - tr;
                im[hi] = im[lo] - ti;
                re[lo] += tr;
                im[lo] += ti;
            }
        }
        m *= 2;
    }
}

/// Reverse the lowest `bits` bits of `i`.
fn bit_reverse(mut i: usize, bits: u32) -> usize {
    let mut out = 0;
    for _ in 0..bits {
        out = (out << 1) | (i & 1);
        i >>= 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_reverse_three_bits() {
        assert_eq!(bit_reverse(0b001, 3), 0b100);
        assert_eq!(bit_reverse(0b110, 3), 0b011);
        assert_eq!(bit_reverse(0b101, 3), 0b101);
    }

    #[test]
    fn length_invariants_checked_at_construction() {
        assert_eq!(
            Spectrum::new(vec![0.0; 4], vec![0.0; 3]).unwrap_err(),
            InvalidInput::LengthMismatch { left: 4, right: 3 }
        );
        assert_eq!(
            Spectrum::new(vec![0.0; 6], vec![0.0; 6]).unwrap_err(),
            InvalidInput::NotPowerOfTwo { len: 6 }
        );
        assert!(Spectrum::new(vec![], vec![]).unwrap().is_empty());
    }
}
