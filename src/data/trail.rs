//! Trace buffer for the replayed pen path.
//!
//! Holds the reconstructed pen positions of the most recent animation
//! window (one stroke period) so the renderer can draw a fading tail behind
//! the epicycle tip.

use std::collections::VecDeque;

/// One recorded pen position with its animation timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

/// Time-windowed buffer of reconstructed pen positions.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::new(),
        }
    }

    pub fn push(&mut self, x: f64, y: f64, t: f64) {
        self.points.push_back(TrailPoint { x, y, t });
    }

    /// Drop leading points older than `window` seconds before `elapsed`, but
    /// keep one predecessor so the drawn tail still reaches the window edge.
    pub fn trim_before(&mut self, elapsed: f64, window: f64) {
        while self.points.len() > 1 {
            match self.points.get(1) {
                Some(p) if elapsed - p.t > window => {
                    self.points.pop_front();
                }
                _ => break,
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Fade ramp for point `i` of `len`: oldest points at 0.2, newest at
    /// 1.0.
    pub fn alpha(i: usize, len: usize) -> f32 {
        if len == 0 {
            return 1.0;
        }
        (0.2 + 0.8 * i as f64 / len as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_keeps_one_predecessor() {
        let mut trail = Trail::new();
        for i in 0..10 {
            trail.push(i as f64, 0.0, i as f64);
        }
        trail.trim_before(9.0, 3.0);
        // points with t in (6, 9] survive, plus one predecessor at t = 5
        let ts: Vec<f64> = trail.iter().map(|p| p.t).collect();
        assert_eq!(ts, vec![5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn trim_never_empties_the_buffer() {
        let mut trail = Trail::new();
        trail.push(0.0, 0.0, 0.0);
        trail.trim_before(1000.0, 0.5);
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn alpha_ramps_from_dim_to_opaque() {
        assert!((Trail::alpha(0, 10) - 0.2).abs() < 1e-6);
        assert!((Trail::alpha(10, 10) - 1.0).abs() < 1e-6);
        assert!(Trail::alpha(5, 10) > Trail::alpha(4, 10));
    }
}
