//! Animation time base: converts wall-clock frame times into animation
//! seconds with pause and speed control.
//!
//! The host calls [`TimeBase::tick`] once per display frame with its clock
//! reading. The time base owns the accumulated animation time, so pausing
//! and variable playback speed never distort it and the host needs no clock
//! bookkeeping of its own.

/// Lifecycle of one time base. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Running,
    Paused,
    Stopped,
}

/// What a tick reports back to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Accumulated animation time in seconds.
    pub elapsed: f64,
    /// True while paused; the host keeps rendering a frozen frame.
    pub paused: bool,
}

/// Per-stroke animation clock. One fresh instance per stroke; stop the old
/// one before starting the next.
#[derive(Debug, Clone)]
pub struct TimeBase {
    state: PlaybackState,
    speed: f64,
    elapsed: f64,
    prev: Option<f64>,
}

/// Multiplicative step for speed_up / slow_down.
pub const SPEED_STEP: f64 = 1.1;

impl TimeBase {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Running,
            speed: 1.0,
            elapsed: 0.0,
            prev: None,
        }
    }

    /// Advance by one display frame. `now` is any monotonic clock reading in
    /// seconds. The first tick only establishes the baseline. Returns `None`
    /// once stopped.
    pub fn tick(&mut self, now: f64) -> Option<Tick> {
        if self.state == PlaybackState::Stopped {
            return None;
        }
        if let Some(prev) = self.prev {
            if self.state == PlaybackState::Running {
                self.elapsed += self.speed * (now - prev);
            }
        }
        self.prev = Some(now);
        Some(Tick {
            elapsed: self.elapsed,
            paused: self.state == PlaybackState::Paused,
        })
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Running;
        }
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Running => self.state = PlaybackState::Paused,
            PlaybackState::Paused => self.state = PlaybackState::Running,
            PlaybackState::Stopped => {}
        }
    }

    /// Terminal: every later `tick` returns `None`.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    pub fn speed_up(&mut self) {
        self.scale_speed(SPEED_STEP);
    }

    pub fn slow_down(&mut self) {
        self.scale_speed(1.0 / SPEED_STEP);
    }

    /// Multiply the playback speed; unclamped apart from staying positive.
    pub fn scale_speed(&mut self, factor: f64) {
        if factor > 0.0 {
            self.speed *= factor;
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_establishes_baseline_only() {
        let mut tb = TimeBase::new();
        let t = tb.tick(100.0).unwrap();
        assert_eq!(t.elapsed, 0.0);
        let t = tb.tick(100.5).unwrap();
        assert!((t.elapsed - 0.5).abs() < 1e-12);
    }

    #[test]
    fn pause_holds_elapsed_but_keeps_ticking() {
        let mut tb = TimeBase::new();
        tb.tick(0.0);
        tb.tick(1.0);
        tb.pause();
        for i in 0..5 {
            let t = tb.tick(2.0 + i as f64).unwrap();
            assert!(t.paused);
            assert!((t.elapsed - 1.0).abs() < 1e-12);
        }
        tb.resume();
        // the paused interval is not replayed after resume
        let t = tb.tick(7.0).unwrap();
        assert!((t.elapsed - 1.0).abs() < 1e-12);
        let t = tb.tick(7.5).unwrap();
        assert!((t.elapsed - 1.5).abs() < 1e-12);
    }

    #[test]
    fn speed_compounds_geometrically() {
        let mut tb = TimeBase::new();
        for _ in 0..10 {
            tb.speed_up();
        }
        assert!((tb.speed() - SPEED_STEP.powi(10)).abs() < 1e-12);
        tb.tick(0.0);
        let t = tb.tick(1.0).unwrap();
        assert!((t.elapsed - SPEED_STEP.powi(10)).abs() < 1e-9);
    }

    #[test]
    fn stop_is_terminal() {
        let mut tb = TimeBase::new();
        tb.tick(0.0);
        tb.stop();
        assert_eq!(tb.state(), PlaybackState::Stopped);
        assert!(tb.tick(1.0).is_none());
        tb.resume();
        tb.toggle();
        assert!(tb.tick(2.0).is_none());
    }
}
