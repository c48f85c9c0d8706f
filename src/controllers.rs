//! Programmatic playback control.
//!
//! [`PlaybackController`] is a cloneable handle that host code keeps after
//! launching the app. Requests are queued in a shared inner struct and
//! drained by the session once per frame; per-frame playback state is
//! published to subscribed listeners over mpsc channels.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::data::timebase::PlaybackState;

/// Snapshot of playback state, published once per frame to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackInfo {
    pub state: PlaybackState,
    pub elapsed: f64,
    pub speed: f64,
    pub visible_fraction: f64,
}

#[derive(Default)]
struct PlaybackCtrlInner {
    /// Pending pause request: `Some(true)` pause, `Some(false)` resume.
    request_pause: Option<bool>,
    request_toggle: bool,
    /// Net speed steps requested since the last frame (positive = faster).
    speed_steps: i32,
    request_visible_fraction: Option<f64>,
    request_stop: bool,
    listeners: Vec<Sender<PlaybackInfo>>,
}

/// Shared handle for controlling playback from outside the UI loop.
#[derive(Clone, Default)]
pub struct PlaybackController {
    inner: Arc<Mutex<PlaybackCtrlInner>>,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.request_pause = Some(true);
        }
    }

    pub fn resume(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.request_pause = Some(false);
        }
    }

    pub fn toggle(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.request_toggle = true;
        }
    }

    pub fn speed_up(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.speed_steps += 1;
        }
    }

    pub fn slow_down(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.speed_steps -= 1;
        }
    }

    /// Request a new visible fraction in `[0, 1]` of the epicycle chain.
    pub fn set_visible_fraction(&self, fraction: f64) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.request_visible_fraction = Some(fraction.clamp(0.0, 1.0));
        }
    }

    /// Stop the current playback for good. A new stroke starts fresh.
    pub fn stop(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.request_stop = true;
        }
    }

    /// Subscribe to per-frame playback snapshots.
    pub fn subscribe(&self) -> Receiver<PlaybackInfo> {
        let (tx, rx) = channel();
        if let Ok(mut inner) = self.inner.lock() {
            inner.listeners.push(tx);
        }
        rx
    }

    /// Take all requests queued since the last call. Called by the session
    /// once per frame.
    pub(crate) fn take_pending(&self) -> PendingRequests {
        match self.inner.lock() {
            Ok(mut inner) => PendingRequests {
                pause: inner.request_pause.take(),
                toggle: std::mem::take(&mut inner.request_toggle),
                speed_steps: std::mem::take(&mut inner.speed_steps),
                visible_fraction: inner.request_visible_fraction.take(),
                stop: std::mem::take(&mut inner.request_stop),
            },
            Err(_) => PendingRequests::default(),
        }
    }

    /// Publish a snapshot to all live listeners, dropping closed ones.
    pub(crate) fn publish(&self, info: PlaybackInfo) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.listeners.retain(|tx| tx.send(info).is_ok());
        }
    }
}

/// Drained controller requests for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct PendingRequests {
    pub pause: Option<bool>,
    pub toggle: bool,
    pub speed_steps: i32,
    pub visible_fraction: Option<f64>,
    pub stop: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_drained_once() {
        let ctrl = PlaybackController::new();
        ctrl.pause();
        ctrl.speed_up();
        ctrl.speed_up();
        ctrl.slow_down();
        let p = ctrl.take_pending();
        assert_eq!(p.pause, Some(true));
        assert_eq!(p.speed_steps, 1);
        let p = ctrl.take_pending();
        assert_eq!(p, PendingRequests::default());
    }

    #[test]
    fn publish_drops_closed_listeners() {
        let ctrl = PlaybackController::new();
        let rx = ctrl.subscribe();
        let info = PlaybackInfo {
            state: PlaybackState::Running,
            elapsed: 1.0,
            speed: 1.0,
            visible_fraction: 1.0,
        };
        ctrl.publish(info);
        assert_eq!(rx.try_recv().ok(), Some(info));
        drop(rx);
        ctrl.publish(info);
        assert!(ctrl.inner.lock().unwrap().listeners.is_empty());
    }
}
