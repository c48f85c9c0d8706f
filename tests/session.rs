use fourier_paint::{
    channel_strokes, HarmonicRounding, Interpolation, PlaybackController, PlaybackState,
    SessionState, StrokeSession,
};

fn session() -> StrokeSession {
    StrokeSession::new(
        Interpolation::CatmullRom,
        HarmonicRounding::Continuous,
        16,
        1.1,
        1.0 / 16.0,
    )
}

fn draw_square(s: &mut StrokeSession) {
    s.begin_stroke(0.0, 0.0, 0.0);
    s.add_sample(1.0, 10.0, 0.0);
    s.add_sample(2.0, 10.0, 10.0);
    s.add_sample(3.0, 0.0, 10.0);
    s.end_stroke().expect("end stroke");
}

#[test]
fn capture_transform_playback_flow() {
    let mut s = session();
    assert_eq!(s.state(), SessionState::Idle);

    s.begin_stroke(0.0, 0.0, 0.0);
    assert_eq!(s.state(), SessionState::Capturing);
    s.add_sample(1.0, 10.0, 0.0);
    s.add_sample(2.0, 10.0, 10.0);
    s.add_sample(3.0, 0.0, 10.0);
    s.end_stroke().expect("end stroke");
    assert_eq!(s.state(), SessionState::Playing);

    // 4 samples, oversampling 16 -> 64 uniform samples
    assert_eq!(s.series().map(|u| u.len()), Some(64));
    // extended period: 3 s over 64 grid points
    let period = s.period().expect("period");
    assert!((period - 3.0 * 64.0 / 63.0).abs() < 1e-12);
}

#[test]
fn replay_starts_at_the_first_stroke_point() {
    let mut s = session();
    draw_square(&mut s);

    // first tick only establishes the baseline, so elapsed stays 0
    let scene = s.frame(100.0).expect("scene");
    assert_eq!(scene.elapsed, 0.0);
    assert!(!scene.paused);
    assert!((scene.position[0] - 0.0).abs() < 1e-6);
    assert!((scene.position[1] - 0.0).abs() < 1e-6);
}

#[test]
fn duplicate_capture_timestamps_are_perturbed() {
    let mut s = session();
    s.begin_stroke(0.0, 0.0, 0.0);
    s.add_sample(0.0, 1.0, 0.0);
    s.add_sample(0.0, 2.0, 0.0);
    s.add_sample(1.0, 3.0, 0.0);
    s.end_stroke().expect("perturbed timestamps must be accepted");
    assert_eq!(s.state(), SessionState::Playing);
}

#[test]
fn single_point_stroke_plays_with_nominal_period() {
    let mut s = session();
    s.begin_stroke(0.0, 5.0, -5.0);
    s.end_stroke().expect("end stroke");
    assert_eq!(s.state(), SessionState::Playing);
    assert_eq!(s.period(), Some(1.0));

    let scene = s.frame(0.0).expect("scene");
    assert!((scene.position[0] - 5.0).abs() < 1e-9);
    assert!((scene.position[1] + 5.0).abs() < 1e-9);
}

#[test]
fn new_stroke_cancels_playback() {
    let mut s = session();
    draw_square(&mut s);
    s.frame(0.0).expect("scene");
    assert!(s.trail().is_some());

    s.begin_stroke(0.0, 1.0, 1.0);
    assert_eq!(s.state(), SessionState::Capturing);
    assert!(s.trail().is_none());
    assert!(s.frame(1.0).is_none());
}

#[test]
fn end_without_begin_leaves_the_session_idle() {
    let mut s = session();
    assert!(s.end_stroke().is_err());
    assert_eq!(s.state(), SessionState::Idle);
    assert!(s.frame(0.0).is_none());
}

#[test]
fn trail_grows_while_running_and_freezes_while_paused() {
    let mut s = session();
    draw_square(&mut s);

    for i in 0..5 {
        s.frame(i as f64 * 0.1).expect("scene");
    }
    let len = s.trail().map(|t| t.len()).expect("trail");
    assert_eq!(len, 5);

    s.toggle_pause();
    for i in 5..10 {
        let scene = s.frame(i as f64 * 0.1).expect("scene");
        assert!(scene.paused);
    }
    assert_eq!(s.trail().map(|t| t.len()), Some(len));
}

#[test]
fn channel_commands_drive_the_session() {
    let (sink, rx) = channel_strokes();
    let mut s = session();
    s.set_receiver(rx);

    sink.begin(0.0, 0.0, 0.0).expect("send");
    sink.sample(1.0, 10.0, 0.0).expect("send");
    sink.sample(2.0, 0.0, 10.0).expect("send");
    sink.end().expect("send");

    // the first frame drains the channel and starts playback
    let scene = s.frame(0.0).expect("scene");
    assert_eq!(s.state(), SessionState::Playing);
    assert_eq!(scene.elapsed, 0.0);
}

#[test]
fn controller_requests_apply_next_frame() {
    let ctrl = PlaybackController::new();
    let info_rx = ctrl.subscribe();

    let mut s = session();
    s.set_controller(ctrl.clone());
    draw_square(&mut s);

    s.frame(0.0).expect("scene");
    ctrl.pause();
    let scene = s.frame(1.0).expect("scene");
    assert!(scene.paused);
    // the pause applied before the tick, so no time was accumulated
    assert_eq!(scene.elapsed, 0.0);

    let info = info_rx.try_iter().last().expect("published info");
    assert_eq!(info.state, PlaybackState::Paused);

    // one more paused frame so the wall-clock baseline is fresh on resume
    s.frame(2.0).expect("scene");
    ctrl.resume();
    ctrl.speed_up();
    let scene = s.frame(3.0).expect("scene");
    assert!((scene.elapsed - 1.1).abs() < 1e-9);

    ctrl.stop();
    s.frame(4.0);
    assert!(s.frame(5.0).is_none());
}

#[test]
fn visible_fraction_steps_and_clamps() {
    let mut s = session();
    assert_eq!(s.visible_fraction(), 1.0);
    s.more_circles();
    assert_eq!(s.visible_fraction(), 1.0);
    for _ in 0..20 {
        s.fewer_circles();
    }
    assert_eq!(s.visible_fraction(), 0.0);
    s.more_circles();
    assert!((s.visible_fraction() - 1.0 / 16.0).abs() < 1e-12);
}
