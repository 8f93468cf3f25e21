// Whole-frame scenarios driven through `Sketch` with a painter that records calls.

use crate::color::ColorMode;
use crate::config::Config;
use crate::draw::Painter;
use crate::sketch::Sketch;
use crate::target::{HandFeed, HandPrediction, INDEX_FINGER_TIP, InputSource, LANDMARK_COUNT, Landmark};
use crate::tracker::CaptureState;
use crate::types::{FrameBuffer, Point, Rgba};

const EPSILON: f32 = 1e-3;

fn points_are_close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

struct Recorder {
    width: f32,
    height: f32,
    fades: usize,
    fills: Vec<(Point, f32, Rgba)>,
    rings: Vec<(Point, f32)>,
    texts: Vec<String>,
}

impl Recorder {
    fn new(width: f32, height: f32) -> Self {
        Self { width, height, fades: 0, fills: Vec::new(), rings: Vec::new(), texts: Vec::new() }
    }

    fn clear(&mut self) {
        self.fills.clear();
        self.rings.clear();
        self.texts.clear();
    }
}

impl Painter for Recorder {
    fn canvas_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fade(&mut self, _color: Rgba) {
        self.fades += 1;
    }

    fn fill_circle(&mut self, center: Point, diameter: f32, color: Rgba) {
        self.fills.push((center, diameter, color));
    }

    fn stroke_circle(&mut self, center: Point, diameter: f32, _weight: f32, _color: Rgba) {
        self.rings.push((center, diameter));
    }

    fn text(&mut self, _x: i32, _y: i32, text: &str, _color: Rgba) {
        self.texts.push(text.to_string());
    }
}

fn hand_at(x: f32, y: f32) -> HandFeed {
    let mut landmarks = vec![Landmark::default(); LANDMARK_COUNT];
    landmarks[INDEX_FINGER_TIP] = Landmark { x, y, z: 0.0 };
    HandFeed { source_width: 320, source_height: 240, predictions: vec![HandPrediction { landmarks }] }
}

fn no_hand() -> HandFeed {
    HandFeed { source_width: 320, source_height: 240, predictions: Vec::new() }
}

fn running_sketch() -> Sketch {
    let mut sketch = Sketch::new(&Config::default());
    sketch.set_capture(CaptureState::Running);
    sketch
}

#[test]
fn test_pointer_sweep_eases_towards_stable_target() {
    let mut sketch = Sketch::new(&Config::default());
    let mut canvas = Recorder::new(800.0, 600.0);

    let mut prev: Option<Point> = None;
    for i in 0..10 {
        let t = i as f32 / 9.0;
        sketch.pointer_moved(Point::new(500.0 * t, 500.0 * t));
        let report = sketch.draw(&mut canvas);

        let newest = sketch.trail().last().unwrap().position;
        let expected = match prev {
            None => report.target,
            Some(p) => p.lerp(report.target, 0.25),
        };
        assert!(points_are_close(newest, expected), "frame {i}: {newest:?} vs {expected:?}");
        prev = Some(newest);
    }

    assert_eq!(sketch.trail().len(), 10);
    let last = sketch.trail().last().unwrap().position;
    assert!(last.x > 0.0 && last.x < 500.0);
    assert!(points_are_close(Point::new(last.x, last.x), last));
    // every frame drew the full trail
    assert_eq!(canvas.fills.len(), (1..=10).sum::<usize>());
    assert_eq!(canvas.fades, 10);
}

#[test]
fn test_trail_length_bounds_and_fifo() {
    let mut sketch = Sketch::new(&Config::default());
    let mut canvas = Recorder::new(800.0, 600.0);

    for frame in 1..=300u64 {
        let x = (frame as f32 * 37.0) % 800.0;
        let y = (frame as f32 * 53.0) % 600.0;
        sketch.pointer_moved(Point::new(x, y));
        sketch.draw(&mut canvas);

        let len = sketch.trail().len();
        assert!((1..=120).contains(&len));
        let stamps: Vec<u64> = sketch.trail().iter().map(|s| s.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] + 1 == w[1]));
        assert_eq!(*stamps.last().unwrap(), frame);
        canvas.clear();
    }
    assert_eq!(sketch.trail().iter().next().unwrap().timestamp, 181);
}

#[test]
fn test_pulse_ring_only_while_toggled_on() {
    let mut sketch = Sketch::new(&Config::default());
    let mut canvas = Recorder::new(800.0, 600.0);
    sketch.pointer_moved(Point::new(400.0, 300.0));
    let original = sketch.pulse();

    sketch.draw(&mut canvas);
    assert!(canvas.rings.is_empty());
    canvas.clear();

    sketch.pointer_pressed();
    assert_ne!(sketch.pulse(), original);
    let report = sketch.draw(&mut canvas);
    assert_eq!(canvas.rings.len(), 1);
    let (center, diameter) = canvas.rings[0];
    assert_eq!(center, report.target);
    let expected = 24.0 + ((report.frame as f32 * 0.1).sin() + 1.0) * 16.0;
    assert!((diameter - expected).abs() < EPSILON);
    assert!((24.0..=56.0).contains(&diameter));
    canvas.clear();

    sketch.pointer_pressed();
    assert_eq!(sketch.pulse(), original);
    sketch.draw(&mut canvas);
    assert!(canvas.rings.is_empty());
}

#[test]
fn test_empty_prediction_reverts_to_pointer_next_frame() {
    let mut sketch = running_sketch();
    let mut canvas = Recorder::new(800.0, 600.0);
    let pointer = Point::new(10.0, 20.0);
    sketch.pointer_moved(pointer);

    sketch.receive_hand(hand_at(160.0, 120.0));
    let with_hand = sketch.draw(&mut canvas);
    assert_eq!(with_hand.source, InputSource::Hand);
    assert_eq!(with_hand.raw_target, Point::new(400.0, 300.0));

    sketch.receive_hand(no_hand());
    let after = sketch.draw(&mut canvas);
    assert_eq!(after.source, InputSource::Pointer);
    assert_eq!(after.raw_target, pointer);
    assert!(!sketch.hand_active());
}

#[test]
fn test_hand_band_overrides_manual_mode() {
    let mut sketch = running_sketch();
    let mut canvas = Recorder::new(800.0, 600.0);

    // fingertip near the bottom of the camera image → bottom band
    sketch.receive_hand(hand_at(160.0, 230.0));
    sketch.draw(&mut canvas);
    assert_eq!(sketch.mode(), ColorMode::Time);

    sketch.key_pressed('1');
    assert_eq!(sketch.mode(), ColorMode::PositionX);
    sketch.draw(&mut canvas);
    assert_eq!(sketch.mode(), ColorMode::Time);
}

#[test]
fn test_pointer_only_keeps_manual_mode() {
    let mut sketch = Sketch::new(&Config::default());
    let mut canvas = Recorder::new(800.0, 600.0);
    sketch.pointer_moved(Point::new(400.0, 590.0));
    sketch.key_pressed('2');
    for _ in 0..5 {
        sketch.draw(&mut canvas);
    }
    assert_eq!(sketch.mode(), ColorMode::PositionY);
}

#[test]
fn test_hand_dropout_spike_is_clamped() {
    let mut sketch = running_sketch();
    let mut canvas = Recorder::new(800.0, 600.0);
    sketch.receive_hand(hand_at(160.0, 120.0));
    let settled = sketch.draw(&mut canvas).target;

    // misdetection on the far corner for one frame
    sketch.receive_hand(hand_at(0.0, 0.0));
    let spiked = sketch.draw(&mut canvas).target;
    assert!(settled.distance(spiked) <= 100.0 * 0.18 + EPSILON);
}

#[test]
fn test_hud_reports_input_mode_and_pulse() {
    let mut canvas = Recorder::new(800.0, 600.0);

    let mut idle = Sketch::new(&Config::default());
    idle.draw(&mut canvas);
    assert!(canvas.texts[0].starts_with("INPUT: WAIT"));
    assert!(canvas.texts.iter().any(|t| t == "H: START CAMERA"));
    canvas.clear();

    let mut cfg = Config::default();
    cfg.capture.enabled = false;
    let mut pointer_only = Sketch::new(&cfg);
    pointer_only.pointer_pressed();
    pointer_only.key_pressed('3');
    pointer_only.draw(&mut canvas);
    assert_eq!(canvas.texts, vec!["INPUT: MOUSE | MODE 3 - KEYS 1/2/3 | CLICK=PULSE ON".to_string()]);
    canvas.clear();

    let mut hand = running_sketch();
    hand.receive_hand(hand_at(160.0, 10.0));
    hand.draw(&mut canvas);
    assert!(canvas.texts[0].starts_with("INPUT: HAND"));
    assert_eq!(canvas.texts.len(), 1);
}

#[test]
fn test_resize_keeps_trail_unscaled() {
    let cfg = Config::default();
    let mut sketch = Sketch::new(&cfg);
    let mut screen = FrameBuffer::filled(800, 600, cfg.background);
    for i in 0..6 {
        sketch.pointer_moved(Point::new(700.0 - 50.0 * i as f32, 500.0));
        sketch.draw(&mut screen);
    }
    let before: Vec<Point> = sketch.trail().iter().map(|s| s.position).collect();

    assert!(screen.fit(200, 100, cfg.background));
    sketch.draw(&mut screen);

    let after: Vec<Point> = sketch.trail().iter().map(|s| s.position).collect();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after[..before.len()], &before[..]);
    // off-canvas samples are simply clipped by the smaller buffer
    assert_eq!(screen.pixels.len(), 200 * 100);
}

#[test]
fn test_newest_sample_is_brightest() {
    let mut sketch = Sketch::new(&Config::default());
    let mut canvas = Recorder::new(800.0, 600.0);
    for i in 0..20 {
        sketch.pointer_moved(Point::new(20.0 * i as f32, 300.0));
        canvas.clear();
        sketch.draw(&mut canvas);
    }
    let alphas: Vec<u8> = canvas.fills.iter().map(|(_, _, c)| c.a).collect();
    assert!(alphas.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(alphas[0], 80);
}
