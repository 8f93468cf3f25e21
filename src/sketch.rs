// The per-frame heart of the toy.
// Event handlers (pointer, keys, hand feed) only record state; `draw` runs the
// pipeline once: pick target → smooth → append eased sample → paint → HUD.

use crate::color::{ColorMode, Hsba, sample_color};
use crate::config::Config;
use crate::draw::Painter;
use crate::smoothing::Smoother;
use crate::target::{HandFeed, InputSource, select_target};
use crate::tracker::CaptureState;
use crate::trail::TrailBuffer;
use crate::types::{Point, Rgba};

const PULSE_COLOR: Hsba = Hsba::new(210.0, 80.0, 90.0, 220.0);
const PULSE_WEIGHT: f32 = 2.0;
const HUD_COLOR: Rgba = Rgba::gray(230);

/// What one frame decided.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Target before smoothing.
    pub raw_target: Point,
    /// Target after smoothing; the trail eases towards this.
    pub target: Point,
    pub source: InputSource,
}

pub struct Sketch {
    background: Rgba,
    fade_alpha: u8,
    trail: TrailBuffer,
    smoother: Smoother,
    mode: ColorMode,
    pulse: bool,
    frame: u64,
    pointer: Point,
    hand: Option<HandFeed>,
    capture: CaptureState,
}

impl Sketch {
    pub fn new(config: &Config) -> Self {
        Self {
            background: config.background,
            fade_alpha: config.fade_alpha,
            trail: TrailBuffer::new(config.trail),
            smoother: Smoother::new(config.smoothing),
            mode: ColorMode::default(),
            pulse: false,
            frame: 0,
            pointer: Point::default(),
            hand: None,
            capture: if config.capture.enabled { CaptureState::Idle } else { CaptureState::Disabled },
        }
    }

    pub fn pointer_moved(&mut self, p: Point) {
        self.pointer = p;
    }

    /// Mouse press toggles the pulse ring.
    pub fn pointer_pressed(&mut self) {
        self.pulse = !self.pulse;
    }

    pub fn key_pressed(&mut self, key: char) {
        if let Some(mode) = ColorMode::from_key(key) {
            self.mode = mode;
        }
    }

    /// Latest detector output; an empty prediction list means "no hand".
    pub fn receive_hand(&mut self, feed: HandFeed) {
        self.hand = Some(feed);
    }

    pub fn set_capture(&mut self, state: CaptureState) {
        self.capture = state;
        if !matches!(state, CaptureState::Running) {
            self.hand = None;
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn pulse(&self) -> bool {
        self.pulse
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    #[cfg(test)]
    pub fn hand_active(&self) -> bool {
        self.hand.as_ref().is_some_and(HandFeed::has_hand)
    }

    fn ready(&self) -> bool {
        matches!(self.capture, CaptureState::Running | CaptureState::Disabled)
    }

    /// Run one frame and paint it.
    pub fn draw<P: Painter>(&mut self, painter: &mut P) -> FrameReport {
        self.frame += 1;
        let (width, height) = painter.canvas_size();

        // Translucent wash instead of a clear: old dots linger as afterglow.
        painter.fade(self.background.with_alpha(self.fade_alpha));

        // 1) target: hand fingertip if usable, else the pointer
        let (raw_target, source) = select_target(self.hand.as_ref(), self.pointer, width, height);

        // 2) stabilize
        let target = self.smoother.update(raw_target);

        // 3) eased sample, sized by speed
        self.trail.push_towards(target, self.frame);

        // 4) trail, oldest first so the newest ends on top
        let len = self.trail.len();
        for (i, sample) in self.trail.iter().enumerate() {
            let color = sample_color(self.mode, sample, i, len, width, height).to_rgba();
            painter.fill_circle(sample.position, sample.size, color);
        }

        if self.pulse {
            let diameter = 24.0 + ((self.frame as f32 * 0.1).sin() + 1.0) * 16.0;
            painter.stroke_circle(target, diameter, PULSE_WEIGHT, PULSE_COLOR.to_rgba());
        }

        // Hand height picks the mode; takes effect from the next frame.
        if source == InputSource::Hand {
            self.mode = ColorMode::from_band(target.y, height);
        }

        self.draw_hud(painter, source);

        FrameReport { frame: self.frame, raw_target, target, source }
    }

    fn draw_hud<P: Painter>(&self, painter: &mut P, source: InputSource) {
        let status = match source {
            InputSource::Hand => "HAND",
            InputSource::Pointer if self.ready() => "MOUSE",
            InputSource::Pointer => "WAIT",
        };
        let line = format!(
            "INPUT: {status} | MODE {} - KEYS 1/2/3 | CLICK=PULSE {}",
            self.mode.index() + 1,
            if self.pulse { "ON" } else { "OFF" }
        );
        painter.text(12, 12, &line, HUD_COLOR);

        let hint = match self.capture {
            CaptureState::Idle => Some("H: START CAMERA"),
            CaptureState::Starting => Some("STARTING..."),
            CaptureState::Failed => Some("H: RETRY CAMERA"),
            CaptureState::Running | CaptureState::Disabled => None,
        };
        if let Some(hint) = hint {
            painter.text(12, 24, hint, HUD_COLOR);
        }
    }
}
