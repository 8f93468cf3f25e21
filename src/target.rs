// Picks the point the trail should follow this frame.
// A detected hand wins; otherwise the mouse. Hand coordinates arrive in
// camera pixels and are mirrored so moving your hand right moves the trail right.

use crate::types::{Point, map_range};

/// Slot of the index fingertip in the 21-point hand layout.
pub const INDEX_FINGER_TIP: usize = 8;
pub const LANDMARK_COUNT: usize = 21;

/// One detected keypoint in capture pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One detected hand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandPrediction {
    pub landmarks: Vec<Landmark>,
}

impl HandPrediction {
    pub fn fingertip(&self) -> Option<Landmark> {
        self.landmarks.get(INDEX_FINGER_TIP).copied()
    }
}

/// Everything the detector reported for one camera frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFeed {
    pub source_width: u32,
    pub source_height: u32,
    pub predictions: Vec<HandPrediction>,
}

impl HandFeed {
    pub fn has_hand(&self) -> bool {
        !self.predictions.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Hand,
    Pointer,
}

/// Map a capture-space fingertip onto the canvas, mirrored horizontally.
/// Returns None when the feed has no usable fingertip.
pub fn hand_target(feed: &HandFeed, width: f32, height: f32) -> Option<Point> {
    let tip = feed.predictions.first()?.fingertip()?;
    let sw = feed.source_width as f32;
    let sh = feed.source_height as f32;

    let x = map_range(tip.x, 0.0, sw, width, 0.0, true);
    let y = map_range(tip.y, 0.0, sh, 0.0, height, true);
    Some(Point::new(x.clamp(0.0, width.max(0.0)), y.clamp(0.0, height.max(0.0))))
}

/// Hand fingertip if one is usable, else the raw pointer.
pub fn select_target(feed: Option<&HandFeed>, pointer: Point, width: f32, height: f32) -> (Point, InputSource) {
    match feed.and_then(|f| hand_target(f, width, height)) {
        Some(p) => (p, InputSource::Hand),
        None => (pointer, InputSource::Pointer),
    }
}
