// Color policy for trail samples + HSB → RGB conversion.
// Hue comes from the active mode; brightness and opacity grow with sample age
// so the newest dots are the brightest and most opaque.

use crate::trail::Sample;
use crate::types::{Rgba, map_range};

const SAMPLE_SATURATION: f32 = 70.0;

/// Which sample property drives the hue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Hue follows x: blue → magenta across the canvas.
    #[default]
    PositionX,
    /// Hue follows y: orange → cyan down the canvas.
    PositionY,
    /// Hue cycles with the sample's frame stamp.
    Time,
}

impl ColorMode {
    /// Keys '1', '2', '3' pick a mode directly.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Self::PositionX),
            '2' => Some(Self::PositionY),
            '3' => Some(Self::Time),
            _ => None,
        }
    }

    /// Mode implied by which vertical band of the canvas `y` falls in.
    pub fn from_band(y: f32, height: f32) -> Self {
        let band = if height > 0.0 { y / height } else { 0.0 };
        if band < 0.33 {
            Self::PositionX
        } else if band < 0.66 {
            Self::PositionY
        } else {
            Self::Time
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::PositionX => 0,
            Self::PositionY => 1,
            Self::Time => 2,
        }
    }

    pub fn hue(self, sample: &Sample, width: f32, height: f32) -> f32 {
        match self {
            Self::PositionX => map_range(sample.position.x, 0.0, width, 200.0, 320.0, true),
            Self::PositionY => map_range(sample.position.y, 0.0, height, 30.0, 200.0, true),
            Self::Time => ((sample.timestamp % 180) * 2) as f32,
        }
    }
}

/// Hue in degrees (0..360), saturation and brightness in 0..100, alpha in 0..255.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsba {
    pub h: f32,
    pub s: f32,
    pub b: f32,
    pub a: f32,
}

impl Hsba {
    pub const fn new(h: f32, s: f32, b: f32, a: f32) -> Self {
        Self { h, s, b, a }
    }

    pub fn to_rgba(self) -> Rgba {
        let v = (self.b / 100.0).clamp(0.0, 1.0);
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let h = self.h.rem_euclid(360.0) / 60.0;

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgba { r: unit_to_u8(r + m), g: unit_to_u8(g + m), b: unit_to_u8(b + m), a: channel_u8(self.a) }
    }
}

/// Fill color for the sample at position `index` of a trail holding `len` samples.
/// `index` 0 is the oldest.
pub fn sample_color(mode: ColorMode, sample: &Sample, index: usize, len: usize, width: f32, height: f32) -> Hsba {
    let age = if len == 0 { 0.0 } else { index as f32 / len as f32 };
    Hsba::new(mode.hue(sample, width, height), SAMPLE_SATURATION, 70.0 + age * 25.0, 80.0 + age * 120.0)
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn channel_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
