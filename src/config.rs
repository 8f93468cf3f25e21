//! Tuning knobs for the sketch.
//!
//! Defaults reproduce the original look and feel; a few can be overridden
//! from the environment (see [`Config::from_env`]).

use crate::error::Error;
use crate::types::Rgba;

/// Exponential smoothing + outlier clamp applied to the raw target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingParams {
    /// Moves at or below this distance (px) are treated as jitter and ignored.
    pub deadzone: f32,
    /// Largest jump (px) the raw target may make in one frame.
    pub max_jump: f32,
    /// Blend factor per frame, 0 < smooth <= 1 (higher = snappier).
    pub smooth: f32,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self { deadzone: 4.0, max_jump: 100.0, smooth: 0.18 }
    }
}

/// Trail geometry: how many samples, how they lag, how big they get.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailParams {
    pub capacity: usize,
    /// Fraction of the gap to the target each new sample covers.
    pub easing: f32,
    /// Speed (px/frame) at which samples reach `max_size`.
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self { capacity: 120, easing: 0.25, max_speed: 40.0, min_size: 6.0, max_size: 22.0 }
    }
}

/// Webcam + detector settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureParams {
    /// Off = pointer-only variant; the camera is never offered.
    pub enabled: bool,
    pub device_index: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self { enabled: true, device_index: 0, width: 320, height: 240, fps: 30 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub target_fps: usize,
    pub background: Rgba,
    /// Opacity of the per-frame background wash; lower = longer afterglow.
    pub fade_alpha: u8,
    pub smoothing: SmoothingParams,
    pub trail: TrailParams,
    pub capture: CaptureParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: String::from("Mouse Trails Synth"),
            width: 960,
            height: 640,
            target_fps: 60,
            background: Rgba::rgb(15, 18, 26),
            fade_alpha: 40,
            smoothing: SmoothingParams::default(),
            trail: TrailParams::default(),
            capture: CaptureParams::default(),
        }
    }
}

impl Config {
    /// Defaults plus overrides from `TRAIL_SYNTH_*` variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("TRAIL_SYNTH_CAMERA") {
            cfg.capture.device_index = parse_var("TRAIL_SYNTH_CAMERA", &v)?;
        }
        if let Some(v) = lookup("TRAIL_SYNTH_HAND") {
            cfg.capture.enabled = parse_flag("TRAIL_SYNTH_HAND", &v)?;
        }
        if let Some(v) = lookup("TRAIL_SYNTH_WIDTH") {
            cfg.width = parse_var("TRAIL_SYNTH_WIDTH", &v)?;
        }
        if let Some(v) = lookup("TRAIL_SYNTH_HEIGHT") {
            cfg.height = parse_var("TRAIL_SYNTH_HEIGHT", &v)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let s = &self.smoothing;
        if !(s.smooth > 0.0 && s.smooth <= 1.0) {
            return Err(Error::Config(format!("smooth must be in (0, 1], got {}", s.smooth)));
        }
        if s.deadzone < 0.0 || s.max_jump <= 0.0 {
            return Err(Error::Config("deadzone must be >= 0 and max_jump > 0".into()));
        }
        let t = &self.trail;
        if t.capacity == 0 {
            return Err(Error::Config("trail capacity must be at least 1".into()));
        }
        if !(t.easing > 0.0 && t.easing <= 1.0) {
            return Err(Error::Config(format!("easing must be in (0, 1], got {}", t.easing)));
        }
        if t.max_speed <= 0.0 || t.min_size <= 0.0 || t.max_size < t.min_size {
            return Err(Error::Config("size mapping needs max_speed > 0 and 0 < min_size <= max_size".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config("window size must be non-zero".into()));
        }
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(Error::Config("capture size must be non-zero".into()));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key}: cannot parse {raw:?}")))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, Error> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(Error::Config(format!("{key}: expected a boolean, got {raw:?}"))),
    }
}
