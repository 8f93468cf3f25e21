// Core value types shared by the trail pipeline and the rasterizer.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the canvas is on screen (pixels)
    pub height: usize,     // how tall the canvas is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A canvas filled with one solid color.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        Self { width, height, pixels: vec![color.packed(); width * height] }
    }

    /// Reallocate to `width`×`height` cleared to `color` if the size changed.
    /// A zero-sized request (minimized window) keeps the current canvas.
    pub fn fit(&mut self, width: usize, height: usize, color: Rgba) -> bool {
        if (width, height) == (self.width, self.height) || width == 0 || height == 0 {
            return false;
        }
        *self = Self::filled(width, height, color);
        true
    }
}

/// A point in canvas pixel coordinates (origin top-left, y down).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move `t` of the way from `self` towards `other` (t=0 → self, t=1 → other).
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point { x: lerp(self.x, other.x, t), y: lerp(self.y, other.y, t) }
    }
}

/// 8-bit RGBA color; `a` is opacity on the 0..255 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Pack as 0x00RRGGBB (alpha dropped) for the window buffer.
    pub const fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Re-map `value` from [in_lo, in_hi] to [out_lo, out_hi].
/// With `clamp`, the result is held inside the output range whichever way it runs.
/// A degenerate input range maps everything to `out_lo`.
pub fn map_range(value: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32, clamp: bool) -> f32 {
    let span = in_hi - in_lo;
    if span == 0.0 {
        return out_lo;
    }
    let mapped = (value - in_lo) / span * (out_hi - out_lo) + out_lo;
    if !clamp {
        return mapped;
    }
    if out_lo < out_hi { mapped.clamp(out_lo, out_hi) } else { mapped.clamp(out_hi, out_lo) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_reallocates_only_on_real_size_change() {
        let bg = Rgba::rgb(15, 18, 26);
        let mut fb = FrameBuffer::filled(4, 3, bg);
        fb.pixels[0] = 0xFFFFFF;

        assert!(!fb.fit(4, 3, bg));
        assert_eq!(fb.pixels[0], 0xFFFFFF);
        assert!(!fb.fit(0, 10, bg));
        assert_eq!((fb.width, fb.height), (4, 3));

        assert!(fb.fit(2, 5, bg));
        assert_eq!((fb.width, fb.height), (2, 5));
        assert_eq!(fb.pixels.len(), 10);
        assert!(fb.pixels.iter().all(|&p| p == bg.packed()));
    }

    #[test]
    fn map_range_clamps_reversed_output() {
        // mirrored mapping: source 0 → 800, source 320 → 0
        assert_eq!(map_range(0.0, 0.0, 320.0, 800.0, 0.0, true), 800.0);
        assert_eq!(map_range(320.0, 0.0, 320.0, 800.0, 0.0, true), 0.0);
        assert_eq!(map_range(-50.0, 0.0, 320.0, 800.0, 0.0, true), 800.0);
        assert_eq!(map_range(400.0, 0.0, 320.0, 800.0, 0.0, true), 0.0);
        assert_eq!(map_range(160.0, 0.0, 320.0, 800.0, 0.0, true), 400.0);
    }

    #[test]
    fn map_range_unclamped_extrapolates() {
        assert_eq!(map_range(20.0, 0.0, 10.0, 0.0, 1.0, false), 2.0);
    }

    #[test]
    fn map_range_degenerate_input() {
        assert_eq!(map_range(5.0, 3.0, 3.0, 30.0, 200.0, true), 30.0);
    }

    #[test]
    fn point_distance_and_lerp() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.lerp(b, 0.5), Point::new(1.5, 2.0));
    }

    #[test]
    fn packs_rgb() {
        assert_eq!(Rgba::rgb(0x12, 0x34, 0x56).packed(), 0x0012_3456);
    }
}
