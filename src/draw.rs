// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the canvas.
// 2) Alpha-blended filled circles and rings (trail dots, pulse ring).
// 3) A tiny 5x7 bitmap font to render HUD text.

use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgba};
use minifb::{CursorStyle, Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window paced to `fps`.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let opts = WindowOptions { resize: true, scale_mode: ScaleMode::UpperLeft, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, opts).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        window.set_cursor_style(CursorStyle::Crosshair);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we’ll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current inner size of the window; changes when the user resizes it.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Point::new(x.max(0.0), y.max(0.0)))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// The mode digit pressed this frame, if any.
    pub fn mode_key_pressed(&self) -> Option<char> {
        [(Key::Key1, '1'), (Key::Key2, '2'), (Key::Key3, '3')]
            .into_iter()
            .find(|(k, _)| self.window.is_key_pressed(*k, KeyRepeat::No))
            .map(|(_, c)| c)
    }

    /// When pressed, the camera + hand detector start (or retry).
    pub fn h_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::H, KeyRepeat::No)
    }
}

/// Drawing boundary between the sketch and whatever paints pixels.
pub trait Painter {
    fn canvas_size(&self) -> (f32, f32);
    /// Wash the whole canvas with `color` at its alpha.
    fn fade(&mut self, color: Rgba);
    fn fill_circle(&mut self, center: Point, diameter: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Point, diameter: f32, weight: f32, color: Rgba);
    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgba);
}

impl Painter for FrameBuffer {
    fn canvas_size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    fn fade(&mut self, color: Rgba) {
        if color.a == 0 {
            return;
        }
        for px in &mut self.pixels {
            *px = blend(*px, color);
        }
    }

    fn fill_circle(&mut self, center: Point, diameter: f32, color: Rgba) {
        let r = diameter * 0.5;
        if r <= 0.0 {
            return;
        }
        let r2 = r * r;
        scan_disc(self, center, r, |fb, x, y, d2| {
            if d2 <= r2 {
                blend_pixel(fb, x, y, color);
            }
        });
    }

    fn stroke_circle(&mut self, center: Point, diameter: f32, weight: f32, color: Rgba) {
        let r = diameter * 0.5;
        let half = (weight * 0.5).max(0.5);
        scan_disc(self, center, r + half, |fb, x, y, d2| {
            if (d2.sqrt() - r).abs() <= half {
                blend_pixel(fb, x, y, color);
            }
        });
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgba) {
        draw_text_5x7(self, x, y, text, color.packed());
    }
}

/* ---------- Software drawing: pixels, blending, tiny bitmap font ---------- */

/// Source-over blend of `src` (with its alpha) onto the packed pixel `dst`.
#[inline]
fn blend(dst: u32, src: Rgba) -> u32 {
    let a = src.a as u32;
    let inv = 255 - a;
    let mix = |s: u8, d: u32| (s as u32 * a + d * inv + 127) / 255;
    let r = mix(src.r, (dst >> 16) & 0xFF);
    let g = mix(src.g, (dst >> 8) & 0xFF);
    let b = mix(src.b, dst & 0xFF);
    (r << 16) | (g << 8) | b
}

#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = blend(fb.pixels[idx], color);
}

/// Visit every pixel of the bounding box of a circle of `radius` around `center`,
/// passing the squared distance from the pixel center.
fn scan_disc<F>(fb: &mut FrameBuffer, center: Point, radius: f32, mut visit: F)
where
    F: FnMut(&mut FrameBuffer, i32, i32, f32),
{
    let x0 = (center.x - radius).floor() as i32;
    let x1 = (center.x + radius).ceil() as i32;
    let y0 = (center.y - radius).floor() as i32;
    let y1 = (center.y + radius).ceil() as i32;
    for y in y0.max(0)..=y1.min(fb.height as i32 - 1) {
        for x in x0.max(0)..=x1.min(fb.width as i32 - 1) {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            visit(fb, x, y, dx * dx + dy * dy);
        }
    }
}

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/* ---------- 5x7 bitmap font (digits, A-Z, HUD punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch.to_ascii_uppercase()) {
        for (offset, ink) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx as i32 + offset, y + ry as i32 + offset, ink);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}
