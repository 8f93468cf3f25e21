// Fingertip detection on camera frames.
// The built-in detector is deliberately coarse: it segments skin-colored pixels,
// and if enough of the frame is skin it calls the topmost skin row the fingertip.
// Point one finger up at the camera and the trail follows it.

use image::RgbImage;

use crate::target::{HandPrediction, INDEX_FINGER_TIP, LANDMARK_COUNT, Landmark};

/// Turns one camera frame into zero or more hands in the 21-point layout.
pub trait LandmarkDetector {
    fn detect(&mut self, frame: &RgbImage) -> Vec<HandPrediction>;
}

pub struct SkinTipDetector {
    /// Fraction of sampled pixels that must be skin before we report a hand.
    pub min_area_fraction: f32,
    /// A row needs this many skin samples to count as the fingertip row.
    pub min_row_samples: usize,
    /// Sample every `step`-th pixel in both directions.
    pub step: u32,
}

impl Default for SkinTipDetector {
    fn default() -> Self {
        Self { min_area_fraction: 0.015, min_row_samples: 3, step: 2 }
    }
}

impl LandmarkDetector for SkinTipDetector {
    fn detect(&mut self, frame: &RgbImage) -> Vec<HandPrediction> {
        let (w, h) = frame.dimensions();
        let step = self.step.max(1) as usize;

        let mut sampled = 0usize;
        let mut skin = 0usize;
        let (mut sum_x, mut sum_y) = (0f64, 0f64);
        let mut tip: Option<(f32, f32)> = None;

        for y in (0..h).step_by(step) {
            let (mut row_count, mut row_sum) = (0usize, 0f64);
            for x in (0..w).step_by(step) {
                sampled += 1;
                let p = frame.get_pixel(x, y);
                if is_skin(p[0], p[1], p[2]) {
                    skin += 1;
                    row_count += 1;
                    row_sum += x as f64;
                    sum_x += x as f64;
                    sum_y += y as f64;
                }
            }
            if tip.is_none() && row_count >= self.min_row_samples {
                tip = Some(((row_sum / row_count as f64) as f32, y as f32));
            }
        }

        if sampled == 0 || (skin as f32) < self.min_area_fraction * sampled as f32 {
            return Vec::new();
        }
        let Some((tip_x, tip_y)) = tip else {
            return Vec::new();
        };

        let centroid = Landmark { x: (sum_x / skin as f64) as f32, y: (sum_y / skin as f64) as f32, z: 0.0 };
        // Only the fingertip is located; every other slot (wrist included) is the palm centroid.
        let mut landmarks = vec![centroid; LANDMARK_COUNT];
        landmarks[INDEX_FINGER_TIP] = Landmark { x: tip_x, y: tip_y, z: 0.0 };

        vec![HandPrediction { landmarks }]
    }
}

/// Fixed RGB skin rule for daylight-ish lighting.
#[inline]
pub fn is_skin(r: u8, g: u8, b: u8) -> bool {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    r > 95 && g > 40 && b > 20 && max - min > 15 && r.abs_diff(g) > 15 && r > g && r > b
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const SKIN: Rgb<u8> = Rgb([220, 170, 140]);
    const DARK: Rgb<u8> = Rgb([20, 20, 20]);

    fn frame_with(rects: &[(u32, u32, u32, u32)]) -> RgbImage {
        RgbImage::from_fn(320, 240, |x, y| {
            let inside = rects.iter().any(|&(x0, y0, x1, y1)| x >= x0 && x < x1 && y >= y0 && y < y1);
            if inside { SKIN } else { DARK }
        })
    }

    #[test]
    fn skin_rule() {
        assert!(is_skin(220, 170, 140));
        assert!(!is_skin(20, 20, 20));
        assert!(!is_skin(200, 200, 200)); // gray
        assert!(!is_skin(60, 120, 220)); // blue
    }

    #[test]
    fn finds_raised_finger_tip() {
        // finger 150..170 from y=60, palm below from y=160
        let frame = frame_with(&[(150, 60, 170, 240), (110, 160, 210, 240)]);
        let hands = SkinTipDetector::default().detect(&frame);
        assert_eq!(hands.len(), 1);
        let tip = hands[0].fingertip().unwrap();
        assert_eq!(tip.y, 60.0);
        assert!((tip.x - 160.0).abs() <= 2.0);

        let wrist = hands[0].landmarks[0];
        assert!(wrist.y > tip.y);
        assert_eq!(hands[0].landmarks.len(), LANDMARK_COUNT);
    }

    #[test]
    fn empty_scene_has_no_hand() {
        assert!(SkinTipDetector::default().detect(&frame_with(&[])).is_empty());
    }

    #[test]
    fn small_speck_is_ignored() {
        let frame = frame_with(&[(10, 10, 20, 20)]);
        assert!(SkinTipDetector::default().detect(&frame).is_empty());
    }
}
