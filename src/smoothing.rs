// Two-stage jitter filter for the raw target point.
// Stage 1: a hard clamp stops single-frame teleports (e.g. a detector dropout).
// Stage 2: a deadzone ignores sub-threshold wobble, otherwise we ease towards the target.

use crate::config::SmoothingParams;
use crate::types::Point;

/// Where the filter currently believes the target is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SmoothingState {
    /// No frame has been seen yet.
    Uninitialized,
    Active(Point),
}

pub struct Smoother {
    params: SmoothingParams,
    state: SmoothingState,
}

impl Smoother {
    pub fn new(params: SmoothingParams) -> Self {
        Self { params, state: SmoothingState::Uninitialized }
    }

    #[cfg(test)]
    pub fn state(&self) -> SmoothingState {
        self.state
    }

    /// Feed this frame's raw target and get back the stabilized one.
    pub fn update(&mut self, raw: Point) -> Point {
        let current = match self.state {
            SmoothingState::Uninitialized => {
                // First frame: adopt the target as-is.
                self.state = SmoothingState::Active(raw);
                return raw;
            }
            SmoothingState::Active(p) => p,
        };

        let target = clamp_jump(current, raw, self.params.max_jump);

        let next = if current.distance(target) > self.params.deadzone {
            current.lerp(target, self.params.smooth)
        } else {
            current
        };
        self.state = SmoothingState::Active(next);
        next
    }
}

/// Pull `target` back towards `from` so it is at most `max_jump` away,
/// keeping its direction.
pub fn clamp_jump(from: Point, target: Point, max_jump: f32) -> Point {
    let d = from.distance(target);
    if d > max_jump {
        from.lerp(target, max_jump / d)
    } else {
        target
    }
}
