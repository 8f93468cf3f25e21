// The trail itself: a bounded FIFO of eased samples.
// Each frame appends exactly one sample; the oldest falls off the front once full.

use std::collections::VecDeque;

use crate::config::TrailParams;
use crate::types::{Point, map_range};

/// One dot of the trail. Never mutated after it is pushed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub position: Point,
    /// Visual diameter in pixels.
    pub size: f32,
    /// Frame counter at creation.
    pub timestamp: u64,
}

pub struct TrailBuffer {
    params: TrailParams,
    samples: VecDeque<Sample>,
}

impl TrailBuffer {
    pub fn new(params: TrailParams) -> Self {
        Self { samples: VecDeque::with_capacity(params.capacity + 1), params }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Append the next sample, eased from the previous one towards `target`.
    /// Returns the sample that was pushed.
    pub fn push_towards(&mut self, target: Point, timestamp: u64) -> Sample {
        let last = self.last().map_or(target, |s| s.position);
        let position = last.lerp(target, self.params.easing);
        let size = size_for_speed(&self.params, last.distance(position));

        let sample = Sample { position, size, timestamp };
        self.samples.push_back(sample);
        while self.samples.len() > self.params.capacity {
            self.samples.pop_front();
        }
        sample
    }
}

/// Faster motion → thicker dot. Linear on [0, max_speed], clamped at both ends.
pub fn size_for_speed(params: &TrailParams, speed: f32) -> f32 {
    map_range(speed, 0.0, params.max_speed, params.min_size, params.max_size, true)
}
