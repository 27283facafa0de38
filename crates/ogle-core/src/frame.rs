/// Pointer position normalized to [-1, 1] on both axes, viewport-relative.
/// Produced once per frame by the input layer; values outside the range are
/// tolerated but never match a mood region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another sample, in normalized viewport units.
    pub fn distance_to(&self, other: PointerSample) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Everything the animation core consumes for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub pointer: PointerSample,
    /// Monotonic clock since session start, seconds. Drives the
    /// deterministic jitter and swirl oscillators.
    pub elapsed: f32,
    /// Wall-clock timestamp, milliseconds. Drives blink scheduling and
    /// inactivity timers.
    pub now_ms: f64,
}

impl FrameInput {
    pub fn new(pointer: PointerSample, elapsed: f32, now_ms: f64) -> Self {
        Self {
            pointer,
            elapsed,
            now_ms,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.pointer.is_finite() && self.elapsed.is_finite() && self.now_ms.is_finite()
    }
}
