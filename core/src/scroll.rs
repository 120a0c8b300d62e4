/// Distance from a viewport edge at which autopan engages, in pixels.
pub const EDGE_THRESHOLD: f64 = 200.0;
/// Autopan speed at the very edge, in offset units per frame.
pub const MAX_EDGE_SPEED: f64 = 8.0;
/// Horizontal movement below this is treated as touch noise, not a pan.
pub const DRAG_NOISE_PX: f64 = 5.0;
/// A touch that stays within this box on both axes counts as a tap.
pub const TAP_SLOP_PX: f64 = 10.0;

/// Sub-state of the scroll controller. Only meaningful while browsing; any
/// mode exit resets to `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollPhase {
    #[default]
    Idle,
    Autopanning,
    Dragging,
}

/// Edge-proximity speed curve. Near the left edge the offset grows at up to
/// `MAX_EDGE_SPEED`, tapering linearly to zero at `EDGE_THRESHOLD`; the right
/// edge is symmetric with the sign negated; the interior is zero.
pub fn edge_scroll_speed(pointer_x: f64, viewport_width: f64) -> f64 {
    let from_left = pointer_x;
    let from_right = viewport_width - pointer_x;
    if from_left < EDGE_THRESHOLD {
        MAX_EDGE_SPEED * (1.0 - from_left / EDGE_THRESHOLD)
    } else if from_right < EDGE_THRESHOLD {
        -MAX_EDGE_SPEED * (1.0 - from_right / EDGE_THRESHOLD)
    } else {
        0.0
    }
}

/// One frame of autopan. The offset never goes negative.
pub fn apply_scroll_speed(offset: f64, speed: f64) -> f64 {
    (offset + speed).max(0.0)
}

/// An in-progress touch pan. Records where the touch started and the offset
/// at that instant; panning is relative to both.
#[derive(Clone, Copy, Debug)]
pub struct TouchPan {
    origin_x: f64,
    origin_y: f64,
    origin_offset: f64,
    panning: bool,
}

/// How a touch ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchEnd {
    /// Both axes stayed within `TAP_SLOP_PX` of the origin.
    Tap { x: f64, y: f64 },
    Pan,
}

impl TouchPan {
    pub fn begin(x: f64, y: f64, offset: f64) -> Self {
        Self {
            origin_x: x,
            origin_y: y,
            origin_offset: offset,
            panning: false,
        }
    }

    /// Feed a touch-move. Returns the new offset once the horizontal delta
    /// exceeds the noise threshold, `None` before that. Callers suppress the
    /// browser's default scrolling exactly when this returns `Some`.
    pub fn pan_to(&mut self, x: f64) -> Option<f64> {
        let delta_x = x - self.origin_x;
        if !self.panning && delta_x.abs() <= DRAG_NOISE_PX {
            return None;
        }
        self.panning = true;
        // Dragging right moves the content right, which means a smaller offset.
        Some((self.origin_offset - delta_x).max(0.0))
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Classify the touch at its end position.
    pub fn end(&self, x: f64, y: f64) -> TouchEnd {
        let dx = (x - self.origin_x).abs();
        let dy = (y - self.origin_y).abs();
        if dx < TAP_SLOP_PX && dy < TAP_SLOP_PX {
            TouchEnd::Tap { x, y }
        } else {
            TouchEnd::Pan
        }
    }
}
