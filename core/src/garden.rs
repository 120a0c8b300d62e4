use crate::flower::Flower;
use crate::geometry::{self, MIN_PLANT_DISTANCE};
use crate::scroll::{self, ScrollPhase, TouchEnd, TouchPan};

/// How long a freshly planted flower keeps its glow, in milliseconds
/// (2.5 s animation, five iterations).
pub const NEW_FLOWER_GLOW_MS: u32 = 12_500;

/// The three user-facing modes. Exactly one is active at any instant.
#[derive(Clone, Debug, PartialEq)]
pub enum GardenMode {
    Browsing,
    Viewing(Flower),
    Planting { x: f64, y: f64 },
}

impl GardenMode {
    pub fn is_browsing(&self) -> bool {
        matches!(self, GardenMode::Browsing)
    }
}

/// Outcome of a click or tap on open ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlantAttempt {
    /// Entered planting mode with this candidate absolute position.
    Started { x: f64, y: f64 },
    /// Click landed in the sky band.
    InSky,
    /// Closer than `MIN_PLANT_DISTANCE` to an existing flower.
    TooClose,
    /// Not in browsing mode; planting entry is mutually exclusive with viewing.
    Blocked,
}

/// The single owner of all garden UI state: scroll offset, mode, the flower
/// cache and the in-flight gesture. Every mutation goes through a method
/// here, on the one UI thread.
#[derive(Clone, Debug)]
pub struct GardenState {
    mode: GardenMode,
    offset: f64,
    saved_offset: f64,
    scroll_speed: f64,
    touch_pan: Option<TouchPan>,
    flowers: Vec<Flower>,
    newly_planted: Option<String>,
}

impl GardenState {
    pub fn new() -> Self {
        Self {
            mode: GardenMode::Browsing,
            offset: 0.0,
            saved_offset: 0.0,
            scroll_speed: 0.0,
            touch_pan: None,
            flowers: Vec::new(),
            newly_planted: None,
        }
    }

    pub fn mode(&self) -> &GardenMode {
        &self.mode
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn newly_planted(&self) -> Option<&str> {
        self.newly_planted.as_deref()
    }

    pub fn clear_newly_planted(&mut self) {
        self.newly_planted = None;
    }

    pub fn flower_by_slug(&self, slug: &str) -> Option<&Flower> {
        self.flowers.iter().find(|flower| flower.slug == slug)
    }

    /// Replace the cache wholesale (initial load).
    pub fn set_flowers(&mut self, flowers: Vec<Flower>) {
        self.flowers = flowers;
    }

    /// Merge one record, deduplicated by id. Safe to call at any time, in
    /// any mode; late fetch completions go through here.
    pub fn merge_flower(&mut self, flower: Flower) {
        if !self.flowers.iter().any(|existing| existing.id == flower.id) {
            self.flowers.push(flower);
        }
    }

    pub fn visible_flowers(&self, viewport_width: f64) -> Vec<&Flower> {
        geometry::visible_flowers(&self.flowers, self.offset, viewport_width, &self.mode)
    }

    // ---- scroll controller ----

    pub fn scroll_phase(&self) -> ScrollPhase {
        if self.touch_pan.map(|pan| pan.is_panning()).unwrap_or(false) {
            ScrollPhase::Dragging
        } else if self.scroll_speed != 0.0 {
            ScrollPhase::Autopanning
        } else {
            ScrollPhase::Idle
        }
    }

    pub fn scroll_speed(&self) -> f64 {
        self.scroll_speed
    }

    /// Pointer moved; recompute the edge-proximity speed. Outside browsing
    /// the speed is pinned at zero.
    pub fn pointer_moved(&mut self, pointer_x: f64, viewport_width: f64) -> f64 {
        self.scroll_speed = if self.mode.is_browsing() {
            scroll::edge_scroll_speed(pointer_x, viewport_width)
        } else {
            0.0
        };
        self.scroll_speed
    }

    pub fn pointer_left(&mut self) {
        self.scroll_speed = 0.0;
    }

    /// One animation-frame tick of autopan.
    pub fn scroll_frame(&mut self) {
        if self.mode.is_browsing() && self.scroll_speed != 0.0 {
            self.offset = scroll::apply_scroll_speed(self.offset, self.scroll_speed);
        }
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        if self.mode.is_browsing() {
            self.touch_pan = Some(TouchPan::begin(x, y, self.offset));
        }
    }

    /// Touch moved. Returns true when the browser's default handling should
    /// be suppressed because we are panning.
    pub fn touch_move(&mut self, x: f64) -> bool {
        if !self.mode.is_browsing() {
            return false;
        }
        let Some(pan) = self.touch_pan.as_mut() else {
            return false;
        };
        match pan.pan_to(x) {
            Some(offset) => {
                self.offset = offset;
                true
            }
            None => false,
        }
    }

    /// Touch lifted. Returns the tap position when the gesture qualified as
    /// a tap; the caller decides whether it landed on a flower or on ground.
    pub fn touch_end(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let pan = self.touch_pan.take()?;
        if !self.mode.is_browsing() {
            return None;
        }
        match pan.end(x, y) {
            TouchEnd::Tap { x, y } => Some((x, y)),
            TouchEnd::Pan => None,
        }
    }

    /// The platform cancelled the touch; forget the gesture.
    pub fn touch_cancel(&mut self) {
        self.touch_pan = None;
    }

    fn halt_scroll(&mut self) {
        self.scroll_speed = 0.0;
        self.touch_pan = None;
    }

    // ---- mode transitions ----

    /// Click or tap on open ground while browsing. Takes viewport screen
    /// coordinates; the candidate position is stored in world space.
    pub fn try_begin_planting(
        &mut self,
        screen_x: f64,
        screen_y: f64,
        viewport_height: f64,
    ) -> PlantAttempt {
        if !self.mode.is_browsing() {
            return PlantAttempt::Blocked;
        }
        if geometry::is_sky_zone(screen_y, viewport_height) {
            return PlantAttempt::InSky;
        }
        let x = geometry::to_absolute(screen_x, self.offset);
        let y = screen_y;
        if !geometry::can_plant(x, y, &self.flowers, MIN_PLANT_DISTANCE) {
            return PlantAttempt::TooClose;
        }
        self.saved_offset = self.offset;
        self.halt_scroll();
        self.mode = GardenMode::Planting { x, y };
        PlantAttempt::Started { x, y }
    }

    /// Close the planting drawer without submitting. No persistence side
    /// effect; the candidate position is discarded.
    pub fn cancel_planting(&mut self) {
        if let GardenMode::Planting { .. } = self.mode {
            self.offset = self.saved_offset;
            self.mode = GardenMode::Browsing;
        }
    }

    /// A submission came back successful. The created record is merged
    /// whatever the current mode (the drawer may have been closed while the
    /// request was in flight), but the transition back to browsing only
    /// happens if we are still planting.
    pub fn finish_planting(&mut self, flower: Flower) {
        self.newly_planted = Some(flower.id.clone());
        self.merge_flower(flower);
        if let GardenMode::Planting { .. } = self.mode {
            self.offset = self.saved_offset;
            self.mode = GardenMode::Browsing;
        }
    }

    /// Select a flower for viewing. Blocked while planting; switching
    /// between flowers while already viewing keeps the original snapshot.
    pub fn begin_viewing(&mut self, flower: Flower) -> bool {
        match self.mode {
            GardenMode::Planting { .. } => false,
            GardenMode::Viewing(_) => {
                self.mode = GardenMode::Viewing(flower);
                true
            }
            GardenMode::Browsing => {
                self.saved_offset = self.offset;
                self.halt_scroll();
                self.mode = GardenMode::Viewing(flower);
                true
            }
        }
    }

    pub fn close_viewing(&mut self) {
        if let GardenMode::Viewing(_) = self.mode {
            self.offset = self.saved_offset;
            self.mode = GardenMode::Browsing;
        }
    }
}

impl Default for GardenState {
    fn default() -> Self {
        Self::new()
    }
}
