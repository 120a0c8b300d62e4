use crate::flower::Flower;
use crate::garden::GardenMode;

/// Fixed left padding of the scrolling container, in pixels.
pub const LEFT_PADDING: f64 = 60.0;
/// Flowers render no further left than this, so every distance and culling
/// computation must apply the same clamp or checks diverge from the screen.
pub const MIN_FLOWER_X: f64 = 60.0;
/// Fraction of the viewport height reserved for the sky band.
pub const SKY_FRACTION: f64 = 0.28;
/// Minimum Euclidean distance between a candidate plot and any flower.
pub const MIN_PLANT_DISTANCE: f64 = 100.0;
/// Extra margin kept renderable on either side of the viewport.
pub const CULL_BUFFER: f64 = 300.0;
/// Half of the widest flower image (115 px), rounded up.
pub const FLOWER_HALF_WIDTH: f64 = 60.0;

pub fn to_screen(absolute_x: f64, offset: f64) -> f64 {
    absolute_x - offset + LEFT_PADDING
}

pub fn to_absolute(screen_x: f64, offset: f64) -> f64 {
    screen_x - LEFT_PADDING + offset
}

pub fn clamp_flower_x(x: f64) -> f64 {
    x.max(MIN_FLOWER_X)
}

/// The top band of the canvas is sky and never plantable, regardless of the
/// scroll offset.
pub fn is_sky_zone(screen_y: f64, viewport_height: f64) -> bool {
    screen_y < SKY_FRACTION * viewport_height
}

pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}

/// Whether a flower may be planted at the candidate absolute position.
/// False if any existing flower lies strictly closer than `min_distance`.
/// Sky rejection happens at click time, against screen coordinates.
pub fn can_plant(
    candidate_x: f64,
    candidate_y: f64,
    flowers: &[Flower],
    min_distance: f64,
) -> bool {
    flowers.iter().all(|flower| {
        let fx = clamp_flower_x(flower.x as f64);
        distance(candidate_x, candidate_y, fx, flower.y as f64) >= min_distance
    })
}

pub fn in_culling_window(flower_x: f64, offset: f64, viewport_width: f64) -> bool {
    let screen_x = to_screen(clamp_flower_x(flower_x), offset);
    screen_x > -CULL_BUFFER - FLOWER_HALF_WIDTH
        && screen_x < viewport_width + CULL_BUFFER + FLOWER_HALF_WIDTH
}

/// The subset of flowers worth rendering. While viewing or planting the full
/// set is returned unmodified: per-flower render logic decides opacity, so
/// offscreen flowers must stay addressable. Purely a render-cost bound; it
/// never affects which flowers are plantable or viewable.
pub fn visible_flowers<'a>(
    flowers: &'a [Flower],
    offset: f64,
    viewport_width: f64,
    mode: &GardenMode,
) -> Vec<&'a Flower> {
    match mode {
        GardenMode::Viewing(_) | GardenMode::Planting { .. } => flowers.iter().collect(),
        GardenMode::Browsing => flowers
            .iter()
            .filter(|flower| in_culling_window(flower.x as f64, offset, viewport_width))
            .collect(),
    }
}
