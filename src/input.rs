use web_sys::{Touch, TouchEvent};

/// CSS class that marks a DOM element as a clickable flower, so touch taps
/// can tell flowers from open ground.
pub(crate) const FLOWER_CLICKABLE_CLASS: &str = "flower-clickable";

const FALLBACK_VIEWPORT_W: f64 = 1024.0;
const FALLBACK_VIEWPORT_H: f64 = 768.0;

pub(crate) fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (FALLBACK_VIEWPORT_W, FALLBACK_VIEWPORT_H);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_W);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_H);
    (width, height)
}

fn first_touch(event: &TouchEvent, use_changed: bool) -> Option<Touch> {
    let list = if use_changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    list.item(0)
}

/// Viewport position of the first active touch.
pub(crate) fn touch_position(event: &TouchEvent) -> Option<(f64, f64)> {
    let touch = first_touch(event, false)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

/// Viewport position of the touch that just ended.
pub(crate) fn changed_touch_position(event: &TouchEvent) -> Option<(f64, f64)> {
    let touch = first_touch(event, true)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

/// Whether the element under this viewport point is (or sits inside) a
/// flower. Taps on flowers open the viewer instead of planting.
pub(crate) fn flower_element_at(x: f64, y: f64) -> bool {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return false;
    };
    let Some(element) = document.element_from_point(x as f32, y as f32) else {
        return false;
    };
    element
        .closest(&format!(".{FLOWER_CLICKABLE_CLASS}"))
        .ok()
        .flatten()
        .is_some()
}
