use digibloom_core::scroll::{
    edge_scroll_speed, ScrollPhase, EDGE_THRESHOLD, MAX_EDGE_SPEED,
};
use digibloom_core::{Flower, FlowerKind, GardenMode, GardenState, PlantAttempt};

const VIEWPORT_W: f64 = 1024.0;
const VIEWPORT_H: f64 = 768.0;

fn flower_at(id: &str, x: i64, y: i64) -> Flower {
    Flower {
        id: id.to_string(),
        slug: format!("{id}-slug"),
        title: "Hope".to_string(),
        message: "Stay strong".to_string(),
        author: None,
        x,
        y,
        kind: FlowerKind::RedTulip,
        created_at: None,
    }
}

fn browsing_garden() -> GardenState {
    let mut state = GardenState::new();
    state.set_flowers(vec![flower_at("a", 500, 400), flower_at("b", 2_000, 500)]);
    state
}

#[test]
fn starts_browsing_at_offset_zero() {
    let state = GardenState::new();
    assert_eq!(*state.mode(), GardenMode::Browsing);
    assert_eq!(state.offset(), 0.0);
    assert_eq!(state.scroll_phase(), ScrollPhase::Idle);
}

#[test]
fn edge_speed_curve_matches_the_band() {
    // Hard against the left edge: full speed, offset grows.
    assert_eq!(edge_scroll_speed(0.0, VIEWPORT_W), MAX_EDGE_SPEED);
    // Halfway into the band: half speed.
    let half = edge_scroll_speed(EDGE_THRESHOLD / 2.0, VIEWPORT_W);
    assert!((half - MAX_EDGE_SPEED / 2.0).abs() < 1e-9);
    // At the threshold: zero.
    assert_eq!(edge_scroll_speed(EDGE_THRESHOLD, VIEWPORT_W), 0.0);
    // Interior: zero.
    assert_eq!(edge_scroll_speed(VIEWPORT_W / 2.0, VIEWPORT_W), 0.0);
    // Right edge mirrors with the sign negated.
    assert_eq!(edge_scroll_speed(VIEWPORT_W, VIEWPORT_W), -MAX_EDGE_SPEED);
}

#[test]
fn autopan_frames_accumulate_and_never_go_negative() {
    let mut state = browsing_garden();
    state.pointer_moved(0.0, VIEWPORT_W);
    assert_eq!(state.scroll_phase(), ScrollPhase::Autopanning);
    state.scroll_frame();
    state.scroll_frame();
    assert_eq!(state.offset(), 2.0 * MAX_EDGE_SPEED);

    // Scrolling left from the origin pins at zero.
    let mut state = browsing_garden();
    state.pointer_moved(VIEWPORT_W, VIEWPORT_W);
    state.scroll_frame();
    assert_eq!(state.offset(), 0.0);
}

#[test]
fn leaving_browsing_zeroes_the_speed() {
    let mut state = browsing_garden();
    state.pointer_moved(0.0, VIEWPORT_W);
    assert!(state.scroll_speed() != 0.0);
    let flower = state.flowers()[0].clone();
    assert!(state.begin_viewing(flower));
    assert_eq!(state.scroll_speed(), 0.0);
    assert_eq!(state.scroll_phase(), ScrollPhase::Idle);
    // Pointer events while viewing keep the speed pinned.
    assert_eq!(state.pointer_moved(0.0, VIEWPORT_W), 0.0);
}

#[test]
fn viewing_cycle_restores_the_offset() {
    let mut state = browsing_garden();
    state.pointer_moved(0.0, VIEWPORT_W);
    for _ in 0..50 {
        state.scroll_frame();
    }
    let before = state.offset();
    let flower = state.flowers()[0].clone();
    assert!(state.begin_viewing(flower));
    state.close_viewing();
    assert_eq!(*state.mode(), GardenMode::Browsing);
    assert_eq!(state.offset(), before);
}

#[test]
fn planting_cycle_without_submission_restores_the_offset() {
    let mut state = browsing_garden();
    state.pointer_moved(0.0, VIEWPORT_W);
    for _ in 0..30 {
        state.scroll_frame();
    }
    let before = state.offset();
    let attempt = state.try_begin_planting(700.0, 600.0, VIEWPORT_H);
    assert!(matches!(attempt, PlantAttempt::Started { .. }));
    state.cancel_planting();
    assert_eq!(*state.mode(), GardenMode::Browsing);
    assert_eq!(state.offset(), before);
    // Nothing was persisted or cached.
    assert_eq!(state.flowers().len(), 2);
}

#[test]
fn snapshot_does_not_leak_across_cycles() {
    let mut state = browsing_garden();
    let flower = state.flowers()[0].clone();
    assert!(state.begin_viewing(flower.clone()));
    state.close_viewing();
    // Scroll between cycles, then run another one.
    state.pointer_moved(0.0, VIEWPORT_W);
    for _ in 0..10 {
        state.scroll_frame();
    }
    let second = state.offset();
    assert!(state.begin_viewing(flower));
    state.close_viewing();
    assert_eq!(state.offset(), second);
}

#[test]
fn planting_maps_the_click_through_the_current_offset() {
    let mut state = GardenState::new();
    state.pointer_moved(0.0, VIEWPORT_W);
    for _ in 0..25 {
        state.scroll_frame();
    }
    let offset = state.offset();
    match state.try_begin_planting(560.0, 600.0, VIEWPORT_H) {
        PlantAttempt::Started { x, y } => {
            assert_eq!(x, 500.0 + offset);
            assert_eq!(y, 600.0);
        }
        other => panic!("expected planting to start, got {other:?}"),
    }
}

#[test]
fn sky_clicks_never_plant() {
    let mut state = GardenState::new();
    let attempt = state.try_begin_planting(500.0, 100.0, VIEWPORT_H);
    assert_eq!(attempt, PlantAttempt::InSky);
    assert_eq!(*state.mode(), GardenMode::Browsing);
}

#[test]
fn crowded_ground_refuses_planting() {
    let mut state = browsing_garden();
    // Flower "a" sits at absolute (500, 400); screen x is 560 at rest.
    let attempt = state.try_begin_planting(560.0, 440.0, VIEWPORT_H);
    assert_eq!(attempt, PlantAttempt::TooClose);
}

#[test]
fn viewing_and_planting_are_mutually_exclusive() {
    let mut state = browsing_garden();
    let flower = state.flowers()[0].clone();
    assert!(state.begin_viewing(flower.clone()));
    assert_eq!(
        state.try_begin_planting(700.0, 600.0, VIEWPORT_H),
        PlantAttempt::Blocked
    );

    let mut state = browsing_garden();
    assert!(matches!(
        state.try_begin_planting(700.0, 600.0, VIEWPORT_H),
        PlantAttempt::Started { .. }
    ));
    assert!(!state.begin_viewing(flower));
    assert!(matches!(state.mode(), GardenMode::Planting { .. }));
}

#[test]
fn successful_submission_appends_and_highlights() {
    let mut state = browsing_garden();
    assert!(matches!(
        state.try_begin_planting(700.0, 600.0, VIEWPORT_H),
        PlantAttempt::Started { .. }
    ));
    let planted = flower_at("new", 640, 600);
    state.finish_planting(planted.clone());
    assert_eq!(*state.mode(), GardenMode::Browsing);
    assert_eq!(state.flowers().len(), 3);
    assert_eq!(state.newly_planted(), Some("new"));
    state.clear_newly_planted();
    assert_eq!(state.newly_planted(), None);
    // The record is cached only once even if the response is replayed.
    state.merge_flower(planted);
    assert_eq!(state.flowers().len(), 3);
}

#[test]
fn late_submission_result_merges_without_forcing_a_transition() {
    let mut state = browsing_garden();
    let flower = state.flowers()[0].clone();
    assert!(state.begin_viewing(flower));
    // The drawer was long closed; a stale success must not yank the mode.
    state.finish_planting(flower_at("late", 3_000, 520));
    assert!(matches!(state.mode(), GardenMode::Viewing(_)));
    assert_eq!(state.flowers().len(), 3);
}

#[test]
fn touch_pan_moves_the_offset_and_suppresses_default() {
    let mut state = GardenState::new();
    state.touch_start(300.0, 400.0);
    // Within the noise threshold nothing happens.
    assert!(!state.touch_move(303.0));
    assert_eq!(state.offset(), 0.0);
    // Dragging left by 40px scrolls the garden forward.
    assert!(state.touch_move(260.0));
    assert_eq!(state.offset(), 40.0);
    assert_eq!(state.scroll_phase(), ScrollPhase::Dragging);
    // Dragging right past the origin clamps at zero.
    assert!(state.touch_move(500.0));
    assert_eq!(state.offset(), 0.0);
    assert_eq!(state.touch_end(500.0, 400.0), None);
    assert_eq!(state.scroll_phase(), ScrollPhase::Idle);
}

#[test]
fn short_touch_is_a_tap() {
    let mut state = GardenState::new();
    state.touch_start(300.0, 400.0);
    assert!(!state.touch_move(304.0));
    assert_eq!(state.touch_end(304.0, 403.0), Some((304.0, 403.0)));
}

#[test]
fn a_real_drag_never_plants() {
    let mut state = GardenState::new();
    state.touch_start(300.0, 400.0);
    assert!(state.touch_move(200.0));
    assert_eq!(state.touch_end(200.0, 400.0), None);
    assert_eq!(*state.mode(), GardenMode::Browsing);
}

#[test]
fn merge_flower_deduplicates_by_id() {
    let mut state = GardenState::new();
    state.merge_flower(flower_at("a", 100, 400));
    state.merge_flower(flower_at("a", 100, 400));
    state.merge_flower(flower_at("b", 900, 400));
    assert_eq!(state.flowers().len(), 2);
    assert!(state.flower_by_slug("b-slug").is_some());
}
