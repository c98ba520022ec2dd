//! End-to-end scenarios: load → place → frame → click → overlay.

use starjourney_core::{
    config::{FieldConfig, SceneConfig},
    engine::{LoadStatus, SceneEngine},
    error::LoadError,
    event::SceneEvent,
    journey::parse_journey,
    picking::{SelectionChange, SelectionState},
};

const TWO_SUM: &str = r##"[
  {"day": 1, "color": "#4caf50", "problems": [
    {"name": "Two Sum", "link": "https://leetcode.com/problems/two-sum/",
     "twitterPostLink": "https://x.com/someone/status/1", "emojis": ["🎯"],
     "difficulty": "Easy"}
  ]}
]"##;

#[test]
fn two_sum_day_renders_easy_badge_on_click() {
    let mut engine = SceneEngine::build_test(42).unwrap();
    engine.apply_load_result(parse_journey(TWO_SUM)).unwrap();

    assert_eq!(engine.state().stars.len(), 1);
    assert_eq!(engine.state().stars[0].day(), 1);
    assert_eq!(*engine.load_status(), LoadStatus::Ready { stars: 1 });

    engine.run_frames(30, 60.0);
    assert_eq!(engine.click_star(0).unwrap(), Some(SelectionChange::Selected(0)));

    let panel = engine.overlay().panel().expect("overlay visible");
    let html = panel.to_html();
    assert!(html.contains("Day 1"));
    assert!(html.contains("class=\"difficulty easy\""));
    assert!(html.contains("Two Sum 🎯"));
    assert!(html.contains("View Post on 𝕏"));

    let events = engine.frame(1.0);
    assert!(events.contains(&SceneEvent::StarSelected { star_id: 0, day: 1 }));
}

#[test]
fn clicking_star_on_screen_opens_its_day() {
    let body = r##"[{"day": 1, "color": "#ff0000", "problems": [{"name": "Two Sum",
        "link": "https://x", "twitterPostLink": "https://y", "emojis": ["✅"],
        "difficulty": "Easy"}]}]"##;
    let mut engine = SceneEngine::build_test(48).unwrap();
    engine.apply_load_result(parse_journey(body)).unwrap();
    assert_eq!(engine.state().stars.len(), 1);

    // Pin the star in front of the camera so its projection is on screen.
    engine.state_mut().stars[0].position = glam::Vec3::new(3.0, -2.0, 5.0);
    let state = engine.state();
    let pixel = state.camera.project(&state.viewport, state.stars[0].position).unwrap();

    assert_eq!(engine.click(pixel.x, pixel.y), Some(SelectionChange::Selected(0)));
    let html = engine.overlay().panel().unwrap().to_html();
    assert!(html.contains("<h3>Day 1</h3>"));
    assert!(html.contains("difficulty easy"));
}

#[test]
fn empty_journey_keeps_full_field() {
    let mut engine = SceneEngine::build_test(43).unwrap();
    engine.apply_load_result(parse_journey("[]")).unwrap();

    assert!(engine.state().stars.is_empty());
    assert_eq!(engine.state().field.len(), SceneConfig::default_test().field.count());
    assert_eq!(*engine.load_status(), LoadStatus::Ready { stars: 0 });
    assert_eq!(engine.click(400.0, 300.0), Some(SelectionChange::Deselected));
}

#[test]
fn load_failure_degrades_without_stars() {
    let mut engine = SceneEngine::build_test(44).unwrap();
    let loading = engine.load_status().indicator();

    engine
        .apply_load_result(Err(LoadError::Network("gave up after 3 attempt(s)".into())))
        .unwrap();
    assert!(engine.state().stars.is_empty());
    assert!(matches!(engine.load_status(), LoadStatus::Failed { .. }));

    let failed = engine.load_status().indicator();
    let empty = LoadStatus::Ready { stars: 0 }.indicator();
    assert_ne!(failed, empty);
    assert_ne!(failed, loading);
    assert_ne!(loading, empty);

    // Field and camera keep working.
    let events = engine.run_frames(5, 60.0);
    assert!(events.iter().any(|e| matches!(e, SceneEvent::JourneyLoadFailed { .. })));
    assert!(engine.state().field.rotation_y > 0.0);
}

#[test]
fn journey_attaches_only_once() {
    let mut engine = SceneEngine::build_test(45).unwrap();
    engine.apply_load_result(parse_journey(TWO_SUM)).unwrap();
    assert!(engine.apply_load_result(parse_journey(TWO_SUM)).is_err());
    assert_eq!(engine.state().stars.len(), 1);
}

#[test]
fn spiral_scene_places_stars_on_arms() {
    let config = SceneConfig::default_test_spiral();
    assert!(matches!(config.field, FieldConfig::Spiral(_)));
    let mut engine = SceneEngine::build(config, 46, starjourney_core::camera::Viewport::new(640.0, 480.0).unwrap()).unwrap();
    engine.apply_load_result(parse_journey(TWO_SUM)).unwrap();
    engine.run_frames(10, 60.0);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.field.policy, "spiral");
    assert_eq!(snapshot.field.points, 3_000);
    assert_eq!(snapshot.stars.len(), 1);
    assert_eq!(snapshot.selection, SelectionState::Idle);
}

#[test]
fn snapshot_serializes_for_render_host() {
    let mut engine = SceneEngine::build_test(47).unwrap();
    engine.apply_load_result(parse_journey(TWO_SUM)).unwrap();
    engine.run_frames(3, 60.0);
    engine.click_star(0).unwrap();

    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["frame"], 3);
    assert_eq!(json["load_status"]["status"], "ready");
    assert_eq!(json["stars"][0]["color"], "#4caf50");
    assert_eq!(json["selection"]["state"], "selected");
    assert_eq!(json["selection"]["star_id"], 0);
    assert_eq!(json["overlay"]["title"], "Day 1");
}
