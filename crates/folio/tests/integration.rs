//! End-to-end checks across the folio crates.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use approx::assert_relative_eq;
use folio::folio_motion::{Cradle, GrowthCircles, LayeredWave, Transition};
use folio::folio_theme::{props, ThemeTrigger};
use folio::folio_timeline::{CameraParams, LayoutParams, ScrollMode};
use folio::{
    Controller, Frame, GraphData, PaletteRequest, SimulationParams, ThemeHub, TimelineCamera,
    TimelineConfig, TimelineLayout, Visual,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn css(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const TIMELINE: &str = r#"{
    "startYear": 2015,
    "endYear": 2024,
    "periods": [
        {"id": "uni", "label": "University", "start": 2015, "end": 2019,
         "milestones": [{"year": 2017, "label": "Exchange"}]},
        {"id": "job", "label": "Industry", "start": 2019, "end": 2024}
    ],
    "majorMilestones": [{"year": 2019, "label": "First job"}]
}"#;

#[test]
fn test_dark_theme_boosts_muted_for_subscribers() {
    let light = css(&[
        (props::BACKGROUND, "#ffffff"),
        (props::MUTED, "rgb(90, 90, 90)"),
    ]);
    let mut hub = ThemeHub::from_source(&light);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    hub.subscribe(PaletteRequest::default().with_muted(0.3), move |p| {
        sink.borrow_mut().push((p.is_dark, p.muted.a));
    });

    let dark = css(&[
        (props::BACKGROUND, "#0b0b10"),
        (props::MUTED, "rgb(90, 90, 90)"),
    ]);
    // Several triggers before the next frame collapse into one publish.
    assert!(hub.notify(&ThemeTrigger::Attribute("data-theme".into())));
    assert!(hub.notify(&ThemeTrigger::ThemeChanged));
    assert!(hub.flush(&dark));
    assert!(!hub.flush(&dark));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(!seen[0].0);
    assert_relative_eq!(seen[0].1, 0.3);
    assert!(seen[1].0);
    assert_relative_eq!(seen[1].1, 0.7);
}

#[test]
fn test_irrelevant_triggers_do_not_repaint() {
    let theme = css(&[(props::BACKGROUND, "#ffffff")]);
    let mut hub = ThemeHub::from_source(&theme);
    let calls = Rc::new(RefCell::new(0));
    let sink = calls.clone();
    hub.subscribe(PaletteRequest::default(), move |_| *sink.borrow_mut() += 1);

    assert!(!hub.notify(&ThemeTrigger::Attribute("class".into())));
    assert!(!hub.notify(&ThemeTrigger::Storage(Some("cart".into()))));
    assert!(!hub.flush(&theme));
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_growth_label_swaps_at_thirty_percent() {
    let growth = GrowthCircles::default();
    let pose = growth.transition_pose(4, 5, 450.0);
    assert_eq!(pose.label, 5);
    assert_eq!(pose.label_opacity, 0.0);
}

#[test]
fn test_cradle_cycle_endpoints_rest() {
    let cradle = Cradle::default();
    assert_eq!(cradle.angles_at(0.0), [0.0; 4]);
    assert_eq!(cradle.angles_at(1.0), [0.0; 4]);
}

#[test]
fn test_controller_drives_wave_only_while_visible() {
    let mut c = Controller::new(LayeredWave::default());
    assert_eq!(c.frame(0.0), Frame::Idle);
    assert_eq!(c.observe(0.1), Transition::Unchanged);
    assert_eq!(c.observe(0.6), Transition::Entered);

    // Clock starts on the first visible frame; the first burst is 1s later.
    let first = c.frame(10_000.0).into_pose().unwrap();
    assert_eq!(first.envelope, 0.0);
    let burst = c.frame(11_200.0).into_pose().unwrap();
    assert!(burst.envelope != 0.0);

    assert_eq!(c.observe(0.0), Transition::Exited);
    assert_eq!(c.frame(11_216.0), Frame::Idle);
}

#[test]
fn test_reduced_motion_shows_rest_pose_once() {
    let mut c = Controller::new(Cradle::default()).with_reduced_motion(true);
    match c.frame(0.0) {
        Frame::Rest(pose) => assert_eq!(pose, Cradle::default().rest_pose()),
        other => panic!("expected rest pose, got {other:?}"),
    }
    assert_eq!(c.frame(16.0), Frame::Idle);
}

#[test]
fn test_timeline_layout_and_camera() {
    let config = TimelineConfig::from_json(TIMELINE).unwrap();
    let layout = TimelineLayout::new(config, LayoutParams::default());
    let p = layout.params().clone();

    assert_eq!(layout.year_to_x(layout.display_start()), 0.0);
    assert_relative_eq!(
        layout.year_to_x(2019.0),
        (2019.0 - layout.display_start()) * p.year_width + p.period_gap_px
    );
    assert_eq!(layout.period_spans().len(), 2);
    let marks = layout.milestone_marks();
    assert_eq!(marks.len(), 2);
    assert!(marks.iter().any(|m| m.major && m.label == "First job"));

    // Narrow viewport: a swipe scrolls directly, then autoplay resumes.
    let mut camera = TimelineCamera::from_layout(&layout, 360.0, CameraParams::default());
    assert!(camera.touch_start(200.0));
    camera.touch_move(100.0);
    assert_relative_eq!(camera.scroll(), 100.0);
    camera.touch_end(5_000.0);
    assert_eq!(camera.mode(), ScrollMode::Autoplay);
    assert_relative_eq!(camera.frame(5_000.0), 100.0, epsilon = 1e-9);
}

#[test]
fn test_graph_stays_in_bounds() {
    let params = SimulationParams::new(320.0, 240.0);
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sim = GraphData::portfolio().build(params.clone(), &mut rng).unwrap();
        for i in 0..240 {
            sim.tick(i as f64 / 60.0);
        }
        for node in sim.nodes() {
            assert!(sim.bounds().contains(node), "{} escaped", node.id);
        }
    }
}
