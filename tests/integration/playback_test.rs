//! Integration tests for playback through the public API

use vignette::catalog::{SceneCatalog, SceneDescriptor};
use vignette::player::{PlaybackPhase, Simulation};

fn catalog(durations: &[u64]) -> SceneCatalog {
    let scenes = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| SceneDescriptor::new(format!("scene-{i}"), format!("Scene {i}"), "", d))
        .collect();
    SceneCatalog::new(scenes).unwrap()
}

#[test]
fn builtin_story_plays_to_the_end() {
    let mut sim = Simulation::new(SceneCatalog::builtin(), 1000.0 / 60.0);
    assert!(sim.run_until_stopped(20_000.0));

    let view = sim.controller().view();
    assert!(!view.is_playing);
    assert_eq!(view.global_progress, 1.0);
    assert_eq!(view.active_scene.map(|s| s.id.as_str()), Some("club-interior"));
}

#[test]
fn progress_is_monotonic_and_bounded() {
    let mut sim = Simulation::new(catalog(&[700, 300, 1200]), 16.0);
    let mut last = 0.0;
    let mut samples = 0;
    sim.advance_to_with(2600.0, |_, controller| {
        let progress = controller.global_progress();
        assert!((0.0..=1.0).contains(&progress));
        assert!(progress >= last, "{progress} < {last}");
        last = progress;
        samples += 1;
    });
    assert!(samples > 100);
    assert_eq!(sim.controller().phase(), PlaybackPhase::Stopped);
}

#[test]
fn scenes_are_visited_in_order() {
    let mut sim = Simulation::new(catalog(&[200, 200, 200, 200]), 50.0);
    let mut visited = vec![0];
    sim.advance_to_with(1000.0, |_, controller| {
        if let PlaybackPhase::Playing(i) = controller.phase() {
            if visited.last() != Some(&i) {
                visited.push(i);
            }
        }
    });
    assert_eq!(visited, vec![0, 1, 2, 3]);
}

#[test]
fn replay_mid_story_restarts() {
    let mut sim = Simulation::new(SceneCatalog::builtin(), 20.0);
    sim.advance_to(8000.0);
    assert_eq!(sim.controller().phase(), PlaybackPhase::Playing(2));

    sim.replay();
    let state = sim.controller().state();
    assert_eq!(state.current_index, 0);
    assert_eq!(state.elapsed_global_ms, 0.0);
    assert!(state.is_playing);

    // The old session's timers must not advance the new one early
    sim.advance_to(8000.0 + 3400.0);
    assert_eq!(sim.controller().phase(), PlaybackPhase::Playing(0));
    sim.advance_to(8000.0 + 3500.0);
    assert_eq!(sim.controller().phase(), PlaybackPhase::Playing(1));
}

#[test]
fn replay_after_stop_plays_again() {
    let mut sim = Simulation::new(catalog(&[100]), 10.0);
    assert!(sim.run_until_stopped(1000.0));
    sim.replay();
    assert_eq!(sim.controller().phase(), PlaybackPhase::Playing(0));
    assert!(sim.run_until_stopped(2000.0));
}

#[test]
fn unmount_leaves_nothing_scheduled() {
    let mut sim = Simulation::new(SceneCatalog::builtin(), 16.0);
    sim.advance_to(5000.0);
    sim.unmount();
    assert!(sim.is_idle());
}
