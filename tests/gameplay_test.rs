//! Integration test: gameplay through the public `Session` API
//!
//! Drives whole runs with seeded RNGs and checks scoring, spawning,
//! pruning, crash handling and the ceiling clamp.

use flappy_rehab::game::{PipeManager, Scene, Session, TickEvent};
use flappy_rehab::input::{InputDevices, KeyHandle, SliderHandle};
use flappy_rehab::{ControlMode, InputMode, Settings};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Flap-mode session driven by a keyboard handle.
fn keyboard_session(settings: Settings) -> (Session, KeyHandle) {
    let key = KeyHandle::new();
    let devices = InputDevices {
        key: key.clone(),
        slider: None,
    };
    let settings = Settings {
        control_mode: ControlMode::Flap,
        input_mode: InputMode::Keyboard,
        ..settings
    };
    (Session::new(settings, devices), key)
}

/// Settings where the bird hovers in place and no pipes spawn for a while.
fn hover_settings() -> Settings {
    Settings {
        gravity: 0.0,
        max_fall_speed: 0.0,
        pipe_spawn_every: 5.0,
        ..Settings::default()
    }
}

fn total_gained(events: &[TickEvent]) -> u32 {
    events
        .iter()
        .map(|e| match e {
            TickEvent::Scored { gained, .. } => *gained,
            TickEvent::Crashed { .. } => 0,
        })
        .sum()
}

// =============================================================================
// Scoring and pruning
// =============================================================================

#[test]
fn test_pair_scores_exactly_once_and_is_pruned() {
    let (mut session, _key) = keyboard_session(hover_settings());
    session.start();
    let center = session.bird().rect.center_y();
    let pair = PipeManager::make_pair(120.0, center, session.settings());
    session.pipes_mut().pipes.push(pair);

    let mut rng = test_rng();
    let mut events = Vec::new();
    for _ in 0..20 {
        events.extend(session.tick(0.1, &mut rng).events);
    }

    assert_eq!(session.scene(), Scene::Playing);
    assert_eq!(total_gained(&events), 1);
    assert_eq!(session.score(), 1);
    // Scrolled past the left edge by 2s at 160 px/s, and nothing new yet.
    assert!(session.pipes().pipes.is_empty());
}

#[test]
fn test_score_event_reports_running_total() {
    let (mut session, _key) = keyboard_session(hover_settings());
    session.start();
    let center = session.bird().rect.center_y();
    for x in [120.0, 200.0] {
        let pair = PipeManager::make_pair(x, center, session.settings());
        session.pipes_mut().pipes.push(pair);
    }

    let mut rng = test_rng();
    let mut totals = Vec::new();
    for _ in 0..20 {
        for event in session.tick(0.1, &mut rng).events {
            if let TickEvent::Scored { total, .. } = event {
                totals.push(total);
            }
        }
    }
    assert_eq!(totals, vec![1, 2]);
}

#[test]
fn test_pair_cleared_in_one_long_tick_still_scores() {
    let (mut session, _key) = keyboard_session(hover_settings());
    session.start();
    let center = session.bird().rect.center_y();
    // Right edge one pixel past the bird's left edge.
    let pair = PipeManager::make_pair(41.0, center, session.settings());
    session.pipes_mut().pipes.push(pair);

    let result = session.tick(1.0, &mut test_rng());
    assert_eq!(session.scene(), Scene::Playing);
    assert_eq!(session.score(), 1);
    assert_eq!(
        result.events,
        vec![TickEvent::Scored {
            gained: 1,
            total: 1
        }]
    );
    assert!(session.pipes().pipes.is_empty());
}

#[test]
fn test_stopped_or_reversed_stream_stays_bounded() {
    for speed in [0.0, 160.0] {
        let settings = Settings {
            pipe_speed: speed,
            pipe_spawn_every: 0.2,
            ..hover_settings()
        };
        let (mut session, _key) = keyboard_session(settings);
        session.start();
        let mut rng = test_rng();
        for _ in 0..6000 {
            session.tick(1.0 / 60.0, &mut rng);
        }
        assert_eq!(session.scene(), Scene::Playing);
        assert!(session.pipes().pipes.is_empty());
    }
}

// =============================================================================
// Spawning
// =============================================================================

#[test]
fn test_spawn_timer_carries_excess_time() {
    let settings = Settings::default();
    let mut pipes = PipeManager::new();
    let mut rng = test_rng();

    let spawned: Vec<usize> = (0..5)
        .map(|_| pipes.update(0.5, &settings, &mut rng))
        .collect();
    // Boundaries at 1.25 and 2.5 are crossed during the ticks ending at
    // 1.5 and 2.5.
    assert_eq!(spawned, vec![0, 0, 1, 0, 1]);

    // The first pair spawned 0.25 s late and has already moved for it.
    let first = &pipes.pipes[0];
    assert!((first.top.x - (360.0 - 160.0)).abs() < 1e-9);
    let second = &pipes.pipes[1];
    assert!((second.top.x - 400.0).abs() < 1e-9);
}

#[test]
fn test_long_tick_spawns_one_pair_per_interval() {
    let settings = Settings::default();
    let mut pipes = PipeManager::new();
    let mut rng = test_rng();

    let spawned = pipes.update(4.0, &settings, &mut rng);
    assert_eq!(spawned, 3);
    assert!((pipes.spawn_timer - 0.25).abs() < 1e-9);
    // Later spawns are further right.
    let xs: Vec<f64> = pipes.pipes.iter().map(|p| p.top.x).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_spawned_gaps_stay_in_range() {
    let settings = Settings::default();
    let mut pipes = PipeManager::new();
    let mut rng = test_rng();
    for _ in 0..200 {
        pipes.update(0.5, &settings, &mut rng);
    }
    for pair in &pipes.pipes {
        let center = (pair.top.bottom() + pair.bottom.top()) / 2.0;
        assert!((120.0..=410.0).contains(&center));
        assert!((pair.bottom.top() - pair.top.bottom() - settings.pipe_gap).abs() < 1e-9);
        assert!((pair.bottom.bottom() - 530.0).abs() < 1e-9);
    }
}

// =============================================================================
// Crash, freeze, restart
// =============================================================================

#[test]
fn test_falling_bird_crashes_into_ground() {
    let (mut session, _key) = keyboard_session(Settings::default());
    session.start();
    let mut rng = test_rng();

    let mut crash_score = None;
    for _ in 0..200 {
        let result = session.tick(0.05, &mut rng);
        if let Some(TickEvent::Crashed { score }) = result.events.last() {
            crash_score = Some(*score);
            break;
        }
    }
    assert_eq!(crash_score, Some(0));
    assert_eq!(session.scene(), Scene::Dead);

    let frozen = session.frame();
    for _ in 0..10 {
        assert!(session.tick(0.05, &mut rng).events.is_empty());
    }
    assert_eq!(session.frame(), frozen);
}

#[test]
fn test_restart_clears_run() {
    let (mut session, _key) = keyboard_session(Settings::default());
    session.start();
    let mut rng = test_rng();
    while session.scene() == Scene::Playing {
        session.tick(0.05, &mut rng);
    }

    session.restart();
    assert_eq!(session.scene(), Scene::Playing);
    assert_eq!(session.score(), 0);
    assert!(session.pipes().pipes.is_empty());
    assert_eq!(session.bird().vy, 0.0);
}

#[test]
fn test_held_key_flaps_once() {
    let (mut session, key) = keyboard_session(Settings::default());
    session.start();
    let mut rng = test_rng();

    key.press(Instant::now());
    session.tick(0.01, &mut rng);
    assert!(session.bird().vy < 0.0);

    // Still held: gravity wins and no new impulse is applied.
    let mut last_vy = session.bird().vy;
    for _ in 0..5 {
        session.tick(0.01, &mut rng);
        assert!(session.bird().vy > last_vy);
        last_vy = session.bird().vy;
    }
}

// =============================================================================
// Invariants under random frame times
// =============================================================================

#[test]
fn test_bird_never_leaves_ceiling_under_random_dt() {
    let (mut session, key) = keyboard_session(Settings::default());
    session.start();
    let mut rng = test_rng();

    for i in 0..2000 {
        if i % 2 == 0 {
            key.press(Instant::now());
        } else {
            key.release();
        }
        let dt = rng.gen_range(0.0..0.1);
        session.tick(dt, &mut rng);
        assert!(session.bird().rect.top() >= 0.0);
        if session.scene() == Scene::Dead {
            session.restart();
        }
    }
}

#[test]
fn test_position_mode_follows_slider() {
    let slider = SliderHandle::new(0.5);
    let devices = InputDevices {
        key: KeyHandle::new(),
        slider: Some(slider.clone()),
    };
    let settings = Settings {
        pipe_spawn_every: 5.0,
        ..Settings::default()
    };
    let mut session = Session::new(settings, devices);
    session.start();

    slider.set(0.8);
    let mut rng = test_rng();
    for _ in 0..120 {
        session.tick(1.0 / 60.0, &mut rng);
    }
    // 530 - 0.8 * 530
    assert!((session.bird().rect.center_y() - 106.0).abs() < 0.5);
    assert_eq!(session.bird().vy, 0.0);
}

#[test]
fn test_bad_dt_is_ignored() {
    let (mut session, _key) = keyboard_session(Settings::default());
    session.start();
    let before = session.frame();
    let mut rng = test_rng();
    session.tick(f64::NAN, &mut rng);
    session.tick(-1.0, &mut rng);
    session.tick(f64::INFINITY, &mut rng);
    assert_eq!(session.frame(), before);
}
