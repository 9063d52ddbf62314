//! Scene state machine and the per-tick simulation order.
//!
//! `Session::tick` is the only place gameplay state changes. It returns a
//! [`TickResult`] describing what happened so the shell can log or react
//! without the simulation depending on any UI types.

use super::bird::{target_from_value, Bird};
use super::geometry::Rect;
use super::ground::Ground;
use super::pipes::PipeManager;
use crate::config::{ControlMode, Settings};
use crate::input::{make_input, InputCapabilities, InputDevices, InputSource};
use rand::Rng;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Menu,
    Settings,
    AdvancedSettings,
    Playing,
    /// Crashed; frozen until restart or return to menu.
    Dead,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// One or more pipes were cleared this tick.
    Scored { gained: u32, total: u32 },
    /// The bird hit a pipe or the ground.
    Crashed { score: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn crashed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::Crashed { .. }))
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub scene: Scene,
    pub bird: Rect,
    pub bird_vy: f64,
    /// (top, bottom) segment of each live pair.
    pub pipes: Vec<(Rect, Rect)>,
    pub ground: Rect,
    pub ground_scroll: f64,
    pub score: u32,
}

pub struct Session {
    settings: Settings,
    scene: Scene,
    bird: Bird,
    ground: Ground,
    pipes: PipeManager,
    score: u32,
    devices: InputDevices,
    /// Kept across scene changes so an open serial port stays open.
    input: Option<InputSource>,
    /// Wall-clock origin for cooldown-based sources; independent of `dt`.
    epoch: Instant,
}

impl Session {
    pub fn new(settings: Settings, devices: InputDevices) -> Self {
        let settings = settings.sanitized();
        Self {
            bird: Bird::new(),
            ground: Ground::new(&settings),
            pipes: PipeManager::new(),
            score: 0,
            scene: Scene::Menu,
            settings,
            devices,
            input: None,
            epoch: Instant::now(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn pipes(&self) -> &PipeManager {
        &self.pipes
    }

    /// Test and tooling hook for placing pipes directly.
    pub fn pipes_mut(&mut self) -> &mut PipeManager {
        &mut self.pipes
    }

    /// Install a prebuilt source. It is kept while it matches the settings.
    pub fn set_input(&mut self, input: InputSource) {
        self.input = Some(input);
    }

    pub fn bird_mut(&mut self) -> &mut Bird {
        &mut self.bird
    }

    pub fn input(&self) -> Option<&InputSource> {
        self.input.as_ref()
    }

    pub fn input_capabilities(&self) -> Option<InputCapabilities> {
        self.input.as_ref().map(InputSource::capabilities)
    }

    /// Enter play from the menu (or anywhere) with a fresh run.
    pub fn start(&mut self) {
        self.scene = Scene::Playing;
        self.ensure_input();
        self.reset();
        log::info!(
            "run started: control={} input={}",
            self.settings.control_mode.name(),
            self.input
                .as_ref()
                .map_or("none", |i| i.mode().name())
        );
    }

    /// Start over after a crash.
    pub fn restart(&mut self) {
        self.start();
    }

    /// Recreate bird, ground and pipes with zero score. In play with position
    /// control, the bird starts on the current input target.
    pub fn reset(&mut self) {
        self.bird = Bird::new();
        self.ground = Ground::new(&self.settings);
        self.pipes = PipeManager::new();
        self.score = 0;

        if self.scene == Scene::Playing && self.settings.control_mode == ControlMode::Position {
            if let Some(v) = self.input.as_mut().and_then(InputSource::value01) {
                let target = target_from_value(v, &self.settings);
                self.bird.snap_to(target);
            }
        }
    }

    /// Abandon the run. Nothing to release; the input source stays alive.
    pub fn return_to_menu(&mut self) {
        self.scene = Scene::Menu;
        self.reset();
    }

    pub fn open_settings(&mut self) {
        if matches!(self.scene, Scene::Playing | Scene::Dead) {
            self.reset();
        }
        self.scene = Scene::Settings;
    }

    pub fn open_advanced(&mut self) {
        self.scene = Scene::AdvancedSettings;
    }

    pub fn close_advanced(&mut self) {
        self.scene = Scene::Settings;
    }

    /// Swap in new settings between ticks. Live pipes keep their shape; only
    /// future spawns and movement see the new values.
    pub fn apply_config(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
        let slider_available = self.devices.slider.is_some();
        let keep = self
            .input
            .as_ref()
            .is_some_and(|i| i.matches(&self.settings, slider_available));
        if keep {
            if let Some(input) = self.input.as_mut() {
                input.apply_settings(&self.settings);
            }
        } else if self.input.take().is_some() {
            log::info!("input source dropped after settings change");
            if self.scene == Scene::Playing {
                self.ensure_input();
            }
        }
    }

    fn ensure_input(&mut self) {
        let slider_available = self.devices.slider.is_some();
        let stale = self
            .input
            .as_ref()
            .map_or(true, |i| !i.matches(&self.settings, slider_available));
        if stale {
            self.input = Some(make_input(&self.settings, &self.devices));
        }
    }

    /// Advance the simulation by `dt` seconds. Only `Playing` changes state.
    pub fn tick<R: Rng>(&mut self, dt: f64, rng: &mut R) -> TickResult {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let mut result = TickResult::default();
        if self.scene != Scene::Playing {
            return result;
        }
        self.ensure_input();

        // 1-2. Control signal, then bird.
        let position_value = match (self.settings.control_mode, self.input.as_mut()) {
            (ControlMode::Position, Some(input)) if input.capabilities().supports_value => {
                input.value01()
            }
            _ => None,
        };
        match position_value {
            Some(v) => {
                let target = target_from_value(v, &self.settings);
                self.bird.update_position(dt, target);
            }
            None => {
                let now = self.epoch.elapsed().as_secs_f64();
                let flap = self.input.as_mut().is_some_and(|i| i.flap_edge(now));
                self.bird.update_flap(dt, flap, &self.settings);
            }
        }

        // 3. World. Pruning waits until passage is credited.
        self.pipes.advance(dt, &self.settings, rng);
        self.ground.update(dt, &self.settings);

        // 4. Score.
        let gained = self.pipes.count_passed(&self.bird.rect);
        if gained > 0 {
            self.score += gained;
            result.events.push(TickEvent::Scored {
                gained,
                total: self.score,
            });
        }

        // 5. Collision.
        if self.pipes.collides(&self.bird.rect) || self.ground.collides(&self.bird.rect) {
            self.scene = Scene::Dead;
            log::info!("crashed with score {}", self.score);
            result.events.push(TickEvent::Crashed { score: self.score });
        }

        self.pipes.prune(&self.settings);
        result
    }

    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            scene: self.scene,
            bird: self.bird.rect,
            bird_vy: self.bird.vy,
            pipes: self
                .pipes
                .pipes
                .iter()
                .map(|p| (p.top, p.bottom))
                .collect(),
            ground: self.ground.rect,
            ground_scroll: self.ground.scroll,
            score: self.score,
        }
    }
}
