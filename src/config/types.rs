//! Runtime settings bundle and its documented ranges.

use serde::{Deserialize, Serialize};

/// How the bird is steered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Bird center follows a continuous target.
    Position,
    /// Gravity plus discrete flap impulses.
    Flap,
}

impl ControlMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Position => Self::Flap,
            Self::Flap => Self::Position,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Flap => "flap",
        }
    }
}

/// Which device produces the control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Slider,
    Keyboard,
    #[serde(alias = "rehab-sensor")]
    Rehab,
}

impl InputMode {
    pub const ALL: [InputMode; 3] = [InputMode::Slider, InputMode::Keyboard, InputMode::Rehab];

    pub fn next(self) -> Self {
        match self {
            Self::Slider => Self::Keyboard,
            Self::Keyboard => Self::Rehab,
            Self::Rehab => Self::Slider,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Slider => "slider",
            Self::Keyboard => "keyboard",
            Self::Rehab => "rehab",
        }
    }
}

/// Informational difficulty tier, written by presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

/// Tunable parameters. Missing JSON fields take their defaults and unknown
/// fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Control & input
    pub control_mode: ControlMode,
    pub input_mode: InputMode,
    /// Flip the 0..1 mapping before it reaches the bird.
    pub invert_input: bool,

    // Rehab serial sensor
    pub rehab_serial_port: String,
    pub rehab_baud: u32,
    pub rehab_flap_threshold: f64,
    pub rehab_cooldown: f64,

    // Gameplay tuning (pixels and seconds)
    pub gravity: f64,
    pub flap_impulse: f64,
    pub max_fall_speed: f64,
    pub ground_height: f64,
    pub pipe_gap: f64,
    pub pipe_width: f64,
    pub pipe_spawn_every: f64,
    /// Negative moves pipes leftwards.
    pub pipe_speed: f64,

    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_mode: ControlMode::Position,
            input_mode: InputMode::Slider,
            invert_input: false,

            rehab_serial_port: "COM3".to_string(),
            rehab_baud: 115_200,
            rehab_flap_threshold: 0.65,
            rehab_cooldown: 0.18,

            gravity: 1200.0,
            flap_impulse: -320.0,
            max_fall_speed: 700.0,
            ground_height: 70.0,
            pipe_gap: 160.0,
            pipe_width: 60.0,
            pipe_spawn_every: 1.25,
            pipe_speed: -160.0,

            difficulty: Difficulty::Normal,
        }
    }
}

/// Numeric tunables exposed on the advanced screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tunable {
    Gravity,
    FlapImpulse,
    MaxFallSpeed,
    GroundHeight,
    PipeGap,
    PipeWidth,
    PipeSpawnEvery,
    PipeSpeed,
    RehabFlapThreshold,
    RehabCooldown,
}

/// Inclusive range plus the step used by the advanced screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunableRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Tunable {
    pub const ALL: [Tunable; 10] = [
        Tunable::Gravity,
        Tunable::FlapImpulse,
        Tunable::MaxFallSpeed,
        Tunable::GroundHeight,
        Tunable::PipeGap,
        Tunable::PipeWidth,
        Tunable::PipeSpawnEvery,
        Tunable::PipeSpeed,
        Tunable::RehabFlapThreshold,
        Tunable::RehabCooldown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Gravity => "gravity",
            Self::FlapImpulse => "flap_impulse",
            Self::MaxFallSpeed => "max_fall_speed",
            Self::GroundHeight => "ground_height",
            Self::PipeGap => "pipe_gap",
            Self::PipeWidth => "pipe_width",
            Self::PipeSpawnEvery => "pipe_spawn_every",
            Self::PipeSpeed => "pipe_speed",
            Self::RehabFlapThreshold => "rehab_flap_threshold",
            Self::RehabCooldown => "rehab_cooldown",
        }
    }

    pub fn range(self) -> TunableRange {
        let (min, max, step) = match self {
            Self::Gravity => (0.0, 4000.0, 50.0),
            Self::FlapImpulse => (-1200.0, 0.0, 10.0),
            Self::MaxFallSpeed => (0.0, 2000.0, 25.0),
            Self::GroundHeight => (0.0, 300.0, 5.0),
            Self::PipeGap => (40.0, 400.0, 5.0),
            Self::PipeWidth => (10.0, 200.0, 5.0),
            Self::PipeSpawnEvery => (0.2, 5.0, 0.05),
            Self::PipeSpeed => (-600.0, 600.0, 10.0),
            Self::RehabFlapThreshold => (0.0, 1.0, 0.01),
            Self::RehabCooldown => (0.0, 5.0, 0.01),
        };
        TunableRange { min, max, step }
    }

    pub fn get(self, s: &Settings) -> f64 {
        match self {
            Self::Gravity => s.gravity,
            Self::FlapImpulse => s.flap_impulse,
            Self::MaxFallSpeed => s.max_fall_speed,
            Self::GroundHeight => s.ground_height,
            Self::PipeGap => s.pipe_gap,
            Self::PipeWidth => s.pipe_width,
            Self::PipeSpawnEvery => s.pipe_spawn_every,
            Self::PipeSpeed => s.pipe_speed,
            Self::RehabFlapThreshold => s.rehab_flap_threshold,
            Self::RehabCooldown => s.rehab_cooldown,
        }
    }

    fn slot(self, s: &mut Settings) -> &mut f64 {
        match self {
            Self::Gravity => &mut s.gravity,
            Self::FlapImpulse => &mut s.flap_impulse,
            Self::MaxFallSpeed => &mut s.max_fall_speed,
            Self::GroundHeight => &mut s.ground_height,
            Self::PipeGap => &mut s.pipe_gap,
            Self::PipeWidth => &mut s.pipe_width,
            Self::PipeSpawnEvery => &mut s.pipe_spawn_every,
            Self::PipeSpeed => &mut s.pipe_speed,
            Self::RehabFlapThreshold => &mut s.rehab_flap_threshold,
            Self::RehabCooldown => &mut s.rehab_cooldown,
        }
    }

    /// Set the value, clamped to the documented range. Non-finite input
    /// falls back to the default.
    pub fn set(self, s: &mut Settings, value: f64) {
        let range = self.range();
        let value = if value.is_finite() {
            value
        } else {
            self.get(&Settings::default())
        };
        *self.slot(s) = value.clamp(range.min, range.max);
    }

    /// Move the value by `steps` increments of the range step.
    pub fn nudge(self, s: &mut Settings, steps: i32) {
        let current = self.get(s);
        let next = current + self.range().step * steps as f64;
        // Keep display values tidy after repeated float steps.
        let next = (next / self.range().step).round() * self.range().step;
        self.set(s, next);
    }
}

impl Settings {
    /// A copy with every numeric field forced into its documented range.
    pub fn sanitized(&self) -> Settings {
        let mut out = self.clone();
        for tunable in Tunable::ALL {
            tunable.set(&mut out, tunable.get(self));
        }
        if out.rehab_baud == 0 {
            out.rehab_baud = Settings::default().rehab_baud;
        }
        out
    }
}
