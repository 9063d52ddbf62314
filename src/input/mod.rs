//! Input sources normalized to two signals: a flap edge and an optional
//! continuous value in [0,1].
//!
//! Each variant declares what it can produce through [`InputCapabilities`];
//! the session asks for capabilities instead of guessing from the variant.

pub mod keyboard;
pub mod sensor;
pub mod slider;

pub use keyboard::{KeyHandle, KeyboardInput};
pub use sensor::{RehabSensorInput, SerialLine, SignalLine};
pub use slider::{SliderHandle, SliderInput};

use crate::config::{InputMode, Settings};

/// Which signals a source can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputCapabilities {
    pub supports_value: bool,
    pub supports_flap: bool,
}

#[derive(Debug)]
pub enum InputSource {
    Keyboard(KeyboardInput),
    Slider(SliderInput),
    Rehab(RehabSensorInput),
}

impl InputSource {
    pub fn capabilities(&self) -> InputCapabilities {
        match self {
            Self::Keyboard(_) => InputCapabilities {
                supports_value: false,
                supports_flap: true,
            },
            // The slider never produces a flap; it reports false on request.
            Self::Slider(_) => InputCapabilities {
                supports_value: true,
                supports_flap: false,
            },
            Self::Rehab(_) => InputCapabilities {
                supports_value: true,
                supports_flap: true,
            },
        }
    }

    /// The mode this source was built for.
    pub fn mode(&self) -> InputMode {
        match self {
            Self::Keyboard(_) => InputMode::Keyboard,
            Self::Slider(_) => InputMode::Slider,
            Self::Rehab(_) => InputMode::Rehab,
        }
    }

    /// True exactly once per rising trigger. `now` is a monotonic clock in
    /// seconds, used by sources with a cooldown.
    pub fn flap_edge(&mut self, now: f64) -> bool {
        match self {
            Self::Keyboard(k) => k.flap_edge(),
            Self::Slider(_) => false,
            Self::Rehab(r) => r.flap_edge(now),
        }
    }

    /// Continuous value in [0,1], or `None` for sources without one.
    pub fn value01(&mut self) -> Option<f64> {
        let v = match self {
            Self::Keyboard(_) => return None,
            Self::Slider(s) => s.value01(),
            Self::Rehab(r) => r.value01(),
        };
        Some(if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 })
    }

    /// Refresh settings-derived state after a hot reload.
    pub fn apply_settings(&mut self, settings: &Settings) {
        if let Self::Rehab(r) = self {
            r.apply_settings(settings);
        }
    }

    /// Whether this source can keep serving `settings` or must be rebuilt.
    /// A rehab sensor stays open unless its port parameters changed.
    pub fn matches(&self, settings: &Settings, slider_available: bool) -> bool {
        match self {
            Self::Rehab(r) => settings.input_mode == InputMode::Rehab && r.uses_port_of(settings),
            Self::Slider(_) => settings.input_mode == InputMode::Slider,
            Self::Keyboard(_) => {
                settings.input_mode == InputMode::Keyboard
                    || (settings.input_mode == InputMode::Slider && !slider_available)
            }
        }
    }
}

/// Live handles owned by the shell that input sources read from.
#[derive(Debug, Clone, Default)]
pub struct InputDevices {
    pub key: KeyHandle,
    pub slider: Option<SliderHandle>,
}

/// Build the source for `settings.input_mode`. Slider mode without a slider
/// falls back to the keyboard.
pub fn make_input(settings: &Settings, devices: &InputDevices) -> InputSource {
    match (settings.input_mode, &devices.slider) {
        (InputMode::Rehab, _) => InputSource::Rehab(RehabSensorInput::open(settings)),
        (InputMode::Slider, Some(slider)) => InputSource::Slider(SliderInput::new(slider.clone())),
        (InputMode::Slider, None) => {
            log::info!("slider input requested without a slider; using keyboard");
            InputSource::Keyboard(KeyboardInput::new(devices.key.clone()))
        }
        (InputMode::Keyboard, _) => InputSource::Keyboard(KeyboardInput::new(devices.key.clone())),
    }
}
