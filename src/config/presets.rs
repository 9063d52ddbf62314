//! Persona presets: named overrides for gap, speed and spawn interval.

use super::types::{Difficulty, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Slower pipes, bigger gaps.
    OldLady,
    StrokeMan,
    YoungGirlHard,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::OldLady, Preset::StrokeMan, Preset::YoungGirlHard];

    /// Key used in files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::OldLady => "old_lady",
            Self::StrokeMan => "stroke_man",
            Self::YoungGirlHard => "young_girl_hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OldLady => "Easy (Old Lady)",
            Self::StrokeMan => "Normal (Stroke Man)",
            Self::YoungGirlHard => "Hard (Young Girl)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn difficulty(self) -> Difficulty {
        match self {
            Self::OldLady => Difficulty::Easy,
            Self::StrokeMan => Difficulty::Normal,
            Self::YoungGirlHard => Difficulty::Hard,
        }
    }

    pub fn pipe_gap(self) -> f64 {
        match self {
            Self::OldLady => 210.0,
            Self::StrokeMan => 170.0,
            Self::YoungGirlHard => 130.0,
        }
    }

    /// Pixels per second; less negative is slower.
    pub fn pipe_speed(self) -> f64 {
        match self {
            Self::OldLady => -140.0,
            Self::StrokeMan => -170.0,
            Self::YoungGirlHard => -200.0,
        }
    }

    pub fn pipe_spawn_every(self) -> f64 {
        match self {
            Self::OldLady => 1.60,
            Self::StrokeMan => 1.30,
            Self::YoungGirlHard => 1.00,
        }
    }

    /// Overwrite the preset's fields in place. Everything else is left alone.
    pub fn apply(self, settings: &mut Settings) {
        settings.difficulty = self.difficulty();
        settings.pipe_gap = self.pipe_gap();
        settings.pipe_speed = self.pipe_speed();
        settings.pipe_spawn_every = self.pipe_spawn_every();
    }
}

/// Apply a preset by key. Unknown keys leave the settings untouched and
/// return false.
pub fn apply_preset(settings: &mut Settings, key: &str) -> bool {
    match Preset::from_key(key) {
        Some(preset) => {
            preset.apply(settings);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{ControlMode, InputMode};

    #[test]
    fn test_apply_sets_declared_values() {
        for preset in Preset::ALL {
            let mut s = Settings::default();
            preset.apply(&mut s);
            assert!((s.pipe_gap - preset.pipe_gap()).abs() < f64::EPSILON);
            assert!((s.pipe_speed - preset.pipe_speed()).abs() < f64::EPSILON);
            assert!((s.pipe_spawn_every - preset.pipe_spawn_every()).abs() < f64::EPSILON);
            assert_eq!(s.difficulty, preset.difficulty());
        }
    }

    #[test]
    fn test_apply_leaves_other_fields() {
        let mut s = Settings {
            control_mode: ControlMode::Flap,
            input_mode: InputMode::Rehab,
            gravity: 900.0,
            ..Settings::default()
        };
        Preset::YoungGirlHard.apply(&mut s);
        assert_eq!(s.control_mode, ControlMode::Flap);
        assert_eq!(s.input_mode, InputMode::Rehab);
        assert!((s.gravity - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut s = Settings::default();
        assert!(!apply_preset(&mut s, "nightmare"));
        assert_eq!(s, Settings::default());
        assert!(apply_preset(&mut s, "old_lady"));
        assert!((s.pipe_gap - 210.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(Preset::OldLady.next(), Preset::StrokeMan);
        assert_eq!(Preset::StrokeMan.next(), Preset::YoungGirlHard);
        assert_eq!(Preset::YoungGirlHard.next(), Preset::OldLady);
    }

    #[test]
    fn test_presets_fit_tuning_ranges() {
        for preset in Preset::ALL {
            let mut s = Settings::default();
            preset.apply(&mut s);
            assert_eq!(s.sanitized(), s, "{} out of range", preset.key());
        }
    }
}
