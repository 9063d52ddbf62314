//! The bird: flap physics or smoothed position following.

use super::geometry::Rect;
use crate::config::Settings;
use crate::core::constants::{
    BIRD_HEIGHT, BIRD_START_X, BIRD_START_Y, BIRD_WIDTH, FIELD_HEIGHT, FOLLOW_RATE,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub rect: Rect,
    /// Vertical velocity in px/s (positive = downward).
    pub vy: f64,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    pub fn new() -> Self {
        Self {
            rect: Rect::new(BIRD_START_X, BIRD_START_Y, BIRD_WIDTH, BIRD_HEIGHT),
            vy: 0.0,
        }
    }

    /// Gravity step. A flap replaces the velocity with the impulse.
    pub fn update_flap(&mut self, dt: f64, flap: bool, settings: &Settings) {
        if flap {
            self.vy = settings.flap_impulse;
        }
        self.vy = (self.vy + settings.gravity * dt).min(settings.max_fall_speed);
        self.rect.y += self.vy * dt;
        self.clamp_to_ceiling();
    }

    /// Move the center toward `target_y` with exponential smoothing.
    pub fn update_position(&mut self, dt: f64, target_y: f64) {
        let cy = self.rect.center_y();
        let cy = cy + (target_y - cy) * (dt * FOLLOW_RATE).min(1.0);
        self.rect.set_center_y(cy);
        self.vy = 0.0;
        self.clamp_to_ceiling();
    }

    /// Snap the center onto `target_y` and stop.
    pub fn snap_to(&mut self, target_y: f64) {
        self.rect.set_center_y(target_y);
        self.vy = 0.0;
        self.clamp_to_ceiling();
    }

    fn clamp_to_ceiling(&mut self) {
        if self.rect.top() < 0.0 {
            self.rect.y = 0.0;
            self.vy = 0.0;
        }
    }
}

/// Lowest y the bird can be steered to: the ground's top edge.
pub fn playable_bottom(settings: &Settings) -> f64 {
    (FIELD_HEIGHT - settings.ground_height).max(0.0)
}

/// Map a normalized input (1 = top) to a target center y.
pub fn target_from_value(value: f64, settings: &Settings) -> f64 {
    let v = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let v = if settings.invert_input { 1.0 - v } else { v };
    let top = 0.0;
    let bottom = playable_bottom(settings);
    bottom - v * (bottom - top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_pulls_down() {
        let settings = Settings::default();
        let mut bird = Bird::new();
        let y0 = bird.rect.y;
        bird.update_flap(1.0 / 60.0, false, &settings);
        assert!(bird.rect.y > y0);
        assert!(bird.vy > 0.0);
    }

    #[test]
    fn test_flap_sets_impulse() {
        let settings = Settings::default();
        let mut bird = Bird::new();
        bird.vy = 500.0;
        bird.update_flap(0.0, true, &settings);
        assert!((bird.vy - settings.flap_impulse).abs() < f64::EPSILON);
    }

    #[test]
    fn test_velocity_capped() {
        let settings = Settings::default();
        let mut bird = Bird::new();
        bird.vy = 10_000.0;
        bird.update_flap(0.01, false, &settings);
        assert!(bird.vy <= settings.max_fall_speed);
    }

    #[test]
    fn test_ceiling_clamp_zeroes_velocity() {
        let settings = Settings::default();
        let mut bird = Bird::new();
        bird.rect.y = 2.0;
        bird.update_flap(0.1, true, &settings);
        assert!(bird.rect.top() >= 0.0);
        assert!(bird.vy.abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_follow_converges() {
        let mut bird = Bird::new();
        for _ in 0..120 {
            bird.update_position(1.0 / 60.0, 400.0);
        }
        assert!((bird.rect.center_y() - 400.0).abs() < 0.5);
        assert!(bird.vy.abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_large_dt_lands_on_target() {
        let mut bird = Bird::new();
        bird.update_position(5.0, 300.0);
        assert!((bird.rect.center_y() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_target_at_top_is_clamped() {
        let mut bird = Bird::new();
        bird.update_position(1.0, 0.0);
        assert!(bird.rect.top().abs() < f64::EPSILON);
    }

    #[test]
    fn test_target_mapping() {
        let settings = Settings::default();
        assert!((target_from_value(0.0, &settings) - 530.0).abs() < f64::EPSILON);
        assert!(target_from_value(1.0, &settings).abs() < f64::EPSILON);
        assert!((target_from_value(0.5, &settings) - 265.0).abs() < f64::EPSILON);
        // Out-of-range values are clamped first.
        assert!(target_from_value(7.0, &settings).abs() < f64::EPSILON);
    }

    #[test]
    fn test_target_mapping_inverted() {
        let settings = Settings {
            invert_input: true,
            ..Settings::default()
        };
        assert!(target_from_value(0.0, &settings).abs() < f64::EPSILON);
        assert!((target_from_value(1.0, &settings) - 530.0).abs() < f64::EPSILON);
    }
}
