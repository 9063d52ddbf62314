//! Ground strip along the bottom of the field.

use super::geometry::Rect;
use crate::config::Settings;
use crate::core::constants::{FIELD_HEIGHT, FIELD_WIDTH, GROUND_SCROLL_FACTOR, GROUND_TILE_WIDTH};

#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    pub rect: Rect,
    /// Cosmetic tile offset in [0, GROUND_TILE_WIDTH).
    pub scroll: f64,
}

impl Ground {
    pub fn new(settings: &Settings) -> Self {
        Self {
            rect: Self::bounds(settings),
            scroll: 0.0,
        }
    }

    fn bounds(settings: &Settings) -> Rect {
        let height = settings.ground_height.clamp(0.0, FIELD_HEIGHT);
        Rect::new(0.0, FIELD_HEIGHT - height, FIELD_WIDTH, height)
    }

    /// Advance the tile offset and pick up the current ground height.
    pub fn update(&mut self, dt: f64, settings: &Settings) {
        self.scroll = (self.scroll - settings.pipe_speed * dt * GROUND_SCROLL_FACTOR)
            .rem_euclid(GROUND_TILE_WIDTH);
        self.rect = Self::bounds(settings);
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        rect.intersects(&self.rect)
    }
}
