//! Pipe stream: timed spawning, scrolling, pruning, scoring and collision.

use super::bird::playable_bottom;
use super::geometry::Rect;
use crate::config::Settings;
use crate::core::constants::{FIELD_WIDTH, GAP_CENTER_MARGIN, PIPE_PRUNE_MARGIN};
use rand::Rng;

/// A top and bottom segment forming one gap.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    pub top: Rect,
    pub bottom: Rect,
    /// Set once the bird has cleared this pair; never scored twice.
    pub passed: bool,
}

impl PipePair {
    pub fn right(&self) -> f64 {
        self.top.right()
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        rect.intersects(&self.top) || rect.intersects(&self.bottom)
    }
}

/// Where a new gap goes and how tall it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapBounds {
    pub min_center: f64,
    pub max_center: f64,
    pub gap: f64,
}

/// Valid gap-center range for the current settings.
///
/// The nominal range keeps the center `GAP_CENTER_MARGIN` away from the
/// ceiling and the ground. It is narrowed so both segments keep non-negative
/// height; if nothing is left, the range collapses to the middle of the
/// playable area and the gap shrinks to fit.
pub fn gap_bounds(settings: &Settings) -> GapBounds {
    let bottom = playable_bottom(settings);
    let gap = settings.pipe_gap.max(0.0).min(bottom);
    let half = gap / 2.0;

    let min_center = GAP_CENTER_MARGIN.max(half);
    let max_center = (bottom - GAP_CENTER_MARGIN).min(bottom - half);
    if min_center <= max_center {
        GapBounds {
            min_center,
            max_center,
            gap,
        }
    } else {
        let mid = bottom / 2.0;
        GapBounds {
            min_center: mid,
            max_center: mid,
            gap,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipeManager {
    /// Seconds accumulated toward the next spawn; excess carries over.
    pub spawn_timer: f64,
    pub pipes: Vec<PipePair>,
}

impl PipeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pair at `x` with its gap centered on `gap_center`.
    pub fn make_pair(x: f64, gap_center: f64, settings: &Settings) -> PipePair {
        let bottom = playable_bottom(settings);
        let bounds = gap_bounds(settings);
        let half = bounds.gap / 2.0;
        let width = settings.pipe_width.max(1.0);
        let gap_top = (gap_center - half).clamp(0.0, bottom);
        let gap_bottom = (gap_center + half).clamp(gap_top, bottom);
        PipePair {
            top: Rect::new(x, 0.0, width, gap_top),
            bottom: Rect::new(x, gap_bottom, width, bottom - gap_bottom),
            passed: false,
        }
    }

    /// Spawn one pair at `x` with a random gap position.
    pub fn spawn<R: Rng>(&mut self, x: f64, settings: &Settings, rng: &mut R) {
        let bounds = gap_bounds(settings);
        let center = if bounds.max_center > bounds.min_center {
            rng.gen_range(bounds.min_center..=bounds.max_center)
        } else {
            bounds.min_center
        };
        self.pipes.push(Self::make_pair(x, center, settings));
    }

    /// Scroll, spawn and prune for one tick. Returns how many pairs spawned.
    pub fn update<R: Rng>(&mut self, dt: f64, settings: &Settings, rng: &mut R) -> usize {
        let spawned = self.advance(dt, settings, rng);
        self.prune(settings);
        spawned
    }

    /// Scroll and spawn without pruning, so passage can be credited before
    /// pairs leave the list.
    pub fn advance<R: Rng>(&mut self, dt: f64, settings: &Settings, rng: &mut R) -> usize {
        let dx = settings.pipe_speed * dt;
        for pipe in &mut self.pipes {
            pipe.top.x += dx;
            pipe.bottom.x += dx;
        }

        // One spawn per interval boundary crossed. A pair spawned `carry`
        // seconds ago has already travelled that far.
        let every = settings.pipe_spawn_every.max(f64::EPSILON);
        self.spawn_timer += dt;
        let mut spawned = 0;
        while self.spawn_timer >= every {
            self.spawn_timer -= every;
            let x = FIELD_WIDTH + settings.pipe_speed * self.spawn_timer;
            self.spawn(x, settings, rng);
            spawned += 1;
        }

        spawned
    }

    /// Drop pairs that left the field and can never come back: past the left
    /// edge, or at or beyond the right edge while pipes stand still or move
    /// right.
    pub fn prune(&mut self, settings: &Settings) {
        let drifting_right = settings.pipe_speed >= 0.0;
        self.pipes.retain(|p| {
            p.right() > -PIPE_PRUNE_MARGIN && !(drifting_right && p.top.left() >= FIELD_WIDTH)
        });
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        self.pipes.iter().any(|p| p.collides(rect))
    }

    /// Mark every pair whose right edge is left of the bird and return how
    /// many were newly passed.
    pub fn count_passed(&mut self, rect: &Rect) -> u32 {
        let mut gained = 0;
        for pipe in &mut self.pipes {
            if !pipe.passed && pipe.right() < rect.left() {
                pipe.passed = true;
                gained += 1;
            }
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_spawn_carry_over() {
        let settings = Settings::default();
        let mut pm = PipeManager::new();
        let mut rng = rng();
        let spawned: Vec<usize> = (0..6).map(|_| pm.update(0.5, &settings, &mut rng)).collect();
        // Accumulator: 0.5, 1.0, 1.5→0.25, 0.75, 1.25→0, 0.5
        assert_eq!(spawned, vec![0, 0, 1, 0, 1, 0]);
        assert!((pm.spawn_timer - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_spawned_pipe_offset_by_carry() {
        let settings = Settings::default();
        let mut pm = PipeManager::new();
        let mut rng = rng();
        for _ in 0..3 {
            pm.update(0.5, &settings, &mut rng);
        }
        assert_eq!(pm.pipes.len(), 1);
        // Spawned 0.25s ago at -160 px/s.
        assert!((pm.pipes[0].top.x - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_dt_spawns_several_spaced_pairs() {
        let settings = Settings::default();
        let mut pm = PipeManager::new();
        let spawned = pm.update(2.6, &settings, &mut rng());
        assert_eq!(spawned, 2);
        let spacing = pm.pipes[1].top.x - pm.pipes[0].top.x;
        assert!((spacing - 1.25 * 160.0).abs() < 1e-6);
    }

    #[test]
    fn test_still_or_rightward_pipes_do_not_pile_up() {
        for speed in [0.0, 160.0] {
            let settings = Settings {
                pipe_speed: speed,
                ..Settings::default()
            };
            let mut pm = PipeManager::new();
            let mut rng = rng();
            for _ in 0..36_000 {
                pm.update(1.0 / 60.0, &settings, &mut rng);
            }
            assert!(pm.pipes.is_empty(), "speed {speed}: {} live", pm.pipes.len());
        }
    }

    #[test]
    fn test_visible_pipes_survive_a_stop() {
        let settings = Settings {
            pipe_speed: 0.0,
            ..Settings::default()
        };
        let mut pm = PipeManager::new();
        pm.pipes.push(PipeManager::make_pair(200.0, 265.0, &settings));
        pm.prune(&settings);
        assert_eq!(pm.pipes.len(), 1);
    }

    #[test]
    fn test_advance_keeps_offscreen_pairs_until_pruned() {
        let settings = Settings::default();
        let mut pm = PipeManager::new();
        pm.pipes.push(PipeManager::make_pair(40.0, 265.0, &settings));
        pm.advance(1.0, &settings, &mut rng());
        assert!(pm.pipes[0].right() <= -PIPE_PRUNE_MARGIN);
        pm.prune(&settings);
        assert!(pm.pipes.is_empty());
    }

    #[test]
    fn test_segments_frame_the_gap() {
        let settings = Settings::default();
        let mut pm = PipeManager::new();
        let mut rng = rng();
        for _ in 0..50 {
            pm.spawn(FIELD_WIDTH, &settings, &mut rng);
        }
        let bottom = playable_bottom(&settings);
        for p in &pm.pipes {
            assert!((p.top.bottom() + settings.pipe_gap - p.bottom.top()).abs() < 1e-9);
            assert!(p.top.height >= 0.0 && p.bottom.height >= 0.0);
            assert!((p.bottom.bottom() - bottom).abs() < 1e-9);
            let center = p.top.bottom() + settings.pipe_gap / 2.0;
            assert!((120.0..=bottom - 120.0).contains(&center));
        }
    }

    #[test]
    fn test_degenerate_range_collapses_to_middle() {
        let settings = Settings {
            ground_height: 300.0,
            pipe_gap: 400.0,
            ..Settings::default()
        };
        let bounds = gap_bounds(&settings);
        assert!((bounds.min_center - 150.0).abs() < 1e-9);
        assert_eq!(bounds.min_center, bounds.max_center);
        assert!((bounds.gap - 300.0).abs() < 1e-9);

        let pair = PipeManager::make_pair(0.0, bounds.min_center, &settings);
        assert!(pair.top.height.abs() < 1e-9);
        assert!(pair.bottom.height.abs() < 1e-9);
    }

    #[test]
    fn test_prune_past_left_margin() {
        let settings = Settings::default();
        let mut pm = PipeManager::new();
        pm.pipes.push(PipeManager::make_pair(-65.0, 300.0, &settings));
        pm.pipes.push(PipeManager::make_pair(-75.0, 300.0, &settings));
        pm.update(0.0, &settings, &mut rng());
        assert_eq!(pm.pipes.len(), 1);
        assert!((pm.pipes[0].top.x - (-65.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_count_passed_once() {
        let settings = Settings::default();
        let mut pm = PipeManager::new();
        pm.pipes.push(PipeManager::make_pair(0.0, 300.0, &settings));
        pm.pipes.push(PipeManager::make_pair(10.0, 300.0, &settings));
        let bird = Rect::new(100.0, 290.0, 28.0, 22.0);
        assert_eq!(pm.count_passed(&bird), 2);
        assert_eq!(pm.count_passed(&bird), 0);
    }

    #[test]
    fn test_collision_with_segments() {
        let settings = Settings::default();
        let mut pm = PipeManager::new();
        pm.pipes.push(PipeManager::make_pair(90.0, 300.0, &settings));
        // Inside the gap (220..380).
        assert!(!pm.collides(&Rect::new(100.0, 290.0, 28.0, 22.0)));
        // Overlapping the top segment.
        assert!(pm.collides(&Rect::new(100.0, 200.0, 28.0, 22.0)));
        // Overlapping the bottom segment.
        assert!(pm.collides(&Rect::new(100.0, 370.0, 28.0, 22.0)));
    }
}
