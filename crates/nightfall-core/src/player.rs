//! Player state and movement.

use glam::Vec2;
use loam::geom::{normalize_or_unit_x, DEGENERATE_EPSILON};
use loam::{CellCoord, TileGrid};
use serde::{Deserialize, Serialize};

/// Walk-cycle frame rate for the two-frame stride toggle.
const WALK_FPS: f32 = 10.0;

/// The player avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// World position.
    pub position: Vec2,
    /// Requested movement direction for this frame, not necessarily unit.
    pub move_dir: Vec2,
    /// Facing direction, kept from the last nonzero movement.
    pub facing: Vec2,
    /// Current movement speed after equipment modifiers.
    pub speed: f32,
    /// Speed before equipment modifiers.
    pub base_speed: f32,
    /// Current health.
    pub health: f32,
    /// Maximum health after equipment modifiers.
    pub max_health: f32,
    /// Regeneration in health per second before helmet modifiers.
    pub base_regen: f32,
    /// Grid cell under the player, refreshed by [`Player::recompute_cell`].
    pub current_cell: Option<CellCoord>,
    /// True while the player moved this frame.
    pub moving: bool,
    /// Time banked toward the next stride flip.
    pub anim_accumulator: f32,
    /// Which of the two stride frames is showing.
    pub stride_frame: bool,
}

impl Player {
    /// Creates a player at `position` with the given base stats.
    #[must_use]
    pub fn new(position: Vec2, base_speed: f32, max_health: f32, base_regen: f32) -> Self {
        Self {
            position,
            move_dir: Vec2::ZERO,
            facing: Vec2::new(1.0, 0.0),
            speed: base_speed,
            base_speed,
            health: max_health,
            max_health,
            base_regen,
            current_cell: None,
            moving: false,
            anim_accumulator: 0.0,
            stride_frame: false,
        }
    }

    /// Sets the movement intent for the coming update.
    pub fn set_move_dir(&mut self, dir: Vec2) {
        self.move_dir = dir;
    }

    /// Applies one movement step and advances the stride animation.
    pub fn update(&mut self, dt: f32) {
        self.moving = self.move_dir.length() > DEGENERATE_EPSILON;
        if !self.moving {
            return;
        }

        let dir = normalize_or_unit_x(self.move_dir);
        self.facing = dir;
        self.position += dir * self.speed * dt;

        let interval = 1.0 / WALK_FPS;
        self.anim_accumulator += dt;
        if self.anim_accumulator >= interval {
            self.anim_accumulator -= interval;
            self.stride_frame = !self.stride_frame;
        }
    }

    /// Refreshes [`Player::current_cell`] from the grid.
    pub fn recompute_cell(&mut self, grid: &TileGrid) {
        self.current_cell = grid.cell_at_world(self.position);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_along_normalized_direction() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), 200.0, 100.0, 1.0);
        player.set_move_dir(Vec2::new(3.0, 4.0));
        player.update(1.0);
        assert!((player.position.x - 220.0).abs() < 1e-3);
        assert!((player.position.y - 260.0).abs() < 1e-3);
        assert!(player.moving);
    }

    #[test]
    fn zero_input_means_standing_still() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), 200.0, 100.0, 1.0);
        player.set_move_dir(Vec2::ZERO);
        player.update(1.0);
        assert_eq!(player.position, Vec2::new(100.0, 100.0));
        assert!(!player.moving);
    }

    #[test]
    fn facing_persists_after_stopping() {
        let mut player = Player::new(Vec2::ZERO, 200.0, 100.0, 1.0);
        player.set_move_dir(Vec2::new(0.0, 1.0));
        player.update(0.016);
        player.set_move_dir(Vec2::ZERO);
        player.update(0.016);
        assert_eq!(player.facing, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn stride_toggles_while_walking() {
        let mut player = Player::new(Vec2::ZERO, 200.0, 100.0, 1.0);
        player.set_move_dir(Vec2::new(1.0, 0.0));
        let start = player.stride_frame;
        player.update(0.11); // just past one frame interval at 10 fps
        assert_ne!(player.stride_frame, start);
    }

    #[test]
    fn recompute_cell_tracks_position() {
        let grid = TileGrid::build(10, 10, 64.0, 64.0).unwrap();
        let mut player = Player::new(Vec2::new(100.0, 100.0), 200.0, 100.0, 1.0);
        player.recompute_cell(&grid);
        assert_eq!(player.current_cell, Some(CellCoord::new(1, 1)));
    }
}
