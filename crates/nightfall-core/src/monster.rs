//! Monster state, chase AI, and spawn placement.

use glam::Vec2;
use loam::geom::normalize_or_unit_x;
use loam::{CellCoord, TileGrid};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{MonsterInfo, MonsterKind, SessionConfig};
use crate::projectile::ThrownObject;

/// A live monster.
///
/// The session stores monsters in fixed slots; a slot holding a `Monster` is
/// an active monster, and deactivation empties the slot. Health reaching zero
/// does not empty the slot by itself: the session's monster pass reaps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    /// Archetype.
    pub kind: MonsterKind,
    /// World position.
    pub position: Vec2,
    /// Current health.
    pub health: f32,
    /// Health at spawn.
    pub max_health: f32,
    /// Chase speed in world units per second.
    pub speed: f32,
    /// Walk-cycle frames per second.
    pub anim_fps: f32,
    /// Time banked toward the next frame flip.
    pub anim_accumulator: f32,
    /// Current walk frame, cycling 1, 2, 3.
    pub frame: u8,
    /// Maximum distance for a successful throw.
    pub attack_range: f32,
    /// Seconds between contact-damage applications.
    pub attack_cooldown: f32,
    /// Time left until contact damage can land again.
    pub attack_accumulator: f32,
    /// Damage dealt to the player on body contact.
    pub contact_damage: f32,
    /// Score awarded on kill.
    pub score_value: u32,
    /// Seconds between throw attempts.
    pub throw_cooldown: f32,
    /// Time left until the next throw attempt.
    pub throw_accumulator: f32,
    /// Dormant projectile template, ranged kinds only.
    pub throwable: Option<ThrownObject>,
}

impl Monster {
    /// Spawns a monster at `position` from its stat row.
    #[must_use]
    pub fn spawn(position: Vec2, info: &MonsterInfo) -> Self {
        Self {
            kind: info.kind,
            position,
            health: info.health,
            max_health: info.health,
            speed: info.speed,
            anim_fps: info.anim_fps,
            anim_accumulator: 0.0,
            frame: 1,
            attack_range: info.attack_range,
            attack_cooldown: info.attack_cooldown,
            attack_accumulator: 0.0,
            contact_damage: info.contact_damage,
            score_value: info.score_value,
            throw_cooldown: info.throw_cooldown,
            throw_accumulator: 0.0,
            throwable: info.throwable.as_ref().map(ThrownObject::template),
        }
    }

    /// Advances animation and cooldown timers. Dead monsters freeze.
    ///
    /// The animation accumulator subtracts the frame interval rather than
    /// resetting, so leftover time carries into the next frame.
    pub fn update(&mut self, dt: f32) {
        if self.health <= 0.0 {
            return;
        }

        let interval = 1.0 / self.anim_fps;
        self.anim_accumulator += dt;
        if self.anim_accumulator >= interval {
            self.anim_accumulator -= interval;
            self.frame += 1;
            if self.frame > 3 {
                self.frame = 1;
            }
        }

        if self.attack_accumulator > 0.0 {
            self.attack_accumulator -= dt;
        }
        if self.throw_accumulator > 0.0 {
            self.throw_accumulator -= dt;
        }
    }

    /// Chase step: walk straight toward the player.
    ///
    /// Ranged kinds hold position once within `hold_distance`. A monster
    /// already on top of the player does not move.
    pub fn ai_update(&mut self, player_pos: Vec2, hold_distance: f32, dt: f32) {
        let delta = player_pos - self.position;
        let distance = delta.length();
        if distance <= 0.01 {
            return;
        }
        if self.kind.is_ranged() && distance <= hold_distance {
            return;
        }
        self.position += normalize_or_unit_x(delta) * self.speed * dt;
    }

    /// True when the monster's body overlaps the player's.
    ///
    /// The threshold is twice `collision_radius` (both bodies share the same
    /// radius) and the comparison is strict.
    #[must_use]
    pub fn collides_with_player(&self, player_pos: Vec2, collision_radius: f32) -> bool {
        (self.position - player_pos).length() < collision_radius * 2.0
    }

    /// Attempts to arm the carried throwable at `target`.
    ///
    /// Returns true when the template was armed this call; the caller copies
    /// it into the in-flight pool and puts the template back to sleep. Fails
    /// when the monster has no throwable, the template is still armed, the
    /// cooldown has not elapsed, or the target is out of range or on top of
    /// the monster.
    pub fn try_throw(&mut self, dt: f32, target: Vec2) -> bool {
        let Some(throwable) = self.throwable.as_mut() else {
            return false;
        };
        if throwable.active {
            return false;
        }

        if self.throw_accumulator > 0.0 {
            self.throw_accumulator -= dt;
            if self.throw_accumulator > 0.0 {
                return false;
            }
        }

        let delta = target - self.position;
        let distance = delta.length();
        if distance <= 0.01 {
            return false;
        }
        if distance > self.attack_range {
            return false;
        }

        self.throw_accumulator = self.throw_cooldown;
        throwable.launch(self.position, target);
        true
    }
}

/// Picks a spawn position far enough from the player.
///
/// Samples random interior cells (the blocking border ring is excluded) and
/// accepts the first whose row or column distance from the player's cell is
/// at least `spawn_min_tile_distance`. After `spawn_attempts` failures it
/// falls back to the top-left interior cell center.
pub fn find_spawn_point<R: Rng>(
    rng: &mut R,
    grid: &TileGrid,
    player_cell: CellCoord,
    config: &SessionConfig,
) -> Vec2 {
    let row_max = grid.rows().saturating_sub(2);
    let col_max = grid.cols().saturating_sub(2);
    let fallback = CellCoord::new(1.min(grid.rows() - 1), 1.min(grid.cols() - 1));
    // Grids too small to have an interior skip the sampling entirely.
    if row_max < 1 || col_max < 1 {
        return grid.cell_center(fallback);
    }
    let min_tiles = config.spawn_min_tile_distance as usize;

    for _ in 0..config.spawn_attempts {
        let row = rng.gen_range(1..=row_max);
        let col = rng.gen_range(1..=col_max);
        let row_dist = row.abs_diff(player_cell.row);
        let col_dist = col.abs_diff(player_cell.col);
        if row_dist >= min_tiles || col_dist >= min_tiles {
            return grid.cell_center(CellCoord::new(row, col));
        }
    }

    grid.cell_center(fallback)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonsterTable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spawn_kind(kind: MonsterKind) -> Monster {
        let table = MonsterTable::standard();
        Monster::spawn(Vec2::new(100.0, 100.0), table.info(kind).unwrap())
    }

    mod update_tests {
        use super::*;

        #[test]
        fn animation_cycles_one_two_three() {
            let mut m = spawn_kind(MonsterKind::Zombie);
            let interval = 1.0 / m.anim_fps;
            assert_eq!(m.frame, 1);
            m.update(interval);
            assert_eq!(m.frame, 2);
            m.update(interval);
            assert_eq!(m.frame, 3);
            m.update(interval);
            assert_eq!(m.frame, 1);
        }

        #[test]
        fn animation_accumulator_carries_remainder() {
            let mut m = spawn_kind(MonsterKind::Zombie);
            let interval = 1.0 / m.anim_fps;
            m.update(interval * 1.5);
            assert_eq!(m.frame, 2);
            assert!((m.anim_accumulator - interval * 0.5).abs() < 1e-5);
        }

        #[test]
        fn dead_monster_freezes() {
            let mut m = spawn_kind(MonsterKind::Zombie);
            m.health = 0.0;
            m.attack_accumulator = 1.0;
            m.update(0.5);
            assert_eq!(m.frame, 1);
            assert!((m.attack_accumulator - 1.0).abs() < f32::EPSILON);
        }

        #[test]
        fn cooldowns_count_down() {
            let mut m = spawn_kind(MonsterKind::Zombie);
            m.attack_accumulator = 1.0;
            m.update(0.4);
            assert!((m.attack_accumulator - 0.6).abs() < 1e-6);
        }
    }

    mod ai_tests {
        use super::*;

        #[test]
        fn melee_monster_walks_toward_player() {
            let mut m = spawn_kind(MonsterKind::Zombie);
            let player = Vec2::new(200.0, 100.0);
            m.ai_update(player, 140.0, 1.0);
            assert!((m.position.x - (100.0 + m.speed)).abs() < 1e-3);
            assert!((m.position.y - 100.0).abs() < 1e-3);
        }

        #[test]
        fn ranged_monster_holds_at_distance() {
            let mut m = spawn_kind(MonsterKind::Skeleton);
            let player = Vec2::new(200.0, 100.0); // 100 units away, inside hold
            let before = m.position;
            m.ai_update(player, 140.0, 1.0);
            assert_eq!(m.position, before);
        }

        #[test]
        fn ranged_monster_advances_when_far() {
            let mut m = spawn_kind(MonsterKind::Skeleton);
            let player = Vec2::new(500.0, 100.0);
            m.ai_update(player, 140.0, 0.1);
            assert!(m.position.x > 100.0);
        }

        #[test]
        fn monster_on_player_does_not_move() {
            let mut m = spawn_kind(MonsterKind::Zombie);
            let before = m.position;
            m.ai_update(before, 140.0, 1.0);
            assert_eq!(m.position, before);
        }
    }

    mod collision_tests {
        use super::*;

        #[test]
        fn overlapping_bodies_collide() {
            let m = spawn_kind(MonsterKind::Zombie);
            assert!(m.collides_with_player(Vec2::new(130.0, 100.0), 20.0));
        }

        #[test]
        fn threshold_is_strict() {
            let m = spawn_kind(MonsterKind::Zombie);
            assert!(!m.collides_with_player(Vec2::new(140.0, 100.0), 20.0));
            assert!(m.collides_with_player(Vec2::new(139.9, 100.0), 20.0));
        }
    }

    mod throw_tests {
        use super::*;

        #[test]
        fn melee_kind_never_throws() {
            let mut m = spawn_kind(MonsterKind::Zombie);
            assert!(!m.try_throw(0.016, Vec2::new(120.0, 100.0)));
        }

        #[test]
        fn throw_succeeds_in_range_and_arms_template() {
            let mut m = spawn_kind(MonsterKind::Skeleton);
            let target = Vec2::new(200.0, 100.0);
            assert!(m.try_throw(0.016, target));
            let throwable = m.throwable.as_ref().unwrap();
            assert!(throwable.active);
            assert_eq!(throwable.position, m.position);
            assert!((m.throw_accumulator - m.throw_cooldown).abs() < f32::EPSILON);
        }

        #[test]
        fn throw_fails_out_of_range() {
            let mut m = spawn_kind(MonsterKind::Skeleton);
            let target = Vec2::new(m.position.x + m.attack_range + 1.0, m.position.y);
            assert!(!m.try_throw(0.016, target));
        }

        #[test]
        fn throw_fails_while_template_armed() {
            let mut m = spawn_kind(MonsterKind::Skeleton);
            let target = Vec2::new(200.0, 100.0);
            assert!(m.try_throw(0.016, target));
            m.throw_accumulator = 0.0;
            assert!(!m.try_throw(0.016, target));
        }

        #[test]
        fn throw_cooldown_gets_extra_decrement_during_attempt() {
            let mut m = spawn_kind(MonsterKind::Skeleton);
            m.throw_accumulator = 0.5;
            assert!(!m.try_throw(0.1, Vec2::new(200.0, 100.0)));
            assert!((m.throw_accumulator - 0.4).abs() < 1e-6);
        }

        #[test]
        fn throw_fails_at_point_blank() {
            let mut m = spawn_kind(MonsterKind::Skeleton);
            assert!(!m.try_throw(0.016, m.position));
        }
    }

    mod spawn_point_tests {
        use super::*;

        #[test]
        fn spawn_is_far_from_player() {
            let grid = TileGrid::build(65, 65, 64.0, 64.0).unwrap();
            let config = SessionConfig::default();
            let player_cell = CellCoord::new(32, 32);
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            for _ in 0..50 {
                let spawn = find_spawn_point(&mut rng, &grid, player_cell, &config);
                let cell = grid.cell_at_world(spawn).unwrap();
                let row_dist = cell.row.abs_diff(player_cell.row);
                let col_dist = cell.col.abs_diff(player_cell.col);
                assert!(row_dist >= 15 || col_dist >= 15);
            }
        }

        #[test]
        fn spawn_lands_inside_interior() {
            let grid = TileGrid::build(65, 65, 64.0, 64.0).unwrap();
            let config = SessionConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(11);
            for _ in 0..50 {
                let spawn = find_spawn_point(&mut rng, &grid, CellCoord::new(2, 2), &config);
                let cell = grid.cell_at_world(spawn).unwrap();
                assert!(cell.row >= 1 && cell.row <= 63);
                assert!(cell.col >= 1 && cell.col <= 63);
                assert!(!grid.blocks_at(cell));
            }
        }

        #[test]
        fn tiny_grid_falls_back_without_sampling() {
            let grid = TileGrid::build(2, 2, 64.0, 64.0).unwrap();
            let config = SessionConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            let spawn = find_spawn_point(&mut rng, &grid, CellCoord::new(0, 0), &config);
            assert_eq!(spawn, grid.cell_center(CellCoord::new(1, 1)));
        }

        #[test]
        fn same_seed_gives_same_sequence() {
            let grid = TileGrid::build(65, 65, 64.0, 64.0).unwrap();
            let config = SessionConfig::default();
            let player_cell = CellCoord::new(32, 32);
            let mut a = ChaCha8Rng::seed_from_u64(42);
            let mut b = ChaCha8Rng::seed_from_u64(42);
            for _ in 0..10 {
                assert_eq!(
                    find_spawn_point(&mut a, &grid, player_cell, &config),
                    find_spawn_point(&mut b, &grid, player_cell, &config),
                );
            }
        }
    }
}
