//! The per-frame session controller.
//!
//! [`Session`] owns everything that lives for one run: the terrain grid, the
//! monster and projectile pools, the secondary ability slot, score, and the
//! pause/death/menu flags. [`Session::update`] advances one frame in a fixed
//! order; every sub-step sees the results of the steps before it, so the same
//! seed and the same input sequence always replay the same run.

use bitflags::bitflags;
use glam::Vec2;
use loam::TileGrid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ability::AbilityState;
use crate::config::{MonsterKind, MonsterTable, SecondaryAbilityDef, SessionConfig};
use crate::monster::{find_spawn_point, Monster};
use crate::player::Player;
use crate::projectile::{RayBolt, ThrownObject};
use crate::weapon::{AttackEffect, PrimaryWeapon};

bitflags! {
    /// Edge-triggered button presses for one frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InputButtons: u8 {
        /// Primary weapon attack.
        const ATTACK = 1;
        /// Secondary ability trigger.
        const ABILITY = 1 << 1;
        /// Pause toggle.
        const PAUSE = 1 << 2;
    }
}

// Wire format is the raw bits; unknown bits are dropped on read.
impl Serialize for InputButtons {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for InputButtons {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u8::deserialize(deserializer).map(Self::from_bits_truncate)
    }
}

/// One frame's worth of player input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Cursor position in world space.
    pub cursor_world: Vec2,
    /// Requested movement direction, not necessarily unit.
    pub move_dir: Vec2,
    /// Buttons pressed this frame.
    pub buttons: InputButtons,
}

/// A running game session.
pub struct Session {
    config: SessionConfig,
    table: MonsterTable,
    grid: TileGrid,
    /// Fixed monster slots. `None` is a free slot; kills empty the slot.
    monsters: Vec<Option<Monster>>,
    /// Fixed pool of in-flight thrown objects, keyed by their active flag.
    thrown: Vec<ThrownObject>,
    /// The single ray bolt slot.
    ray: Option<RayBolt>,
    /// Melee flash from the most recent swing.
    attack_effect: Option<AttackEffect>,
    ability: AbilityState,
    ability_cooldown: f32,
    score: u32,
    paused: bool,
    player_dead: bool,
    menu_requested: bool,
    spawn_timer: f32,
    spawn_interval: f32,
    total_time: f32,
    regen_rate: f32,
    camera_target: Vec2,
    seed: u64,
    rng: ChaCha8Rng,
}

impl Session {
    /// Creates a session over `grid` with a deterministic seeded RNG.
    ///
    /// `regen_rate` is the effective regeneration from the equipped loadout;
    /// call [`Session::set_regen_rate`] whenever the loadout changes.
    #[must_use]
    pub fn new(
        grid: TileGrid,
        table: MonsterTable,
        config: SessionConfig,
        regen_rate: f32,
        seed: u64,
    ) -> Self {
        let monsters = (0..config.monster_capacity).map(|_| None).collect();
        let thrown = vec![ThrownObject::default(); config.thrown_capacity];
        let spawn_interval = config.spawn_interval;
        Self {
            config,
            table,
            grid,
            monsters,
            thrown,
            ray: None,
            attack_effect: None,
            ability: AbilityState::default(),
            ability_cooldown: 0.0,
            score: 0,
            paused: false,
            player_dead: false,
            menu_requested: false,
            spawn_timer: 0.0,
            spawn_interval,
            total_time: 0.0,
            regen_rate,
            camera_target: Vec2::ZERO,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Advances the session by one frame.
    ///
    /// The step order is fixed: death epilogue, pause toggle, ability
    /// timers, then (unless paused) weapon timers, movement with collision
    /// revert, primary attack, ray flight, regeneration, spawning, the
    /// monster pass, thrown objects, ability damage, and finally the ability
    /// trigger. While paused only the ray keeps flying; after death only the
    /// ray epilogue runs.
    pub fn update(
        &mut self,
        player: &mut Player,
        weapon: &mut PrimaryWeapon,
        secondary: Option<&SecondaryAbilityDef>,
        input: &FrameInput,
        dt: f32,
    ) {
        if self.player_dead {
            self.update_ray(dt);
            return;
        }

        if input.buttons.contains(InputButtons::PAUSE) {
            self.paused = !self.paused;
        }

        if self.ability_cooldown > 0.0 {
            self.ability_cooldown = (self.ability_cooldown - dt).max(0.0);
        }
        self.ability.tick(dt, player.position);

        if self.paused {
            self.update_ray(dt);
        } else {
            self.run_frame(player, weapon, secondary, input, dt);
        }

        if player.health <= 0.0 && !self.player_dead {
            player.health = 0.0;
            self.player_dead = true;
            debug!(score = self.score, time = self.total_time, "player died");
        }
    }

    fn run_frame(
        &mut self,
        player: &mut Player,
        weapon: &mut PrimaryWeapon,
        secondary: Option<&SecondaryAbilityDef>,
        input: &FrameInput,
        dt: f32,
    ) {
        weapon.tick(dt);
        if let Some(effect) = self.attack_effect.as_mut() {
            if !effect.tick(dt) {
                self.attack_effect = None;
            }
        }

        self.total_time += dt;
        self.spawn_interval = self.spawn_interval_for(self.total_time);

        self.move_player(player, input, dt);

        if input.buttons.contains(InputButtons::ATTACK) && weapon.is_ready() {
            if weapon.is_projectile() {
                weapon.start_reload();
                self.ray = Some(RayBolt::aim(
                    player.position,
                    input.cursor_world,
                    weapon.damage,
                    weapon.max_range,
                    self.config.ray_speed,
                    self.config.ray_min_flight_time,
                ));
            } else if let Some(effect) = weapon.trigger_melee(
                player.position,
                input.cursor_world,
                self.config.effect_flash_duration,
            ) {
                self.apply_effect_damage(&effect, weapon.damage);
                self.attack_effect = Some(effect);
            }
        }

        if self.ray.is_some() {
            self.update_ray(dt);
        }

        if self.regen_rate > 0.0 && player.health < player.max_health {
            player.health = (player.health + self.regen_rate * dt).min(player.max_health);
        }

        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval
            && self.active_monster_count() < self.config.monster_capacity
        {
            self.spawn_timer = 0.0;
            self.try_spawn(player);
        }

        self.monster_pass(player, dt);
        self.update_thrown(player, dt);
        self.ability.apply_damage_effects(
            &mut self.monsters,
            player.position,
            dt,
            self.config.push_aperture_deg,
            self.config.push_displacement_factor,
        );

        if let Some(def) = secondary {
            if input.buttons.contains(InputButtons::ABILITY)
                && !(self.ability.active || self.ability_cooldown > 0.0)
            {
                self.ability_cooldown = def.reload_time;
                self.ability.trigger(def, player.position, input.cursor_world);
            }
        }
    }

    /// Movement with blocked-tile revert and world clamping.
    fn move_player(&mut self, player: &mut Player, input: &FrameInput, dt: f32) {
        let previous = player.position;
        player.set_move_dir(input.move_dir);
        player.update(dt);
        player.recompute_cell(&self.grid);

        let blocked = player
            .current_cell
            .map_or(true, |cell| self.grid.blocks_at(cell));
        if blocked {
            player.position = previous;
            player.recompute_cell(&self.grid);
        }

        player.position = self.grid.clamp_to_world(player.position);
        self.camera_target = player.position;
    }

    /// Per-monster step: timers, slow zone, chase, throws, contact damage,
    /// and reaping. Kills credit score as the slot empties.
    fn monster_pass(&mut self, player: &mut Player, dt: f32) {
        let config = &self.config;
        let ability = &self.ability;
        let thrown_pool = &mut self.thrown;
        let mut score_gain = 0u32;

        for slot in &mut self.monsters {
            let Some(monster) = slot.as_mut() else {
                continue;
            };

            monster.update(dt);

            // Slow zones apply only to the chase step.
            let original_speed = monster.speed;
            if ability.slows_at(monster.position, player.position) {
                monster.speed = original_speed * config.slow_factor;
            }
            monster.ai_update(player.position, config.ranged_hold_distance, dt);
            monster.speed = original_speed;

            if monster.try_throw(dt, player.position) {
                if let Some(template) = monster.throwable.as_mut() {
                    let launched = *template;
                    template.active = false;
                    register_thrown(thrown_pool, launched);
                }
            }

            if monster.collides_with_player(player.position, config.monster_collision_radius)
                && !ability.shield_protects(player.position, player.position)
                && monster.attack_accumulator <= 0.0
            {
                player.health = (player.health - monster.contact_damage).max(0.0);
                monster.attack_accumulator = monster.attack_cooldown;
            }

            if monster.health <= 0.0 {
                score_gain += monster.score_value;
                debug!(kind = ?monster.kind, "monster killed");
                *slot = None;
            }
        }

        self.score += score_gain;
    }

    /// Damages every monster caught in a melee swing. Kills resolve here,
    /// in slot order, crediting score immediately.
    fn apply_effect_damage(&mut self, effect: &AttackEffect, damage: f32) {
        if damage <= 0.0 {
            return;
        }
        for slot in &mut self.monsters {
            let Some(monster) = slot.as_mut() else {
                continue;
            };
            if effect.contains(monster.position, self.config.monster_body_radius) {
                monster.health -= damage;
                if monster.health <= 0.0 {
                    self.score += monster.score_value;
                    debug!(kind = ?monster.kind, "monster killed");
                    *slot = None;
                }
            }
        }
    }

    /// Flies the ray bolt one step: first monster within the hit radius
    /// takes the bolt's damage and ends the flight; otherwise the remaining
    /// flight time counts down.
    fn update_ray(&mut self, dt: f32) {
        let Some(bolt) = self.ray.as_mut() else {
            return;
        };
        bolt.advance(dt);

        let mut hit = false;
        for slot in &mut self.monsters {
            let Some(monster) = slot.as_mut() else {
                continue;
            };
            if (monster.position - bolt.position).length() <= self.config.ray_hit_radius {
                monster.health -= bolt.damage;
                if monster.health <= 0.0 {
                    self.score += monster.score_value;
                    debug!(kind = ?monster.kind, "monster killed");
                    *slot = None;
                }
                hit = true;
                break;
            }
        }

        if hit {
            self.ray = None;
            return;
        }

        bolt.time_remaining -= dt;
        if bolt.time_remaining <= 0.0 {
            self.ray = None;
        }
    }

    /// Advances thrown objects: shield interception, player hits, expiry.
    fn update_thrown(&mut self, player: &mut Player, dt: f32) {
        for obj in &mut self.thrown {
            if !obj.active {
                continue;
            }
            obj.update(dt);

            if self.ability.shield_protects(obj.position, player.position) {
                obj.active = false;
                continue;
            }

            if obj.hits(player.position, self.config.thrown_hit_radius) {
                if !self.ability.shield_protects(player.position, player.position) {
                    player.health = (player.health - obj.damage).max(0.0);
                }
                obj.active = false;
                continue;
            }

            if obj.lifetime > self.config.thrown_max_lifetime {
                obj.active = false;
            }
        }
    }

    /// Spawns one monster into the first free slot, if any.
    ///
    /// The placement roll happens before the kind roll, so the RNG stream
    /// stays stable across roster changes.
    fn try_spawn(&mut self, player: &Player) -> bool {
        let Some(player_cell) = player.current_cell else {
            return false;
        };
        let Some(free) = self.monsters.iter().position(Option::is_none) else {
            return false;
        };

        let spawn = find_spawn_point(&mut self.rng, &self.grid, player_cell, &self.config);
        let kind = MonsterKind::all()[self.rng.gen_range(0..MonsterKind::COUNT)];
        let Some(info) = self.table.info(kind) else {
            return false;
        };

        debug!(kind = ?kind, x = spawn.x, y = spawn.y, "monster spawned");
        self.monsters[free] = Some(Monster::spawn(spawn, info));
        true
    }

    /// Spawn cadence as a function of elapsed time.
    ///
    /// Currently a flat interval; difficulty ramps plug in here.
    fn spawn_interval_for(&self, _total_time: f32) -> f32 {
        self.config.spawn_interval
    }

    /// Returns the session to its initial state for a fresh run.
    ///
    /// The player is moved to `start_pos`; health and equipment-derived
    /// stats are the caller's to restore (re-apply the loadout). The RNG
    /// keeps its stream.
    pub fn reset(&mut self, player: &mut Player, start_pos: Vec2) {
        self.ray = None;
        self.attack_effect = None;
        self.ability = AbilityState::default();
        self.ability_cooldown = 0.0;
        self.paused = false;
        self.player_dead = false;
        self.menu_requested = false;
        self.score = 0;
        self.spawn_timer = 0.0;
        self.total_time = 0.0;
        self.spawn_interval = self.config.spawn_interval;
        for slot in &mut self.monsters {
            *slot = None;
        }
        for obj in &mut self.thrown {
            *obj = ThrownObject::default();
        }
        player.position = start_pos;
        player.recompute_cell(&self.grid);
        self.camera_target = player.position;
    }

    /// Requests a return to the menu: unpauses, clears the ray and ability,
    /// and raises the menu flag for the caller to observe.
    pub fn request_menu(&mut self) {
        self.paused = false;
        self.ray = None;
        self.ability.clear();
        self.ability_cooldown = 0.0;
        self.menu_requested = true;
    }

    /// Replaces the effective regeneration rate after a loadout change.
    pub fn set_regen_rate(&mut self, rate: f32) {
        self.regen_rate = rate;
    }

    /// Total score accumulated this run.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// True while the pause toggle is on.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True once the player's health has reached zero.
    #[must_use]
    pub fn is_player_dead(&self) -> bool {
        self.player_dead
    }

    /// True after [`Session::request_menu`], until the next reset.
    #[must_use]
    pub fn menu_requested(&self) -> bool {
        self.menu_requested
    }

    /// Camera follow target, the player's last in-bounds position.
    #[must_use]
    pub fn camera_target(&self) -> Vec2 {
        self.camera_target
    }

    /// Unpaused time elapsed this run.
    #[must_use]
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of live monsters.
    #[must_use]
    pub fn active_monster_count(&self) -> usize {
        self.monsters.iter().filter(|slot| slot.is_some()).count()
    }

    /// Live monsters, in slot order.
    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().flatten()
    }

    /// In-flight thrown objects.
    pub fn thrown_objects(&self) -> impl Iterator<Item = &ThrownObject> {
        self.thrown.iter().filter(|obj| obj.active)
    }

    /// The airborne ray bolt, if one is flying.
    #[must_use]
    pub fn ray(&self) -> Option<&RayBolt> {
        self.ray.as_ref()
    }

    /// The current melee flash, if one is showing.
    #[must_use]
    pub fn attack_effect(&self) -> Option<&AttackEffect> {
        self.attack_effect.as_ref()
    }

    /// The secondary ability slot.
    #[must_use]
    pub fn ability(&self) -> &AbilityState {
        &self.ability
    }

    /// Seconds left on the secondary ability cooldown.
    #[must_use]
    pub fn ability_cooldown(&self) -> f32 {
        self.ability_cooldown
    }

    /// The terrain grid.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// The tuning knobs this session runs with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The seed the RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Copies a launched throwable into the first free pool slot. A full pool
/// drops the throw.
fn register_thrown(pool: &mut [ThrownObject], mut launched: ThrownObject) {
    launched.lifetime = 0.0;
    if let Some(slot) = pool.iter_mut().find(|obj| !obj.active) {
        *slot = launched;
    }
}

// =============================================================================
// Tests
// =============================================================================
