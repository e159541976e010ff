//! Secondary ability state and area effects.
//!
//! One ability can be active at a time. Triggering stores a copy of the
//! definition, and the session starts the cooldown in the same frame; while
//! either the ability runs or the cooldown counts, re-triggering is refused.

use glam::Vec2;
use loam::geom::{normalize_or_unit_x, point_in_circle, point_in_cone_strict, DEGENERATE_EPSILON};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AbilityKind, SecondaryAbilityDef};
use crate::monster::Monster;

/// Fallback radius for a pulsing area whose definition left it unset.
const DEFAULT_PULSE_RADIUS: f32 = 150.0;
/// Fallback range for a push cone whose definition left it unset.
const DEFAULT_PUSH_RANGE: f32 = 200.0;
/// Fallback radius for a slow zone whose definition left it unset.
const DEFAULT_SLOW_RADIUS: f32 = 160.0;
/// Fallback radius for a shield whose definition left it unset.
const DEFAULT_SHIELD_RADIUS: f32 = 90.0;

/// Live state of the secondary ability slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityState {
    /// True while an ability runs.
    pub active: bool,
    /// Definition captured at trigger time.
    pub def: Option<SecondaryAbilityDef>,
    /// Seconds of effect left.
    pub remaining: f32,
    /// Seconds since trigger, for renderers that animate the effect.
    pub elapsed: f32,
    /// Effect center; ignored while `follows_player` is set.
    pub center: Vec2,
    /// Aim direction captured at trigger time.
    pub direction: Vec2,
    /// True for effects anchored to the player.
    pub follows_player: bool,
    /// One-shot guard for the push cone's single impact.
    pub impact_applied: bool,
}

impl AbilityState {
    /// Arms the ability from `def`, aimed from `player_pos` toward `cursor`.
    ///
    /// Shields and pulsing areas follow the player; slow zones drop at the
    /// cursor; push cones anchor at the player.
    pub fn trigger(&mut self, def: &SecondaryAbilityDef, player_pos: Vec2, cursor: Vec2) {
        self.active = true;
        self.remaining = def.duration;
        self.elapsed = 0.0;
        self.impact_applied = false;
        self.direction = normalize_or_unit_x(cursor - player_pos);
        self.follows_player = matches!(
            def.kind,
            AbilityKind::TemporaryShield | AbilityKind::PulsingArea
        );
        self.center = match def.kind {
            AbilityKind::SlowZone => cursor,
            _ => player_pos,
        };
        debug!(name = %def.name, kind = ?def.kind, "ability triggered");
        self.def = Some(def.clone());
    }

    /// Counts the duration down and re-anchors player-following effects.
    ///
    /// Runs every frame, paused or not.
    pub fn tick(&mut self, dt: f32, player_pos: Vec2) {
        if !self.active {
            return;
        }
        self.remaining -= dt;
        self.elapsed += dt;
        if self.follows_player {
            self.center = player_pos;
        }
        if self.remaining <= 0.0 {
            self.active = false;
            self.def = None;
        }
    }

    /// Clears the slot without waiting out the duration.
    pub fn clear(&mut self) {
        self.active = false;
        self.def = None;
    }

    /// Current effect center, tracking the player for anchored effects.
    #[must_use]
    pub fn effect_center(&self, player_pos: Vec2) -> Vec2 {
        if self.follows_player {
            player_pos
        } else {
            self.center
        }
    }

    /// True when an active shield covers `point`.
    #[must_use]
    pub fn shield_protects(&self, point: Vec2, player_pos: Vec2) -> bool {
        let Some(def) = self.def.as_ref().filter(|_| self.active) else {
            return false;
        };
        if def.kind != AbilityKind::TemporaryShield {
            return false;
        }
        let radius = if def.radius_or_range > 0.0 {
            def.radius_or_range
        } else {
            DEFAULT_SHIELD_RADIUS
        };
        point_in_circle(point, self.effect_center(player_pos), radius)
    }

    /// True when an active slow zone covers `point`.
    #[must_use]
    pub fn slows_at(&self, point: Vec2, player_pos: Vec2) -> bool {
        let Some(def) = self.def.as_ref().filter(|_| self.active) else {
            return false;
        };
        if def.kind != AbilityKind::SlowZone {
            return false;
        }
        let radius = if def.radius_or_range > 0.0 {
            def.radius_or_range
        } else {
            DEFAULT_SLOW_RADIUS
        };
        point_in_circle(point, self.effect_center(player_pos), radius)
    }

    /// Applies this frame's damage effects to the monster slots.
    ///
    /// Pulsing areas deal `damage * dt` per frame to every monster in radius.
    /// Push cones resolve exactly once: lump damage plus a knockback of
    /// `push_displacement_factor` times the cone range. Monsters driven below
    /// zero health stay in their slots until the next monster pass reaps
    /// them.
    pub fn apply_damage_effects(
        &mut self,
        monsters: &mut [Option<Monster>],
        player_pos: Vec2,
        dt: f32,
        push_aperture_deg: f32,
        push_displacement_factor: f32,
    ) {
        let Some(def) = self.def.as_ref().filter(|_| self.active) else {
            return;
        };
        let center = self.effect_center(player_pos);

        match def.kind {
            AbilityKind::PulsingArea => {
                let radius = if def.radius_or_range > 0.0 {
                    def.radius_or_range
                } else {
                    DEFAULT_PULSE_RADIUS
                };
                let tick_damage = def.damage * dt;
                if tick_damage <= 0.0 {
                    return;
                }
                for monster in monsters.iter_mut().flatten() {
                    if point_in_circle(monster.position, center, radius) {
                        monster.health -= tick_damage;
                    }
                }
            }
            AbilityKind::PushCone => {
                if self.impact_applied {
                    return;
                }
                let mut dir = self.direction;
                if dir.length() <= DEGENERATE_EPSILON {
                    dir = Vec2::new(1.0, 0.0);
                }
                let range = if def.radius_or_range > 0.0 {
                    def.radius_or_range
                } else {
                    DEFAULT_PUSH_RANGE
                };
                let displacement = range * push_displacement_factor;
                for monster in monsters.iter_mut().flatten() {
                    if point_in_cone_strict(center, dir, range, push_aperture_deg, monster.position)
                    {
                        monster.health -= def.damage;
                        monster.position += dir * displacement;
                    }
                }
                self.impact_applied = true;
            }
            AbilityKind::SlowZone | AbilityKind::TemporaryShield => {}
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
