//! Equipment stat resolution.
//!
//! One function, [`apply_loadout`], re-derives every equipment-affected stat
//! from base values plus the equipped armor and helmet. It is idempotent:
//! applying the same loadout twice leaves the player and weapon unchanged,
//! because modifiers always start from the originals, never compound.

use tracing::trace;

use crate::config::{ArmorInfo, HelmetInfo, StatKind};
use crate::player::Player;
use crate::weapon::PrimaryWeapon;

/// Floor for the player's movement speed after armor penalties.
const MIN_SPEED: f32 = 50.0;
/// Floor for weapon damage and max health after penalties.
const MIN_STAT: f32 = 1.0;
/// Floor for the reload multiplier, so reloads never reach zero.
const MIN_RELOAD_FACTOR: f32 = 0.05;
/// Fallback base health when the caller passes a non-positive value.
const FALLBACK_BASE_HEALTH: f32 = 100.0;

/// Cooldown reductions below -95% clamp, capping the reload penalty.
fn clamp_percent(value: f32) -> f32 {
    value.max(-0.95)
}

/// Flat armor contributions, split per stat.
#[derive(Debug, Default, Clone, Copy)]
struct ArmorFlats {
    health: f32,
    speed: f32,
    damage: f32,
}

impl ArmorFlats {
    fn from_armor(armor: &ArmorInfo) -> Self {
        let mut flats = Self::default();
        flats.add(armor.benefit_stat, armor.benefit as f32);
        flats.add(armor.penalty_stat, -(armor.penalty as f32));
        flats
    }

    fn add(&mut self, stat: StatKind, amount: f32) {
        match stat {
            StatKind::MaxHealth => self.health += amount,
            StatKind::Speed => self.speed += amount,
            StatKind::Damage => self.damage += amount,
        }
    }
}

/// Re-resolves player and weapon stats from the equipped loadout.
///
/// `base_health` is the player's unmodified maximum; a non-positive value
/// falls back to the current maximum (or 100 when that is also unset).
/// Returns the effective regeneration rate in health per second.
///
/// Resolution order matters and is fixed:
/// 1. armor flats split per stat, health floored at 1;
/// 2. weapon damage from its original value plus the damage flat, times the
///    helmet damage bonus, floored at 1;
/// 3. weapon reload from its original value times the clamped cooldown
///    factor, with any in-progress reload capped to the new time;
/// 4. speed from base plus the speed flat, floored at [`MIN_SPEED`];
/// 5. max health times the helmet bonus, floored at 1, with current health
///    truncated to the new maximum.
pub fn apply_loadout(
    player: &mut Player,
    armor: Option<&ArmorInfo>,
    helmet: Option<&HelmetInfo>,
    base_health: f32,
    weapon: Option<&mut PrimaryWeapon>,
) -> f32 {
    let base_health = if base_health > 0.0 {
        base_health
    } else if player.max_health > 0.0 {
        player.max_health
    } else {
        FALLBACK_BASE_HEALTH
    };

    let flats = armor.map(ArmorFlats::from_armor).unwrap_or_default();
    let health_with_armor = (base_health + flats.health).max(MIN_STAT);
    let cooldown_reduction = helmet.map_or(0.0, |h| h.cooldown_reduction);

    if let Some(weapon) = weapon {
        let original = if weapon.original_damage > 0.0 {
            weapon.original_damage
        } else {
            weapon.damage
        };
        let mut damage = original + flats.damage;
        if let Some(helmet) = helmet {
            damage *= 1.0 + helmet.damage_bonus;
        }
        weapon.damage = damage.max(MIN_STAT);

        let reload_base = if weapon.original_reload_time > 0.0 {
            weapon.original_reload_time
        } else {
            weapon.reload_time
        };
        let factor = (1.0 - clamp_percent(cooldown_reduction)).max(MIN_RELOAD_FACTOR);
        weapon.reload_time = reload_base * factor;
        if weapon.reload_remaining > weapon.reload_time {
            weapon.reload_remaining = weapon.reload_time;
        }
    }

    player.speed = (player.base_speed + flats.speed).max(MIN_SPEED);

    let mut new_max = health_with_armor;
    if let Some(helmet) = helmet {
        if helmet.max_health_bonus != 0.0 {
            new_max *= 1.0 + helmet.max_health_bonus;
        }
    }
    player.max_health = new_max.max(MIN_STAT);
    if player.health > player.max_health {
        player.health = player.max_health;
    }

    let regen_base = if player.base_regen > 0.0 {
        player.base_regen
    } else {
        1.0
    };
    let regen_bonus = helmet.map_or(0.0, |h| h.regen_bonus);
    let regen = (regen_base * (1.0 + regen_bonus)).max(0.0);

    trace!(
        speed = player.speed,
        max_health = player.max_health,
        regen,
        "loadout resolved"
    );
    regen
}

// =============================================================================
// Tests
// =============================================================================
