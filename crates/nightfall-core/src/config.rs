//! Static gameplay data: monster archetypes, equipment definitions, and the
//! session tuning knobs.
//!
//! Everything in this module is plain data. The tables returned by
//! [`MonsterTable::standard`], [`standard_armors`], [`standard_helmets`],
//! [`standard_primary_weapons`], and [`standard_abilities`] are the default
//! roster; callers building a custom campaign can construct their own
//! definitions with the same types.

use serde::{Deserialize, Serialize};

/// Monster archetypes, in spawn-roll order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    /// Ranged bone archer.
    Skeleton,
    /// Slow shambler.
    Zombie,
    /// Fast, fragile harasser.
    Imp,
    /// Ranged spectral caster.
    Wraith,
    /// Mid-speed flesh eater.
    Ghoul,
    /// Durable revived soldier.
    Revenant,
    /// Heavy bruiser.
    Brute,
    /// Elite boss-tier spawn.
    Overlord,
}

impl MonsterKind {
    /// Number of monster kinds.
    pub const COUNT: usize = 8;

    /// All kinds in spawn-roll order.
    #[must_use]
    pub const fn all() -> [MonsterKind; Self::COUNT] {
        [
            MonsterKind::Skeleton,
            MonsterKind::Zombie,
            MonsterKind::Imp,
            MonsterKind::Wraith,
            MonsterKind::Ghoul,
            MonsterKind::Revenant,
            MonsterKind::Brute,
            MonsterKind::Overlord,
        ]
    }

    /// Ranged kinds hold position once they are close enough to throw.
    #[must_use]
    pub const fn is_ranged(self) -> bool {
        matches!(self, MonsterKind::Skeleton | MonsterKind::Wraith)
    }
}

/// Template for a throwable projectile carried by a ranged monster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowableInfo {
    /// Damage dealt on player contact.
    pub damage: f32,
    /// Flight speed in world units per second.
    pub speed: f32,
}

/// Per-kind monster stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterInfo {
    /// Which archetype this row describes.
    pub kind: MonsterKind,
    /// Display name.
    pub name: String,
    /// Starting (and maximum) health.
    pub health: f32,
    /// Chase speed in world units per second.
    pub speed: f32,
    /// Animation frames per second for the 3-frame walk cycle.
    pub anim_fps: f32,
    /// Maximum distance at which a throw attempt can succeed.
    pub attack_range: f32,
    /// Seconds between contact-damage applications.
    pub attack_cooldown: f32,
    /// Damage dealt to the player on body contact.
    pub contact_damage: f32,
    /// Seconds between throw attempts.
    pub throw_cooldown: f32,
    /// Score awarded when this monster is killed.
    pub score_value: u32,
    /// Throwable template, present only for ranged kinds.
    pub throwable: Option<ThrowableInfo>,
}

/// Lookup table of monster stats, indexed by [`MonsterKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTable {
    infos: Vec<MonsterInfo>,
}

impl MonsterTable {
    /// Builds the standard roster with one row per [`MonsterKind`].
    #[must_use]
    pub fn standard() -> Self {
        let row = |kind: MonsterKind,
                   name: &str,
                   health: f32,
                   speed: f32,
                   anim_fps: f32,
                   attack_range: f32,
                   attack_cooldown: f32,
                   contact_damage: f32,
                   throw_cooldown: f32,
                   score_value: u32,
                   throwable: Option<ThrowableInfo>| MonsterInfo {
            kind,
            name: name.to_owned(),
            health,
            speed,
            anim_fps,
            attack_range,
            attack_cooldown,
            contact_damage,
            throw_cooldown,
            score_value,
            throwable,
        };

        let skeleton_bolt = ThrowableInfo {
            damage: 10.0,
            speed: 240.0,
        };
        let wraith_orb = ThrowableInfo {
            damage: 14.0,
            speed: 280.0,
        };

        Self {
            infos: vec![
                row(
                    MonsterKind::Skeleton,
                    "Skeleton",
                    30.0,
                    70.0,
                    6.0,
                    320.0,
                    1.0,
                    8.0,
                    2.2,
                    10,
                    Some(skeleton_bolt),
                ),
                row(
                    MonsterKind::Zombie,
                    "Zombie",
                    50.0,
                    60.0,
                    5.0,
                    40.0,
                    1.2,
                    12.0,
                    0.0,
                    10,
                    None,
                ),
                row(
                    MonsterKind::Imp,
                    "Imp",
                    25.0,
                    110.0,
                    8.0,
                    40.0,
                    0.8,
                    6.0,
                    0.0,
                    15,
                    None,
                ),
                row(
                    MonsterKind::Wraith,
                    "Wraith",
                    35.0,
                    80.0,
                    7.0,
                    360.0,
                    1.0,
                    8.0,
                    1.8,
                    20,
                    Some(wraith_orb),
                ),
                row(
                    MonsterKind::Ghoul,
                    "Ghoul",
                    45.0,
                    90.0,
                    6.0,
                    40.0,
                    1.0,
                    10.0,
                    0.0,
                    15,
                    None,
                ),
                row(
                    MonsterKind::Revenant,
                    "Revenant",
                    70.0,
                    75.0,
                    6.0,
                    40.0,
                    1.1,
                    14.0,
                    0.0,
                    25,
                    None,
                ),
                row(
                    MonsterKind::Brute,
                    "Brute",
                    120.0,
                    45.0,
                    4.0,
                    40.0,
                    1.5,
                    20.0,
                    0.0,
                    35,
                    None,
                ),
                row(
                    MonsterKind::Overlord,
                    "Overlord",
                    200.0,
                    55.0,
                    5.0,
                    40.0,
                    1.4,
                    25.0,
                    0.0,
                    50,
                    None,
                ),
            ],
        }
    }

    /// Stats for `kind`, or `None` when the table has no row for it.
    #[must_use]
    pub fn info(&self, kind: MonsterKind) -> Option<&MonsterInfo> {
        self.infos.iter().find(|info| info.kind == kind)
    }

    /// All rows in spawn-roll order.
    #[must_use]
    pub fn infos(&self) -> &[MonsterInfo] {
        &self.infos
    }
}

/// Player stat a piece of armor can raise or lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    /// Maximum health, flat points.
    MaxHealth,
    /// Movement speed, flat world units per second.
    Speed,
    /// Primary weapon damage, flat points.
    Damage,
}

/// An armor piece: one flat benefit traded against one flat penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorInfo {
    /// Display name.
    pub name: String,
    /// Stat raised by this armor.
    pub benefit_stat: StatKind,
    /// Flat amount added to the benefit stat.
    pub benefit: i32,
    /// Stat lowered by this armor.
    pub penalty_stat: StatKind,
    /// Flat amount subtracted from the penalty stat.
    pub penalty: i32,
}

/// A helmet: percentage bonuses expressed as fractions (0.25 = +25%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelmetInfo {
    /// Display name.
    pub name: String,
    /// Multiplier bonus applied to maximum health.
    pub max_health_bonus: f32,
    /// Multiplier bonus applied to health regeneration.
    pub regen_bonus: f32,
    /// Multiplier bonus applied to primary weapon damage.
    pub damage_bonus: f32,
    /// Fractional reduction of primary weapon reload time.
    pub cooldown_reduction: f32,
}

/// Area shape of a primary weapon attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackShape {
    /// Melee cone anchored at the player, facing the cursor.
    Cone {
        /// Full aperture in degrees.
        aperture_deg: f32,
    },
    /// Melee circle placed at the cursor (clamped to weapon range).
    Point {
        /// Circle radius.
        radius: f32,
    },
    /// Melee line from the player toward the cursor.
    Line {
        /// Line thickness.
        width: f32,
    },
    /// Travelling bolt that hits the first monster in its path.
    Projectile,
}

/// Primary weapon definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryWeaponDef {
    /// Display name.
    pub name: String,
    /// Damage per hit before equipment modifiers.
    pub base_damage: f32,
    /// Seconds between attacks before equipment modifiers.
    pub reload_time: f32,
    /// Maximum reach of the attack shape.
    pub max_range: f32,
    /// Area shape resolved on attack.
    pub shape: AttackShape,
}

/// Behavior class of a secondary ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Damage-over-time circle centered on the player.
    PulsingArea,
    /// One-shot knockback cone from the player toward the cursor.
    PushCone,
    /// Stationary circle that slows monsters inside it.
    SlowZone,
    /// Shield around the player that nullifies incoming damage.
    TemporaryShield,
}

/// Secondary ability definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryAbilityDef {
    /// Display name.
    pub name: String,
    /// Behavior class.
    pub kind: AbilityKind,
    /// Damage: per second for [`AbilityKind::PulsingArea`], lump sum for
    /// [`AbilityKind::PushCone`], unused otherwise.
    pub damage: f32,
    /// Radius for area kinds, cone range for [`AbilityKind::PushCone`].
    pub radius_or_range: f32,
    /// Active duration in seconds.
    pub duration: f32,
    /// Cooldown started on trigger.
    pub reload_time: f32,
}

/// The standard armor roster.
#[must_use]
pub fn standard_armors() -> Vec<ArmorInfo> {
    vec![
        ArmorInfo {
            name: "Bulwark Plate".to_owned(),
            benefit_stat: StatKind::MaxHealth,
            benefit: 40,
            penalty_stat: StatKind::Speed,
            penalty: 30,
        },
        ArmorInfo {
            name: "Scout Leathers".to_owned(),
            benefit_stat: StatKind::Speed,
            benefit: 50,
            penalty_stat: StatKind::MaxHealth,
            penalty: 20,
        },
        ArmorInfo {
            name: "Berserker Harness".to_owned(),
            benefit_stat: StatKind::Damage,
            benefit: 10,
            penalty_stat: StatKind::MaxHealth,
            penalty: 25,
        },
    ]
}

/// The standard helmet roster.
#[must_use]
pub fn standard_helmets() -> Vec<HelmetInfo> {
    vec![
        HelmetInfo {
            name: "Warden Visor".to_owned(),
            max_health_bonus: 0.25,
            regen_bonus: 0.0,
            damage_bonus: 0.0,
            cooldown_reduction: 0.0,
        },
        HelmetInfo {
            name: "Mender Circlet".to_owned(),
            max_health_bonus: 0.0,
            regen_bonus: 0.5,
            damage_bonus: 0.0,
            cooldown_reduction: 0.0,
        },
        HelmetInfo {
            name: "Slayer Helm".to_owned(),
            max_health_bonus: 0.0,
            regen_bonus: 0.0,
            damage_bonus: 0.2,
            cooldown_reduction: 0.15,
        },
    ]
}

/// The standard primary weapon roster.
#[must_use]
pub fn standard_primary_weapons() -> Vec<PrimaryWeaponDef> {
    vec![
        PrimaryWeaponDef {
            name: "Cleaver".to_owned(),
            base_damage: 34.0,
            reload_time: 0.8,
            max_range: 120.0,
            shape: AttackShape::Cone { aperture_deg: 90.0 },
        },
        PrimaryWeaponDef {
            name: "Maul".to_owned(),
            base_damage: 48.0,
            reload_time: 1.1,
            max_range: 220.0,
            shape: AttackShape::Point { radius: 42.0 },
        },
        PrimaryWeaponDef {
            name: "Pike".to_owned(),
            base_damage: 28.0,
            reload_time: 0.6,
            max_range: 260.0,
            shape: AttackShape::Line { width: 18.0 },
        },
        PrimaryWeaponDef {
            name: "Ray Gun".to_owned(),
            base_damage: 40.0,
            reload_time: 1.2,
            max_range: 600.0,
            shape: AttackShape::Projectile,
        },
    ]
}

/// The standard secondary ability roster, one per [`AbilityKind`].
#[must_use]
pub fn standard_abilities() -> Vec<SecondaryAbilityDef> {
    vec![
        SecondaryAbilityDef {
            name: "Pulse Ward".to_owned(),
            kind: AbilityKind::PulsingArea,
            damage: 30.0,
            radius_or_range: 150.0,
            duration: 4.0,
            reload_time: 8.0,
        },
        SecondaryAbilityDef {
            name: "Shockwave".to_owned(),
            kind: AbilityKind::PushCone,
            damage: 25.0,
            radius_or_range: 200.0,
            duration: 0.35,
            reload_time: 6.0,
        },
        SecondaryAbilityDef {
            name: "Mire Field".to_owned(),
            kind: AbilityKind::SlowZone,
            damage: 0.0,
            radius_or_range: 160.0,
            duration: 5.0,
            reload_time: 9.0,
        },
        SecondaryAbilityDef {
            name: "Aegis Shell".to_owned(),
            kind: AbilityKind::TemporaryShield,
            damage: 0.0,
            radius_or_range: 90.0,
            duration: 3.0,
            reload_time: 10.0,
        },
    ]
}

/// Tuning knobs for a [`crate::session::Session`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum simultaneously active monsters.
    pub monster_capacity: usize,
    /// Maximum simultaneously airborne thrown objects.
    pub thrown_capacity: usize,
    /// Seconds between spawn attempts.
    pub spawn_interval: f32,
    /// Minimum row-or-column tile distance between a spawn and the player.
    pub spawn_min_tile_distance: u32,
    /// Random placement attempts before the corner fallback.
    pub spawn_attempts: u32,
    /// Distance at which ranged monsters stop advancing.
    pub ranged_hold_distance: f32,
    /// Monster body radius used for player collision (threshold is twice this).
    pub monster_collision_radius: f32,
    /// Monster body radius used when testing attack shapes.
    pub monster_body_radius: f32,
    /// Ray bolt speed in world units per second.
    pub ray_speed: f32,
    /// Minimum ray flight time in seconds.
    pub ray_min_flight_time: f32,
    /// Distance at which a ray bolt registers a monster hit.
    pub ray_hit_radius: f32,
    /// Distance at which a thrown object registers a player hit.
    pub thrown_hit_radius: f32,
    /// Seconds before an airborne thrown object expires.
    pub thrown_max_lifetime: f32,
    /// Lifetime of the melee attack flash.
    pub effect_flash_duration: f32,
    /// Speed multiplier inside a slow zone.
    pub slow_factor: f32,
    /// Full aperture of the push cone in degrees.
    pub push_aperture_deg: f32,
    /// Knockback distance as a fraction of the push cone range.
    pub push_displacement_factor: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            monster_capacity: 100,
            thrown_capacity: 64,
            spawn_interval: 0.9,
            spawn_min_tile_distance: 15,
            spawn_attempts: 300,
            ranged_hold_distance: 140.0,
            monster_collision_radius: 20.0,
            monster_body_radius: 18.0,
            ray_speed: 650.0,
            ray_min_flight_time: 0.08,
            ray_hit_radius: 18.0,
            thrown_hit_radius: 20.0,
            thrown_max_lifetime: 5.0,
            effect_flash_duration: 0.15,
            slow_factor: 0.4,
            push_aperture_deg: 80.0,
            push_displacement_factor: 0.4,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
