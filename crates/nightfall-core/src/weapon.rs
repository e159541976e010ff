//! Primary weapon state and melee attack resolution.
//!
//! A [`PrimaryWeapon`] is built from a [`PrimaryWeaponDef`] and carries both
//! its current and original damage/reload numbers so equipment modifiers can
//! be re-resolved from the originals at any time.

use glam::Vec2;
use loam::geom::{normalize_or_unit_x, point_in_circle, point_in_cone, point_segment_distance};
use serde::{Deserialize, Serialize};

use crate::config::{AttackShape, PrimaryWeaponDef};

/// Fallback radius for a point attack whose definition left it unset.
const DEFAULT_POINT_RADIUS: f32 = 32.0;
/// Fallback thickness for a line attack whose definition left it unset.
const DEFAULT_LINE_WIDTH: f32 = 18.0;

/// Live primary weapon state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryWeapon {
    /// Display name.
    pub name: String,
    /// Area shape resolved on attack.
    pub shape: AttackShape,
    /// Maximum reach of the attack shape.
    pub max_range: f32,
    /// Damage per hit after equipment modifiers.
    pub damage: f32,
    /// Damage as defined, before equipment modifiers.
    pub original_damage: f32,
    /// Seconds between attacks after equipment modifiers.
    pub reload_time: f32,
    /// Reload time as defined, before equipment modifiers.
    pub original_reload_time: f32,
    /// Time left until the weapon can attack again.
    pub reload_remaining: f32,
}

impl PrimaryWeapon {
    /// Builds a ready-to-fire weapon from its definition.
    #[must_use]
    pub fn from_def(def: &PrimaryWeaponDef) -> Self {
        Self {
            name: def.name.clone(),
            shape: def.shape,
            max_range: def.max_range,
            damage: def.base_damage,
            original_damage: def.base_damage,
            reload_time: def.reload_time,
            original_reload_time: def.reload_time,
            reload_remaining: 0.0,
        }
    }

    /// True when the reload gate is open.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.reload_remaining <= 0.0
    }

    /// True for bolt-firing weapons.
    #[must_use]
    pub fn is_projectile(&self) -> bool {
        matches!(self.shape, AttackShape::Projectile)
    }

    /// Counts the reload gate down.
    pub fn tick(&mut self, dt: f32) {
        if self.reload_remaining > 0.0 {
            self.reload_remaining -= dt;
        }
    }

    /// Closes the reload gate for a full reload period.
    pub fn start_reload(&mut self) {
        self.reload_remaining = self.reload_time;
    }

    /// Resolves a melee swing from `origin` toward `cursor`.
    ///
    /// Starts the reload and returns the resulting attack area. Callers must
    /// check [`PrimaryWeapon::is_ready`] first; projectile weapons never
    /// swing and return `None`.
    pub fn trigger_melee(
        &mut self,
        origin: Vec2,
        cursor: Vec2,
        flash_duration: f32,
    ) -> Option<AttackEffect> {
        if self.is_projectile() {
            return None;
        }
        self.start_reload();

        let delta = cursor - origin;
        let direction = normalize_or_unit_x(delta);
        let reach = delta.length().min(self.max_range);
        let destination = origin + direction * reach;

        Some(AttackEffect {
            shape: self.shape,
            origin,
            destination,
            direction,
            range: self.max_range,
            remaining: flash_duration,
        })
    }
}

/// The area swept by one melee swing.
///
/// Lives for a short flash so a renderer can draw it; the damage is applied
/// once, on the frame the swing resolves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackEffect {
    /// Shape copied from the weapon.
    pub shape: AttackShape,
    /// Player position at swing time.
    pub origin: Vec2,
    /// Cursor position clamped to weapon range.
    pub destination: Vec2,
    /// Unit direction from origin toward cursor.
    pub direction: Vec2,
    /// Weapon range at swing time.
    pub range: f32,
    /// Seconds of flash left.
    pub remaining: f32,
}

impl AttackEffect {
    /// True when a monster body at `point` is caught by the swing.
    ///
    /// Point and line shapes pad their area by `body_radius`; the cone tests
    /// the body center alone.
    #[must_use]
    pub fn contains(&self, point: Vec2, body_radius: f32) -> bool {
        match self.shape {
            AttackShape::Cone { aperture_deg } => {
                let range = if self.range > 0.0 { self.range } else { 1.0 };
                point_in_cone(self.origin, self.direction, range, aperture_deg, point)
            }
            AttackShape::Point { radius } => {
                let radius = if radius > 0.0 {
                    radius
                } else {
                    DEFAULT_POINT_RADIUS
                };
                point_in_circle(point, self.destination, radius + body_radius)
            }
            AttackShape::Line { width } => {
                let width = if width > 0.0 { width } else { DEFAULT_LINE_WIDTH };
                point_segment_distance(point, self.origin, self.destination)
                    <= width * 0.5 + body_radius
            }
            AttackShape::Projectile => false,
        }
    }

    /// Counts the flash down; returns false once it has faded.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining > 0.0
    }
}

// =============================================================================
// Tests
// =============================================================================
