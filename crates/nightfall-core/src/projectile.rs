//! Airborne objects: monster-thrown projectiles and the ray weapon bolt.

use glam::Vec2;
use loam::geom::{normalize_or_unit_x, point_in_circle};
use serde::{Deserialize, Serialize};

use crate::config::ThrowableInfo;

/// A projectile thrown by a ranged monster.
///
/// Each ranged monster carries one of these as a template; when a throw
/// succeeds the session copies the template into its in-flight pool and the
/// monster's copy goes dormant until the next throw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrownObject {
    /// Current world position.
    pub position: Vec2,
    /// Unit flight direction.
    pub direction: Vec2,
    /// Flight speed in world units per second.
    pub speed: f32,
    /// Damage dealt on player contact.
    pub damage: f32,
    /// Seconds since launch.
    pub lifetime: f32,
    /// False once the object has hit, expired, or not yet launched.
    pub active: bool,
}

impl ThrownObject {
    /// Dormant template built from a monster's throwable stats.
    #[must_use]
    pub fn template(info: &ThrowableInfo) -> Self {
        Self {
            position: Vec2::ZERO,
            direction: Vec2::new(1.0, 0.0),
            speed: info.speed,
            damage: info.damage,
            lifetime: 0.0,
            active: false,
        }
    }

    /// Arms the template at `origin` flying toward `target`.
    pub fn launch(&mut self, origin: Vec2, target: Vec2) {
        self.position = origin;
        self.direction = normalize_or_unit_x(target - origin);
        self.lifetime = 0.0;
        self.active = true;
    }

    /// Advances the object along its flight path. Inactive objects hold still.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.position += self.direction * self.speed * dt;
        self.lifetime += dt;
    }

    /// True when an active object is within `radius` of `point`.
    #[must_use]
    pub fn hits(&self, point: Vec2, radius: f32) -> bool {
        self.active && point_in_circle(point, self.position, radius)
    }
}

impl Default for ThrownObject {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            direction: Vec2::new(1.0, 0.0),
            speed: 0.0,
            damage: 0.0,
            lifetime: 0.0,
            active: false,
        }
    }
}

/// The single in-flight bolt fired by a projectile-class primary weapon.
///
/// At most one exists per session; the weapon's reload gate is what prevents
/// a second bolt from being fired while one is airborne.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayBolt {
    /// Fire position.
    pub origin: Vec2,
    /// Current world position.
    pub position: Vec2,
    /// Aim point, clamped to weapon range.
    pub destination: Vec2,
    /// Unit flight direction.
    pub direction: Vec2,
    /// Velocity vector (direction times bolt speed).
    pub velocity: Vec2,
    /// Damage captured from the weapon at fire time.
    pub damage: f32,
    /// Seconds of flight left before the bolt expires.
    pub time_remaining: f32,
}

impl RayBolt {
    /// Aims a bolt from `origin` toward `cursor`.
    ///
    /// The destination is clamped to `max_range` along the aim direction.
    /// A cursor sitting on the origin aims at full range along the fallback
    /// direction. Flight time is distance over `speed`, floored at
    /// `min_flight_time` so point-blank shots still render.
    #[must_use]
    pub fn aim(
        origin: Vec2,
        cursor: Vec2,
        damage: f32,
        max_range: f32,
        speed: f32,
        min_flight_time: f32,
    ) -> Self {
        let delta = cursor - origin;
        let direction = normalize_or_unit_x(delta);
        let mut distance = delta.length();
        if distance <= 0.01 {
            distance = max_range;
        }
        let mut reach = distance.min(max_range);
        if reach <= 0.0 {
            reach = max_range;
        }
        let destination = origin + direction * reach;
        let flight_time = (reach / speed).max(min_flight_time);
        Self {
            origin,
            position: origin,
            destination,
            direction,
            velocity: direction * speed,
            damage,
            time_remaining: flight_time,
        }
    }

    /// Advances the bolt one step.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod thrown_tests {
        use super::*;

        #[test]
        fn template_starts_dormant() {
            let info = ThrowableInfo {
                damage: 10.0,
                speed: 240.0,
            };
            let obj = ThrownObject::template(&info);
            assert!(!obj.active);
            assert!((obj.damage - 10.0).abs() < f32::EPSILON);
            assert!((obj.speed - 240.0).abs() < f32::EPSILON);
        }

        #[test]
        fn launch_aims_at_target() {
            let info = ThrowableInfo {
                damage: 10.0,
                speed: 100.0,
            };
            let mut obj = ThrownObject::template(&info);
            obj.launch(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
            assert!(obj.active);
            assert_eq!(obj.direction, Vec2::new(1.0, 0.0));

            obj.update(0.5);
            assert!((obj.position.x - 50.0).abs() < 1e-4);
            assert!((obj.lifetime - 0.5).abs() < f32::EPSILON);
        }

        #[test]
        fn inactive_object_does_not_move_or_hit() {
            let mut obj = ThrownObject::default();
            obj.update(1.0);
            assert_eq!(obj.position, Vec2::ZERO);
            assert!(!obj.hits(Vec2::ZERO, 100.0));
        }

        #[test]
        fn hit_test_uses_radius() {
            let info = ThrowableInfo {
                damage: 5.0,
                speed: 100.0,
            };
            let mut obj = ThrownObject::template(&info);
            obj.launch(Vec2::ZERO, Vec2::new(1.0, 0.0));
            assert!(obj.hits(Vec2::new(15.0, 0.0), 20.0));
            assert!(!obj.hits(Vec2::new(25.0, 0.0), 20.0));
        }
    }

    mod ray_bolt_tests {
        use super::*;

        #[test]
        fn aim_clamps_destination_to_range() {
            let bolt = RayBolt::aim(
                Vec2::ZERO,
                Vec2::new(1000.0, 0.0),
                40.0,
                600.0,
                650.0,
                0.08,
            );
            assert!((bolt.destination.x - 600.0).abs() < 1e-3);
            assert!((bolt.time_remaining - 600.0 / 650.0).abs() < 1e-4);
        }

        #[test]
        fn point_blank_cursor_fires_at_full_range() {
            let origin = Vec2::new(50.0, 50.0);
            let bolt = RayBolt::aim(origin, origin, 40.0, 600.0, 650.0, 0.08);
            // Degenerate aim falls back to +X at max range.
            assert!((bolt.destination.x - 650.0).abs() < 1e-3);
            assert!((bolt.destination.y - 50.0).abs() < 1e-3);
        }

        #[test]
        fn short_shots_get_minimum_flight_time() {
            let bolt = RayBolt::aim(Vec2::ZERO, Vec2::new(10.0, 0.0), 40.0, 600.0, 650.0, 0.08);
            assert!((bolt.time_remaining - 0.08).abs() < 1e-6);
        }

        #[test]
        fn advance_moves_along_velocity() {
            let mut bolt = RayBolt::aim(Vec2::ZERO, Vec2::new(100.0, 0.0), 40.0, 600.0, 650.0, 0.08);
            bolt.advance(0.1);
            assert!((bolt.position.x - 65.0).abs() < 1e-3);
        }
    }
}
