//! # Nightfall Core
//!
//! Deterministic, headless simulation core for a top-down survival arcade
//! game. The crate owns game rules only: rendering, audio, windowing, and
//! input capture live in the client that embeds it.
//!
//! ## Architecture
//!
//! - **[`config`]**: static data tables (monster roster, equipment,
//!   weapons, abilities) and the session tuning knobs.
//! - **[`session`]**: the per-frame controller. One [`session::Session`]
//!   owns the monster and projectile pools, score, and pause/death state,
//!   and advances everything in a fixed step order.
//! - **[`monster`] / [`projectile`] / [`weapon`] / [`ability`] /
//!   [`player`]**: the individual simulation pieces the session drives.
//! - **[`equipment`]**: stat resolution from the equipped loadout.
//! - **[`leaderboard`]**: `name;score` file persistence.
//!
//! The spatial substrate (tile grid and shape predicates) comes from the
//! `loam` crate, re-exported here.
//!
//! ## Quick Start
//!
//! ```
//! use nightfall_core::config::{standard_primary_weapons, MonsterTable, SessionConfig};
//! use nightfall_core::session::{FrameInput, Session};
//! use nightfall_core::weapon::PrimaryWeapon;
//! use nightfall_core::player::Player;
//! use loam::TileGrid;
//! use glam::Vec2;
//!
//! let grid = TileGrid::build(65, 65, 64.0, 64.0).unwrap();
//! let start = grid.world_extent() * 0.5;
//! let mut session = Session::new(
//!     grid,
//!     MonsterTable::standard(),
//!     SessionConfig::default(),
//!     1.0,
//!     42,
//! );
//! let mut player = Player::new(start, 200.0, 100.0, 1.0);
//! player.recompute_cell(session.grid());
//! let mut weapon = PrimaryWeapon::from_def(&standard_primary_weapons()[0]);
//!
//! let input = FrameInput {
//!     move_dir: Vec2::new(1.0, 0.0),
//!     ..FrameInput::default()
//! };
//! session.update(&mut player, &mut weapon, None, &input, 1.0 / 60.0);
//! assert!(player.position.x > start.x);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

// Re-export the spatial substrate
pub use loam;

pub mod ability;
pub mod config;
pub mod equipment;
pub mod leaderboard;
pub mod monster;
pub mod player;
pub mod projectile;
pub mod session;
pub mod weapon;

// Re-exports for convenience
pub use ability::AbilityState;
pub use config::{MonsterKind, MonsterTable, SessionConfig};
pub use equipment::apply_loadout;
pub use leaderboard::{Leaderboard, LeaderboardError};
pub use monster::Monster;
pub use player::Player;
pub use projectile::{RayBolt, ThrownObject};
pub use session::{FrameInput, InputButtons, Session};
pub use weapon::{AttackEffect, PrimaryWeapon};

#[cfg(test)]
mod tests;
