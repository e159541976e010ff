//! Shared factories for the cross-module tests.

use glam::Vec2;
use loam::TileGrid;

use crate::config::{
    standard_abilities, standard_primary_weapons, AbilityKind, MonsterTable, SecondaryAbilityDef,
    SessionConfig,
};
use crate::player::Player;
use crate::session::{FrameInput, Session};
use crate::weapon::PrimaryWeapon;

/// Fixed frame step used by every multi-frame test.
pub const DT: f32 = 1.0 / 60.0;

/// A standard 65x65 session with the default tuning and roster.
pub fn standard_session(seed: u64) -> Session {
    let grid = TileGrid::build(65, 65, 64.0, 64.0).unwrap();
    Session::new(
        grid,
        MonsterTable::standard(),
        SessionConfig::default(),
        1.0,
        seed,
    )
}

/// A player parked at the center of the session's world.
pub fn centered_player(session: &Session) -> Player {
    let center = session.grid().world_extent() * 0.5;
    let mut player = Player::new(center, 200.0, 100.0, 1.0);
    player.recompute_cell(session.grid());
    player
}

/// The first melee weapon from the standard roster.
pub fn melee_weapon() -> PrimaryWeapon {
    PrimaryWeapon::from_def(&standard_primary_weapons()[0])
}

/// The projectile weapon from the standard roster.
pub fn ray_weapon() -> PrimaryWeapon {
    let defs = standard_primary_weapons();
    let def = defs
        .iter()
        .find(|d| matches!(d.shape, crate::config::AttackShape::Projectile))
        .unwrap();
    PrimaryWeapon::from_def(def)
}

/// The standard ability of the given kind.
pub fn ability_of(kind: AbilityKind) -> SecondaryAbilityDef {
    standard_abilities()
        .into_iter()
        .find(|a| a.kind == kind)
        .unwrap()
}

/// An input frame with nothing pressed.
pub fn idle_input() -> FrameInput {
    FrameInput::default()
}

/// An input frame moving in `dir` with nothing pressed.
pub fn moving_input(dir: Vec2) -> FrameInput {
    FrameInput {
        move_dir: dir,
        ..FrameInput::default()
    }
}
