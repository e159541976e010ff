//! Multi-frame scenarios through the full session loop.

use glam::Vec2;

use super::helpers::*;
use crate::config::{standard_armors, standard_helmets, AbilityKind};
use crate::equipment::apply_loadout;
use crate::leaderboard::Leaderboard;
use crate::session::InputButtons;

#[test]
fn thirty_seconds_of_survival_holds_the_invariants() {
    let mut session = standard_session(8);
    let mut player = centered_player(&session);
    let mut weapon = melee_weapon();
    let ability = ability_of(AbilityKind::PulsingArea);

    let mut last_score = 0;
    for frame in 0..1800 {
        let mut input = moving_input(Vec2::new((frame % 120) as f32 / 60.0 - 1.0, 0.5));
        if frame % 30 == 0 {
            input.buttons |= InputButtons::ATTACK;
            input.cursor_world = player.position + Vec2::new(80.0, 20.0);
        }
        if frame % 600 == 0 {
            input.buttons |= InputButtons::ABILITY;
        }
        session.update(&mut player, &mut weapon, Some(&ability), &input, DT);

        assert!(session.active_monster_count() <= session.config().monster_capacity);
        assert!(session.score() >= last_score, "score went backwards");
        last_score = session.score();
        assert!(player.health >= 0.0);
        assert!(player.health <= player.max_health + 1e-3);

        let extent = session.grid().world_extent();
        assert!(player.position.x >= 0.0 && player.position.x < extent.x);
        assert!(player.position.y >= 0.0 && player.position.y < extent.y);

        if session.is_player_dead() {
            break;
        }
    }
}

#[test]
fn ray_runs_score_through_the_full_loop() {
    let mut session = standard_session(21);
    let mut player = centered_player(&session);
    let mut weapon = ray_weapon();

    // Kite in a circle and fire at the nearest monster every reload.
    let mut scored = false;
    for frame in 0..3600 {
        let angle = frame as f32 * 0.02;
        let mut input = moving_input(Vec2::new(angle.cos(), angle.sin()));
        if weapon.is_ready() {
            if let Some(nearest) = session
                .monsters()
                .map(|m| m.position)
                .min_by(|a, b| {
                    let da = (*a - player.position).length();
                    let db = (*b - player.position).length();
                    da.partial_cmp(&db).unwrap()
                })
            {
                input.buttons |= InputButtons::ATTACK;
                input.cursor_world = nearest;
            }
        }
        session.update(&mut player, &mut weapon, None, &input, DT);
        if session.score() > 0 {
            scored = true;
            break;
        }
        if session.is_player_dead() {
            break;
        }
    }
    assert!(scored, "no ray kill landed in a minute of play");
}

#[test]
fn loadout_changes_flow_into_the_session() {
    let mut session = standard_session(3);
    let mut player = centered_player(&session);
    let mut weapon = melee_weapon();

    let armors = standard_armors();
    let helmets = standard_helmets();
    let regen = apply_loadout(
        &mut player,
        Some(&armors[0]),
        Some(&helmets[1]), // regen helmet
        100.0,
        Some(&mut weapon),
    );
    session.set_regen_rate(regen);

    player.health = player.max_health * 0.5;
    let before = player.health;
    for _ in 0..60 {
        session.update(&mut player, &mut weapon, None, &idle_input(), DT);
    }
    // One second at 1.5 hp/s, minus any monster contact (none can reach yet).
    assert!((player.health - before - regen).abs() < 0.05);
}

#[test]
fn a_finished_run_lands_on_the_leaderboard() {
    let mut session = standard_session(4);
    let mut player = centered_player(&session);
    let mut weapon = melee_weapon();
    weapon.damage = 1000.0;

    // Hunt until something dies, then end the run.
    for _ in 0..1800 {
        let mut input = idle_input();
        if let Some(nearest) = session.monsters().map(|m| m.position).next() {
            let to = nearest - player.position;
            input.move_dir = to;
            if weapon.is_ready() && to.length() < weapon.max_range {
                input.buttons |= InputButtons::ATTACK;
                input.cursor_world = nearest;
            }
        }
        session.update(&mut player, &mut weapon, None, &input, DT);
        if session.score() > 0 {
            break;
        }
    }
    assert!(session.score() > 0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    Leaderboard::append(&path, "runner", session.score()).unwrap();
    let board = Leaderboard::load(&path).unwrap();
    assert_eq!(board.top(1)[0].score, session.score());
}

#[test]
fn session_survives_reset_and_replays() {
    let mut session = standard_session(6);
    let mut player = centered_player(&session);
    let mut weapon = melee_weapon();

    for _ in 0..300 {
        session.update(&mut player, &mut weapon, None, &idle_input(), DT);
    }
    let start = session.grid().world_extent() * 0.5;
    session.reset(&mut player, start);
    player.health = player.max_health;

    for _ in 0..300 {
        session.update(&mut player, &mut weapon, None, &idle_input(), DT);
    }
    assert!(session.total_time() > 4.9);
    assert!(session.active_monster_count() > 0);
    assert!(!session.menu_requested());
}

#[test]
fn pause_round_trip_resumes_the_run() {
    let mut session = standard_session(2);
    let mut player = centered_player(&session);
    let mut weapon = melee_weapon();

    for _ in 0..60 {
        session.update(&mut player, &mut weapon, None, &idle_input(), DT);
    }
    let frozen_time = {
        let mut input = idle_input();
        input.buttons = InputButtons::PAUSE;
        session.update(&mut player, &mut weapon, None, &input, DT);
        session.total_time()
    };
    for _ in 0..120 {
        session.update(&mut player, &mut weapon, None, &idle_input(), DT);
    }
    assert!((session.total_time() - frozen_time).abs() < f32::EPSILON);

    let mut input = idle_input();
    input.buttons = InputButtons::PAUSE;
    session.update(&mut player, &mut weapon, None, &input, DT);
    session.update(&mut player, &mut weapon, None, &idle_input(), DT);
    assert!(session.total_time() > frozen_time);
}
