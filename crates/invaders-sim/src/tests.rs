//! Tests for the game engine, its systems, scoring, bulk deletes and
//! snapshot/restore.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use hecs::{Entity, World};
use serde_json::json;

use invaders_core::config::GameConfig;
use invaders_core::enums::*;
use invaders_core::types::{Bounds, Position};

use crate::components::Volley;
use crate::engine::{GameEngine, SimConfig};
use crate::record::{self, EntityRecord};
use crate::systems::{bounds, collision};

// ---- Fixtures ----

fn enemy(x: f64, y: f64, projectile: &str) -> serde_json::Value {
    json!({"position": {"x": x, "y": y}, "projectile": projectile})
}

fn config(enemies: Vec<serde_json::Value>, bunkers: Vec<serde_json::Value>) -> GameConfig {
    let doc = json!({
        "Game": {"size": {"x": 640.0, "y": 400.0}},
        "Player": {
            "colour": "green",
            "speed": 1.0,
            "lives": 3,
            "position": {"x": 300.0, "y": 350.0}
        },
        "Bunkers": bunkers,
        "Enemies": enemies
    });
    serde_json::from_value(doc).unwrap()
}

/// Engine with enemy fire disabled, so every tick is fully predictable.
fn quiet_engine(enemies: Vec<serde_json::Value>) -> GameEngine {
    GameEngine::new(
        &config(enemies, Vec::new()),
        SimConfig {
            seed: 7,
            enemy_fire_odds: 0,
        },
    )
}

/// Engine whose enemies fire every tick they are allowed to.
fn trigger_happy_engine(enemies: Vec<serde_json::Value>) -> GameEngine {
    GameEngine::new(
        &config(enemies, Vec::new()),
        SimConfig {
            seed: 7,
            enemy_fire_odds: 1,
        },
    )
}

fn kinds(engine: &GameEngine) -> Vec<EntityKind> {
    engine
        .renderables()
        .iter()
        .filter_map(|&e| engine.entity_kind(e))
        .collect()
}

fn count_kind(engine: &GameEngine, kind: EntityKind) -> usize {
    kinds(engine).into_iter().filter(|k| *k == kind).count()
}

fn find_kind(engine: &GameEngine, kind: EntityKind) -> Option<Entity> {
    engine
        .renderables()
        .iter()
        .copied()
        .find(|&e| engine.entity_kind(e) == Some(kind))
}

/// Kind, position and health of every renderable, in order.
fn layout(engine: &GameEngine) -> Vec<(EntityKind, Position, u32)> {
    engine
        .frame_view()
        .entities
        .into_iter()
        .map(|e| (e.kind, e.position, e.health))
        .collect()
}

fn record_scores(engine: &mut GameEngine) -> Rc<RefCell<Vec<u32>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.attach_score_observer(move |score: u32| sink.borrow_mut().push(score));
    log
}

fn record_times(engine: &mut GameEngine) -> Rc<RefCell<Vec<u64>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.attach_time_observer(move |secs: u64| sink.borrow_mut().push(secs));
    log
}

// ---- Construction ----

#[test]
fn test_populate_order_player_bunkers_enemies() {
    let cfg = config(
        vec![enemy(100.0, 100.0, "slow_straight")],
        vec![json!({"position": {"x": 50.0, "y": 250.0}, "size": {"x": 60.0, "y": 20.0}})],
    );
    let engine = GameEngine::new(&cfg, SimConfig::default());

    assert_eq!(
        kinds(&engine),
        vec![EntityKind::Player, EntityKind::Bunker, EntityKind::Enemy]
    );
    assert_eq!(engine.renderables()[0], engine.player());
    assert_eq!(engine.health(engine.player()), Some(3));
    assert_eq!(engine.tick_count(), 0);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.outcome(), GameOutcome::InProgress);
}

// ---- Shooting ----

#[test]
fn test_shoot_cooldown() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);

    // Timer starts at the threshold; it must strictly exceed it.
    assert!(!engine.shoot(), "first shot must wait one tick");
    engine.update();
    assert!(engine.shoot());
    assert!(!engine.shoot(), "cooldown restarts after a shot");

    for _ in 0..45 {
        engine.update();
    }
    assert_eq!(engine.shoot_timer(), 45);
    assert!(!engine.shoot());
    engine.update();
    assert!(engine.shoot());
}

#[test]
fn test_shot_spawns_centered_above_player_at_next_flush() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    engine.update();
    assert!(engine.shoot());
    assert_eq!(count_kind(&engine, EntityKind::PlayerProjectile), 0);

    engine.update();
    let shot = find_kind(&engine, EntityKind::PlayerProjectile).expect("shot spawned");
    // Spawned at (300 + 12.5 - 5, 350 - 10 - 1), then moved up one unit.
    assert_eq!(engine.position(shot), Some(Position::new(307.5, 338.0)));
}

#[test]
fn test_dead_player_cannot_shoot() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    engine.update();
    let player = engine.player();
    engine.set_lives_for_test(player, 0);
    assert!(!engine.shoot());
}

// ---- Movement ----

#[test]
fn test_player_moves_while_held() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    let player = engine.player();

    engine.left_pressed();
    engine.update();
    engine.update();
    assert_eq!(engine.position(player).unwrap().x, 298.0);

    // Pressing right cancels left.
    engine.right_pressed();
    engine.update();
    assert_eq!(engine.position(player).unwrap().x, 299.0);

    engine.right_released();
    engine.update();
    assert_eq!(engine.position(player).unwrap().x, 299.0);
}

#[test]
fn test_enemy_descends_and_reverses_at_wall() {
    let mut engine = quiet_engine(vec![enemy(32.0, 100.0, "slow_straight")]);
    let alien = find_kind(&engine, EntityKind::Enemy).unwrap();

    engine.update();
    engine.update();
    assert_eq!(engine.position(alien), Some(Position::new(30.0, 100.0)));

    engine.update();
    assert_eq!(engine.position(alien), Some(Position::new(31.0, 125.0)));

    engine.update();
    assert_eq!(engine.position(alien), Some(Position::new(32.0, 125.0)));
}

#[test]
fn test_enemy_holds_fire_at_three_in_flight() {
    let mut engine = trigger_happy_engine(vec![enemy(300.0, 100.0, "fast_straight")]);
    for _ in 0..6 {
        engine.update();
    }
    assert_eq!(count_kind(&engine, EntityKind::EnemyProjectile), 3);

    let alien = find_kind(&engine, EntityKind::Enemy).unwrap();
    let volley = engine.world().get::<&Volley>(alien).unwrap();
    assert_eq!(volley.projectiles.len(), 3);
}

// ---- Boundary clamp ----

#[test]
fn test_clamp_pushes_back_with_margin() {
    let world = Bounds::new(640.0, 400.0);
    let size = Bounds::new(25.0, 30.0);

    let mut pos = Position::new(630.0, 100.0);
    bounds::clamp(&mut pos, size, world);
    assert_eq!(pos, Position::new(614.0, 100.0));

    let mut pos = Position::new(-5.0, -3.0);
    bounds::clamp(&mut pos, size, world);
    assert_eq!(pos, Position::new(1.0, 1.0));

    let mut pos = Position::new(200.0, 390.0);
    bounds::clamp(&mut pos, size, world);
    assert_eq!(pos, Position::new(200.0, 369.0));

    let mut pos = Position::new(200.0, 200.0);
    bounds::clamp(&mut pos, size, world);
    assert_eq!(pos, Position::new(200.0, 200.0), "inside entities are untouched");
}

#[test]
fn test_player_clamped_at_left_edge() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    let player = engine.player();
    engine.place_for_test(player, Position::new(0.5, 350.0));

    engine.left_pressed();
    engine.update();
    assert_eq!(engine.position(player).unwrap().x, 1.0);
}

// ---- Collisions and scoring ----

#[test]
fn test_collision_system_damages_both_and_scores() {
    let mut world = World::new();
    let mut live = Vec::new();
    live.extend(
        EntityRecord::Enemy(record::EnemyRecord {
            position: Position::new(100.0, 100.0),
            bounds: Bounds::new(30.0, 30.0),
            lives: 1,
            strategy: ProjectileStrategy::Fast,
            x_vel: -1.0,
            projectiles: Vec::new(),
        })
        .spawn(&mut world),
    );
    live.extend(record::player_projectile(Position::new(110.0, 120.0)).spawn(&mut world));

    let awards = collision::run(&world, &live);

    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].target, EntityKind::Enemy);
    assert_eq!(awards[0].points, 4);
    for entity in live {
        assert!(!crate::lookup::is_alive(&world, entity), "both sides take damage");
    }
}

#[test]
fn test_collision_system_exempts_enemy_fire_only() {
    let mut world = World::new();
    let alien = EntityRecord::Enemy(record::EnemyRecord {
        position: Position::new(100.0, 100.0),
        bounds: Bounds::new(30.0, 30.0),
        lives: 1,
        strategy: ProjectileStrategy::Slow,
        x_vel: -1.0,
        projectiles: Vec::new(),
    });
    let aliens: Vec<Entity> = [alien.spawn(&mut world), alien.spawn(&mut world)].concat();
    let shots: Vec<Entity> = [
        record::enemy_projectile(Position::new(105.0, 105.0), ProjectileStrategy::Slow)
            .spawn(&mut world),
        record::enemy_projectile(Position::new(108.0, 108.0), ProjectileStrategy::Fast)
            .spawn(&mut world),
    ]
    .concat();
    let live: Vec<Entity> = aliens.iter().chain(shots.iter()).copied().collect();

    let awards = collision::run(&world, &live);

    assert!(awards.is_empty(), "alien collisions score nothing");
    for &entity in &aliens {
        assert_eq!(
            crate::lookup::lives_of(&world, entity),
            Some(0),
            "overlapping aliens damage each other"
        );
    }
    for &entity in &shots {
        assert!(
            crate::lookup::is_alive(&world, entity),
            "enemy shots never hurt aliens or each other"
        );
    }
}

#[test]
fn test_pair_rule_table() {
    use crate::rules::{pair_rule, PairRule};
    use EntityKind::*;

    let exempt = [
        (Enemy, EnemyProjectile),
        (EnemyProjectile, Enemy),
        (EnemyProjectile, EnemyProjectile),
    ];
    for (a, b) in exempt {
        assert_eq!(pair_rule(a, b), PairRule::Exempt, "{a} vs {b}");
    }
    let damaging = [
        (Enemy, Enemy),
        (Enemy, PlayerProjectile),
        (Enemy, Bunker),
        (Enemy, Player),
        (EnemyProjectile, Player),
        (EnemyProjectile, Bunker),
        (EnemyProjectile, PlayerProjectile),
        (PlayerProjectile, Bunker),
    ];
    for (a, b) in damaging {
        assert_eq!(pair_rule(a, b), PairRule::Damage, "{a} vs {b}");
    }
}

#[test]
fn test_player_shot_destroys_fast_enemy_for_four_points() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "fast_straight")]);
    let scores = record_scores(&mut engine);
    engine.spawn_for_test(record::player_projectile(Position::new(105.0, 110.0)));

    engine.update();

    assert_eq!(engine.score(), 4);
    assert_eq!(*scores.borrow(), vec![4]);
    assert_eq!(kinds(&engine), vec![EntityKind::Player], "both removed at the flush");
    assert_eq!(engine.outcome(), GameOutcome::Won);
}

#[test]
fn test_player_shot_destroys_slow_enemy_for_three_points() {
    let mut engine = quiet_engine(vec![
        enemy(100.0, 100.0, "slow_straight"),
        enemy(400.0, 100.0, "fast_straight"),
    ]);
    engine.spawn_for_test(record::player_projectile(Position::new(105.0, 110.0)));

    engine.update();

    assert_eq!(engine.score(), 3);
    assert_eq!(count_kind(&engine, EntityKind::Enemy), 1);
    assert_eq!(engine.outcome(), GameOutcome::InProgress);
}

#[test]
fn test_player_shot_destroys_enemy_projectiles() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    engine.spawn_for_test(record::enemy_projectile(
        Position::new(200.0, 200.0),
        ProjectileStrategy::Slow,
    ));
    engine.spawn_for_test(record::player_projectile(Position::new(200.0, 212.0)));
    engine.spawn_for_test(record::enemy_projectile(
        Position::new(500.0, 200.0),
        ProjectileStrategy::Fast,
    ));
    engine.spawn_for_test(record::player_projectile(Position::new(500.0, 213.0)));

    engine.update();

    assert_eq!(engine.score(), 1 + 2);
    assert_eq!(count_kind(&engine, EntityKind::EnemyProjectile), 0);
    assert_eq!(count_kind(&engine, EntityKind::PlayerProjectile), 0);
}

#[test]
fn test_enemy_projectile_damages_bunker_tier() {
    let cfg = config(
        vec![enemy(100.0, 100.0, "slow_straight")],
        vec![json!({"position": {"x": 400.0, "y": 200.0}, "size": {"x": 50.0, "y": 20.0}})],
    );
    let mut engine = GameEngine::new(
        &cfg,
        SimConfig {
            seed: 1,
            enemy_fire_odds: 0,
        },
    );
    engine.spawn_for_test(record::enemy_projectile(
        Position::new(410.0, 190.0),
        ProjectileStrategy::Fast,
    ));

    engine.update();

    let bunker = engine
        .frame_view()
        .entities
        .into_iter()
        .find(|e| e.kind == EntityKind::Bunker)
        .unwrap();
    assert_eq!(bunker.health, 2);
    assert_eq!(bunker.bunker_state, Some(BunkerState::Damaged));
    assert_eq!(engine.score(), 0, "no points for enemy fire");
    assert_eq!(count_kind(&engine, EntityKind::EnemyProjectile), 0);
}

#[test]
fn test_enemy_projectile_kills_player() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    let player = engine.player();
    engine.set_lives_for_test(player, 1);
    engine.spawn_for_test(record::enemy_projectile(
        Position::new(305.0, 342.0),
        ProjectileStrategy::Fast,
    ));

    engine.update();

    assert_eq!(engine.outcome(), GameOutcome::Lost);
    assert!(!engine.is_alive(player));
    assert!(
        engine.renderables().contains(&player),
        "dead player stays visible"
    );
}

#[test]
fn test_no_enemies_is_won() {
    let engine = quiet_engine(Vec::new());
    assert_eq!(engine.outcome(), GameOutcome::Won);
}

#[test]
fn test_player_projectile_spent_at_top() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    engine.spawn_for_test(record::player_projectile(Position::new(500.0, 11.0)));

    engine.update();

    assert_eq!(count_kind(&engine, EntityKind::PlayerProjectile), 0);
    assert_eq!(engine.score(), 0);
}

// ---- Bulk deletes ----

#[test]
fn test_delete_slow_aliens_once_per_game() {
    let mut engine = quiet_engine(vec![
        enemy(100.0, 100.0, "slow_straight"),
        enemy(200.0, 100.0, "slow_straight"),
        enemy(300.0, 100.0, "fast_straight"),
    ]);
    let scores = record_scores(&mut engine);

    assert!(engine.delete_all_slow_aliens());
    assert_eq!(engine.score(), 6);
    assert_eq!(*scores.borrow(), vec![6], "one notification per command");
    assert!(engine.is_deletion_pending(BulkDelete::SlowAliens));
    assert!(engine.frame_view().pending.delete_slow_aliens);

    engine.reset_deletion_pending(BulkDelete::SlowAliens);
    assert!(!engine.is_deletion_pending(BulkDelete::SlowAliens));

    assert!(!engine.delete_all_slow_aliens(), "latched after first use");
    assert_eq!(engine.score(), 6);
    assert!(!engine.is_deletion_pending(BulkDelete::SlowAliens));

    engine.update();
    assert_eq!(count_kind(&engine, EntityKind::Enemy), 1);
    let survivor = find_kind(&engine, EntityKind::Enemy).unwrap();
    assert_eq!(
        engine.frame_view().entities[1].strategy,
        Some(ProjectileStrategy::Fast)
    );
    assert!(engine.is_alive(survivor));
}

#[test]
fn test_delete_with_nothing_to_remove_still_latches() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    assert!(engine.delete_all_fast_projectiles());
    assert_eq!(engine.score(), 0);
    assert!(engine.is_deletion_pending(BulkDelete::FastProjectiles));
    assert!(!engine.delete_all_fast_projectiles());
}

#[test]
fn test_delete_projectiles_by_strategy() {
    let mut engine = trigger_happy_engine(vec![
        enemy(100.0, 100.0, "slow_straight"),
        enemy(400.0, 100.0, "fast_straight"),
    ]);
    engine.update();
    engine.update();
    assert_eq!(count_kind(&engine, EntityKind::EnemyProjectile), 4);

    assert!(engine.delete_all_fast_projectiles());
    assert_eq!(engine.score(), 2 * 2);

    let fast_alien = engine
        .renderables()
        .iter()
        .copied()
        .find(|&e| {
            engine.entity_kind(e) == Some(EntityKind::Enemy)
                && engine.position(e).unwrap().x > 300.0
        })
        .unwrap();
    assert!(engine
        .world()
        .get::<&Volley>(fast_alien)
        .unwrap()
        .projectiles
        .is_empty());

    assert!(engine.delete_all_slow_projectiles());
    assert_eq!(engine.score(), 4 + 2);
}

#[test]
fn test_deleted_alien_stops_tracking_its_shots() {
    let mut engine = trigger_happy_engine(vec![enemy(300.0, 100.0, "slow_straight")]);
    engine.update();
    let alien = find_kind(&engine, EntityKind::Enemy).unwrap();
    assert_eq!(engine.world().get::<&Volley>(alien).unwrap().projectiles.len(), 1);

    assert!(engine.delete_all_slow_aliens());
    assert!(engine.world().get::<&Volley>(alien).unwrap().projectiles.is_empty());
    assert_eq!(engine.score(), 3);

    engine.update();
    assert!(!engine.renderables().contains(&alien));
    assert_eq!(
        count_kind(&engine, EntityKind::EnemyProjectile),
        1,
        "shots already fired stay in flight"
    );
}

// ---- Snapshot / restore ----

#[test]
fn test_restore_without_snapshot_is_noop() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    for _ in 0..5 {
        engine.update();
    }
    let before = engine.frame_view();

    assert!(!engine.has_snapshot());
    assert!(!engine.restore_snapshot());
    assert!(!engine.restore(None));
    assert!(!engine.is_restore_pending());
    assert_eq!(engine.frame_view(), before);
}

#[test]
fn test_snapshot_is_single_use() {
    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "slow_straight")]);
    engine.update();
    engine.save_snapshot();
    assert!(engine.has_snapshot());

    assert!(engine.restore_snapshot());
    assert!(!engine.has_snapshot());
    assert!(engine.is_restore_pending());
    engine.reset_restore_pending();

    engine.update();
    let before = layout(&engine);
    assert!(!engine.restore_snapshot(), "second restore without a snapshot");
    assert!(!engine.is_restore_pending());
    assert_eq!(layout(&engine), before);
}

#[test]
fn test_restore_stages_exactly_the_snapshot() {
    let mut engine = trigger_happy_engine(vec![
        enemy(100.0, 100.0, "slow_straight"),
        enemy(400.0, 100.0, "fast_straight"),
    ]);
    engine.update();
    engine.update();

    let expected = engine.snapshot();
    engine.save_snapshot();
    assert_eq!(expected.entity_count(), 2 + 4, "shots ride with their enemy");

    for _ in 0..20 {
        engine.update();
    }
    engine.delete_all_fast_aliens();

    assert!(engine.restore_snapshot());
    assert_eq!(engine.snapshot(), expected);
}

#[test]
fn test_snapshot_restore_round_trip() {
    let enemies = || {
        vec![
            enemy(100.0, 100.0, "slow_straight"),
            enemy(400.0, 100.0, "fast_straight"),
        ]
    };
    let mut engine = quiet_engine(enemies());
    let mut reference = quiet_engine(enemies());
    let times = record_times(&mut engine);
    let scores = record_scores(&mut engine);

    for _ in 0..10 {
        engine.update();
        reference.update();
    }
    let player = engine.player();
    let saved_position = engine.position(player).unwrap();
    let old_handles: HashSet<Entity> = engine.renderables().iter().copied().collect();
    engine.save_snapshot();

    // Mutate: move the player and destroy an enemy.
    engine.left_pressed();
    for _ in 0..5 {
        engine.update();
    }
    engine.left_released();
    assert!(engine.delete_all_fast_aliens());
    engine.update();
    assert_eq!(engine.score(), 4);
    assert_ne!(engine.position(player), Some(saved_position));

    assert!(engine.restore_snapshot());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.tick_count(), 10);
    assert_eq!(engine.position(player), Some(saved_position));
    assert_eq!(*scores.borrow(), vec![4, 0]);
    assert_eq!(*times.borrow(), vec![0]);

    engine.update();
    reference.update();
    assert_eq!(layout(&engine), layout(&reference));
    assert_eq!(engine.tick_count(), reference.tick_count());

    for &entity in engine.renderables() {
        if entity != player {
            assert!(
                !old_handles.contains(&entity),
                "restored entities must be fresh"
            );
        }
    }
}

#[test]
fn test_snapshot_unaffected_by_later_ticks() {
    let mut engine = quiet_engine(vec![enemy(300.0, 100.0, "slow_straight")]);
    engine.update();
    let snapshot = engine.snapshot();
    let frozen = snapshot.entities().to_vec();

    for _ in 0..30 {
        engine.update();
    }
    assert_eq!(snapshot.entities(), frozen.as_slice());
    assert_eq!(snapshot.entities()[0].position(), Position::new(299.0, 100.0));
}

#[test]
fn test_snapshot_skips_staged_removals() {
    let mut engine = quiet_engine(vec![
        enemy(100.0, 100.0, "slow_straight"),
        enemy(400.0, 100.0, "fast_straight"),
    ]);
    engine.delete_all_slow_aliens();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.entities().len(), 1);
    assert_eq!(snapshot.entities()[0].kind(), EntityKind::Enemy);
    assert_eq!(snapshot.score(), 3);
}

#[test]
fn test_restore_needs_fresh_snapshot() {
    let mut engine = quiet_engine(vec![enemy(300.0, 100.0, "slow_straight")]);
    engine.update();
    let first = engine.snapshot();
    let second = engine.snapshot();

    assert!(engine.restore(Some(first)));
    engine.reset_restore_pending();
    for _ in 0..11 {
        engine.update();
    }
    let before = layout(&engine);
    assert_eq!(engine.tick_count(), 12);

    assert!(!engine.restore(Some(second)), "earlier snapshot is spent");
    assert!(!engine.is_restore_pending());
    assert_eq!(engine.tick_count(), 12);
    engine.update();
    assert_eq!(engine.tick_count(), 13);
    assert_ne!(layout(&engine), before, "world keeps marching");

    let third = engine.snapshot();
    assert!(engine.restore(Some(third)));
    assert_eq!(engine.tick_count(), 13);
}

#[test]
fn test_delete_after_restore_reaches_restored_aliens() {
    let mut engine = quiet_engine(vec![
        enemy(100.0, 100.0, "slow_straight"),
        enemy(200.0, 100.0, "slow_straight"),
        enemy(300.0, 100.0, "fast_straight"),
    ]);
    engine.update();
    engine.save_snapshot();
    for _ in 0..5 {
        engine.update();
    }

    assert!(engine.restore_snapshot());
    assert!(engine.delete_all_slow_aliens());
    assert_eq!(engine.score(), 6);

    engine.update();
    assert_eq!(count_kind(&engine, EntityKind::Enemy), 1);
    assert_eq!(
        engine.frame_view().entities[1].strategy,
        Some(ProjectileStrategy::Fast)
    );
}

#[test]
fn test_delete_after_restore_reaches_restored_shots() {
    let mut engine = trigger_happy_engine(vec![
        enemy(100.0, 100.0, "slow_straight"),
        enemy(400.0, 100.0, "fast_straight"),
    ]);
    engine.update();
    engine.update();
    engine.save_snapshot();

    assert!(engine.restore_snapshot());
    assert!(engine.delete_all_slow_projectiles());
    assert_eq!(engine.score(), 2);

    let staged = engine.snapshot();
    assert_eq!(staged.entity_count(), 2 + 2);
    for entity in staged.entities() {
        if let EntityRecord::Enemy(alien) = entity {
            assert!(alien
                .projectiles
                .iter()
                .all(|p| p.strategy == ProjectileStrategy::Fast));
        }
    }
}

// ---- Time ----

#[test]
fn test_time_notified_each_second() {
    let mut engine = quiet_engine(vec![enemy(300.0, 100.0, "slow_straight")]);
    let times = record_times(&mut engine);

    for _ in 0..240 {
        engine.update();
    }

    assert_eq!(*times.borrow(), vec![1, 2]);
    assert_eq!(engine.frame_view().elapsed_secs, 2);
}

// ---- Commands and determinism ----

#[test]
fn test_execute_dispatches_commands() {
    use invaders_core::commands::Command;

    let mut engine = quiet_engine(vec![enemy(100.0, 100.0, "fast_straight")]);
    assert!(engine.execute(Command::MoveRight));
    engine.update();
    assert_eq!(engine.position(engine.player()).unwrap().x, 301.0);
    assert!(engine.execute(Command::StopRight));

    assert!(engine.execute(Command::Shoot));
    assert!(!engine.execute(Command::Shoot));
    assert!(!engine.execute(Command::Restore));
    assert!(engine.execute(Command::Snapshot));
    assert!(engine.execute(Command::DeleteAll {
        category: BulkDelete::FastAliens
    }));
    assert!(!engine.execute(Command::DeleteAll {
        category: BulkDelete::FastAliens
    }));
    assert!(engine.execute(Command::Restore));
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_determinism_same_seed() {
    let make = || {
        GameEngine::new(
            &config(
                vec![
                    enemy(100.0, 50.0, "slow_straight"),
                    enemy(300.0, 50.0, "fast_straight"),
                    enemy(500.0, 50.0, "fast_straight"),
                ],
                Vec::new(),
            ),
            SimConfig {
                seed: 12345,
                enemy_fire_odds: 10,
            },
        )
    };
    let mut engine_a = make();
    let mut engine_b = make();

    for _ in 0..300 {
        engine_a.update();
        engine_b.update();
        let json_a = serde_json::to_string(&layout(&engine_a)).unwrap();
        let json_b = serde_json::to_string(&layout(&engine_b)).unwrap();
        assert_eq!(json_a, json_b, "runs diverged with the same seed");
    }
}
