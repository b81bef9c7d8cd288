//! Game engine: the single owner of simulation state.
//!
//! `GameEngine` owns the hecs ECS world and the ordered live list, runs all
//! systems once per `update()`, applies player commands, and captures or
//! restores the world through single-use snapshots. It has no view or
//! input dependency; collaborators drive it through commands and read it
//! through `frame_view()` and the query accessors.
//!
//! Entity additions and removals are staged. Changes staged by commands
//! between ticks are committed at the start of the next `update()`, before
//! any system runs; changes staged by systems are committed at the end of
//! the tick that staged them.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use invaders_core::commands::Command;
use invaders_core::components::EnemyProfile;
use invaders_core::config::GameConfig;
use invaders_core::constants::*;
use invaders_core::enums::{BulkDelete, EntityKind, GameOutcome};
use invaders_core::observer::{Observer, ScoreSubject, TimeSubject};
use invaders_core::state::{FrameView, PendingFlags};
use invaders_core::types::{Bounds, Position, SimTime};

use crate::components::Volley;
use crate::lookup;
use crate::memento::{Caretaker, ScalarState, Snapshot};
use crate::pending::StagedChanges;
use crate::record;
use crate::systems;
use crate::systems::enemy_ai::EnemyContext;
use crate::systems::player::MoveInput;
use crate::systems::view::FrameMeta;
use crate::world_setup;

/// Engine tuning that is not part of the game document.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed, same commands = same game.
    pub seed: u64,
    /// 1-in-N chance per tick that an eligible enemy fires. 0 disables it.
    pub enemy_fire_odds: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            enemy_fire_odds: DEFAULT_ENEMY_FIRE_ODDS,
        }
    }
}

/// The game engine. Owns the ECS world and all simulation state.
pub struct GameEngine {
    world: World,
    /// Renderable entities in insertion order, player included.
    live: Vec<Entity>,
    player: Entity,
    staged: StagedChanges,
    world_bounds: Bounds,
    time: SimTime,
    shoot_timer: u32,
    score: u32,
    input: MoveInput,
    rng: ChaCha8Rng,
    enemy_fire_odds: u32,
    score_subject: ScoreSubject,
    time_subject: TimeSubject,
    caretaker: Caretaker,
    /// Bulk-delete categories already used this game, by `BulkDelete::index`.
    deletions_used: [bool; 4],
    deletions_pending: [bool; 4],
    restore_pending: bool,
    /// Set by a snapshot, cleared by the restore it enables.
    restorable: bool,
    outcome: GameOutcome,
}

impl GameEngine {
    /// Build the world described by `config`.
    pub fn new(config: &GameConfig, sim: SimConfig) -> Self {
        let mut world = World::new();
        let (player, live) = world_setup::populate(&mut world, config);

        let mut engine = Self {
            world,
            live,
            player,
            staged: StagedChanges::default(),
            world_bounds: config.world_bounds(),
            time: SimTime::default(),
            shoot_timer: INITIAL_SHOOT_TIMER,
            score: 0,
            input: MoveInput::default(),
            rng: ChaCha8Rng::seed_from_u64(sim.seed),
            enemy_fire_odds: sim.enemy_fire_odds,
            score_subject: ScoreSubject::new(),
            time_subject: TimeSubject::new(),
            caretaker: Caretaker::default(),
            deletions_used: [false; 4],
            deletions_pending: [false; 4],
            restore_pending: false,
            restorable: false,
            outcome: GameOutcome::InProgress,
        };
        engine.refresh_outcome();

        tracing::info!(
            width = engine.world_bounds.width,
            height = engine.world_bounds.height,
            bunkers = config.bunkers.len(),
            enemies = config.enemies.len(),
            seed = sim.seed,
            "game engine created"
        );
        engine
    }

    /// Advance the simulation by exactly one tick.
    pub fn update(&mut self) {
        self.apply_staged();

        self.shoot_timer = self.shoot_timer.saturating_add(1);
        self.time.advance();
        if self.time.on_second_boundary() {
            self.time_subject.set(self.time.elapsed_secs());
        }

        // 1. Player movement
        systems::player::run(&mut self.world, self.player, self.input);
        // 2. Enemy march and fire
        systems::enemy_ai::run(
            &mut self.world,
            &self.live,
            &mut self.rng,
            &mut self.staged,
            EnemyContext {
                world_bounds: self.world_bounds,
                fire_odds: self.enemy_fire_odds,
            },
        );
        // 3. Projectile motion
        systems::projectiles::run(&mut self.world, &self.live, self.world_bounds);
        // 4. Collisions and scoring
        for award in systems::collision::run(&self.world, &self.live) {
            self.add_score(award.points);
        }
        // 5. Keep the foreground on screen
        systems::bounds::run(&mut self.world, &self.live, self.world_bounds);
        // 6. Stage the dead for removal
        systems::cleanup::run(&self.world, &self.live, self.player, &mut self.staged);

        self.apply_staged();
        self.refresh_outcome();
    }

    /// Apply a command. Returns whether it had any effect.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => {
                self.left_pressed();
                true
            }
            Command::MoveRight => {
                self.right_pressed();
                true
            }
            Command::StopLeft => {
                self.left_released();
                true
            }
            Command::StopRight => {
                self.right_released();
                true
            }
            Command::Shoot => self.shoot(),
            Command::Snapshot => {
                self.save_snapshot();
                true
            }
            Command::Restore => self.restore_snapshot(),
            Command::DeleteAll { category } => self.delete_all(category),
        }
    }

    // ---- Movement ----

    pub fn left_pressed(&mut self) {
        self.input.press_left();
    }

    pub fn right_pressed(&mut self) {
        self.input.press_right();
    }

    pub fn left_released(&mut self) {
        self.input.left = false;
    }

    pub fn right_released(&mut self) {
        self.input.right = false;
    }

    // ---- Shooting ----

    /// Fire a player projectile if the cooldown has elapsed and the player
    /// is alive. The shot joins the world at the next flush.
    pub fn shoot(&mut self) -> bool {
        if self.shoot_timer <= SHOOT_COOLDOWN_TICKS || !self.is_alive(self.player) {
            return false;
        }
        let Some(pos) = lookup::position_of(&self.world, self.player) else {
            return false;
        };
        let muzzle = Position::new(
            pos.x + PLAYER_WIDTH / 2.0 - PROJECTILE_WIDTH / 2.0,
            pos.y - PROJECTILE_HEIGHT - PLAYER_PROJECTILE_GAP,
        );
        self.staged.stage_spawn(record::player_projectile(muzzle), None);
        self.shoot_timer = 0;
        tracing::debug!(x = muzzle.x, y = muzzle.y, tick = self.time.tick, "player shot");
        true
    }

    // ---- Bulk deletes ----

    /// Remove every live entity in `category` and award its points.
    /// Each category works once per game; later calls return false.
    pub fn delete_all(&mut self, category: BulkDelete) -> bool {
        let idx = category.index();
        if self.deletions_used[idx] {
            return false;
        }

        let kind = category.target_kind();
        let strategy = category.strategy();
        let targets: Vec<Entity> = self
            .live
            .iter()
            .copied()
            .filter(|&entity| {
                !self.staged.is_staged_for_removal(entity)
                    && lookup::kind_of(&self.world, entity) == Some(kind)
                    && lookup::strategy_of(&self.world, entity) == Some(strategy)
            })
            .collect();

        match kind {
            EntityKind::Enemy => {
                // A doomed alien keeps its shots in flight but stops tracking them.
                for &enemy in &targets {
                    if let Ok(mut volley) = self.world.get::<&mut Volley>(enemy) {
                        volley.projectiles.clear();
                    }
                }
            }
            _ => {
                for (_entity, (profile, volley)) in
                    self.world.query_mut::<(&EnemyProfile, &mut Volley)>()
                {
                    if profile.strategy == strategy {
                        volley.projectiles.clear();
                    }
                }
            }
        }

        for &entity in &targets {
            self.staged.stage_removal(entity);
        }
        // Entities staged by a restore are not live yet but still count.
        let cancelled = self.staged.cancel_spawns(kind, strategy);

        let count = (targets.len() + cancelled) as u32;
        let points = count * category.points_per_entity();
        self.score += points;
        self.score_subject.set(self.score);

        self.deletions_used[idx] = true;
        self.deletions_pending[idx] = true;
        tracing::debug!(?category, removed = count, points, score = self.score, "bulk delete");
        true
    }

    pub fn delete_all_slow_projectiles(&mut self) -> bool {
        self.delete_all(BulkDelete::SlowProjectiles)
    }

    pub fn delete_all_fast_projectiles(&mut self) -> bool {
        self.delete_all(BulkDelete::FastProjectiles)
    }

    pub fn delete_all_slow_aliens(&mut self) -> bool {
        self.delete_all(BulkDelete::SlowAliens)
    }

    pub fn delete_all_fast_aliens(&mut self) -> bool {
        self.delete_all(BulkDelete::FastAliens)
    }

    // ---- Snapshot / restore ----

    /// Copy the current world and arm the next restore. The live world is
    /// not touched.
    pub fn snapshot(&mut self) -> Snapshot {
        let snapshot = Snapshot::capture(
            &self.world,
            &self.live,
            self.player,
            &self.staged,
            ScalarState {
                time: self.time,
                shoot_timer: self.shoot_timer,
                score: self.score,
            },
        );
        self.restorable = true;
        tracing::debug!(
            entities = snapshot.entity_count(),
            tick = self.time.tick,
            score = self.score,
            "snapshot captured"
        );
        snapshot
    }

    /// Capture a snapshot into the caretaker, replacing any earlier one.
    pub fn save_snapshot(&mut self) {
        let snapshot = self.snapshot();
        self.caretaker.save(snapshot);
    }

    /// Replace the world with `snapshot`. No-op (false) without a snapshot,
    /// with an empty one, or when no snapshot was taken since the last
    /// successful restore.
    ///
    /// Every live entity except the player is staged for removal and every
    /// snapshotted entity is staged for spawning; timer, tick count, score
    /// and player position are reset at once and re-broadcast.
    pub fn restore(&mut self, snapshot: Option<Snapshot>) -> bool {
        let Some(snapshot) = snapshot else {
            return false;
        };
        if !self.restorable || snapshot.is_empty() {
            return false;
        }
        self.restorable = false;

        for &entity in &self.live {
            if entity != self.player {
                self.staged.stage_removal(entity);
            }
        }
        self.staged.clear_additions();
        for record in snapshot.entities() {
            self.staged.stage_spawn(record.clone(), None);
        }

        self.time = snapshot.time();
        self.shoot_timer = snapshot.shoot_timer();
        self.score = snapshot.score();
        if let Ok(mut pos) = self.world.get::<&mut Position>(self.player) {
            *pos = snapshot.player_position();
        }

        self.score_subject.set(self.score);
        self.time_subject.set(self.time.elapsed_secs());
        self.restore_pending = true;

        tracing::debug!(
            entities = snapshot.entity_count(),
            tick = self.time.tick,
            score = self.score,
            "snapshot restored"
        );
        true
    }

    /// Restore from the caretaker, consuming its snapshot.
    pub fn restore_snapshot(&mut self) -> bool {
        let snapshot = self.caretaker.take();
        self.restore(snapshot)
    }

    pub fn has_snapshot(&self) -> bool {
        self.caretaker.has_snapshot()
    }

    // ---- One-shot flags ----

    pub fn is_deletion_pending(&self, category: BulkDelete) -> bool {
        self.deletions_pending[category.index()]
    }

    pub fn reset_deletion_pending(&mut self, category: BulkDelete) {
        self.deletions_pending[category.index()] = false;
    }

    pub fn is_restore_pending(&self) -> bool {
        self.restore_pending
    }

    pub fn reset_restore_pending(&mut self) {
        self.restore_pending = false;
    }

    pub fn pending_flags(&self) -> PendingFlags {
        PendingFlags {
            delete_slow_projectiles: self.is_deletion_pending(BulkDelete::SlowProjectiles),
            delete_fast_projectiles: self.is_deletion_pending(BulkDelete::FastProjectiles),
            delete_slow_aliens: self.is_deletion_pending(BulkDelete::SlowAliens),
            delete_fast_aliens: self.is_deletion_pending(BulkDelete::FastAliens),
            restore: self.restore_pending,
        }
    }

    // ---- Observers ----

    /// Receive the total score after every change.
    pub fn attach_score_observer(&mut self, observer: impl Observer<u32> + 'static) {
        self.score_subject.attach(observer);
    }

    /// Receive whole elapsed seconds every 120 ticks and after a restore.
    pub fn attach_time_observer(&mut self, observer: impl Observer<u64> + 'static) {
        self.time_subject.attach(observer);
    }

    // ---- Queries ----

    /// Live renderables in insertion order, player first.
    pub fn renderables(&self) -> &[Entity] {
        &self.live
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn entity_kind(&self, entity: Entity) -> Option<EntityKind> {
        lookup::kind_of(&self.world, entity)
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        lookup::position_of(&self.world, entity)
    }

    pub fn bounds(&self, entity: Entity) -> Option<Bounds> {
        lookup::bounds_of(&self.world, entity)
    }

    pub fn health(&self, entity: Entity) -> Option<u32> {
        lookup::lives_of(&self.world, entity)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        lookup::is_alive(&self.world, entity)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.time.tick
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn shoot_timer(&self) -> u32 {
        self.shoot_timer
    }

    pub fn world_bounds(&self) -> Bounds {
        self.world_bounds
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Build the view of the world after the last tick.
    pub fn frame_view(&self) -> FrameView {
        systems::view::build_frame_view(
            &self.world,
            &self.live,
            FrameMeta {
                time: self.time,
                score: self.score,
                outcome: self.outcome,
                pending: self.pending_flags(),
            },
        )
    }

    /// Spawn a record straight into the live list (for tests that need a
    /// precise layout).
    #[cfg(test)]
    pub fn spawn_for_test(&mut self, record: record::EntityRecord) -> Vec<Entity> {
        let spawned = record.spawn(&mut self.world);
        self.live.extend(spawned.iter().copied());
        spawned
    }

    /// Overwrite an entity's position (for tests).
    #[cfg(test)]
    pub fn place_for_test(&mut self, entity: Entity, position: Position) {
        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
            *pos = position;
        }
    }

    /// Overwrite an entity's remaining lives (for tests).
    #[cfg(test)]
    pub fn set_lives_for_test(&mut self, entity: Entity, lives: u32) {
        if let Ok(mut health) = self.world.get::<&mut invaders_core::components::Health>(entity) {
            health.lives = lives;
        }
    }

    fn add_score(&mut self, points: u32) {
        self.score += points;
        self.score_subject.set(self.score);
    }

    /// Commit staged changes to the world and live list.
    fn apply_staged(&mut self) {
        if self.staged.is_empty() {
            return;
        }
        let stats = self.staged.apply(&mut self.world, &mut self.live);
        tracing::trace!(
            tick = self.time.tick,
            added = stats.added,
            removed = stats.removed,
            live = self.live.len(),
            "flushed staged changes"
        );
    }

    fn refresh_outcome(&mut self) {
        let outcome = if !self.is_alive(self.player) {
            GameOutcome::Lost
        } else if !self.live.iter().any(|&entity| {
            self.entity_kind(entity) == Some(EntityKind::Enemy) && self.is_alive(entity)
        }) {
            GameOutcome::Won
        } else {
            GameOutcome::InProgress
        };

        if outcome != self.outcome {
            if outcome != GameOutcome::InProgress {
                tracing::info!(?outcome, tick = self.time.tick, score = self.score, "game over");
            }
            self.outcome = outcome;
        }
    }
}
