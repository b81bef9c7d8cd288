//! Simulation constants and tuning parameters.

/// Ticks per whole second reported to time observers.
pub const TICKS_PER_SECOND: u64 = 120;

// --- Player ---

/// Player sprite size.
pub const PLAYER_WIDTH: f64 = 25.0;
pub const PLAYER_HEIGHT: f64 = 30.0;

/// Cooldown ticks that must strictly elapse between shots.
pub const SHOOT_COOLDOWN_TICKS: u32 = 45;

/// Cooldown timer value at game start. Equal to the threshold, so the first
/// shot is available after one tick.
pub const INITIAL_SHOOT_TIMER: u32 = 45;

// --- Enemies ---

pub const ENEMY_WIDTH: f64 = 30.0;
pub const ENEMY_HEIGHT: f64 = 30.0;
pub const ENEMY_LIVES: u32 = 1;

/// Initial horizontal velocity (moving left).
pub const ENEMY_INITIAL_X_VEL: f64 = -1.0;

/// Vertical drop when an enemy reaches a side wall.
pub const ENEMY_DESCENT: f64 = 25.0;

/// An enemy stops firing while this many of its projectiles are in flight.
pub const ENEMY_MAX_IN_FLIGHT: usize = 3;

/// Default 1-in-N chance per tick that an eligible enemy fires.
pub const DEFAULT_ENEMY_FIRE_ODDS: u32 = 120;

// --- Bunkers ---

pub const BUNKER_LIVES: u32 = 3;

// --- Projectiles ---

pub const PROJECTILE_WIDTH: f64 = 10.0;
pub const PROJECTILE_HEIGHT: f64 = 10.0;
pub const PROJECTILE_LIVES: u32 = 1;

/// Gap between an enemy's bottom edge and the projectiles it spawns.
pub const ENEMY_PROJECTILE_GAP: f64 = 2.0;

/// Gap between the player's top edge and the projectiles it spawns.
pub const PLAYER_PROJECTILE_GAP: f64 = 1.0;

// --- World bounds ---

/// Foreground entities are pushed this far inside the edge they overflowed.
pub const BOUNDARY_MARGIN: f64 = 1.0;
