//! Collision eligibility and scoring rules.
//!
//! Both are table lookups keyed on entity kinds, independent of the order
//! in which a pair was enumerated.

use hecs::{Entity, World};

use invaders_core::components::{Bunker, Health};
use invaders_core::enums::{EntityKind, ProjectileStrategy};

/// What happens when two overlapping entities meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRule {
    /// Both take one point of damage.
    Damage,
    /// Friendly fire: nothing happens.
    Exempt,
}

/// Points awarded when `target` carrying `strategy` is destroyed by `attacker`.
#[derive(Debug, Clone, Copy)]
struct ScoreRule {
    target: EntityKind,
    attacker: EntityKind,
    strategy: ProjectileStrategy,
    points: u32,
}

const SCORE_TABLE: [ScoreRule; 4] = [
    ScoreRule {
        target: EntityKind::Enemy,
        attacker: EntityKind::PlayerProjectile,
        strategy: ProjectileStrategy::Fast,
        points: 4,
    },
    ScoreRule {
        target: EntityKind::Enemy,
        attacker: EntityKind::PlayerProjectile,
        strategy: ProjectileStrategy::Slow,
        points: 3,
    },
    ScoreRule {
        target: EntityKind::EnemyProjectile,
        attacker: EntityKind::PlayerProjectile,
        strategy: ProjectileStrategy::Fast,
        points: 2,
    },
    ScoreRule {
        target: EntityKind::EnemyProjectile,
        attacker: EntityKind::PlayerProjectile,
        strategy: ProjectileStrategy::Slow,
        points: 1,
    },
];

/// Rule for an unordered pair of kinds.
pub fn pair_rule(a: EntityKind, b: EntityKind) -> PairRule {
    use EntityKind::*;
    match (a, b) {
        // Two aliens that overlap still damage each other.
        (Enemy, EnemyProjectile)
        | (EnemyProjectile, Enemy)
        | (EnemyProjectile, EnemyProjectile) => PairRule::Exempt,
        _ => PairRule::Damage,
    }
}

/// Points for destroying `target`, if the table lists the combination.
pub fn score_for(
    target: EntityKind,
    strategy: Option<ProjectileStrategy>,
    attacker: EntityKind,
) -> Option<u32> {
    let strategy = strategy?;
    SCORE_TABLE
        .iter()
        .find(|rule| rule.target == target && rule.attacker == attacker && rule.strategy == strategy)
        .map(|rule| rule.points)
}

/// Remove one life from `entity`. Returns true if this hit destroyed it.
pub fn apply_hit(world: &World, entity: Entity) -> bool {
    let Ok(mut health) = world.get::<&mut Health>(entity) else {
        return false;
    };
    if health.lives == 0 {
        return false;
    }
    health.lives -= 1;
    if let Ok(mut bunker) = world.get::<&mut Bunker>(entity) {
        bunker.state = bunker.state.hit();
    }
    health.lives == 0
}
