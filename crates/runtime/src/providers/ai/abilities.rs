//! Ability selection with the aggressive point-blank fallback.

use rand::Rng;
use rand::seq::SliceRandom;
use skirmish_core::{Ability, AbilitySet, BehaviorMode, CombatConfig};

/// Chooses the ability to use at `distance`, or `None` to pass.
///
/// Abilities whose range covers the distance are picked uniformly at random.
/// When none reaches, an aggressive actor within
/// `attack_range + force_attack_tolerance` still swings with its first
/// ability so it can never stall at point-blank range.
pub fn select_ability<'a, R>(
    abilities: &'a AbilitySet,
    behavior: BehaviorMode,
    attack_range: f32,
    distance: f32,
    config: &CombatConfig,
    rng: &mut R,
) -> Option<&'a Ability>
where
    R: Rng + ?Sized,
{
    let in_range: Vec<&Ability> = abilities
        .iter()
        .filter(|ability| ability.reaches(distance))
        .collect();

    if let Some(ability) = in_range.choose(rng) {
        return Some(*ability);
    }

    let forced = behavior == BehaviorMode::Aggressive
        && distance <= attack_range + config.force_attack_tolerance;
    forced.then(|| abilities.first())
}
