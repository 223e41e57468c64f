//! Behavior-driven movement policy.

use skirmish_core::{BehaviorMode, CombatConfig};
use strum::Display;

/// Which way an actor wants to step this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum MovementIntent {
    Advance,
    Retreat,
    Hold,
}

/// Decides the movement intent from the actor's behavior and current distance.
///
/// - Aggressive actors advance whenever `distance > attack_range - epsilon`.
/// - Kiting actors retreat inside `safe_distance`, advance beyond
///   `kiting_advance_factor * attack_range`, and otherwise hold.
pub fn movement_intent(
    behavior: BehaviorMode,
    distance: f32,
    attack_range: f32,
    safe_distance: f32,
    config: &CombatConfig,
) -> MovementIntent {
    match behavior {
        BehaviorMode::Aggressive => {
            if distance > attack_range - config.attack_range_epsilon {
                MovementIntent::Advance
            } else {
                MovementIntent::Hold
            }
        }
        BehaviorMode::Kiting => {
            if distance < safe_distance {
                MovementIntent::Retreat
            } else if distance > config.kiting_advance_factor * attack_range {
                MovementIntent::Advance
            } else {
                MovementIntent::Hold
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggressive_closes_until_in_range() {
        let config = CombatConfig::default();
        let intent =
            |distance| movement_intent(BehaviorMode::Aggressive, distance, 60.0, 100.0, &config);

        assert_eq!(intent(200.0), MovementIntent::Advance);
        assert_eq!(intent(59.5), MovementIntent::Advance);
        assert_eq!(intent(59.0), MovementIntent::Hold);
        assert_eq!(intent(40.0), MovementIntent::Hold);
    }

    #[test]
    fn kiting_keeps_a_band() {
        let config = CombatConfig::default();
        let intent =
            |distance| movement_intent(BehaviorMode::Kiting, distance, 100.0, 120.0, &config);

        assert_eq!(intent(56.0), MovementIntent::Retreat);
        assert_eq!(intent(130.0), MovementIntent::Hold);
        assert_eq!(intent(150.0), MovementIntent::Hold);
        assert_eq!(intent(151.0), MovementIntent::Advance);
    }
}
