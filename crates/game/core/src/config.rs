use std::time::Duration;

use crate::combat::normalize_token;
use crate::error::{ErrorSeverity, GameError};

/// Tunables that would leave every reaction window impossible to arm.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a positive number of seconds, got {value}")]
    NonPositiveWindow { field: &'static str, value: f32 },

    #[error("{field} must not be blank")]
    BlankToken { field: &'static str },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::NonPositiveWindow { .. } => "CONFIG_NON_POSITIVE_WINDOW",
            ConfigError::BlankToken { .. } => "CONFIG_BLANK_TOKEN",
        }
    }
}

/// Combat tunables.
///
/// The melee/ranged split (`melee_threshold`) and the forced-attack slack
/// (`force_attack_tolerance`) only encode "short range vs long range" and
/// "close enough to swing anyway"; content may retune them freely.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Abilities with a range below this are parried; the rest are dodged.
    pub melee_threshold: f32,
    /// Aggressive actors force their first ability when the target is within
    /// `attack_range + force_attack_tolerance` and nothing else reaches.
    pub force_attack_tolerance: f32,
    /// Aggressive actors stop advancing once within `attack_range - epsilon`.
    pub attack_range_epsilon: f32,
    /// Kiting actors advance when farther than `factor * attack_range`.
    pub kiting_advance_factor: f32,

    pub melee_token: String,
    pub ranged_token: String,
    /// Reaction window for parries, in seconds.
    pub melee_reaction_secs: f32,
    /// Reaction window for dodges, in seconds.
    pub ranged_reaction_secs: f32,

    /// Pause when an actor has no target, in seconds.
    pub idle_delay_secs: f32,
    /// Pause when an actor passes its attack, in seconds.
    pub pass_delay_secs: f32,

    /// Score awarded for a successful reaction.
    pub parry_score: u32,
    /// Score awarded per player hit.
    pub player_hit_score: u32,
    pub player_max_action_points: u32,
}

impl CombatConfig {
    pub const DEFAULT_MELEE_THRESHOLD: f32 = 150.0;
    pub const DEFAULT_FORCE_ATTACK_TOLERANCE: f32 = 20.0;
    pub const DEFAULT_ATTACK_RANGE_EPSILON: f32 = 1.0;
    pub const DEFAULT_KITING_ADVANCE_FACTOR: f32 = 1.5;
    pub const DEFAULT_MELEE_TOKEN: &'static str = "parry";
    pub const DEFAULT_RANGED_TOKEN: &'static str = "dodge";
    pub const DEFAULT_MELEE_REACTION_SECS: f32 = 1.5;
    pub const DEFAULT_RANGED_REACTION_SECS: f32 = 2.0;
    pub const DEFAULT_IDLE_DELAY_SECS: f32 = 0.5;
    pub const DEFAULT_PASS_DELAY_SECS: f32 = 0.3;
    pub const DEFAULT_PARRY_SCORE: u32 = 10;
    pub const DEFAULT_PLAYER_HIT_SCORE: u32 = 5;
    pub const DEFAULT_PLAYER_MAX_ACTION_POINTS: u32 = 6;

    pub fn new() -> Self {
        Self {
            melee_threshold: Self::DEFAULT_MELEE_THRESHOLD,
            force_attack_tolerance: Self::DEFAULT_FORCE_ATTACK_TOLERANCE,
            attack_range_epsilon: Self::DEFAULT_ATTACK_RANGE_EPSILON,
            kiting_advance_factor: Self::DEFAULT_KITING_ADVANCE_FACTOR,
            melee_token: Self::DEFAULT_MELEE_TOKEN.to_owned(),
            ranged_token: Self::DEFAULT_RANGED_TOKEN.to_owned(),
            melee_reaction_secs: Self::DEFAULT_MELEE_REACTION_SECS,
            ranged_reaction_secs: Self::DEFAULT_RANGED_REACTION_SECS,
            idle_delay_secs: Self::DEFAULT_IDLE_DELAY_SECS,
            pass_delay_secs: Self::DEFAULT_PASS_DELAY_SECS,
            parry_score: Self::DEFAULT_PARRY_SCORE,
            player_hit_score: Self::DEFAULT_PLAYER_HIT_SCORE,
            player_max_action_points: Self::DEFAULT_PLAYER_MAX_ACTION_POINTS,
        }
    }

    /// Rejects reaction windows that round to zero and tokens that normalize
    /// to nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("melee_reaction_secs", self.melee_reaction_secs),
            ("ranged_reaction_secs", self.ranged_reaction_secs),
        ] {
            if secs(value).is_zero() {
                return Err(ConfigError::NonPositiveWindow { field, value });
            }
        }
        for (field, token) in [
            ("melee_token", &self.melee_token),
            ("ranged_token", &self.ranged_token),
        ] {
            if normalize_token(token).is_empty() {
                return Err(ConfigError::BlankToken { field });
            }
        }
        Ok(())
    }

    pub fn melee_reaction_window(&self) -> Duration {
        secs(self.melee_reaction_secs)
    }

    pub fn ranged_reaction_window(&self) -> Duration {
        secs(self.ranged_reaction_secs)
    }

    pub fn idle_delay(&self) -> Duration {
        secs(self.idle_delay_secs)
    }

    pub fn pass_delay(&self) -> Duration {
        secs(self.pass_delay_secs)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Negative, NaN and overflowing values collapse to zero.
fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(CombatConfig::default().validate(), Ok(()));
    }

    #[test]
    fn windows_that_cannot_be_armed_are_rejected() {
        for value in [0.0, -1.0, f32::NAN] {
            let config = CombatConfig {
                ranged_reaction_secs: value,
                ..CombatConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NonPositiveWindow {
                    field: "ranged_reaction_secs",
                    ..
                })
            ));
        }
    }

    #[test]
    fn blank_tokens_are_rejected() {
        let config = CombatConfig {
            melee_token: "   ".into(),
            ..CombatConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BlankToken {
                field: "melee_token"
            })
        );
    }
}
