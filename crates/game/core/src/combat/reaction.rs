//! Reaction window data: what the defender must type, for how long, and how
//! the window ended.

use std::time::Duration;

use strum::Display;

use crate::config::CombatConfig;
use crate::state::Ability;

/// Canonical form for comparing typed tokens: trimmed and lowercased.
pub fn normalize_token(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Defensive move an incoming attack calls for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionKind {
    /// Short-range attacks.
    Parry,
    /// Long-range attacks.
    Dodge,
}

impl ReactionKind {
    pub fn for_ability(ability: &Ability, config: &CombatConfig) -> Self {
        if ability.range < config.melee_threshold {
            ReactionKind::Parry
        } else {
            ReactionKind::Dodge
        }
    }

    /// Builds the request for this kind using the configured token and window.
    pub fn request(self, config: &CombatConfig) -> ReactionRequest {
        match self {
            ReactionKind::Parry => {
                ReactionRequest::new(&config.melee_token, config.melee_reaction_window())
            }
            ReactionKind::Dodge => {
                ReactionRequest::new(&config.ranged_token, config.ranged_reaction_window())
            }
        }
    }
}

/// One reaction window: the token to type and how long the defender has.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionRequest {
    expected_token: String,
    duration: Duration,
}

impl ReactionRequest {
    /// The token is stored normalized, so matching is case-insensitive.
    pub fn new(expected_token: &str, duration: Duration) -> Self {
        Self {
            expected_token: normalize_token(expected_token),
            duration,
        }
    }

    pub fn expected_token(&self) -> &str {
        &self.expected_token
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// A window needs a non-empty token and a positive duration.
    pub fn is_valid(&self) -> bool {
        !self.expected_token.is_empty() && !self.duration.is_zero()
    }

    pub fn matches(&self, submitted: &str) -> bool {
        normalize_token(submitted) == self.expected_token
    }
}

/// How a reaction window was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionCause {
    /// The expected token arrived in time.
    Match,
    /// A different token arrived; the window closes immediately.
    Typo,
    /// The countdown ran out.
    Timeout,
    /// Force-resolved from outside (battle abort, teardown).
    Cancelled,
}

impl ReactionCause {
    pub fn is_success(self) -> bool {
        matches!(self, ReactionCause::Match)
    }
}

/// Final result of a reaction window, produced exactly once per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionOutcome {
    pub resolved: bool,
    pub success: bool,
    pub cause: ReactionCause,
    /// Time between arming and resolution.
    pub elapsed: Duration,
}

impl ReactionOutcome {
    pub fn new(cause: ReactionCause, elapsed: Duration) -> Self {
        Self {
            resolved: true,
            success: cause.is_success(),
            cause,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_range_abilities_are_parried() {
        let config = CombatConfig::default();
        let bite = Ability::new("bite", 4, 60.0);
        let arrow = Ability::new("arrow", 6, 150.0);

        assert_eq!(ReactionKind::for_ability(&bite, &config), ReactionKind::Parry);
        assert_eq!(ReactionKind::for_ability(&arrow, &config), ReactionKind::Dodge);

        let parry = ReactionKind::Parry.request(&config);
        assert_eq!(parry.expected_token(), "parry");
        assert_eq!(parry.duration(), Duration::from_millis(1500));

        let dodge = ReactionKind::Dodge.request(&config);
        assert_eq!(dodge.expected_token(), "dodge");
        assert_eq!(dodge.duration(), Duration::from_secs(2));
    }

    #[test]
    fn matching_ignores_case_and_surrounding_whitespace() {
        let request = ReactionRequest::new("Parry", Duration::from_secs(1));
        assert!(request.matches("Parry "));
        assert!(request.matches("  PARRY"));
        assert!(!request.matches("pary"));
        assert!(!request.matches("par ry"));
    }

    #[test]
    fn empty_tokens_and_zero_windows_are_invalid() {
        assert!(!ReactionRequest::new("   ", Duration::from_secs(1)).is_valid());
        assert!(!ReactionRequest::new("dodge", Duration::ZERO).is_valid());
        assert!(ReactionRequest::new("dodge", Duration::from_millis(1)).is_valid());
    }
}
