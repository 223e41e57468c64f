//! Damage application.

use crate::state::ResourceMeter;

/// Result of resolving one attack against a target.
///
/// `raw` keeps the ability's full damage for display even when the hit was
/// nullified or clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    pub raw: u32,
    pub applied: u32,
    pub remaining: u32,
    pub defeated: bool,
}

impl DamageOutcome {
    /// Outcome of an attack negated by a successful reaction.
    pub fn nullified(raw: u32, hit_points: &ResourceMeter) -> Self {
        Self {
            raw,
            applied: 0,
            remaining: hit_points.current,
            defeated: hit_points.is_depleted(),
        }
    }
}

/// Applies `raw` damage to `hit_points`, clamping at zero.
pub fn apply_damage(hit_points: &mut ResourceMeter, raw: u32) -> DamageOutcome {
    let applied = hit_points.drain(raw);
    DamageOutcome {
        raw,
        applied,
        remaining: hit_points.current,
        defeated: hit_points.is_depleted(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_reduces_hit_points_exactly() {
        let mut hp = ResourceMeter::full(30);
        let outcome = apply_damage(&mut hp, 12);
        assert_eq!(hp.current, 18);
        assert_eq!(
            outcome,
            DamageOutcome {
                raw: 12,
                applied: 12,
                remaining: 18,
                defeated: false
            }
        );
    }

    #[test]
    fn overkill_clamps_at_zero_but_keeps_raw_value() {
        let mut hp = ResourceMeter::new(5, 30);
        let outcome = apply_damage(&mut hp, 40);
        assert_eq!(hp.current, 0);
        assert_eq!(outcome.raw, 40);
        assert_eq!(outcome.applied, 5);
        assert!(outcome.defeated);
    }

    #[test]
    fn nullified_hits_leave_hit_points_untouched() {
        let hp = ResourceMeter::new(9, 30);
        let outcome = DamageOutcome::nullified(25, &hp);
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.remaining, 9);
        assert!(!outcome.defeated);
    }
}
