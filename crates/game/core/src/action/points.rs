use super::CommandError;
use crate::state::ResourceMeter;

/// Per-turn action point budget of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPoints(ResourceMeter);

impl ActionPoints {
    pub fn new(maximum: u32) -> Self {
        Self(ResourceMeter::full(maximum))
    }

    pub fn current(&self) -> u32 {
        self.0.current
    }

    pub fn maximum(&self) -> u32 {
        self.0.maximum
    }

    /// Deducts `cost`, or leaves the budget untouched if it cannot be paid.
    pub fn spend(&mut self, cost: u32) -> Result<(), CommandError> {
        if cost > self.0.current {
            return Err(CommandError::InsufficientActionPoints {
                required: cost,
                available: self.0.current,
            });
        }
        self.0.drain(cost);
        Ok(())
    }

    pub fn refill(&mut self) {
        self.0.refill();
    }

    /// Returns points spent on a command that never resolved, capped at the
    /// maximum.
    pub fn refund(&mut self, amount: u32) {
        self.0.current = self.0.current.saturating_add(amount).min(self.0.maximum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_beyond_budget_fails_without_side_effects() {
        let mut ap = ActionPoints::new(3);
        ap.spend(2).unwrap();
        assert_eq!(ap.current(), 1);

        assert_eq!(
            ap.spend(2),
            Err(CommandError::InsufficientActionPoints {
                required: 2,
                available: 1
            })
        );
        assert_eq!(ap.current(), 1);

        ap.refill();
        assert_eq!(ap.current(), 3);
    }

    #[test]
    fn refunds_never_exceed_the_maximum() {
        let mut ap = ActionPoints::new(6);
        ap.spend(5).unwrap();
        ap.refund(3);
        assert_eq!(ap.current(), 4);
        ap.refund(10);
        assert_eq!(ap.current(), 6);
    }
}
