//! Attack abilities configured per actor.

/// Immutable attack definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    pub damage: u32,
    /// Reach in world units, measured between cell centers.
    pub range: f32,
}

impl Ability {
    pub const BASIC_ATTACK_NAME: &'static str = "basic attack";
    pub const BASIC_ATTACK_DAMAGE: u32 = 5;
    pub const BASIC_ATTACK_RANGE: f32 = 60.0;

    /// Creates an ability; negative or NaN ranges collapse to zero.
    pub fn new(name: impl Into<String>, damage: u32, range: f32) -> Self {
        Self {
            name: name.into(),
            damage,
            range: range.max(0.0),
        }
    }

    /// The attack every actor can fall back to.
    pub fn basic_attack() -> Self {
        Self::new(
            Self::BASIC_ATTACK_NAME,
            Self::BASIC_ATTACK_DAMAGE,
            Self::BASIC_ATTACK_RANGE,
        )
    }

    pub fn reaches(&self, distance: f32) -> bool {
        self.range >= distance
    }
}

/// Ordered, never-empty collection of abilities.
///
/// An empty configuration is replaced by [`Ability::basic_attack`], so callers can
/// always rely on a first entry.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilitySet {
    abilities: Vec<Ability>,
}

impl AbilitySet {
    pub fn new(abilities: Vec<Ability>) -> Self {
        if abilities.is_empty() {
            Self {
                abilities: vec![Ability::basic_attack()],
            }
        } else {
            Self { abilities }
        }
    }

    /// The first configured ability, used by the melee fallback.
    pub fn first(&self) -> &Ability {
        &self.abilities[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter()
    }

    pub fn as_slice(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for AbilitySet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Ability>> for AbilitySet {
    fn from(abilities: Vec<Ability>) -> Self {
        Self::new(abilities)
    }
}
