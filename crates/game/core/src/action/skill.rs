//! Player skills typed as commands.

use strum::Display;

use super::CommandError;
use crate::combat::normalize_token;

/// Delivery style of a player skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackType {
    #[default]
    Unarmed,
    Melee,
    RangedBow,
    RangedMagic,
}

impl AttackType {
    /// Unarmed and melee skills only connect with an adjacent target.
    pub fn requires_adjacency(self) -> bool {
        matches!(self, AttackType::Unarmed | AttackType::Melee)
    }
}

/// A command the player can type on their turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerSkill {
    pub command_name: String,
    pub ap_cost: u32,
    pub damage: u32,
    pub attack_type: AttackType,
    pub description: String,
}

impl Default for PlayerSkill {
    fn default() -> Self {
        Self {
            command_name: "ping".to_owned(),
            ap_cost: 2,
            damage: 10,
            attack_type: AttackType::Unarmed,
            description: "Basic attack".to_owned(),
        }
    }
}

/// Skills available to the player, looked up by typed command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillBook {
    skills: Vec<PlayerSkill>,
}

impl SkillBook {
    /// Command names are normalized so lookups are case-insensitive.
    pub fn new(skills: Vec<PlayerSkill>) -> Self {
        let skills = skills
            .into_iter()
            .map(|mut skill| {
                skill.command_name = normalize_token(&skill.command_name);
                skill
            })
            .collect();
        Self { skills }
    }

    pub fn resolve(&self, text: &str) -> Result<&PlayerSkill, CommandError> {
        let command = normalize_token(text);
        if command.is_empty() {
            return Err(CommandError::Empty);
        }
        self.skills
            .iter()
            .find(|skill| skill.command_name == command)
            .ok_or(CommandError::UnknownCommand(command))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerSkill> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
