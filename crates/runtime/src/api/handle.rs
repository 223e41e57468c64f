//! Cloneable input surface for a running battle.
//!
//! [`BattleHandle`] routes raw text typed by the player: while a reaction
//! window is armed it goes to the arbiter, otherwise to the command channel
//! consumed by [`Battle::next_command`](crate::Battle::next_command).
use std::collections::HashMap;

use skirmish_core::{ReactionCause, normalize_token};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::reaction::{ArbiterError, ReactionArbiter};

/// Where a submitted line of text ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputRoute {
    /// Resolved the armed reaction window with this cause.
    Reaction(ReactionCause),
    /// Queued as a player command.
    Command,
    /// A window was armed when the text arrived but resolved before it could
    /// be applied. The text is discarded.
    Late,
    /// Blank input.
    Ignored,
}

/// Client-facing handle to interact with a battle
#[derive(Clone)]
pub struct BattleHandle {
    arbiter: ReactionArbiter,
    command_tx: mpsc::Sender<String>,
    cancel: CancellationToken,
    event_bus: EventBus,
}

impl BattleHandle {
    pub(crate) fn new(
        arbiter: ReactionArbiter,
        command_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
        event_bus: EventBus,
    ) -> Self {
        Self {
            arbiter,
            command_tx,
            cancel,
            event_bus,
        }
    }

    /// Routes one line of player input.
    pub async fn submit_text(&self, text: &str) -> Result<InputRoute> {
        if self.arbiter.is_armed() {
            return match self.arbiter.submit_token(text) {
                Ok(cause) => Ok(InputRoute::Reaction(cause)),
                Err(ArbiterError::NotArmed) => {
                    debug!(target: "runtime::battle", text, "Input arrived after the reaction window closed");
                    Ok(InputRoute::Late)
                }
                Err(err) => Err(err.into()),
            };
        }

        let command = normalize_token(text);
        if command.is_empty() {
            return Ok(InputRoute::Ignored);
        }

        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        Ok(InputRoute::Command)
    }

    /// True while the player is expected to type a reaction token.
    pub fn is_reaction_armed(&self) -> bool {
        self.arbiter.is_armed()
    }

    /// Token the open reaction window expects, if any.
    pub fn expected_reaction(&self) -> Option<String> {
        self.arbiter.expected_token()
    }

    /// Aborts the battle.
    ///
    /// Every outstanding wait (reaction windows, animations, idle delays)
    /// resolves promptly and in-flight turns end as aborted.
    pub fn abort(&self) {
        // Token first: a turn woken by the cancelled window must already see
        // the abort.
        self.cancel.cancel();
        self.arbiter.cancel();
    }

    pub fn is_aborted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Turn start, movement and end
    /// - `Topic::Reaction` - Reaction windows opening and resolving
    /// - `Topic::Combat` - Damage and defeats
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }
}
