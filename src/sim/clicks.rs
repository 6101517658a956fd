//! Per-actor click subscriptions
//!
//! The host reports which actor was clicked; the registry looks up the
//! subscriber for that actor and hands back the command it wants applied.
//! Handlers never touch battle state directly.

use std::collections::BTreeMap;
use std::fmt;

use super::actor::ActorId;

/// State change requested by a click handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Make `attacker` focus `target` instead of the nearest enemy
    SelectTarget { attacker: ActorId, target: ActorId },
    /// Drop `attacker`'s focused target
    ClearTarget { attacker: ActorId },
}

/// Callback invoked with the clicked actor
pub type ClickHandler = Box<dyn FnMut(ActorId) -> Option<Command>>;

/// Subscription table keyed by actor identity
#[derive(Default)]
pub struct ClickRegistry {
    handlers: BTreeMap<ActorId, ClickHandler>,
}

impl ClickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to clicks on `actor`, replacing any previous handler
    pub fn register(&mut self, actor: ActorId, handler: ClickHandler) {
        if self.handlers.insert(actor, handler).is_some() {
            log::debug!("replaced click handler for actor {}", actor.0);
        }
    }

    /// Unsubscribe; returns false when nothing was registered
    pub fn deregister(&mut self, actor: ActorId) -> bool {
        self.handlers.remove(&actor).is_some()
    }

    pub fn is_registered(&self, actor: ActorId) -> bool {
        self.handlers.contains_key(&actor)
    }

    /// Run the handler for `actor`, if any
    pub fn dispatch(&mut self, actor: ActorId) -> Option<Command> {
        self.handlers.get_mut(&actor).and_then(|handler| handler(actor))
    }
}

impl fmt::Debug for ClickRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickRegistry")
            .field("actors", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
