// input/queue.rs
//
// Command queue for tween requests. The host pushes between ticks; the store
// drains everything at the start of its next tick.
//
// Usage:
//   let mut queue = CommandQueue::new();
//   queue.push(TweenRequest::new(EntityId(3), TweenBuilder::new(0.5, Vec3::Y)));
//   queue.push(TweenCommand::Cancel(EntityId(7)));
//   for command in queue.drain() { /* ... */ }

use crate::api::types::EntityId;
use crate::extensions::builder::TweenBuilder;

/// "Tween this entity with this configuration."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenRequest<V> {
    pub entity: EntityId,
    pub builder: TweenBuilder<V>,
}

impl<V> TweenRequest<V> {
    pub fn new(entity: EntityId, builder: TweenBuilder<V>) -> Self {
        Self { entity, builder }
    }
}

/// Commands the host sends to a tween store between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenCommand<V> {
    /// Build (or rebuild) the entity's tween.
    Activate(TweenRequest<V>),
    /// Clear the entity's enable flag.
    Cancel(EntityId),
}

impl<V> TweenCommand<V> {
    /// Entity the command targets.
    pub fn entity(&self) -> EntityId {
        match self {
            TweenCommand::Activate(request) => request.entity,
            TweenCommand::Cancel(entity) => *entity,
        }
    }
}

impl<V> From<TweenRequest<V>> for TweenCommand<V> {
    fn from(request: TweenRequest<V>) -> Self {
        TweenCommand::Activate(request)
    }
}

/// A queue of pending tween commands.
/// The host pushes at any time; the store drains it at the start of each tick,
/// so nothing lands in the middle of a sweep.
#[derive(Debug)]
pub struct CommandQueue<V> {
    commands: Vec<TweenCommand<V>>,
}

impl<V> CommandQueue<V> {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(32),
        }
    }

    /// Queue a command for the next tick.
    pub fn push(&mut self, command: impl Into<TweenCommand<V>>) {
        self.commands.push(command.into());
    }

    /// Drain all pending commands. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<TweenCommand<V>> {
        std::mem::take(&mut self.commands)
    }

    /// Iterate over pending commands without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &TweenCommand<V>> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl<V> Default for CommandQueue<V> {
    fn default() -> Self {
        Self::new()
    }
}
