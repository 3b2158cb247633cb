//! Deferred structural changes.

use std::mem;

use bento_foundation::{ComponentType, Entity, ErrorContext, Result};
use tracing::{debug, warn};

use crate::bundle::{Bundle, ComponentSet};
use crate::storage::Storage;

/// A structural change recorded for later.
#[derive(Clone, Debug)]
pub enum Command {
    /// Store `components` under an id minted when the command was recorded.
    Create {
        /// The pre-minted id.
        entity: Entity,
        /// Initial components.
        components: ComponentSet,
    },
    /// Merge `components` into an entity.
    Set {
        /// Target entity.
        entity: Entity,
        /// Values to add or overwrite.
        components: ComponentSet,
    },
    /// Remove component types from an entity.
    Delete {
        /// Target entity.
        entity: Entity,
        /// Types to remove.
        types: Vec<ComponentType>,
    },
    /// Remove an entity entirely.
    Destroy {
        /// Target entity.
        entity: Entity,
    },
    /// Remove every entity.
    Clear,
}

impl Command {
    /// Returns the storage operation this command performs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Set { .. } => "set",
            Self::Delete { .. } => "delete",
            Self::Destroy { .. } => "destroy",
            Self::Clear => "clear",
        }
    }

    /// Performs the command against a storage.
    ///
    /// # Errors
    ///
    /// Fails exactly as the corresponding [`Storage`] call would.
    pub fn apply(self, storage: &mut Storage) -> Result<()> {
        match self {
            Self::Create { entity, components } | Self::Set { entity, components } => {
                storage.set(entity, components);
            }
            Self::Delete { entity, types } => {
                storage.delete(entity, &types)?;
            }
            Self::Destroy { entity } => {
                storage.destroy(entity)?;
            }
            Self::Clear => storage.clear(),
        }
        Ok(())
    }
}

/// An ordered queue of [`Command`]s.
///
/// Recording never touches a storage, so a buffer can be filled while the
/// storage is borrowed for iteration and flushed afterwards.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` commands.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Appends a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Records a creation and returns the id the entity will have.
    pub fn create(&mut self, bundle: impl Bundle) -> Entity {
        let entity = Entity::generate();
        self.push(Command::Create {
            entity,
            components: bundle.into_component_set(),
        });
        entity
    }

    /// Records a [`Storage::set`].
    pub fn set(&mut self, entity: Entity, bundle: impl Bundle) {
        self.push(Command::Set {
            entity,
            components: bundle.into_component_set(),
        });
    }

    /// Records a [`Storage::delete`].
    pub fn delete(&mut self, entity: Entity, types: &[ComponentType]) {
        self.push(Command::Delete {
            entity,
            types: types.to_vec(),
        });
    }

    /// Records a [`Storage::destroy`].
    pub fn destroy(&mut self, entity: Entity) {
        self.push(Command::Destroy { entity });
    }

    /// Records a [`Storage::clear`].
    pub fn clear_storage(&mut self) {
        self.push(Command::Clear);
    }

    /// Returns the recorded commands in order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Returns the number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Discards every recorded command without applying it.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Applies the recorded commands in order and empties the buffer.
    ///
    /// Returns the number of commands applied.
    ///
    /// # Errors
    ///
    /// Stops at the first failing command. Commands before it stay applied,
    /// commands after it are discarded, and the error carries the failing
    /// command's index and operation name.
    pub fn flush(&mut self, storage: &mut Storage) -> Result<usize> {
        let commands = mem::take(&mut self.commands);
        let total = commands.len();

        for (index, command) in commands.into_iter().enumerate() {
            let operation = command.name();
            if let Err(err) = command.apply(storage) {
                warn!(
                    index,
                    operation,
                    discarded = total - index - 1,
                    error = %err,
                    "command buffer flush stopped"
                );
                return Err(err.with_context(
                    ErrorContext::new()
                        .with_operation(operation)
                        .with_command_index(index),
                ));
            }
        }

        debug!(applied = total, "flushed command buffer");
        Ok(total)
    }
}
