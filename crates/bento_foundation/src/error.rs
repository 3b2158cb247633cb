//! Error types for Bento.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::component::ComponentType;
use crate::entity::Entity;

/// Result alias used throughout Bento.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Bento operations.
#[derive(Debug, Error)]
#[error("{kind}{}", context_suffix(.context))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

fn context_suffix(context: &Option<ErrorContext>) -> String {
    context
        .as_ref()
        .map(|ctx| format!(" ({ctx})"))
        .unwrap_or_default()
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error, replacing any existing context.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(entity: Entity) -> Self {
        Self::new(ErrorKind::EntityNotFound(entity))
    }

    /// Creates a component not found error.
    #[must_use]
    pub fn component_not_found(entity: Entity, component: ComponentType) -> Self {
        Self::new(ErrorKind::ComponentNotFound { entity, component })
    }

    /// Creates a system failure error.
    #[must_use]
    pub fn system(system: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::System {
            system: system.into(),
            message: message.into(),
        })
    }

    /// Creates an internal invariant error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if the referenced entity is unknown to the storage.
    #[must_use]
    pub fn is_entity_error(&self) -> bool {
        matches!(self.kind, ErrorKind::EntityNotFound(_))
    }

    /// Returns true if the entity is tracked but lacks a requested component.
    #[must_use]
    pub fn is_component_error(&self) -> bool {
        matches!(self.kind, ErrorKind::ComponentNotFound { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The entity has no tracked components in this storage.
    #[error("entity not found: {0:?}")]
    EntityNotFound(Entity),

    /// The entity is tracked but has no component of the requested type.
    #[error("component not found: {component} on entity {entity:?}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: Entity,
        /// The component type that was not found.
        component: ComponentType,
    },

    /// A lifecycle hook reported a failure.
    #[error("system {system} failed: {message}")]
    System {
        /// Name of the failing system.
        system: String,
        /// Description of the failure.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation that failed (`destroy`, `delete`, a system hook...).
    pub operation: Option<String>,
    /// Position of the failing command inside a flushed command buffer.
    pub command_index: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the command index.
    #[must_use]
    pub fn with_command_index(mut self, index: usize) -> Self {
        self.command_index = Some(index);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.operation, self.command_index) {
            (Some(op), Some(index)) => write!(f, "in command #{index} ({op})"),
            (Some(op), None) => write!(f, "in {op}"),
            (None, Some(index)) => write!(f, "in command #{index}"),
            (None, None) => Ok(()),
        }
    }
}
