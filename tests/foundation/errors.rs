//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use bento_foundation::{Component, Entity, Error, ErrorContext, ErrorKind};

#[derive(Clone, Debug)]
struct Fuel;
impl Component for Fuel {}

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_entity_not_found() {
    let id = Entity::from_raw(42);
    let err = Error::entity_not_found(id);
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(e) if e == id));
    assert!(err.is_entity_error());
    assert!(!err.is_component_error());
    assert!(format!("{err}").contains("2a"));
}

#[test]
fn error_component_not_found() {
    let id = Entity::generate();
    let err = Error::component_not_found(id, Fuel::component_type());
    assert!(err.is_component_error());
    assert!(format!("{err}").contains("Fuel"));
}

#[test]
fn error_system() {
    let err = Error::system("physics", "diverged");
    assert_eq!(format!("{err}"), "system physics failed: diverged");
}

#[test]
fn error_internal() {
    let err = Error::internal("broken index");
    assert!(matches!(err.kind, ErrorKind::Internal(ref m) if m == "broken index"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_appears_in_display() {
    let err = Error::internal("x").with_context(
        ErrorContext::new()
            .with_operation("delete")
            .with_command_index(7),
    );
    assert_eq!(format!("{err}"), "internal error: x (in command #7 (delete))");
}

#[test]
fn operation_only_context() {
    let err = Error::internal("x").with_context(ErrorContext::new().with_operation("flush"));
    assert_eq!(format!("{err}"), "internal error: x (in flush)");
}

#[test]
fn with_context_replaces() {
    let err = Error::internal("x")
        .with_context(ErrorContext::new().with_operation("first"))
        .with_context(ErrorContext::new().with_operation("second"));
    assert_eq!(err.context.unwrap().operation.as_deref(), Some("second"));
}

#[test]
fn errors_box_as_std_error() {
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(Error::internal("boxed"));
    assert_eq!(boxed.to_string(), "internal error: boxed");
}
