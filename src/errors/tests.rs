//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn illegal(token: &str, offset: usize) -> Error {
    Error::new(
        ErrorImpl::IllegalCharacter {
            token: token.to_string(),
        },
        Position(offset, Rc::new("test.mk".to_string())),
    )
}

#[test]
fn test_error_creation() {
    let error = illegal("@", 10);

    assert_eq!(error.get_error_name(), "IllegalCharacter");
    assert_eq!(
        error.get_error(),
        &ErrorImpl::IllegalCharacter {
            token: "@".to_string()
        }
    );
}

#[test]
fn test_error_position() {
    let error = illegal("#", 42);

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.mk");
}

#[test]
fn test_io_error() {
    let error = Error::new(
        ErrorImpl::Io {
            path: "missing.mk".to_string(),
            message: "No such file or directory".to_string(),
        },
        Position(0, Rc::new("missing.mk".to_string())),
    );

    assert_eq!(error.get_error_name(), "Io");
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = illegal("$", 0);

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("`$`")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display() {
    let error = illegal("@", 7);

    assert_eq!(error.to_string(), "illegal character: \"@\" at test.mk:7");
}

#[test]
fn test_error_source() {
    let error = illegal("@", 0);
    let source = std::error::Error::source(&error).map(|e| e.to_string());

    assert_eq!(source.as_deref(), Some("illegal character: \"@\""));
}
