#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

/// Byte offset into a source file, plus the file's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub usize, pub Rc<String>);

/// Finds the line holding byte `position`.
///
/// Returns the 1-based line number, the line's text (with its newline) and
/// the column of `position` within it, or `None` past the end of `content`.
pub fn get_line_at_position(
    content: impl AsRef<[u8]>,
    position: usize,
) -> Option<(usize, String, usize)> {
    let content = content.as_ref();
    if position >= content.len() {
        return None;
    }

    let mut start = 0;

    for (index, line) in content.split_inclusive(|b| *b == b'\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&position) {
            let text = String::from_utf8_lossy(line).into_owned();
            return Some((index + 1, text, position - start));
        }

        start = end;
    }

    None
}

/// Renders a caret diagnostic for `error` against the source it came from.
///
/// ```text
/// Error: IllegalCharacter (Illegal character `@`, ...)
/// -> main.mk
///   |
/// 1 | let a = @;
///   | --------^
/// ```
pub fn render_error(error: &Error, source: impl AsRef<[u8]>) -> String {
    let mut out = String::new();
    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", position.1);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");

    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();

    (&string[start..], start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    const SOURCE: &str = "Hello, world!\nlet x = 5;\n\n    Testing { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 34).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "    Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position(SOURCE, SOURCE.len()).is_none());
        assert!(super::get_line_at_position("", 0).is_none());
    }

    #[test]
    fn test_render_error() {
        let source = "let a = 1;\n  let b = @;\n";
        let error = Error::new(
            ErrorImpl::IllegalCharacter {
                token: "@".to_string(),
            },
            Position(21, Rc::new("main.mk".to_string())),
        );

        let rendered = super::render_error(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("Error: IllegalCharacter (Illegal character `@`"));
        assert_eq!(lines[1], "-> main.mk");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "2 | let b = @;");
        assert_eq!(lines[4], "  | --------^");
    }

    #[test]
    fn test_render_error_without_line() {
        let error = Error::new(
            ErrorImpl::Io {
                path: "gone.mk".to_string(),
                message: "not found".to_string(),
            },
            Position(0, Rc::new("gone.mk".to_string())),
        );

        assert_eq!(super::render_error(&error, ""), "Error: Io\n-> gone.mk\n");
    }
}
