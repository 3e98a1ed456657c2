//! Error types for saving and loading.
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! is the single [`Error`] enum below.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: the medium could not be read or written
//! - **Syntax Errors**: a tree document could not be parsed (with line/column information)
//! - **Format Errors**: a flat medium holds a value that does not decode, or a parsed
//!   document does not describe a node tree
//! - **Structural Mismatches**: a load asked for a field or child that was never saved,
//!   or a field slot holds a different kind of value
//!
//! A missing file on load is *not* an error: [`load`](crate::load) returns `Ok(false)`.
//!
//! ## Examples
//!
//! ```rust
//! use save_tree::{from_str, Error};
//!
//! let result = from_str("name: \"unterminated");
//! assert!(matches!(result, Err(Error::Syntax { .. })));
//! ```

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Represents all possible errors that can occur while saving or loading.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing the medium
    #[error("IO error: {0}")]
    Io(String),

    /// Syntax error in a tree document
    #[error("Syntax error at line {line}, column {col}:\n{context}\n{msg}{suggestion}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
        suggestion: String,
    },

    /// A flat medium holds something that does not decode as the requested value
    #[error("Invalid format at {unit} {position}: {msg}")]
    InvalidFormat {
        position: usize,
        unit: &'static str,
        msg: String,
    },

    /// A parsed document does not describe a node tree
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A flat medium ran out before the read completed
    #[error("Unexpected end of input after {consumed} {unit}, expected {expected}")]
    UnexpectedEof {
        consumed: usize,
        unit: &'static str,
        expected: String,
    },

    /// Load asked for a field slot past the end of the node
    #[error("Node '{node}' has {available} fields, cannot read field {index}")]
    MissingField {
        node: String,
        index: usize,
        available: usize,
    },

    /// Load asked for a child past the end of the node
    #[error("Node '{node}' has {available} children, cannot load child {index}")]
    MissingChild {
        node: String,
        index: usize,
        available: usize,
    },

    /// A field slot holds a different kind of value than the one requested
    #[error("Field {index} of node '{node}' holds {found}, expected {expected}")]
    FieldType {
        node: String,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Strict name checking found a node saved by a different type
    #[error("Expected node '{expected}', found '{found}'")]
    NameMismatch { expected: String, found: String },

    /// A collection count read from the medium is negative
    #[error("Invalid collection length: {0}")]
    InvalidLength(i64),

    /// A fixed-size collection was saved with a different number of elements
    #[error("Expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use save_tree::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: String::new(),
            suggestion: String::new(),
        }
    }

    /// Creates a syntax error carrying the offending line and an optional hint.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use save_tree::Error;
    ///
    /// let err = Error::syntax_with_context(
    ///     3,
    ///     1,
    ///     "expected '- ' list item",
    ///     "  i32: 5",
    ///     Some("array entries start with '- '"),
    /// );
    /// assert!(err.to_string().contains("Help:"));
    /// ```
    pub fn syntax_with_context(
        line: usize,
        col: usize,
        msg: &str,
        context: &str,
        suggestion: Option<&str>,
    ) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: context.to_string(),
            suggestion: suggestion
                .map(|s| format!("\nHelp: {}", s))
                .unwrap_or_default(),
        }
    }

    /// Creates an invalid format error at a byte offset or line number of a flat medium.
    pub fn invalid_format(position: usize, unit: &'static str, msg: &str) -> Self {
        Error::InvalidFormat {
            position,
            unit,
            msg: msg.to_string(),
        }
    }

    pub fn invalid_document<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidDocument(msg.to_string())
    }

    /// Creates an unexpected end-of-input error for a flat medium.
    pub fn unexpected_eof(consumed: usize, unit: &'static str, expected: &str) -> Self {
        Error::UnexpectedEof {
            consumed,
            unit,
            expected: expected.to_string(),
        }
    }

    pub fn missing_field(node: &str, index: usize, available: usize) -> Self {
        Error::MissingField {
            node: node.to_string(),
            index,
            available,
        }
    }

    pub fn missing_child(node: &str, index: usize, available: usize) -> Self {
        Error::MissingChild {
            node: node.to_string(),
            index,
            available,
        }
    }

    pub fn field_type(
        node: &str,
        index: usize,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Error::FieldType {
            node: node.to_string(),
            index,
            expected,
            found,
        }
    }

    /// Creates an I/O error, prefixed with the path it happened on.
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        Error::Io(format!("{}: {}", path.display(), err))
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use save_tree::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` when a load disagreed with the shape of what was saved.
    ///
    /// These are the recoverable mismatches between a Saveable's load order and
    /// the document it is reading: a missing field or child, a field of the wrong
    /// kind, or (with strict names) a node saved by another type.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::MissingField { .. }
                | Error::MissingChild { .. }
                | Error::FieldType { .. }
                | Error::NameMismatch { .. }
                | Error::LengthMismatch { .. }
        )
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_kinds() {
        assert!(Error::missing_field("root", 3, 2).is_structural());
        assert!(Error::missing_child("root", 0, 0).is_structural());
        assert!(Error::field_type("root", 0, "i32", "str").is_structural());
        assert!(!Error::syntax(1, 1, "bad").is_structural());
        assert!(!Error::InvalidLength(-1).is_structural());
    }

    #[test]
    fn test_messages_name_the_node() {
        let err = Error::missing_child("Inventory", 2, 2);
        assert_eq!(
            err.to_string(),
            "Node 'Inventory' has 2 children, cannot load child 2"
        );

        let err = Error::field_type("Player", 1, "f32", "str");
        assert!(err.to_string().contains("holds str, expected f32"));
    }
}
