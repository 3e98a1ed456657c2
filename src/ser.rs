//! Tree document writer.
//!
//! Renders a [`Value`] object as indentation-based document text. Most users
//! reach this through [`to_string`](crate::to_string) or, for nodes, through the
//! tree formatter itself.
//!
//! ```rust
//! use save_tree::{to_string, tree_value};
//!
//! let doc = tree_value!({
//!     "name": "root",
//!     "fields": [{ "i32": 3 }],
//!     "children": []
//! });
//! assert_eq!(
//!     to_string(&doc).unwrap(),
//!     "name: root\nfields[1]:\n  - i32: 3\nchildren[0]:"
//! );
//! ```

use crate::de::parse_number;
use crate::{Error, Map, Result, TreeOptions, Value};

/// Writes document text into an in-memory buffer.
pub struct Writer {
    output: String,
    options: TreeOptions,
}

impl Writer {
    pub fn new(options: TreeOptions) -> Self {
        Writer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes a whole document. The root must be an object.
    pub fn write_document(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => {
                self.write_object(map, 0, false);
                Ok(())
            }
            other => Err(Error::custom(format!(
                "document root must be an object, found {}",
                other.kind()
            ))),
        }
    }

    fn start_line(&mut self, column: usize) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output.extend(std::iter::repeat(' ').take(column));
    }

    /// `first_inline` continues the current line, as after a `- ` list marker.
    fn write_object(&mut self, map: &Map, column: usize, first_inline: bool) {
        for (i, (key, value)) in map.iter().enumerate() {
            if !(first_inline && i == 0) {
                self.start_line(column);
            }
            self.write_entry(key, value, column);
        }
    }

    fn write_entry(&mut self, key: &str, value: &Value, column: usize) {
        self.write_key(key);
        match value {
            Value::Array(items) => self.write_array(items, column),
            Value::Object(map) => {
                self.output.push(':');
                if !map.is_empty() {
                    self.write_object(map, column + self.options.indent, false);
                }
            }
            scalar => {
                self.output.push_str(": ");
                self.write_scalar(scalar);
            }
        }
    }

    /// Writes `[N]:` followed by either inline scalars or one `- ` item per line.
    fn write_array(&mut self, items: &[Value], column: usize) {
        let delimiter = self.options.delimiter;
        self.output.push('[');
        self.output.push_str(&items.len().to_string());
        self.output.push_str(delimiter.header_marker());
        self.output.push_str("]:");

        if items.is_empty() {
            return;
        }

        if items.iter().all(Value::is_scalar) {
            self.output.push(' ');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(delimiter.as_str());
                }
                self.write_scalar(item);
            }
        } else {
            let dash_column = column + self.options.indent;
            for item in items {
                self.start_line(dash_column);
                self.write_item(item, dash_column);
            }
        }
    }

    fn write_item(&mut self, item: &Value, dash_column: usize) {
        match item {
            Value::Object(map) if map.is_empty() => self.output.push('-'),
            Value::Object(map) => {
                self.output.push_str("- ");
                // entries line up with the first key, just past the marker
                self.write_object(map, dash_column + 2, true);
            }
            Value::Array(items) => {
                self.output.push_str("- ");
                self.write_array(items, dash_column);
            }
            scalar => {
                self.output.push_str("- ");
                self.write_scalar(scalar);
            }
        }
    }

    fn write_scalar(&mut self, value: &Value) {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.output.push_str(&n.to_string()),
            Value::String(s) => self.write_string(s),
            // containers never reach here, see `Value::is_scalar`
            Value::Array(_) | Value::Object(_) => self.output.push_str("null"),
        }
    }

    #[inline]
    fn write_string(&mut self, s: &str) {
        if needs_quotes(s, self.options.delimiter.as_char()) {
            self.output.push('"');
            self.output.push_str(&escape(s));
            self.output.push('"');
        } else {
            self.output.push_str(s);
        }
    }

    fn write_key(&mut self, key: &str) {
        if needs_key_quotes(key) {
            self.output.push('"');
            self.output.push_str(&escape(key));
            self.output.push('"');
        } else {
            self.output.push_str(key);
        }
    }
}

/// Returns `true` when an unquoted string would read back as something else.
pub(crate) fn needs_quotes(s: &str, delimiter: char) -> bool {
    s.is_empty()
        || s.trim() != s
        || s.contains(delimiter)
        || s.chars().any(|ch| {
            matches!(ch, ':' | ',' | '|' | '[' | ']' | '"' | '\\') || ch.is_control()
        })
        || matches!(s, "true" | "false" | "null" | "Infinity" | "-Infinity" | "NaN")
        || parse_number(s).is_some()
        || s.parse::<f64>().is_ok()
}

fn needs_key_quotes(key: &str) -> bool {
    key.is_empty()
        || key.trim() != key
        || key.starts_with('-')
        || key
            .chars()
            .any(|ch| matches!(ch, ':' | '[' | ']' | '"' | '\\') || ch.is_control())
}

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\0' => out.push_str("\\0"),
            ch if ch.is_control() => out.push_str(&format!("\\u{:04x}", ch as u32)),
            ch => out.push(ch),
        }
    }
    out
}
