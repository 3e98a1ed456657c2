//! Tree document parser.
//!
//! Parses indentation-based document text back into a [`Value`] object. The
//! parser works line by line: each non-blank line is an object entry
//! (`key: value`, `key:` opening a nested block, `key[N]:` opening an array) or
//! a `- ` list item belonging to the array header above it.
//!
//! Errors carry the line and column of the offending text:
//!
//! ```rust
//! use save_tree::{from_str, Error};
//!
//! match from_str("fields[2]:\n  - i32: 1") {
//!     Err(Error::Syntax { line, .. }) => assert_eq!(line, 1),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

use crate::options::Delimiter;
use crate::{Error, Map, Number, Result, Value};

#[derive(Clone, Copy, Debug)]
struct Line<'a> {
    number: usize,
    indent: usize,
    text: &'a str,
}

/// Deepest nesting of objects and arrays the parser accepts, the root object
/// included.
///
/// Each saved node takes two levels (the node object and its `children`
/// array) and its field entries one more, so a chain of up to 511 nodes, the
/// root included, can be read back.
pub const MAX_DEPTH: usize = 1024;

/// An object or array whose body is still being read.
enum Frame<'a> {
    Object {
        map: Map,
        column: usize,
        /// Key waiting for the value of a nested frame.
        key: Option<String>,
        /// Entry split off a `- ` list item line, parsed before any other line.
        first: Option<Line<'a>>,
    },
    List {
        items: Vec<Value>,
        count: usize,
        column: usize,
        item_column: Option<usize>,
        header: Line<'a>,
        at: usize,
    },
}

impl<'a> Frame<'a> {
    fn object(column: usize, first: Option<Line<'a>>) -> Self {
        Frame::Object {
            map: Map::new(),
            column,
            key: None,
            first,
        }
    }

    fn accept(&mut self, value: Value) {
        match self {
            Frame::Object { map, key, .. } => {
                if let Some(key) = key.take() {
                    map.insert(key, value);
                }
            }
            Frame::List { items, .. } => items.push(value),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Object { map, .. } => Value::Object(map),
            Frame::List { items, .. } => Value::Array(items),
        }
    }
}

/// A value read in full, or a container whose body follows on later lines.
enum Parsed<'a> {
    Value(Value),
    Open(Frame<'a>),
}

enum Progress<'a> {
    Continue,
    Open(Frame<'a>),
    Done,
}

/// Parses a whole document held in memory.
///
/// Nesting is tracked on an explicit stack of frames rather than the call
/// stack, so document depth is bounded by [`MAX_DEPTH`] alone.
pub struct Parser<'a> {
    lines: Vec<Line<'a>>,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let lines = input
            .lines()
            .enumerate()
            .filter_map(|(i, raw)| {
                let text = raw.trim_start_matches(' ');
                if text.trim().is_empty() {
                    None
                } else {
                    Some(Line {
                        number: i + 1,
                        indent: raw.len() - text.len(),
                        text: text.trim_end(),
                    })
                }
            })
            .collect();
        Parser { lines, position: 0 }
    }

    /// Parses the document root, which is always an object.
    pub fn parse_document(&mut self) -> Result<Value> {
        match self.peek() {
            None => return Ok(Value::Object(Map::new())),
            Some(first) if first.indent != 0 => return Err(indentation_error(first)),
            Some(_) => {}
        }

        let mut stack: Vec<Frame<'a>> = Vec::new();
        let mut current = Frame::object(0, None);
        loop {
            match self.advance(&mut current)? {
                Progress::Continue => {}
                Progress::Open(child) => {
                    if stack.len() + 2 > MAX_DEPTH {
                        return Err(self.depth_error());
                    }
                    stack.push(std::mem::replace(&mut current, child));
                }
                Progress::Done => {
                    let finished = current;
                    match stack.pop() {
                        Some(parent) => {
                            current = parent;
                            current.accept(finished.into_value());
                        }
                        None => return Ok(finished.into_value()),
                    }
                }
            }
        }
    }

    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.position).copied()
    }

    /// Reads the next entry or item of `frame`, or reports that it has ended.
    fn advance(&mut self, frame: &mut Frame<'a>) -> Result<Progress<'a>> {
        match frame {
            Frame::Object {
                map,
                column,
                key,
                first,
            } => {
                let line = match first.take() {
                    Some(line) => line,
                    None => match self.peek() {
                        Some(line) if line.indent > *column => {
                            return Err(indentation_error(line))
                        }
                        Some(line) if line.indent == *column => {
                            self.position += 1;
                            line
                        }
                        _ => return Ok(Progress::Done),
                    },
                };
                let (name, parsed) = self.parse_entry(map, line, *column)?;
                Ok(match parsed {
                    Parsed::Value(value) => {
                        map.insert(name, value);
                        Progress::Continue
                    }
                    Parsed::Open(child) => {
                        *key = Some(name);
                        Progress::Open(child)
                    }
                })
            }
            Frame::List {
                items,
                count,
                column,
                item_column,
                header,
                at,
            } => {
                if items.len() == *count {
                    return Ok(Progress::Done);
                }
                let line = match self.peek() {
                    Some(line) if line.indent > *column => line,
                    _ => {
                        return Err(Error::syntax_with_context(
                            header.number,
                            *at,
                            &format!("array declares {} items, found {}", count, items.len()),
                            header.text,
                            None,
                        ))
                    }
                };
                match *item_column {
                    Some(expected) if expected != line.indent => {
                        return Err(indentation_error(line));
                    }
                    Some(_) => {}
                    None => *item_column = Some(line.indent),
                }
                self.position += 1;
                Ok(match self.parse_item(line)? {
                    Parsed::Value(value) => {
                        items.push(value);
                        Progress::Continue
                    }
                    Parsed::Open(child) => Progress::Open(child),
                })
            }
        }
    }

    /// Parses one `key...` line of an object at `column`.
    fn parse_entry(
        &mut self,
        map: &Map,
        line: Line<'a>,
        column: usize,
    ) -> Result<(String, Parsed<'a>)> {
        let mut cursor = LineCursor::new(line);
        let key = cursor.parse_key()?;
        if map.contains_key(&key) {
            return Err(cursor.error(&format!("duplicate key '{}'", key)));
        }

        if cursor.peek() == Some('[') {
            let (count, delimiter) = cursor.parse_header()?;
            cursor.expect(':')?;
            let parsed = self.parse_array_body(&mut cursor, count, delimiter, column)?;
            return Ok((key, parsed));
        }

        cursor.expect(':')?;
        cursor.skip_spaces();
        let parsed = if cursor.at_end() {
            match self.peek() {
                Some(next) if next.indent > column => {
                    Parsed::Open(Frame::object(next.indent, None))
                }
                _ => Parsed::Value(Value::Object(Map::new())),
            }
        } else {
            let value = cursor.parse_scalar(None)?;
            cursor.expect_end()?;
            Parsed::Value(value)
        };
        Ok((key, parsed))
    }

    /// Parses what follows an array header: inline values on the same line, or
    /// `count` list items on the lines below, indented past `column`.
    ///
    /// The declared count is never trusted for allocation.
    fn parse_array_body(
        &mut self,
        cursor: &mut LineCursor<'a>,
        count: usize,
        delimiter: Delimiter,
        column: usize,
    ) -> Result<Parsed<'a>> {
        cursor.skip_spaces();

        if !cursor.at_end() {
            let separator = delimiter.as_char();
            let mut values = Vec::new();
            loop {
                values.push(cursor.parse_scalar(Some(separator))?);
                if cursor.peek() == Some(separator) {
                    cursor.next_char();
                } else {
                    break;
                }
            }
            cursor.expect_end()?;
            if values.len() != count {
                return Err(cursor.error(&format!(
                    "array declares {} values, found {}",
                    count,
                    values.len()
                )));
            }
            return Ok(Parsed::Value(Value::Array(values)));
        }

        if count == 0 {
            return Ok(Parsed::Value(Value::Array(Vec::new())));
        }
        let available = self.lines.len() - self.position;
        Ok(Parsed::Open(Frame::List {
            items: Vec::with_capacity(count.min(available)),
            count,
            column,
            item_column: None,
            header: cursor.line,
            at: cursor.column(),
        }))
    }

    fn parse_item(&mut self, line: Line<'a>) -> Result<Parsed<'a>> {
        let mut cursor = LineCursor::new(line);
        if cursor.peek() != Some('-') {
            return Err(cursor.error_with_help(
                "expected '- ' list item",
                "every element of a 'key[N]:' array sits on its own '- ' line",
            ));
        }
        cursor.next_char();
        if cursor.at_end() {
            return Ok(Parsed::Value(Value::Object(Map::new())));
        }
        if cursor.peek() != Some(' ') {
            return Err(cursor.error("expected space after '-'"));
        }
        cursor.next_char();

        if cursor.peek() == Some('[') {
            let (count, delimiter) = cursor.parse_header()?;
            cursor.expect(':')?;
            return self.parse_array_body(&mut cursor, count, delimiter, line.indent);
        }

        if cursor.looks_like_entry() {
            let column = line.indent + 2;
            let first = Line {
                number: line.number,
                indent: column,
                text: cursor.rest(),
            };
            return Ok(Parsed::Open(Frame::object(column, Some(first))));
        }

        let value = cursor.parse_scalar(None)?;
        cursor.expect_end()?;
        Ok(Parsed::Value(value))
    }

    /// Error for a container opened on the line just consumed.
    fn depth_error(&self) -> Error {
        let msg = format!("document nests deeper than {} levels", MAX_DEPTH);
        match self.position.checked_sub(1).and_then(|i| self.lines.get(i)) {
            Some(line) => Error::syntax_with_context(
                line.number,
                line.indent + 1,
                &msg,
                line.text,
                Some("flatten the saved object graph"),
            ),
            None => Error::syntax(1, 1, &msg),
        }
    }
}

fn indentation_error(line: Line<'_>) -> Error {
    Error::syntax_with_context(
        line.number,
        line.indent + 1,
        "unexpected indentation",
        line.text,
        Some("nested entries belong under a line ending in ':'"),
    )
}

/// Character cursor over the text of a single line.
struct LineCursor<'a> {
    line: Line<'a>,
    position: usize,
}

impl<'a> LineCursor<'a> {
    fn new(line: Line<'a>) -> Self {
        LineCursor { line, position: 0 }
    }

    fn rest(&self) -> &'a str {
        let text: &'a str = self.line.text;
        &text[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.line.text.len()
    }

    fn column(&self) -> usize {
        self.line.indent + self.line.text[..self.position].chars().count() + 1
    }

    fn error(&self, msg: &str) -> Error {
        Error::syntax_with_context(self.line.number, self.column(), msg, self.line.text, None)
    }

    fn error_with_help(&self, msg: &str, help: &str) -> Error {
        Error::syntax_with_context(
            self.line.number,
            self.column(),
            msg,
            self.line.text,
            Some(help),
        )
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.position += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.peek() == Some(expected) {
            self.next_char();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", expected)))
        }
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_spaces();
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing characters"))
        }
    }

    /// Non-consuming check for `key:` or `key[` at the cursor.
    fn looks_like_entry(&self) -> bool {
        let mut probe = LineCursor {
            line: self.line,
            position: self.position,
        };
        probe.parse_key().is_ok() && matches!(probe.peek(), Some(':') | Some('['))
    }

    fn parse_key(&mut self) -> Result<String> {
        if self.peek() == Some('"') {
            let key = self.parse_quoted()?;
            self.skip_spaces();
            return Ok(key);
        }

        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch == ':' || ch == '[' {
                break;
            }
            self.next_char();
        }
        if self.at_end() {
            return Err(self.error("expected ':' after key"));
        }

        let key = self.line.text[start..self.position].trim();
        if key.is_empty() {
            return Err(self.error("empty key"));
        }
        if key.starts_with('-') {
            return Err(self.error_with_help(
                "list item where an entry was expected",
                "'- ' items are only valid under an array header such as 'key[2]:'",
            ));
        }
        Ok(key.to_string())
    }

    /// Parses `[N]`, `[N|]` or `[N<tab>]`.
    fn parse_header(&mut self) -> Result<(usize, Delimiter)> {
        self.expect('[')?;
        let start = self.position;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.next_char();
        }
        let count = self.line.text[start..self.position]
            .parse::<usize>()
            .map_err(|_| self.error("invalid array length"))?;

        let delimiter = match self.peek() {
            Some('|') => {
                self.next_char();
                Delimiter::Pipe
            }
            Some('\t') => {
                self.next_char();
                Delimiter::Tab
            }
            _ => Delimiter::Comma,
        };
        self.expect(']')?;
        Ok((count, delimiter))
    }

    /// Parses one scalar, stopping before `stop` when given.
    fn parse_scalar(&mut self, stop: Option<char>) -> Result<Value> {
        self.skip_spaces();
        if self.peek() == Some('"') {
            let s = self.parse_quoted()?;
            self.skip_spaces();
            if !(self.at_end() || self.peek() == stop) {
                return Err(self.error("unexpected characters after string"));
            }
            return Ok(Value::String(s));
        }

        let start = self.position;
        while let Some(ch) = self.peek() {
            if Some(ch) == stop {
                break;
            }
            self.next_char();
        }
        let raw = self.line.text[start..self.position].trim();
        if raw.is_empty() {
            return Err(self.error("expected a value"));
        }
        Ok(classify(raw))
    }

    fn parse_quoted(&mut self) -> Result<String> {
        self.expect('"')?;
        let mut result = String::new();

        while let Some(ch) = self.next_char() {
            match ch {
                '"' => return Ok(result),
                '\\' => match self.next_char() {
                    Some('\\') => result.push('\\'),
                    Some('"') => result.push('"'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('b') => result.push('\u{0008}'),
                    Some('f') => result.push('\u{000C}'),
                    Some('0') => result.push('\0'),
                    Some('u') => {
                        let mut hex = String::new();
                        for _ in 0..4 {
                            match self.next_char() {
                                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                                _ => {
                                    return Err(self.error(
                                        "invalid unicode escape sequence (expected 4 hex digits)",
                                    ))
                                }
                            }
                        }
                        let code_point = u32::from_str_radix(&hex, 16)
                            .map_err(|_| self.error("invalid hex in unicode escape"))?;
                        let ch = char::from_u32(code_point)
                            .ok_or_else(|| self.error("invalid unicode code point"))?;
                        result.push(ch);
                    }
                    Some(other) => {
                        // unknown escapes are kept literally
                        result.push('\\');
                        result.push(other);
                    }
                    None => return Err(self.error("unexpected end of line in string")),
                },
                other => result.push(other),
            }
        }
        Err(self.error("unterminated string"))
    }
}

fn classify(raw: &str) -> Value {
    match raw {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "Infinity" => Value::Number(Number::Infinity),
        "-Infinity" => Value::Number(Number::NegativeInfinity),
        "NaN" => Value::Number(Number::NaN),
        _ => parse_number(raw)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
    }
}

/// Parses `-?digits[.digits][e[+-]digits]`; anything else is not a number.
pub(crate) fn parse_number(raw: &str) -> Option<Number> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !digits.starts_with(|ch: char| ch.is_ascii_digit()) {
        return None;
    }
    if !raw
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }

    if raw.contains(&['.', 'e', 'E'][..]) {
        raw.parse::<f64>().ok().map(Number::from_f64)
    } else {
        raw.parse::<i64>().ok().map(Number::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_value;

    fn parse(input: &str) -> Result<Value> {
        Parser::new(input).parse_document()
    }

    #[test]
    fn test_scalars() {
        let doc = parse("a: 1\nb: -2.5\nc: true\nd: hello world\ne: \"42\"\nf: null").unwrap();
        assert_eq!(
            doc,
            tree_value!({
                "a": 1,
                "b": (-2.5),
                "c": true,
                "d": "hello world",
                "e": "42",
                "f": null
            })
        );
    }

    #[test]
    fn test_nested_object_and_empty_object() {
        let doc = parse("outer:\n  inner: 1\nempty:\nlast: x").unwrap();
        assert_eq!(
            doc,
            tree_value!({
                "outer": { "inner": 1 },
                "empty": {},
                "last": "x"
            })
        );
    }

    #[test]
    fn test_list_items_with_objects() {
        let text = "items[2]:\n  - name: A\n    n: 1\n  - name: B\n    n: 2";
        let doc = parse(text).unwrap();
        assert_eq!(
            doc,
            tree_value!({
                "items": [{ "name": "A", "n": 1 }, { "name": "B", "n": 2 }]
            })
        );
    }

    #[test]
    fn test_delimiter_markers() {
        let doc = parse("v[3|]: 1|2|3").unwrap();
        assert_eq!(doc, tree_value!({ "v": [1, 2, 3] }));

        let doc = parse("v[2\t]: a,b\tc").unwrap();
        assert_eq!(doc, tree_value!({ "v": ["a,b", "c"] }));
    }

    #[test]
    fn test_count_mismatch_is_syntax_error() {
        assert!(matches!(parse("v[3]: 1,2"), Err(Error::Syntax { .. })));
        assert!(matches!(
            parse("v[2]:\n  - 1"),
            Err(Error::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_oversized_counts_are_syntax_errors() {
        let inline = parse("v[99999999999999999]: 1").unwrap_err();
        assert!(matches!(inline, Error::Syntax { line: 1, .. }));

        let listed = parse("a: 1\nv[99999999999999999]:\n  - 1").unwrap_err();
        assert!(matches!(listed, Error::Syntax { line: 2, .. }));
    }

    fn nested_objects(levels: usize) -> String {
        let mut text = String::new();
        for level in 0..levels {
            text.push_str(&" ".repeat(level * 2));
            text.push_str("k:\n");
        }
        text.push_str(&" ".repeat(levels * 2));
        text.push_str("leaf: 1");
        text
    }

    #[test]
    fn test_depth_limit() {
        // the root object counts as one level
        let deepest = parse(&nested_objects(MAX_DEPTH - 1)).unwrap();
        assert!(deepest.is_object());

        match parse(&nested_objects(MAX_DEPTH)) {
            Err(Error::Syntax { line, msg, .. }) => {
                assert_eq!(line, MAX_DEPTH);
                assert!(msg.contains("deeper than"), "{}", msg);
            }
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_bad_indentation() {
        let err = parse("a:\n    b: 1\n  c: 2").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 3, .. }));
    }

    #[test]
    fn test_number_grammar() {
        assert_eq!(parse_number("12"), Some(Number::Integer(12)));
        assert_eq!(parse_number("-0.5"), Some(Number::Float(-0.5)));
        assert_eq!(parse_number("1e-7"), Some(Number::Float(1e-7)));
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("-"), None);
    }
}
