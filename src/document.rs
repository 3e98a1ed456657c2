//! Tree document format.
//!
//! This module documents the text a [`TreeFormatter`](crate::TreeFormatter) writes
//! and reads. It holds no code.
//!
//! # Node layout
//!
//! Every saved object becomes one node with three entries, always in this order:
//!
//! ```text
//! name: Player
//! fields[3]:
//!   - str: hero
//!   - i32: 100
//!   - vec3[3]: 1.0,0.0,-2.5
//! children[1]:
//!   - name: Inventory
//!     fields[1]:
//!       - i32: 0
//!     children[0]:
//! ```
//!
//! - `name` is the object's [`node_name`](crate::Saveable::node_name). The node a
//!   top-level save starts in is called `root`.
//! - `fields` lists the fields in the order they were written. Each field is a
//!   one-entry object whose key is the field's kind.
//! - `children` lists nested objects in the order they were saved.
//!
//! When reading, `fields` and `children` may be left out and count as empty.
//! Any other key is rejected.
//!
//! # Field kinds
//!
//! | tag    | written by                                              | payload              |
//! |--------|---------------------------------------------------------|----------------------|
//! | `i32`  | [`write_i32`](crate::Formatter::write_i32)              | integer              |
//! | `u32`  | [`write_u32`](crate::Formatter::write_u32)              | integer              |
//! | `i64`  | [`write_i64`](crate::Formatter::write_i64)              | integer              |
//! | `u8`   | [`write_u8`](crate::Formatter::write_u8)                | integer              |
//! | `bool` | [`write_bool`](crate::Formatter::write_bool)            | `true` / `false`     |
//! | `f32`  | [`write_f32`](crate::Formatter::write_f32)              | number               |
//! | `str`  | [`write_str`](crate::Formatter::write_str)              | string               |
//! | `vec3` | [`write_vector3`](crate::Formatter::write_vector3)      | array of 3 numbers   |
//! | `quat` | [`write_quaternion`](crate::Formatter::write_quaternion)| array of 4 numbers   |
//! | `ints` | [`write_i32_array`](crate::Formatter::write_i32_array)  | array of integers    |
//!
//! Integers out of range for their tag are rejected when the document is read.
//! `f32` values are written at `f64` precision, which reads back to the same `f32`.
//!
//! # Syntax
//!
//! ## Objects
//!
//! One `key: value` entry per line. An entry whose value is an object ends in `:`
//! and its entries follow, indented one level (two spaces by default, see
//! [`TreeOptions::with_indent`](crate::TreeOptions::with_indent)). An empty object
//! is just `key:`.
//!
//! ## Arrays
//!
//! The header `key[N]:` gives the element count, which is checked on read.
//!
//! - When every element is a scalar they follow on the same line:
//!   `ints[3]: 4,5,6`.
//! - Otherwise each element sits on its own line, indented one level and starting
//!   with `- `. An object element puts its first entry right after the dash and
//!   lines its remaining entries up under it. An empty object element is a lone `-`.
//!
//! The inline separator is set by [`Delimiter`](crate::Delimiter). Anything other
//! than a comma is recorded in the header: `ints[3|]: 4|5|6`, or a tab before `]`.
//!
//! ## Scalars
//!
//! | value          | text                                    |
//! |----------------|-----------------------------------------|
//! | null           | `null`                                  |
//! | booleans       | `true`, `false`                         |
//! | integers       | `42`, `-7`                              |
//! | floats         | `0.5`, `1e-7`, always with `.` or `e`   |
//! | special floats | `Infinity`, `-Infinity`, `NaN`          |
//! | strings        | bare, or double-quoted when ambiguous   |
//!
//! A string is quoted when it is empty, has surrounding whitespace, contains one
//! of `: , | [ ] " \` or a control character, or would otherwise read back as a
//! literal or a number. Quoted strings use the escapes `\"`, `\\`, `\n`, `\r`,
//! `\t`, `\b`, `\f`, `\0` and `\uXXXX`.
//!
//! Keys follow the same quoting rules, and a key starting with `-` is always quoted
//! so it cannot be mistaken for a list item.
//!
//! # Errors
//!
//! Text that does not follow this syntax fails with
//! [`Error::Syntax`](crate::Error::Syntax), which points at the line and column.
//! Well-formed text that does not describe a node fails with
//! [`Error::InvalidDocument`](crate::Error::InvalidDocument). Either way the load
//! stops before any [`Saveable`](crate::Saveable) runs.
//!
//! Objects and arrays may nest at most [`MAX_DEPTH`](crate::de::MAX_DEPTH)
//! levels deep; deeper text is a syntax error. Array counts in headers are
//! checked against the elements actually present.
