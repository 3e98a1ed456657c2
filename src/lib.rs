//! # save_tree
//!
//! Format-agnostic object persistence.
//!
//! Domain objects implement [`Saveable`]: one method that writes their fields to a
//! [`Formatter`] and one that reads them back in the same order. Nested objects are
//! handed to [`Formatter::save`] / [`Formatter::load`]. The same two methods then
//! work against every formatter:
//!
//! - [`BinaryFormatter`]: packed little- or big-endian bytes
//! - [`TextFormatter`]: one value per line
//! - [`TreeFormatter`]: a tree of named [`Node`]s, one per object, stored as an
//!   indentation-based document (see [`document`])
//!
//! The flat formatters only see a stream of fields; the tree formatter also
//! records which object each field belongs to, so its documents can be read and
//! edited by hand.
//!
//! ## Quick Start
//!
//! ```rust
//! use save_tree::{Formatter, Result, Saveable, TreeFormatter, Vector3};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Item {
//!     name: String,
//!     count: u32,
//! }
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Player {
//!     position: Vector3,
//!     health: i32,
//!     inventory: Vec<Item>,
//! }
//!
//! impl Saveable for Item {
//!     fn save<F: Formatter>(&self, f: &mut F) -> Result<()> {
//!         f.write_str(&self.name)?;
//!         f.write_u32(self.count)
//!     }
//!
//!     fn load<F: Formatter>(&mut self, f: &mut F) -> Result<()> {
//!         f.read_into(&mut self.name)?;
//!         f.read_into(&mut self.count)
//!     }
//! }
//!
//! impl Saveable for Player {
//!     fn save<F: Formatter>(&self, f: &mut F) -> Result<()> {
//!         f.write_vector3(self.position)?;
//!         f.write_i32(self.health)?;
//!         f.save_seq(&self.inventory)
//!     }
//!
//!     fn load<F: Formatter>(&mut self, f: &mut F) -> Result<()> {
//!         f.read_into(&mut self.position)?;
//!         f.read_into(&mut self.health)?;
//!         self.inventory = f.load_vec(Item::default)?;
//!         Ok(())
//!     }
//! }
//!
//! let player = Player {
//!     position: Vector3::new(1.0, 2.0, 0.5),
//!     health: 75,
//!     inventory: vec![Item { name: "potion".into(), count: 3 }],
//! };
//!
//! let bytes = save_tree::to_bytes::<TreeFormatter, _>(&player).unwrap();
//! let text = String::from_utf8(bytes.clone()).unwrap();
//! assert!(text.contains("name: Item"));
//!
//! let mut loaded = Player::default();
//! save_tree::from_bytes::<TreeFormatter, _>(&bytes, &mut loaded).unwrap();
//! assert_eq!(loaded, player);
//! ```
//!
//! ## Files
//!
//! [`save`] creates missing parent directories and replaces the file. [`load`]
//! returns `Ok(false)` when the file does not exist, leaving the target untouched.
//!
//! ```rust,no_run
//! # use save_tree::{Formatter, Result, Saveable, BinaryFormatter};
//! # #[derive(Default)] struct World;
//! # impl Saveable for World {
//! #     fn save<F: Formatter>(&self, _: &mut F) -> Result<()> { Ok(()) }
//! #     fn load<F: Formatter>(&mut self, _: &mut F) -> Result<()> { Ok(()) }
//! # }
//! let mut world = World::default();
//! if !save_tree::load::<BinaryFormatter, _>("saves/world.bin", &mut world).unwrap() {
//!     save_tree::save::<BinaryFormatter, _>("saves/world.bin", &world).unwrap();
//! }
//! ```
//!
//! ## Errors
//!
//! Everything returns [`Result`]. When a load asks for more fields or children
//! than were saved, or for a field of another kind, the tree formatter reports it
//! as a structural mismatch (see [`Error::is_structural`]). Flat formatters cannot
//! tell; they report running out of input or a value that does not decode.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: a missing load target at `info`,
//! medium sizes after each save or load at `debug`, and scope changes of the tree
//! formatter at `trace`.

mod arena;
pub mod binary;
pub mod de;
pub mod document;
pub mod error;
pub mod field;
pub mod formatter;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod persist;
pub mod saveable;
pub mod ser;
pub mod text;
pub mod tree;
pub mod value;

pub use binary::BinaryFormatter;
pub use error::{Error, Result};
pub use field::{Field, Quaternion, Vector3};
pub use formatter::Formatter;
pub use map::Map;
pub use node::Node;
pub use options::{BinaryOptions, Delimiter, Endian, TreeOptions};
pub use persist::{
    from_bytes, from_bytes_with_options, from_document, load, load_with_options, save,
    save_with_options, to_bytes, to_bytes_with_options, to_document, Format,
};
pub use saveable::{Primitive, Saveable};
pub use text::TextFormatter;
pub use tree::TreeFormatter;
pub use value::{Number, Value};

/// Renders a document [`Value`] as text with the default [`TreeOptions`].
///
/// The root must be an object.
///
/// # Examples
///
/// ```rust
/// use save_tree::{to_string, tree_value};
///
/// let doc = tree_value!({ "name": "root", "children": [] });
/// assert_eq!(to_string(&doc).unwrap(), "name: root\nchildren[0]:");
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, TreeOptions::default())
}

/// Renders a document [`Value`] as text with custom options.
///
/// # Examples
///
/// ```rust
/// use save_tree::{to_string_with_options, tree_value, Delimiter, TreeOptions};
///
/// let doc = tree_value!({ "ints": [1, 2, 3] });
/// let options = TreeOptions::new().with_delimiter(Delimiter::Tab);
/// assert_eq!(to_string_with_options(&doc, options).unwrap(), "ints[3\t]: 1\t2\t3");
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(value: &Value, options: TreeOptions) -> Result<String> {
    let mut writer = ser::Writer::new(options);
    writer.write_document(value)?;
    Ok(writer.into_inner())
}

/// Parses document text into a [`Value`] object.
///
/// # Examples
///
/// ```rust
/// use save_tree::{from_str, tree_value};
///
/// let value = from_str("name: Crate\nfields[1]:\n  - bool: true").unwrap();
/// assert_eq!(
///     value,
///     tree_value!({ "name": "Crate", "fields": [{ "bool": true }] })
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] with line and column information when the text is
/// not a well-formed document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Value> {
    de::Parser::new(s).parse_document()
}
