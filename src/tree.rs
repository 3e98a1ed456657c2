//! Hierarchical formatter.
//!
//! [`TreeFormatter`] turns every nested save into a child [`Node`] and every field
//! write into the next slot of the current node. It keeps a cursor into the tree
//! made of the current node, its field index and its child-read index. Entering
//! a nested object pushes the cursor on a scope stack; returning pops it.
//!
//! On save the cursor appends: the field index is the slot the next write lands
//! in, and children are appended as nested saves start. On load the cursor walks:
//! the field index is the slot the next read comes from, and the child index
//! picks which child the next nested load descends into.
//!
//! ```rust
//! use save_tree::{Formatter, Node, Result, Saveable, TreeFormatter};
//!
//! struct Leaf(u8);
//!
//! impl Saveable for Leaf {
//!     fn save<F: Formatter>(&self, f: &mut F) -> Result<()> {
//!         f.write_u8(self.0)
//!     }
//!     fn load<F: Formatter>(&mut self, f: &mut F) -> Result<()> {
//!         self.0 = f.read_u8()?;
//!         Ok(())
//!     }
//! }
//!
//! let mut tree = TreeFormatter::new();
//! tree.write_i32(2).unwrap();
//! tree.save(&Leaf(7)).unwrap();
//! tree.save(&Leaf(9)).unwrap();
//! let doc = tree.into_document();
//!
//! assert_eq!(doc.children().len(), 2);
//! assert_eq!(doc.children()[1].name(), "Leaf");
//!
//! let mut reader = TreeFormatter::from_document(doc);
//! assert_eq!(reader.read_i32().unwrap(), 2);
//! let mut first = Leaf(0);
//! let mut second = Leaf(0);
//! reader.load(&mut first).unwrap();
//! reader.load(&mut second).unwrap();
//! assert_eq!((first.0, second.0), (7, 9));
//! ```

use crate::arena::{Arena, NodeId};
use crate::{Error, Field, Formatter, Node, Quaternion, Result, Saveable, TreeOptions, Vector3};

/// Cursor state for one node. Copied onto the scope stack when a nested
/// save or load starts and copied back when it returns.
#[derive(Clone, Copy, Debug)]
struct Scope {
    node: NodeId,
    field: usize,
    child: usize,
}

impl Scope {
    fn enter(node: NodeId) -> Self {
        Scope {
            node,
            field: 0,
            child: 0,
        }
    }
}

/// Formatter that records objects as a tree of [`Node`]s.
#[derive(Debug)]
pub struct TreeFormatter {
    arena: Arena,
    root: NodeId,
    cursor: Scope,
    stack: Vec<Scope>,
    options: TreeOptions,
}

impl TreeFormatter {
    /// Creates a formatter for saving, positioned on an empty root node.
    pub fn new() -> Self {
        TreeFormatter::with_options(TreeOptions::default())
    }

    pub fn with_options(options: TreeOptions) -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::ROOT_NAME.to_string());
        TreeFormatter {
            arena,
            root,
            cursor: Scope::enter(root),
            stack: Vec::new(),
            options,
        }
    }

    /// Creates a formatter for loading, positioned on the root of `document`.
    pub fn from_document(document: Node) -> Self {
        TreeFormatter::from_document_with_options(document, TreeOptions::default())
    }

    pub fn from_document_with_options(document: Node, options: TreeOptions) -> Self {
        let (arena, root) = Arena::from_node(document);
        TreeFormatter {
            arena,
            root,
            cursor: Scope::enter(root),
            stack: Vec::new(),
            options,
        }
    }

    /// Returns the whole document, whatever the cursor position.
    pub fn into_document(self) -> Node {
        self.arena.into_node(self.root)
    }

    #[inline]
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Number of nested scopes currently open. Zero at the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of nodes in the document, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Name of the node the cursor is on.
    pub fn current_name(&self) -> &str {
        &self.arena.get(self.cursor.node).name
    }

    fn push_field(&mut self, field: Field) -> Result<()> {
        self.arena.get_mut(self.cursor.node).fields.push(field);
        self.cursor.field += 1;
        Ok(())
    }

    /// Reads the slot under the cursor through `extract`, which returns `None`
    /// when the slot holds another kind.
    fn read_field<T>(
        &mut self,
        expected: &'static str,
        extract: impl FnOnce(&Field) -> Option<T>,
    ) -> Result<T> {
        let index = self.cursor.field;
        let slot = self.arena.get(self.cursor.node);
        let field = slot
            .fields
            .get(index)
            .ok_or_else(|| Error::missing_field(&slot.name, index, slot.fields.len()))?;
        let value = extract(field)
            .ok_or_else(|| Error::field_type(&slot.name, index, expected, field.kind()))?;
        self.cursor.field += 1;
        Ok(value)
    }

    fn enter(&mut self, node: NodeId) {
        self.stack.push(self.cursor);
        self.cursor = Scope::enter(node);
        log::trace!(
            "enter '{}' at depth {}",
            self.arena.get(node).name,
            self.stack.len()
        );
    }

    fn leave(&mut self) -> Option<Scope> {
        let parent = self.stack.pop()?;
        log::trace!(
            "leave '{}' at depth {}",
            self.arena.get(self.cursor.node).name,
            self.stack.len() + 1
        );
        self.cursor = parent;
        Some(parent)
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        TreeFormatter::new()
    }
}

impl Formatter for TreeFormatter {
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.push_field(Field::Int(value))
    }

    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.push_field(Field::UInt(value))
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.push_field(Field::Long(value))
    }

    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.push_field(Field::Byte(value))
    }

    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.push_field(Field::Bool(value))
    }

    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.push_field(Field::Float(value))
    }

    fn write_str(&mut self, value: &str) -> Result<()> {
        self.push_field(Field::String(value.to_string()))
    }

    fn write_vector3(&mut self, value: Vector3) -> Result<()> {
        self.push_field(Field::Vector3(value))
    }

    fn write_quaternion(&mut self, value: Quaternion) -> Result<()> {
        self.push_field(Field::Quaternion(value))
    }

    fn write_i32_array(&mut self, value: &[i32]) -> Result<()> {
        self.push_field(Field::IntArray(value.to_vec()))
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.read_field("i32", Field::as_i32)
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.read_field("u32", Field::as_u32)
    }

    fn read_i64(&mut self) -> Result<i64> {
        self.read_field("i64", Field::as_i64)
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.read_field("u8", Field::as_u8)
    }

    fn read_bool(&mut self) -> Result<bool> {
        self.read_field("bool", Field::as_bool)
    }

    fn read_f32(&mut self) -> Result<f32> {
        self.read_field("f32", Field::as_f32)
    }

    fn read_string(&mut self) -> Result<String> {
        self.read_field("str", |f| f.as_str().map(str::to_string))
    }

    fn read_vector3(&mut self) -> Result<Vector3> {
        self.read_field("vec3", Field::as_vector3)
    }

    fn read_quaternion(&mut self) -> Result<Quaternion> {
        self.read_field("quat", Field::as_quaternion)
    }

    fn read_i32_array(&mut self) -> Result<Vec<i32>> {
        self.read_field("ints", |f| f.as_i32_array().map(<[i32]>::to_vec))
    }

    /// Appends a child node to the current node, then saves `child` into it.
    ///
    /// The child is attached before `child.save` runs, so a failed save still
    /// leaves it in the document with whatever fields it got.
    fn save<S: Saveable>(&mut self, child: &S) -> Result<()> {
        let id = self.arena.alloc(child.node_name().into_owned());
        self.arena.get_mut(self.cursor.node).children.push(id);
        self.enter(id);
        let result = child.save(self);
        self.leave();
        result
    }

    /// Descends into the next unread child of the current node and loads
    /// `child` from it.
    fn load<S: Saveable>(&mut self, child: &mut S) -> Result<()> {
        let slot = self.arena.get(self.cursor.node);
        let index = self.cursor.child;
        let id = *slot
            .children
            .get(index)
            .ok_or_else(|| Error::missing_child(&slot.name, index, slot.children.len()))?;

        if self.options.strict_names {
            let expected = child.node_name();
            let found = &self.arena.get(id).name;
            if *found != expected {
                return Err(Error::NameMismatch {
                    expected: expected.into_owned(),
                    found: found.clone(),
                });
            }
        }

        self.enter(id);
        let result = child.load(self);
        if self.leave().is_some() {
            self.cursor.child += 1;
        }
        result
    }
}
