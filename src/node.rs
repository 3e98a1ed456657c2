//! The tree document's node type.

use crate::{Error, Field, Map, Result, TreeOptions, Value};
use serde::{Deserialize, Serialize};

/// One object's serialized scope: its name, its positional fields and its
/// ordered children.
///
/// A tree formatter builds one of these per nested save; the whole document is a
/// single `Node` named [`Node::ROOT_NAME`].
///
/// # Examples
///
/// ```rust
/// use save_tree::{Field, Node};
///
/// let mut root = Node::root();
/// root.push_field(Field::from(3));
/// let mut child = Node::new("Item");
/// child.push_field(Field::from("sword"));
/// root.push_child(child);
///
/// assert_eq!(root.field(0), Some(&Field::Int(3)));
/// assert_eq!(root.child(0).map(|c| c.name()), Some("Item"));
/// assert_eq!(root.node_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Name of the node a top-level save starts in.
    pub const ROOT_NAME: &'static str = "root";

    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Node::new(Node::ROOT_NAME)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    #[inline]
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Number of nodes in this subtree, counting `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Length of the longest path from `self` down to a leaf, counting both ends.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Converts the subtree to the generic `{ name, fields, children }` value.
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(3);
        map.insert("name".to_string(), Value::from(self.name.as_str()));
        map.insert(
            "fields".to_string(),
            Value::Array(self.fields.iter().map(Field::to_value).collect()),
        );
        map.insert(
            "children".to_string(),
            Value::Array(self.children.iter().map(Node::to_value).collect()),
        );
        Value::Object(map)
    }

    /// Rebuilds a subtree from its generic value.
    ///
    /// `fields` and `children` may be left out and read as empty. Any other key,
    /// a missing name or a malformed field is an [`Error::InvalidDocument`].
    pub fn from_value(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::invalid_document(format!(
                    "node must be an object, found {}",
                    other.kind()
                )))
            }
        };

        let mut name = None;
        let mut fields = Vec::new();
        let mut children = Vec::new();
        for (key, value) in map {
            match key.as_str() {
                "name" => match value {
                    Value::String(s) => name = Some(s),
                    other => {
                        return Err(Error::invalid_document(format!(
                            "node name must be a string, found {}",
                            other.kind()
                        )))
                    }
                },
                "fields" => {
                    fields = expect_array("fields", value)?
                        .iter()
                        .map(Field::from_value)
                        .collect::<Result<_>>()?;
                }
                "children" => {
                    children = expect_array("children", value)?
                        .into_iter()
                        .map(Node::from_value)
                        .collect::<Result<_>>()?;
                }
                other => {
                    return Err(Error::invalid_document(format!(
                        "unexpected key '{}' in node",
                        other
                    )))
                }
            }
        }

        let name = name.ok_or_else(|| Error::invalid_document("node has no name"))?;
        Ok(Node {
            name,
            fields,
            children,
        })
    }

    /// Renders the subtree as tree document text.
    pub fn to_text(&self, options: &TreeOptions) -> Result<String> {
        crate::to_string_with_options(&self.to_value(), options.clone())
    }

    /// Parses tree document text into a node.
    ///
    /// ```rust
    /// use save_tree::{Field, Node};
    ///
    /// let node = Node::from_text("name: root\nfields[1]:\n  - u8: 9\nchildren[0]:").unwrap();
    /// assert_eq!(node.fields(), &[Field::Byte(9)]);
    /// ```
    pub fn from_text(text: &str) -> Result<Self> {
        Node::from_value(crate::from_str(text)?)
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::root()
    }
}

fn expect_array(key: &str, value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(Error::invalid_document(format!(
            "node {} must be an array, found {}",
            key,
            other.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tree_value, Vector3};

    fn sample() -> Node {
        let mut root = Node::root();
        root.push_field(Field::Int(1));
        let mut child = Node::new("Transform");
        child.push_field(Field::Vector3(Vector3::new(0.0, 1.5, 2.0)));
        child.push_child(Node::new("Empty"));
        root.push_child(child);
        root
    }

    #[test]
    fn test_value_roundtrip() {
        let node = sample();
        let back = Node::from_value(node.to_value()).unwrap();
        assert_eq!(back, node);
        assert_eq!(back.depth(), 3);
        assert_eq!(back.node_count(), 3);
    }

    #[test]
    fn test_missing_collections_read_as_empty() {
        let node = Node::from_value(tree_value!({ "name": "Leaf" })).unwrap();
        assert_eq!(node, Node::new("Leaf"));
    }

    #[test]
    fn test_schema_errors() {
        let no_name = tree_value!({ "fields": [] });
        assert!(matches!(
            Node::from_value(no_name),
            Err(Error::InvalidDocument(_))
        ));

        let extra = tree_value!({ "name": "a", "extra": 1 });
        assert!(matches!(
            Node::from_value(extra),
            Err(Error::InvalidDocument(_))
        ));

        let bad_children = tree_value!({ "name": "a", "children": 3 });
        assert!(matches!(
            Node::from_value(bad_children),
            Err(Error::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_text_roundtrip() {
        let node = sample();
        let text = node.to_text(&TreeOptions::default()).unwrap();
        assert_eq!(Node::from_text(&text).unwrap(), node);
    }
}
