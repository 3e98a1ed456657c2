//! Flat storage for the nodes of a tree formatter.
//!
//! While a save or load is running, the tree lives in an arena and the cursor
//! holds [`NodeId`]s into it. The owned [`Node`] shape is only produced at the
//! edges, when the document is flattened in or rebuilt out.

use crate::{Field, Node};

/// Index of a slot in an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
pub(crate) struct Slot {
    pub(crate) name: String,
    pub(crate) fields: Vec<Field>,
    pub(crate) children: Vec<NodeId>,
}

/// Append-only node arena. Slots are never freed; the arena is dropped whole.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
}

impl Arena {
    pub(crate) fn new() -> Self {
        Arena { slots: Vec::new() }
    }

    pub(crate) fn alloc(&mut self, name: String) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            name,
            fields: Vec::new(),
            children: Vec::new(),
        });
        id
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Slot {
        &self.slots[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Slot {
        &mut self.slots[id.index()]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Moves a whole tree into a fresh arena and returns it with the root's id.
    pub(crate) fn from_node(node: Node) -> (Arena, NodeId) {
        let mut arena = Arena::new();
        let root = arena.insert(node);
        (arena, root)
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let id = self.alloc(node.name);
        self.get_mut(id).fields = node.fields;
        let children: Vec<NodeId> = node
            .children
            .into_iter()
            .map(|child| self.insert(child))
            .collect();
        self.get_mut(id).children = children;
        id
    }

    /// Rebuilds the owned tree hanging off `root`, consuming the arena.
    pub(crate) fn into_node(mut self, root: NodeId) -> Node {
        self.take(root)
    }

    fn take(&mut self, id: NodeId) -> Node {
        let slot = std::mem::take(self.get_mut(id));
        Node {
            name: slot.name,
            fields: slot.fields,
            children: slot.children.into_iter().map(|child| self.take(child)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_and_rebuild() {
        let mut root = Node::root();
        root.push_field(Field::Bool(true));
        let mut a = Node::new("A");
        a.push_child(Node::new("A1"));
        root.push_child(a);
        root.push_child(Node::new("B"));

        let (arena, id) = Arena::from_node(root.clone());
        assert_eq!(arena.len(), 4);
        assert_eq!(arena.get(id).children.len(), 2);
        let first = arena.get(id).children[0];
        assert_eq!(arena.get(first).name, "A");

        assert_eq!(arena.into_node(id), root);
    }
}
