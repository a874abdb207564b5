//! Arena-backed document tree.
//!
//! Every node of a document lives in one `Vec` and is addressed by a
//! [`NodeId`]. Containers store ids of their children, and the cursor stores
//! ids of the frames it has open, so growing or rewriting one part of the
//! tree never invalidates a position held elsewhere.
//!
//! Node 0 is always the root object. Replacing a member reuses the slot of
//! the old node, so rewriting a value does not grow the arena. Children of a
//! replaced container stay unreachable until the document is cleared or
//! replaced by a parse.

use crate::{Error, Number, Result, Value, ValueMap, VERSION_KEY};
use indexmap::IndexMap;

/// Stable index of a node inside a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the tree: a container or a leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<NodeId>),
    Object(IndexMap<String, NodeId>),
}

impl Node {
    /// Short type name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Number(n) => n.kind(),
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// The owned tree of one serializer.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only an empty root object.
    #[must_use]
    pub fn new() -> Self {
        Document {
            nodes: vec![Node::Object(IndexMap::new())],
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of allocated nodes, reachable or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Looks up member `name` of an object node.
    #[must_use]
    pub fn member(&self, object: NodeId, name: &str) -> Option<NodeId> {
        match self.node(object) {
            Node::Object(members) => members.get(name).copied(),
            _ => None,
        }
    }

    /// Looks up element `index` of an array node.
    #[must_use]
    pub fn element(&self, array: NodeId, index: usize) -> Option<NodeId> {
        match self.node(array) {
            Node::Array(elements) => elements.get(index).copied(),
            _ => None,
        }
    }

    #[must_use]
    pub fn array_len(&self, array: NodeId) -> Option<usize> {
        match self.node(array) {
            Node::Array(elements) => Some(elements.len()),
            _ => None,
        }
    }

    /// Returns the version tag of an entry object.
    #[must_use]
    pub fn version(&self, object: NodeId) -> Option<u64> {
        self.member(object, VERSION_KEY)
            .and_then(|id| self.node(id).as_number())
            .and_then(|n| n.as_u64())
    }

    /// Attaches an already allocated node as member `name`, replacing any
    /// previous member of that name in place.
    pub(crate) fn attach_member(&mut self, object: NodeId, name: String, child: NodeId) -> Result<()> {
        match &mut self.nodes[object.0] {
            Node::Object(members) => {
                members.insert(name, child);
                Ok(())
            }
            other => Err(Error::type_mismatch("object", other.kind())),
        }
    }

    /// Appends an already allocated node to an array.
    pub(crate) fn attach_element(&mut self, array: NodeId, child: NodeId) -> Result<()> {
        match &mut self.nodes[array.0] {
            Node::Array(elements) => {
                elements.push(child);
                Ok(())
            }
            other => Err(Error::type_mismatch("array", other.kind())),
        }
    }

    /// Stores `node` as member `name`. An existing member keeps its id and
    /// position and has its node overwritten.
    pub(crate) fn insert_member(&mut self, object: NodeId, name: &str, node: Node) -> Result<NodeId> {
        let existing = match self.node(object) {
            Node::Object(members) => members.get(name).copied(),
            other => return Err(Error::type_mismatch("object", other.kind())),
        };
        if let Some(id) = existing {
            self.nodes[id.0] = node;
            return Ok(id);
        }
        let child = self.alloc(node);
        self.attach_member(object, name.to_string(), child)?;
        Ok(child)
    }

    pub(crate) fn push_element(&mut self, array: NodeId, node: Node) -> Result<NodeId> {
        if !matches!(self.node(array), Node::Array(_)) {
            return Err(Error::type_mismatch("array", self.node(array).kind()));
        }
        let child = self.alloc(node);
        self.attach_element(array, child)?;
        Ok(child)
    }

    pub(crate) fn reserve(&mut self, array: NodeId, additional: usize) -> Result<()> {
        match &mut self.nodes[array.0] {
            Node::Array(elements) => {
                elements.reserve(additional);
                Ok(())
            }
            other => Err(Error::type_mismatch("array", other.kind())),
        }
    }

    /// Number of nested containers on the deepest path below and including
    /// `id`, counted the way the parser counts them. Leaves add nothing.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(id, 1)];
        while let Some((id, level)) = pending.pop() {
            let children: Box<dyn Iterator<Item = &NodeId>> = match self.node(id) {
                Node::Array(elements) => Box::new(elements.iter()),
                Node::Object(members) => Box::new(members.values()),
                _ => continue,
            };
            deepest = deepest.max(level);
            pending.extend(children.map(|child| (*child, level + 1)));
        }
        deepest
    }

    /// Copies the subtree rooted at `id` into an owned [`Value`].
    #[must_use]
    pub fn to_value(&self, id: NodeId) -> Value {
        match self.node(id) {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => Value::Number(*n),
            Node::String(s) => Value::String(s.clone()),
            Node::Array(elements) => {
                Value::Array(elements.iter().map(|e| self.to_value(*e)).collect())
            }
            Node::Object(members) => Value::Object(
                members
                    .iter()
                    .map(|(k, v)| (k.clone(), self.to_value(*v)))
                    .collect::<ValueMap>(),
            ),
        }
    }

    /// Allocates `value` and all of its children, returning the new subtree.
    pub(crate) fn import(&mut self, value: Value) -> NodeId {
        match value {
            Value::Null => self.alloc(Node::Null),
            Value::Bool(b) => self.alloc(Node::Bool(b)),
            Value::Number(n) => self.alloc(Node::Number(n)),
            Value::String(s) => self.alloc(Node::String(s)),
            Value::Array(elements) => {
                let children: Vec<NodeId> = elements.into_iter().map(|e| self.import(e)).collect();
                self.alloc(Node::Array(children))
            }
            Value::Object(members) => {
                let children: IndexMap<String, NodeId> = members
                    .into_iter()
                    .map(|(k, v)| (k, self.import(v)))
                    .collect();
                self.alloc(Node::Object(children))
            }
        }
    }

    /// Builds a document whose root holds the members of `members`.
    pub(crate) fn from_members(members: ValueMap) -> Self {
        let mut document = Document::new();
        let children: IndexMap<String, NodeId> = members
            .into_iter()
            .map(|(k, v)| (k, document.import(v)))
            .collect();
        document.nodes[NodeId::ROOT.0] = Node::Object(children);
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn test_ids_stay_valid_while_growing() {
        let mut document = Document::new();
        let root = document.root();
        let array = document.insert_member(root, "list", Node::Array(Vec::new())).unwrap();
        let first = document.push_element(array, Node::Bool(true)).unwrap();

        for i in 0..1000 {
            document
                .push_element(array, Node::Number(Number::from(i)))
                .unwrap();
        }

        assert_eq!(document.node(first), &Node::Bool(true));
        assert_eq!(document.member(root, "list"), Some(array));
        assert_eq!(document.array_len(array), Some(1001));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut document = Document::new();
        let root = document.root();
        document.insert_member(root, "a", Node::Null).unwrap();
        document.insert_member(root, "b", Node::Null).unwrap();
        let replaced = document.insert_member(root, "a", Node::Bool(false)).unwrap();

        assert_eq!(document.member(root, "a"), Some(replaced));
        assert_eq!(document.to_value(root), value!({ "a": false, "b": null }));
    }

    #[test]
    fn test_overwrite_reuses_slot() {
        let mut document = Document::new();
        let root = document.root();
        let first = document.insert_member(root, "counter", Node::Null).unwrap();
        let count = document.node_count();

        for i in 0..10_000 {
            let id = document
                .insert_member(root, "counter", Node::Number(Number::from(i)))
                .unwrap();
            assert_eq!(id, first);
        }
        let id = document
            .insert_member(root, "counter", Node::Array(Vec::new()))
            .unwrap();
        assert_eq!(id, first);
        assert_eq!(document.node_count(), count);
        assert_eq!(document.array_len(first), Some(0));
    }

    #[test]
    fn test_depth_counts_containers() {
        let mut document = Document::new();
        let root = document.root();
        assert_eq!(document.depth(root), 1);

        let array = document.insert_member(root, "a", Node::Array(Vec::new())).unwrap();
        document.push_element(array, Node::Bool(true)).unwrap();
        assert_eq!(document.depth(root), 2);

        let inner = document.push_element(array, Node::Object(IndexMap::new())).unwrap();
        document.insert_member(inner, "leaf", Node::Null).unwrap();
        document.insert_member(root, "flat", Node::Object(IndexMap::new())).unwrap();
        assert_eq!(document.depth(root), 3);
        assert_eq!(document.depth(array), 2);
    }

    #[test]
    fn test_container_kind_checked() {
        let mut document = Document::new();
        let root = document.root();
        let leaf = document.insert_member(root, "leaf", Node::Null).unwrap();

        assert_eq!(
            document.push_element(leaf, Node::Null).unwrap_err(),
            Error::type_mismatch("array", "null")
        );
        assert_eq!(
            document.insert_member(leaf, "x", Node::Null).unwrap_err(),
            Error::type_mismatch("object", "null")
        );
        assert!(document.reserve(root, 4).is_err());
    }

    #[test]
    fn test_version_requires_unsigned_tag() {
        let document = Document::from_members(
            match value!({
                "good": { "__VERSION__": 2 },
                "negative": { "__VERSION__": (-1) },
                "text": { "__VERSION__": "2" },
                "plain": {}
            }) {
                Value::Object(members) => members,
                _ => unreachable!(),
            },
        );
        let root = document.root();
        let lookup = |name| document.version(document.member(root, name).unwrap());

        assert_eq!(lookup("good"), Some(2));
        assert_eq!(lookup("negative"), None);
        assert_eq!(lookup("text"), None);
        assert_eq!(lookup("plain"), None);
    }

    #[test]
    fn test_import_export_roundtrip() {
        let original = value!({
            "n": [1, (-2), 2.5, "s", null, true],
            "o": { "inner": [] }
        });
        let members = match original.clone() {
            Value::Object(members) => members,
            _ => unreachable!(),
        };
        let document = Document::from_members(members);
        assert_eq!(document.to_value(document.root()), original);
    }
}
