//! Ordered tree container with dict-like and array-like access.
//!
//! A [`Node`] maps [`Key`]s to [`Value`]s in insertion order. Values are
//! scalars or child nodes; anything else is wrapped into a child node when it
//! is stored. Setting an empty key appends at the next free integer index,
//! the same way `push` does.
//!
//! ## Example
//!
//! ```
//! use merry_tree::{Node, Value};
//! use serde_json::json;
//!
//! let mut node = Node::from(json!({"foo": "bar", "arr": [1, 2, 3]}));
//! let foo = node.get("foo")?.clone();
//! node.set("foo", vec![foo, Value::from("baz")]);
//! node.child_mut("arr")?.push(4);
//!
//! assert_eq!(node.to_flat(), json!({"foo": ["bar", "baz"], "arr": [1, 2, 3, 4]}));
//! # Ok::<(), merry_tree::NodeError>(())
//! ```

mod apply;
mod codec;
mod error;
mod flat;
mod iter;
mod key;
mod value;

use std::fmt;
use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

pub use apply::Modifier;
pub use error::NodeError;
pub use iter::Leaves;
pub use key::Key;
pub use value::Value;

/// An ordered mapping from [`Key`] to [`Value`].
///
/// Reads through [`get`](Self::get) never mutate. In auto-vivify mode,
/// [`get_mut`](Self::get_mut), [`child_mut`](Self::child_mut) and `IndexMut`
/// create an empty child node for a missing key instead of failing, which
/// allows building deep paths in one expression.
#[derive(Debug, Clone, Default)]
pub struct Node {
    entries: IndexMap<Key, Value>,
    next_index: u64,
    auto_vivify: bool,
    // Built from a sequence; keeps an emptied or empty list flattening as `[]`.
    sequence: bool,
}

impl Node {
    /// Creates an empty node with auto-vivification disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty node that vivifies missing children on mutable access.
    pub fn vivifying() -> Self {
        Self {
            auto_vivify: true,
            ..Self::default()
        }
    }

    /// Builds an array-like node with keys `0..n`.
    ///
    /// The node remembers that it is a list, so it flattens as a sequence
    /// even while empty, until a named key is stored in it.
    pub fn from_values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut node = Self {
            sequence: true,
            ..Self::default()
        };
        for value in values {
            node.push(value);
        }
        node
    }

    /// Whether mutable access vivifies missing children.
    pub fn auto_vivify(&self) -> bool {
        self.auto_vivify
    }

    /// Switches auto-vivification for this node and every descendant node.
    pub fn set_auto_vivify(&mut self, enabled: bool) {
        self.auto_vivify = enabled;
        for value in self.entries.values_mut() {
            if let Value::Node(child) = value {
                child.set_auto_vivify(enabled);
            }
        }
    }

    /// The index the next append will use.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the node has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value at `key`. Never vivifies.
    pub fn get(&self, key: impl Into<Key>) -> Result<&Value, NodeError> {
        let key = key.into();
        self.entries.get(&key).ok_or(NodeError::KeyNotFound(key))
    }

    /// Returns the value at `key` mutably.
    ///
    /// In auto-vivify mode a missing key is filled with a new, empty,
    /// vivifying child node first.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Result<&mut Value, NodeError> {
        let key = key.into();
        if self.auto_vivify && !self.entries.contains_key(&key) {
            self.insert(key.clone(), Value::Node(Node::vivifying()));
        }
        self.entries.get_mut(&key).ok_or(NodeError::KeyNotFound(key))
    }

    /// Returns the child node at `key`.
    pub fn child(&self, key: impl Into<Key>) -> Result<&Node, NodeError> {
        let key = key.into();
        match self.entries.get(&key) {
            Some(Value::Node(child)) => Ok(child),
            Some(_) => Err(NodeError::NotANode(key)),
            None => Err(NodeError::KeyNotFound(key)),
        }
    }

    /// Returns the child node at `key` mutably, vivifying it if enabled.
    pub fn child_mut(&mut self, key: impl Into<Key>) -> Result<&mut Node, NodeError> {
        let key = key.into();
        match self.get_mut(key.clone())? {
            Value::Node(child) => Ok(child),
            _ => Err(NodeError::NotANode(key)),
        }
    }

    /// Looks up a `.`-separated path through nested nodes. Never vivifies.
    pub fn get_path(&self, path: &str) -> Result<&Value, NodeError> {
        let mut segments = path.split('.').map(Key::from);
        let first = segments.next().unwrap_or_else(|| Key::from(path));
        let mut current = self.get(first)?;
        for segment in segments {
            current = match current {
                Value::Node(node) => node.get(segment)?,
                _ => return Err(NodeError::NotANode(segment)),
            };
        }
        Ok(current)
    }

    /// Stores `value` at `key`.
    ///
    /// An empty key appends at [`next_index`](Self::next_index). A numeric
    /// key at or past the next index advances it. Non-scalar values are
    /// wrapped into child nodes by their `Into<Value>` conversion.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        if key.is_empty() {
            self.push(value);
        } else {
            self.insert(key, value.into());
        }
    }

    /// Appends `value` at the next free index and returns that index.
    pub fn push(&mut self, value: impl Into<Value>) -> u64 {
        let index = self.next_index;
        self.insert(Key::Index(index), value.into());
        index
    }

    /// Returns true if `key` is present. Never vivifies.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Removes `key`, keeping the order of the remaining entries.
    ///
    /// Removing an absent key is a no-op. The append index is left alone.
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries.shift_remove(&key.into())
    }

    /// Iterates over direct entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// Direct keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    /// Direct values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Depth-first, pre-order iterator over scalar leaves of the whole tree.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self)
    }

    /// Raw insert: an empty name is stored literally.
    ///
    /// A child node stored into a vivifying node becomes vivifying too.
    pub(crate) fn insert(&mut self, key: Key, mut value: Value) -> Option<Value> {
        self.advance_index(&key);
        if let Value::Node(child) = &mut value {
            if self.auto_vivify && !child.auto_vivify {
                child.set_auto_vivify(true);
            }
        }
        self.entries.insert(key, value)
    }

    /// Returns the child node at `key`, replacing whatever else is stored
    /// there with a new empty node.
    pub(crate) fn branch_mut(&mut self, key: Key) -> &mut Node {
        self.advance_index(&key);
        let slot = self
            .entries
            .entry(key)
            .or_insert_with(|| Value::Node(Node::new()));
        if !slot.is_node() {
            *slot = Value::Node(Node::new());
        }
        match slot {
            Value::Node(child) => child,
            _ => unreachable!("slot holds a node"),
        }
    }

    fn advance_index(&mut self, key: &Key) {
        match key {
            Key::Index(i) if *i >= self.next_index => self.next_index = i.saturating_add(1),
            Key::Index(_) => {}
            Key::Name(_) => self.sequence = false,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<Key>> Index<K> for Node {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if the key is absent.
    fn index(&self, key: K) -> &Value {
        match self.get(key) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<K: Into<Key>> IndexMut<K> for Node {
    /// # Panics
    ///
    /// Panics if the key is absent and the node does not auto-vivify.
    fn index_mut(&mut self, key: K) -> &mut Value {
        match self.get_mut(key) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut node = Node::new();
        node.extend(iter);
        node
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Node {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl IntoIterator for Node {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<toml::Table> for Node {
    fn from(table: toml::Table) -> Self {
        table.into_iter().collect()
    }
}

/// Converts a JSON value; a scalar becomes the only entry, at index 0.
impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match Value::from(value) {
            Value::Node(node) => node,
            scalar => Node::from_values([scalar]),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_flat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Node {
        Node::from(json!({"foo": "bar", "bar": "foo"}))
    }

    #[test]
    fn test_basic_access() {
        let mut node = sample();
        assert_eq!(node.to_flat(), json!({"foo": "bar", "bar": "foo"}));
        assert_eq!(node.get("foo").unwrap(), "bar");
        assert_eq!(node["bar"], "foo");
        assert!(node.has("foo"));
        assert!(!node.has("foobar"));

        assert!(node.delete("bar").is_some());
        assert!(!node.has("bar"));
        assert!(node.delete("bar").is_none());
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_get_missing_key_is_an_error_and_does_not_mutate() {
        let node = sample();
        let err = node.get("missing").unwrap_err();
        assert!(matches!(err, NodeError::KeyNotFound(Key::Name(ref k)) if k == "missing"));
        assert_eq!(node.len(), 2);
    }

    #[test]
    fn test_strict_get_mut_does_not_vivify() {
        let mut node = sample();
        assert!(matches!(node.get_mut("missing"), Err(NodeError::KeyNotFound(_))));
        assert!(!node.has("missing"));
    }

    #[test]
    fn test_vivifying_get_mut_creates_child() {
        let mut node = Node::vivifying();
        node.child_mut("a")
            .unwrap()
            .child_mut("b")
            .unwrap()
            .set("c", 1);
        assert_eq!(node.to_flat(), json!({"a": {"b": {"c": 1}}}));
        assert!(node.child("a").unwrap().auto_vivify());
    }

    #[test]
    fn test_index_mut_vivifies() {
        let mut node = Node::vivifying();
        node["foo"] = "bar".into();
        node["bar"]["foo"] = "bar".into();
        assert_eq!(node.to_flat(), json!({"foo": "bar", "bar": {"foo": "bar"}}));
    }

    #[test]
    #[should_panic(expected = "key not found")]
    fn test_index_panics_on_missing_key() {
        let node = sample();
        let _ = &node["nope"];
    }

    #[test]
    fn test_set_then_get() {
        let mut node = Node::new();
        node.set("k", 1.5);
        assert_eq!(node.get("k").unwrap().as_f64(), Some(1.5));
        node.set("k", "replaced");
        assert_eq!(node["k"], "replaced");
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut node = sample();
        node.set("foo", "baz");
        let keys: Vec<String> = node.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["foo", "bar"]);
    }

    #[test]
    fn test_append_assigns_sequential_indices() {
        let mut node = Node::new();
        assert_eq!(node.push("a"), 0);
        node.set("", "b");
        assert_eq!(node.push("c"), 2);
        assert_eq!(node.to_flat(), json!(["a", "b", "c"]));
    }

    #[test]
    fn test_explicit_index_advances_counter() {
        let mut node = Node::new();
        node.set(5, "five");
        assert_eq!(node.next_index(), 6);
        node.set("2", "two");
        assert_eq!(node.next_index(), 6);
        assert_eq!(node.push("six"), 6);
        assert_eq!(node["5"], "five");
    }

    #[test]
    fn test_counter_never_decreases() {
        let mut node = Node::from_values([1, 2, 3]);
        node.delete(2);
        assert_eq!(node.push(4), 3);
    }

    #[test]
    fn test_non_scalars_are_wrapped() {
        let mut node = Node::new();
        node.set("list", vec!["x", "y"]);
        node.set("map", json!({"inner": true}));
        assert!(node.child("list").unwrap().has(1));
        assert_eq!(node["map"]["inner"], true);
    }

    #[test]
    fn test_set_array_scenario() {
        let mut node = Node::from(json!({"foo": "bar", "arr": [1, 2, 3]}));
        let foo = node.get("foo").unwrap().clone();
        node.set("foo", vec![foo, Value::from("baz")]);
        node.child_mut("arr").unwrap().push(4);

        assert_eq!(node.child("foo").unwrap().to_flat(), json!(["bar", "baz"]));
        assert_eq!(node.child("arr").unwrap().to_flat(), json!([1, 2, 3, 4]));
        assert_eq!(
            node.to_flat(),
            json!({"foo": ["bar", "baz"], "arr": [1, 2, 3, 4]})
        );
    }

    #[test]
    fn test_child_of_scalar_is_not_a_node() {
        let node = sample();
        assert!(matches!(node.child("foo"), Err(NodeError::NotANode(_))));
    }

    #[test]
    fn test_get_path() {
        let node = Node::from(json!({"a": {"b": {"c": "deep"}}, "list": ["x", "y"]}));
        assert_eq!(node.get_path("a.b.c").unwrap(), "deep");
        assert_eq!(node.get_path("list.1").unwrap(), "y");
        assert!(matches!(node.get_path("a.x"), Err(NodeError::KeyNotFound(_))));
        assert!(matches!(node.get_path("a.b.c.d"), Err(NodeError::NotANode(_))));
    }

    #[test]
    fn test_set_auto_vivify_is_recursive() {
        let mut node = Node::from(json!({"a": {"b": {}}}));
        node.set_auto_vivify(true);
        node.child_mut("a")
            .unwrap()
            .child_mut("b")
            .unwrap()
            .child_mut("c")
            .unwrap()
            .set("d", 1);
        assert_eq!(*node.get_path("a.b.c.d").unwrap(), 1);
    }

    #[test]
    fn test_vivifying_parent_extends_stored_children() {
        let mut node = Node::vivifying();
        node.set("a", json!({"b": 1}));
        node["a"]["c"]["d"] = 1.into();

        assert!(node.child("a").unwrap().auto_vivify());
        assert_eq!(node.to_flat(), json!({"a": {"b": 1, "c": {"d": 1}}}));
    }

    #[test]
    fn test_strict_parent_keeps_stored_children_strict() {
        let mut node = Node::new();
        node.set("a", json!({"b": 1}));
        assert!(!node.child("a").unwrap().auto_vivify());
        assert!(node.child_mut("a").unwrap().get_mut("c").is_err());
    }

    #[test]
    fn test_equality_ignores_mode() {
        let mut vivifying = Node::vivifying();
        vivifying.set("foo", "bar");
        let mut strict = Node::new();
        strict.set("foo", "bar");
        assert_eq!(vivifying, strict);
        assert_eq!(Node::from_values(Vec::<Value>::new()), Node::new());
    }
}
