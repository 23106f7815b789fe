//! Bulk transformation of node values.
//!
//! A [`Modifier`] is either a function applied to values or a mapping from
//! keys to further modifiers, which targets individual entries and descends
//! into child nodes.

use std::fmt;

use indexmap::IndexMap;

use super::{Key, Node, NodeError, Value};

type ModifierFn = Box<dyn FnMut(Value, &Key) -> Value>;

/// A transformation directive for [`Node::apply`].
pub enum Modifier {
    /// Receives the current value (or [`Value::Null`] for an absent key) and
    /// its key, and returns the replacement.
    Function(ModifierFn),
    /// Modifiers for individual keys of a node.
    Nested(IndexMap<Key, Modifier>),
}

impl Modifier {
    /// Wraps a closure as a [`Modifier::Function`].
    pub fn function<F, V>(mut f: F) -> Self
    where
        F: FnMut(Value, &Key) -> V + 'static,
        V: Into<Value>,
    {
        Modifier::Function(Box::new(move |value: Value, key: &Key| f(value, key).into()))
    }

    /// Builds a [`Modifier::Nested`] from key/modifier pairs.
    pub fn nested<K, I>(entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, Modifier)>,
    {
        Modifier::Nested(entries.into_iter().map(|(k, m)| (k.into(), m)).collect())
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Function(_) => f.write_str("Function(..)"),
            Modifier::Nested(entries) => f.debug_tuple("Nested").field(entries).finish(),
        }
    }
}

impl<K: Into<Key>> FromIterator<(K, Modifier)> for Modifier {
    fn from_iter<I: IntoIterator<Item = (K, Modifier)>>(iter: I) -> Self {
        Modifier::nested(iter)
    }
}

impl Node {
    /// Applies `modifier` and returns the node for chaining.
    ///
    /// A function modifier replaces every direct child's value. A nested
    /// modifier runs functions on the named keys (creating absent keys from
    /// the function's result) and recurses into child nodes. Nested entries
    /// whose target is missing or not a node are skipped.
    ///
    /// ```
    /// use merry_tree::{Modifier, Node, Value};
    /// use serde_json::json;
    ///
    /// let mut node = Node::from(json!({"a": 1, "b": 2}));
    /// node.apply(Modifier::function(|v: Value, _| -v.as_i64().unwrap_or(0)));
    /// assert_eq!(node.to_flat(), json!({"a": -1, "b": -2}));
    /// ```
    pub fn apply(&mut self, mut modifier: Modifier) -> &mut Self {
        // Lenient mode never reports an error.
        let _ = self.apply_with(&mut modifier, false);
        self
    }

    /// Like [`apply`](Self::apply), but a nested modifier without a child
    /// node to descend into fails with [`NodeError::UnsupportedModifier`].
    ///
    /// Entries processed before the failing one stay applied.
    pub fn try_apply(&mut self, mut modifier: Modifier) -> Result<&mut Self, NodeError> {
        self.apply_with(&mut modifier, true)?;
        Ok(self)
    }

    fn apply_with(&mut self, modifier: &mut Modifier, strict: bool) -> Result<(), NodeError> {
        match modifier {
            Modifier::Function(f) => {
                for (key, value) in self.entries.iter_mut() {
                    let current = std::mem::take(value);
                    *value = f(current, key);
                }
            }
            Modifier::Nested(entries) => {
                for (key, entry) in entries.iter_mut() {
                    match entry {
                        Modifier::Function(f) => {
                            let current = self.entries.get_mut(key).map(std::mem::take);
                            let replaced = f(current.unwrap_or_default(), key);
                            self.insert(key.clone(), replaced);
                        }
                        Modifier::Nested(_) => match self.entries.get_mut(key) {
                            Some(Value::Node(child)) => child.apply_with(entry, strict)?,
                            _ if strict => {
                                return Err(NodeError::UnsupportedModifier(key.clone()));
                            }
                            _ => {
                                tracing::debug!(key = %key, "skipping nested modifier without child node");
                            }
                        },
                    }
                }
            }
        }
        Ok(())
    }
}
