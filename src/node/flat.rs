//! Conversion of a node tree into a plain nested value.

use serde_json::{Map, Number};

use super::{Key, Node, Value};

impl Node {
    /// Returns true if the keys are exactly `0, 1, 2, ...` in order.
    ///
    /// Such nodes flatten and serialize as sequences, every other node as a
    /// mapping. An empty node is a list only if it was built from a sequence
    /// and no named key was stored in it since.
    pub fn is_list(&self) -> bool {
        if self.entries.is_empty() {
            return self.sequence;
        }
        self.entries
            .keys()
            .enumerate()
            .all(|(i, key)| matches!(key, Key::Index(k) if *k == i as u64))
    }

    /// Recursively converts the tree into a plain JSON value.
    pub fn to_flat(&self) -> serde_json::Value {
        if self.is_list() {
            serde_json::Value::Array(self.entries.values().map(Value::to_flat).collect())
        } else {
            let map: Map<String, serde_json::Value> = self
                .entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_flat()))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

impl Value {
    /// Flattens a value; non-finite floats become `null`.
    pub fn to_flat(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Node(node) => node.to_flat(),
        }
    }
}

impl From<&Node> for serde_json::Value {
    fn from(node: &Node) -> Self {
        node.to_flat()
    }
}
