//! Compound key expansion: `"a.b.c" = v` becomes `a -> b -> c = v`.

use crate::node::{Key, Node, Value};

/// Expands every key of `settings` on `separator` into nested nodes.
///
/// Keys sharing a prefix merge into the same branch. A scalar sitting where
/// a branch is needed is replaced by a node. Empty segments are kept as
/// literal empty keys.
pub fn expand_keys(settings: Node, separator: &str) -> Node {
    let mut root = Node::new();
    for (key, value) in settings {
        let path: Vec<Key> = key.to_string().split(separator).map(Key::from).collect();
        tracing::trace!(key = %key, depth = path.len(), "expanding key");
        insert_at_path(&mut root, path, value);
    }
    root
}

fn insert_at_path(root: &mut Node, mut path: Vec<Key>, value: Value) {
    let Some(leaf) = path.pop() else {
        return;
    };

    let mut cursor = root;
    for segment in path {
        cursor = cursor.branch_mut(segment);
    }
    cursor.insert(leaf, value);
}
