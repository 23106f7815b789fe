use indexmap::map::Iter;

use super::{Key, Node, Value};

/// Depth-first, pre-order iterator over the scalar leaves of a [`Node`].
///
/// Child nodes are descended into instead of being yielded, so the sequence
/// holds every scalar of the tree in document order. Created by
/// [`Node::leaves`].
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    stack: Vec<Iter<'a, Key, Value>>,
}

impl<'a> Leaves<'a> {
    pub(super) fn new(root: &'a Node) -> Self {
        Self {
            stack: vec![root.entries.iter()],
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(level) = self.stack.last_mut() {
            match level.next() {
                Some((_, Value::Node(child))) => self.stack.push(child.entries.iter()),
                Some(leaf) => return Some(leaf),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
