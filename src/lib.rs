//! Hierarchical configuration container.
//!
//! [`Node`] is an ordered tree of scalars and child nodes with indexed
//! access, array-style appends, recursive leaf iteration, bulk
//! transformation through [`Modifier`]s, and flattening to plain JSON.
//! [`Config`] builds such a tree from a flat mapping, resolving section
//! inheritance (`"child : parent"`) and expanding dotted keys (`"a.b.c"`).

pub mod config;
pub mod node;
mod error;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use node::{Key, Leaves, Modifier, Node, NodeError, Value};
