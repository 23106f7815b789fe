//! Construction of configuration trees from sectioned, dotted-key mappings.

mod builder;
mod error;
mod expand;
mod section;

pub use builder::Config;
pub use error::ConfigError;
