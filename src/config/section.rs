//! Section inheritance.
//!
//! Top-level keys of a sectioned config are section specs: either a plain
//! name (`"production"`) or `child <sep> parent` (`"staging : production"`).
//! A child starts from its parent's resolved settings and overrides them
//! key by key. Parents must appear before the children that extend them.

use indexmap::IndexMap;

use super::ConfigError;
use crate::node::{Node, Value};

/// Resolves every section spec in `raw` in document order.
///
/// Returns the section map: section name to fully merged settings.
pub fn combine(raw: Node, separator: &str) -> Result<IndexMap<String, Value>, ConfigError> {
    let mut sections: IndexMap<String, Value> = IndexMap::new();

    for (spec, settings) in raw {
        let spec = spec.to_string();
        let parts: Vec<&str> = spec.split(separator).map(str::trim).collect();

        match parts.as_slice() {
            [name] if !name.is_empty() => {
                tracing::debug!(section = %name, "base section");
                sections.insert(name.to_string(), settings);
            }
            [name, parent] if !name.is_empty() && !parent.is_empty() => {
                let base = sections.get(*parent).ok_or_else(|| ConfigError::SectionResolution {
                    section: name.to_string(),
                    parent: parent.to_string(),
                })?;
                let merged = overlay(base, parent, settings, name)?;
                tracing::debug!(section = %name, parent = %parent, "extended section");
                sections.insert(name.to_string(), Value::Node(merged));
            }
            _ => return Err(ConfigError::InvalidSectionSpec(spec)),
        }
    }

    Ok(sections)
}

/// Returns the resolved settings of `section` as a table.
pub fn select(
    mut sections: IndexMap<String, Value>,
    section: &str,
) -> Result<Node, ConfigError> {
    match sections.shift_remove(section) {
        Some(Value::Node(node)) => Ok(node),
        Some(_) => Err(ConfigError::SectionNotTable(section.to_string())),
        None => Err(ConfigError::SectionNotFound(section.to_string())),
    }
}

/// Shallow merge: top-level keys of `settings` replace those of `base`.
fn overlay(base: &Value, parent: &str, settings: Value, name: &str) -> Result<Node, ConfigError> {
    let Value::Node(base) = base else {
        return Err(ConfigError::SectionNotTable(parent.to_string()));
    };
    let Value::Node(settings) = settings else {
        return Err(ConfigError::SectionNotTable(name.to_string()));
    };

    let mut merged = base.clone();
    for (key, value) in settings {
        merged.insert(key, value);
    }
    Ok(merged)
}
