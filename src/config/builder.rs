use crate::node::{Node, Value};

use super::expand::expand_keys;
use super::section::{combine, select};
use super::ConfigError;

/// Builder turning a flat, sectioned configuration mapping into a [`Node`].
///
/// Construction runs in two steps, both optional:
///
/// 1. **Section resolution.** When a section is requested, each top-level key
///    names a section. `"child : parent"` extends `parent`: the child gets
///    the parent's settings with its own keys overriding them (a shallow,
///    top-level merge). Parents must be defined before their children.
/// 2. **Key expansion.** Every key of the selected settings is split on the
///    key separator, so `"db.host"` ends up at `db -> host`.
///
/// The resulting tree does not auto-vivify.
///
/// ## Example
///
/// ```
/// use merry_tree::Config;
/// use serde_json::json;
///
/// let raw = json!({
///     "production": {"db.host": "db.internal", "db.port": 5432},
///     "staging : production": {"db.host": "db.staging"}
/// });
///
/// let config = Config::builder()
///     .with_section("staging")
///     .build(raw)?;
///
/// assert_eq!(config.get_path("db.host")?, "db.staging");
/// assert_eq!(config.to_flat(), json!({"db": {"host": "db.staging", "port": 5432}}));
/// # Ok::<(), merry_tree::Error>(())
/// ```
///
/// ## TOML input
///
/// ```
/// use merry_tree::Config;
///
/// let config = Config::builder()
///     .with_section("dev")
///     .build_from_toml(
///         r#"
///         [base]
///         "server.port" = 80
///
///         ["dev : base"]
///         "server.debug" = true
///         "#,
///     )?;
///
/// assert_eq!(*config.get_path("server.port")?, 80);
/// assert_eq!(*config.get_path("server.debug")?, true);
/// # Ok::<(), merry_tree::Error>(())
/// ```
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    section: Option<String>,
    section_separator: String,
    key_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            section: None,
            section_separator: ":".to_string(),
            key_separator: ".".to_string(),
        }
    }
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Selects the section to build. Without one, section specs are not
    /// interpreted and the whole input is used.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Sets the token separating `child` from `parent` in section specs.
    ///
    /// Defaults to `":"`. An empty separator disables section resolution.
    pub fn with_section_separator(mut self, separator: impl Into<String>) -> Self {
        self.section_separator = separator.into();
        self
    }

    /// Sets the token splitting compound keys.
    ///
    /// Defaults to `"."`. An empty separator disables key expansion.
    pub fn with_key_separator(mut self, separator: impl Into<String>) -> Self {
        self.key_separator = separator.into();
        self
    }

    /// Builds the tree from an in-memory mapping.
    ///
    /// Fails without producing a tree if the input is not a mapping, the
    /// requested section does not exist, or a section extends one that is not
    /// defined before it.
    pub fn build(self, raw: impl Into<Value>) -> Result<Node, ConfigError> {
        let Value::Node(raw) = raw.into() else {
            return Err(ConfigError::RootNotTable);
        };

        let settings = match &self.section {
            Some(section) if !self.section_separator.is_empty() => {
                let sections = combine(raw, &self.section_separator)?;
                select(sections, section)?
            }
            _ => raw,
        };

        let mut config = if self.key_separator.is_empty() {
            settings
        } else {
            expand_keys(settings, &self.key_separator)
        };
        config.set_auto_vivify(false);

        tracing::debug!(
            section = self.section.as_deref().unwrap_or("<none>"),
            keys = config.len(),
            "built configuration"
        );
        Ok(config)
    }

    /// Parses a TOML document and builds the tree from it.
    pub fn build_from_toml(self, source: &str) -> Result<Node, ConfigError> {
        let table: toml::Table = toml::from_str(source)?;
        self.build(table)
    }

    /// Parses a JSON document and builds the tree from it.
    pub fn build_from_json(self, source: &str) -> Result<Node, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(source)?;
        self.build(value)
    }
}
