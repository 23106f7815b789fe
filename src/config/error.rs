use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("section '{section}' extends '{parent}', which is not defined before it")]
    SectionResolution { section: String, parent: String },

    #[error("invalid section spec: '{0}'")]
    InvalidSectionSpec(String),

    #[error("settings of section '{0}' are not a table")]
    SectionNotTable(String),

    #[error("configuration root must be a table")]
    RootNotTable,

    #[error("failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("failed to parse JSON config: {0}")]
    ParseJson(#[from] serde_json::Error),
}
