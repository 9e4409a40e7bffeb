use thiserror::Error;

/// Errors that can occur while loading the catalog
///
/// Only whole-operation failures are represented here. Problems with an
/// individual property of a record never surface as errors; the mapper
/// substitutes a default value instead.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// Required configuration is missing or could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Notion API call failed or returned a malformed page
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl CatalogError {
    /// Stable identifier used in failure responses
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Config(_) => "config_error",
            CatalogError::Upstream(_) => "upstream_error",
        }
    }

    /// Message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            CatalogError::Config(msg) | CatalogError::Upstream(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Upstream(err.to_string())
    }
}

impl From<config::ConfigError> for CatalogError {
    fn from(err: config::ConfigError) -> Self {
        CatalogError::Config(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
