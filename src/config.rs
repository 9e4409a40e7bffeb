use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};

/// Legacy environment variable holding the Notion integration token
pub const TOKEN_ENV: &str = "NOTION_TOKEN";
/// Legacy environment variable holding the products database id
pub const DATABASE_ENV: &str = "NOTION_DB_PRODUCTS";

/// Main storefront configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorefrontConfig {
    /// Connection to the Notion API
    #[serde(default)]
    pub notion: NotionConfig,
    /// Column labels of the products database
    #[serde(default)]
    pub fields: FieldNames,
    /// Fixed category labels
    #[serde(default)]
    pub categories: CategoryLabels,
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for the Notion database query
#[derive(Debug, Deserialize, Clone)]
pub struct NotionConfig {
    /// Integration token (can also be set via NOTION_TOKEN)
    pub token: Option<String>,
    /// Products database id (can also be set via NOTION_DB_PRODUCTS)
    pub database_id: Option<String>,
    /// Base URL for the API (for proxies and tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the Notion-Version header
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Records requested per page, at most 100
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: None,
            database_id: None,
            base_url: default_base_url(),
            api_version: default_api_version(),
            page_size: default_page_size(),
            timeout: default_timeout(),
        }
    }
}

impl NotionConfig {
    /// The configured database id, or a configuration error when it is absent or blank
    pub fn require_database_id(&self) -> CatalogResult<&str> {
        match self.database_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(CatalogError::Config(format!("Missing {}", DATABASE_ENV))),
        }
    }
}

/// Expected column label for each product attribute
///
/// Labels are matched against the database's property names ignoring case
/// and surrounding whitespace.
#[derive(Debug, Deserialize, Clone)]
pub struct FieldNames {
    #[serde(default = "default_name_field")]
    pub name: String,
    #[serde(default = "default_category_field")]
    pub category: String,
    #[serde(default = "default_code_field")]
    pub code: String,
    #[serde(default = "default_shopee_field")]
    pub shopee: String,
    #[serde(default = "default_tiktok_field")]
    pub tiktok: String,
    #[serde(default = "default_images_field")]
    pub images: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            name: default_name_field(),
            category: default_category_field(),
            code: default_code_field(),
            shopee: default_shopee_field(),
            tiktok: default_tiktok_field(),
            images: default_images_field(),
        }
    }
}

/// Sentinel category labels
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryLabels {
    /// Assigned to products that declare no category
    #[serde(default = "default_fallback_category")]
    pub fallback: String,
    /// Category filter value meaning "no filter"
    #[serde(default = "default_all_category")]
    pub all: String,
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            fallback: default_fallback_category(),
            all: default_all_category(),
        }
    }
}

/// Configuration for the HTTP listener
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_api_version() -> String {
    "2022-06-28".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_timeout() -> u64 {
    30
}

fn default_name_field() -> String {
    "Tên sản phẩm".to_string()
}

fn default_category_field() -> String {
    "Categorie".to_string()
}

fn default_code_field() -> String {
    "Mã sản phẩm".to_string()
}

fn default_shopee_field() -> String {
    "Link shopee".to_string()
}

fn default_tiktok_field() -> String {
    "Link TikTok".to_string()
}

fn default_images_field() -> String {
    "Images".to_string()
}

fn default_fallback_category() -> String {
    "Other".to_string()
}

fn default_all_category() -> String {
    "All".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl StorefrontConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with STOREFRONT__ prefix
    /// 2. storefront.toml file in current directory
    /// 3. NOTION_TOKEN / NOTION_DB_PRODUCTS for the two credentials
    /// 4. Default values
    ///
    /// Environment variable format: STOREFRONT__NOTION__DATABASE_ID
    pub fn load() -> CatalogResult<Self> {
        let config = load_config()?;
        Ok(config.with_legacy_env(|key| std::env::var(key).ok()))
    }

    /// Fill missing credentials from the plain NOTION_* variables
    pub fn with_legacy_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.notion.token.is_none() {
            self.notion.token = lookup(TOKEN_ENV).filter(|v| !v.trim().is_empty());
        }
        if self.notion.database_id.is_none() {
            self.notion.database_id = lookup(DATABASE_ENV).filter(|v| !v.trim().is_empty());
        }
        self
    }
}

/// Load configuration from file and environment variables, without the legacy fallbacks
pub fn load_config() -> Result<StorefrontConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("storefront").required(false))
        // Use double underscore for nested: STOREFRONT__NOTION__TOKEN
        .add_source(
            Environment::with_prefix("STOREFRONT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
