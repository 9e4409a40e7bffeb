use std::time::Duration;

use crate::config::{FieldNames, StorefrontConfig};
use crate::error::CatalogResult;
use crate::fetchers::{NotionFetcher, RecordSource};
use crate::model::{CategoryFacet, Listing, Product, ProductQuery};
use crate::pipelines::catalog;

/// A configured catalog ready to answer queries
///
/// Every query fetches the whole database again; nothing is cached between calls.
pub struct Storefront {
    config: StorefrontConfig,
    source: Box<dyn RecordSource>,
}

impl Storefront {
    /// Start configuring a storefront
    ///
    /// # Example
    /// ```no_run
    /// # use notion_storefront::Storefront;
    /// # async fn run() -> Result<(), notion_storefront::CatalogError> {
    /// let storefront = Storefront::builder()
    ///     .token("secret_xxx")
    ///     .database_id("0123456789abcdef0123456789abcdef")
    ///     .build()?;
    /// let categories = storefront.categories().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> StorefrontBuilder {
        StorefrontBuilder::default()
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Category facets with their product counts
    pub async fn categories(&self) -> CatalogResult<Listing<CategoryFacet>> {
        catalog::list_categories(self.source.as_ref(), &self.config).await
    }

    /// Products matching the query, in database order
    pub async fn products(&self, query: &ProductQuery) -> CatalogResult<Listing<Product>> {
        catalog::list_products(self.source.as_ref(), &self.config, query).await
    }
}

/// Builder for configuring a [`Storefront`]
#[derive(Default)]
pub struct StorefrontBuilder {
    config: StorefrontConfig,
    source: Option<Box<dyn RecordSource>>,
}

impl StorefrontBuilder {
    /// Start from a loaded configuration
    pub fn config(mut self, config: StorefrontConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the Notion integration token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.notion.token = Some(token.into());
        self
    }

    /// Set the products database id
    pub fn database_id(mut self, id: impl Into<String>) -> Self {
        self.config.notion.database_id = Some(id.into());
        self
    }

    /// Override the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.notion.base_url = url.into();
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config.notion.timeout = duration.as_secs().max(1);
        self
    }

    /// Records requested per page
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.notion.page_size = size;
        self
    }

    /// Set the database column labels
    pub fn fields(mut self, fields: FieldNames) -> Self {
        self.config.fields = fields;
        self
    }

    /// Label given to products without a category
    pub fn fallback_category(mut self, label: impl Into<String>) -> Self {
        self.config.categories.fallback = label.into();
        self
    }

    /// Read rows from a custom source instead of the Notion API
    pub fn source(mut self, source: impl RecordSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Build the storefront
    ///
    /// # Errors
    /// Returns a configuration error when no custom source is set and the
    /// database id is missing, or an upstream error when the HTTP client
    /// cannot be created.
    pub fn build(self) -> CatalogResult<Storefront> {
        let source: Box<dyn RecordSource> = match self.source {
            Some(source) => source,
            None => Box::new(NotionFetcher::new(&self.config.notion)?),
        };

        Ok(Storefront {
            config: self.config,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::notion::QueryResponse;
    use async_trait::async_trait;

    struct EmptySource;

    #[async_trait]
    impl RecordSource for EmptySource {
        async fn query_page(&self, _cursor: Option<&str>) -> CatalogResult<QueryResponse> {
            Ok(QueryResponse {
                results: vec![],
                has_more: false,
                next_cursor: None,
            })
        }
    }

    #[test]
    fn test_build_without_database_id_fails() {
        let result = Storefront::builder().token("secret").build();
        match result {
            Err(CatalogError::Config(msg)) => assert!(msg.contains("NOTION_DB_PRODUCTS")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected a configuration error"),
        }
    }

    #[test]
    fn test_builder_applies_settings() {
        let storefront = Storefront::builder()
            .database_id("db")
            .base_url("http://localhost:9")
            .timeout(Duration::from_secs(5))
            .page_size(25)
            .fallback_category("Khác")
            .build()
            .unwrap();

        let config = storefront.config();
        assert_eq!(config.notion.timeout, 5);
        assert_eq!(config.notion.page_size, 25);
        assert_eq!(config.categories.fallback, "Khác");
        assert_eq!(config.notion.base_url, "http://localhost:9");
    }

    #[tokio::test]
    async fn test_custom_source_skips_database_id() {
        let storefront = Storefront::builder().source(EmptySource).build().unwrap();
        assert_eq!(storefront.categories().await.unwrap().total, 0);
        assert!(storefront
            .products(&ProductQuery::default())
            .await
            .unwrap()
            .items
            .is_empty());
    }
}
