//! Backend of a link-in-bio storefront.
//!
//! Product rows live in a Notion database whose columns mix titles, rich
//! text, selects, URLs and file attachments. This crate fetches every row,
//! normalizes it into a [`Product`], and answers the two queries the
//! storefront page needs: category facets and product search.

pub mod aggregate;
pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod mapper;
pub mod model;
pub mod notion;
pub mod pipelines;

pub use builder::{Storefront, StorefrontBuilder};
pub use config::StorefrontConfig;
pub use error::{CatalogError, CatalogResult};
pub use model::{CategoryFacet, Listing, Product, ProductLinks, ProductQuery};

/// List category facets using configuration from the environment
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), notion_storefront::CatalogError> {
/// let categories = notion_storefront::categories().await?;
/// for facet in categories.items {
///     println!("{} ({})", facet.name, facet.count);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn categories() -> CatalogResult<Listing<CategoryFacet>> {
    let config = StorefrontConfig::load()?;
    Storefront::builder().config(config).build()?.categories().await
}

/// Search products using configuration from the environment
///
/// An empty `category` or the "All" label lists every category.
pub async fn products(q: &str, category: &str) -> CatalogResult<Listing<Product>> {
    let config = StorefrontConfig::load()?;
    Storefront::builder()
        .config(config)
        .build()?
        .products(&ProductQuery::new(q, category))
        .await
}
