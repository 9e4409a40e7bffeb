use log::info;

use crate::aggregate;
use crate::config::StorefrontConfig;
use crate::error::CatalogResult;
use crate::fetchers::{fetch_all_records, RecordSource};
use crate::mapper::RecordMapper;
use crate::model::{CategoryFacet, Listing, Product, ProductQuery};

/// Fetch every row and normalize it into products
///
/// This pipeline:
/// 1. Builds the column lookup table from the configured labels
/// 2. Fetches all pages from the source
/// 3. Maps each row to a product
pub async fn load_products(
    source: &dyn RecordSource,
    config: &StorefrontConfig,
) -> CatalogResult<Vec<Product>> {
    let mapper = RecordMapper::new(&config.fields, config.categories.fallback.as_str());
    let pages = fetch_all_records(source).await?;
    Ok(mapper.map_all(&pages))
}

/// Category facets over the whole catalog
pub async fn list_categories(
    source: &dyn RecordSource,
    config: &StorefrontConfig,
) -> CatalogResult<Listing<CategoryFacet>> {
    let products = load_products(source, config).await?;
    let facets = aggregate::list_categories(&products, &config.categories.fallback);
    info!(
        "Computed {} categories over {} products",
        facets.len(),
        products.len()
    );
    Ok(Listing::new(facets))
}

/// Products matching a search
pub async fn list_products(
    source: &dyn RecordSource,
    config: &StorefrontConfig,
    query: &ProductQuery,
) -> CatalogResult<Listing<Product>> {
    let products = load_products(source, config).await?;
    let matched = aggregate::filter_products(&products, query, &config.categories.all);
    info!(
        "Matched {} of {} products (q={:?}, category={:?})",
        matched.len(),
        products.len(),
        query.normalized_text(),
        query.normalized_category()
    );
    Ok(Listing::new(matched))
}
