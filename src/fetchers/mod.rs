mod request;

pub use request::NotionFetcher;

use async_trait::async_trait;
use log::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::notion::{Page, QueryResponse};

/// A paged source of database rows
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch one page of rows, starting at `cursor` when given
    async fn query_page(&self, cursor: Option<&str>) -> CatalogResult<QueryResponse>;
}

/// Fetch every row, following continuation cursors until the source is exhausted
///
/// Pages are requested one after another and concatenated in the order
/// received. Any failed page aborts the whole fetch.
pub async fn fetch_all_records(source: &dyn RecordSource) -> CatalogResult<Vec<Page>> {
    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;
    let mut requests = 0usize;

    loop {
        let response = source.query_page(cursor.as_deref()).await?;
        requests += 1;
        debug!(
            "Page {} returned {} record(s), has_more={}",
            requests,
            response.results.len(),
            response.has_more
        );

        pages.extend(response.results);

        if !response.has_more {
            break;
        }
        match response.next_cursor.filter(|c| !c.is_empty()) {
            Some(next) => cursor = Some(next),
            None => {
                return Err(CatalogError::Upstream(
                    "Query reported more results without a next_cursor".to_string(),
                ))
            }
        }
    }

    info!("Fetched {} record(s) in {} request(s)", pages.len(), requests);
    Ok(pages)
}
