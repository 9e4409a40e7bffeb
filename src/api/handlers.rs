// HTTP request handlers for the catalog endpoints

use std::sync::Arc;

use actix_web::{web, HttpResponse, Result};
use log::{error, warn};
use serde::Serialize;

use crate::api::models::{ErrorResponse, HealthResponse, ListResponse};
use crate::config::StorefrontConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::fetchers::{NotionFetcher, RecordSource};
use crate::model::{Listing, ProductQuery};
use crate::pipelines::catalog;

/// Shared, read-only state of the server
///
/// The source is built once at startup. When that fails (for example the
/// database id is missing) the server still starts and every catalog
/// request reports the same error.
pub struct AppState {
    config: StorefrontConfig,
    source: Result<Arc<dyn RecordSource>, CatalogError>,
}

impl AppState {
    pub fn new(config: StorefrontConfig) -> Self {
        let source = NotionFetcher::new(&config.notion)
            .map(|fetcher| Arc::new(fetcher) as Arc<dyn RecordSource>);
        if let Err(e) = &source {
            warn!("Catalog source unavailable: {}", e);
        }
        Self { config, source }
    }

    pub fn with_source(config: StorefrontConfig, source: impl RecordSource + 'static) -> Self {
        Self {
            config,
            source: Ok(Arc::new(source)),
        }
    }

    fn source(&self) -> CatalogResult<&dyn RecordSource> {
        self.source.as_ref().map(|s| &**s).map_err(Clone::clone)
    }
}

fn respond<T: Serialize>(route: &str, result: CatalogResult<Listing<T>>) -> HttpResponse {
    match result {
        Ok(listing) => HttpResponse::Ok().json(ListResponse::from(listing)),
        Err(e) => {
            error!("GET {} error: {}", route, e);
            HttpResponse::InternalServerError().json(ErrorResponse::from(&e))
        }
    }
}

/// Category facets over the whole catalog
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse> {
    let result = match state.source() {
        Ok(source) => catalog::list_categories(source, &state.config).await,
        Err(e) => Err(e),
    };
    Ok(respond("/api/categories", result))
}

/// Products filtered by `q` and `category`
///
/// Parameters are read as raw pairs so a repeated key takes its first value
/// instead of rejecting the request.
pub async fn list_products(
    state: web::Data<AppState>,
    params: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse> {
    let query = ProductQuery::from_pairs(params.into_inner());
    let result = match state.source() {
        Ok(source) => catalog::list_products(source, &state.config, &query).await,
        Err(e) => Err(e),
    };
    Ok(respond("/api/products", result))
}

/// Liveness check; does not contact Notion
pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::configure_routes;
    use crate::notion::{Page, QueryResponse};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct StaticSource(Vec<Page>);

    #[async_trait]
    impl RecordSource for StaticSource {
        async fn query_page(&self, _cursor: Option<&str>) -> CatalogResult<QueryResponse> {
            Ok(QueryResponse {
                results: self.0.clone(),
                has_more: false,
                next_cursor: None,
            })
        }
    }

    fn catalog() -> StaticSource {
        let rows = json!([
            {
                "id": "p1",
                "last_edited_time": "2024-04-01T00:00:00.000Z",
                "properties": {
                    "Tên sản phẩm": {"type": "title", "title": [{"plain_text": "Running Shoes"}]},
                    "Categorie": {"type": "select", "select": {"name": "Sport"}},
                    "Link shopee": {"type": "url", "url": "https://shopee.vn/p1"}
                }
            },
            {
                "id": "p2",
                "last_edited_time": "2024-04-02T00:00:00.000Z",
                "properties": {
                    "Tên sản phẩm": {"type": "title", "title": [{"plain_text": "Desk Lamp"}]}
                }
            }
        ]);
        StaticSource(serde_json::from_value(rows).unwrap())
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_categories_endpoint() {
        let state = AppState::with_source(StorefrontConfig::default(), catalog());
        let (status, body) = get(state, "/api/categories").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"ok": true, "total": 2, "items": [{"name": "Other", "count": 1}, {"name": "Sport", "count": 1}]})
        );
    }

    #[actix_web::test]
    async fn test_products_endpoint_filters() {
        let state = AppState::with_source(StorefrontConfig::default(), catalog());
        let (status, body) = get(state, "/api/products?q=SHOE&category=All").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], json!(1));
        assert_eq!(body["items"][0]["id"], json!("p1"));
        assert_eq!(body["items"][0]["links"]["shopee"], json!("https://shopee.vn/p1"));
        assert_eq!(body["items"][0]["lastEdited"], json!("2024-04-01T00:00:00.000Z"));
    }

    #[actix_web::test]
    async fn test_products_without_params_lists_everything() {
        let state = AppState::with_source(StorefrontConfig::default(), catalog());
        let (_, body) = get(state, "/api/products").await;
        assert_eq!(body["total"], json!(2));
        assert_eq!(body["items"][1]["categories"], json!(["Other"]));
    }

    #[actix_web::test]
    async fn test_products_repeated_or_odd_params() {
        let state = AppState::with_source(StorefrontConfig::default(), catalog());
        let (status, body) = get(state, "/api/products?q=lamp&q=shoe&category=&category=Sport").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["total"], json!(1));
        assert_eq!(body["items"][0]["id"], json!("p2"));

        let state = AppState::with_source(StorefrontConfig::default(), catalog());
        let (status, body) = get(state, "/api/products?q=%ZZ&page=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["total"], json!(0));
    }

    #[actix_web::test]
    async fn test_missing_database_id_is_config_failure() {
        for uri in ["/api/categories", "/api/products?q=x"] {
            let state = AppState::new(StorefrontConfig::default());
            let (status, body) = get(state, uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["ok"], json!(false));
            assert_eq!(body["kind"], json!("config_error"));
            assert_eq!(body["error"], json!("Missing NOTION_DB_PRODUCTS"));
        }
    }

    #[actix_web::test]
    async fn test_health() {
        let state = AppState::new(StorefrontConfig::default());
        let (status, body) = get(state, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("ok"));
    }
}
