// API response models

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::Listing;

/// Successful listing: `{"ok": true, "total": n, "items": [...]}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub ok: bool,
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> From<Listing<T>> for ListResponse<T> {
    fn from(listing: Listing<T>) -> Self {
        Self {
            ok: true,
            total: listing.total,
            items: listing.items,
        }
    }
}

/// Failed operation: `{"ok": false, "error": "...", "kind": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub kind: String,
}

impl From<&CatalogError> for ErrorResponse {
    fn from(err: &CatalogError) -> Self {
        Self {
            ok: false,
            error: err.message().to_string(),
            kind: err.kind().to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
