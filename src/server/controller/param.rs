//! Extractor payloads shared by several controllers.

use axum::http::{header, HeaderMap};
use serde::Deserialize;

/// Page selection of paginated listings.
#[derive(Deserialize)]
pub struct PaginationParam {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

/// Free-text filter of list endpoints.
#[derive(Deserialize, Default)]
pub struct SearchParam {
    pub q: Option<String>,
}

/// Content-Type header of a raw upload body.
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}
