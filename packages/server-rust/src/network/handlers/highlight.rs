//! Server-side code highlighting for the docs and snippet views.

use axum::Json;
use serde::{Deserialize, Serialize};

use dashkit_core::{highlight, HighlightOptions};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRequest {
    pub source: String,
    pub language: Option<String>,
    pub theme: Option<String>,
    pub line_numbers: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightResponse {
    pub html: String,
}

/// `POST /api/highlight`. Never fails once the body parses.
pub async fn highlight_handler(Json(request): Json<HighlightRequest>) -> Json<HighlightResponse> {
    let defaults = HighlightOptions::default();
    let options = HighlightOptions {
        language: request.language.unwrap_or(defaults.language),
        theme: request.theme.unwrap_or(defaults.theme),
        line_numbers: request.line_numbers.unwrap_or(defaults.line_numbers),
    };
    Json(HighlightResponse {
        html: highlight(&request.source, &options),
    })
}
