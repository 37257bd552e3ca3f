//! Badge lookups for status and role values.

use axum::extract::Path;
use axum::Json;

use dashkit_core::{BadgeDescriptor, BadgeKind};

use crate::error::ApiError;

/// `GET /api/badges/{kind}/{value}`
///
/// Unknown values resolve to the fallback badge; only an unknown `kind` is
/// an error.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if `kind` names no lookup table.
pub async fn badge_handler(Path((kind, value)): Path<(String, String)>) -> Result<Json<BadgeDescriptor>, ApiError> {
    let kind = BadgeKind::from_name(&kind)
        .ok_or_else(|| ApiError::NotFound(format!("unknown badge kind: {kind}")))?;
    Ok(Json(kind.badge(&value)))
}
