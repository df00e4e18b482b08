//! Metadata API handlers: search, resolve, multi-candidate lookup and the
//! image-only artwork path.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tunedex_core::{CatalogError, ImageCandidate, ItemKind, MetadataQuery, ResolvedMetadata};

use crate::metrics::RESOLVE_OUTCOMES_TOTAL;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: String,
    #[serde(default = "default_kind")]
    pub kind: ItemKind,
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    #[serde(default)]
    pub term: String,
    #[serde(default = "default_kind")]
    pub kind: ItemKind,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub provider_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArtworkParams {
    pub term: String,
}

fn default_kind() -> ItemKind {
    ItemKind::Album
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(e: CatalogError) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

impl ResolveParams {
    fn into_query(self) -> MetadataQuery {
        MetadataQuery {
            term: self.term,
            kind: self.kind,
            year_hint: self.year,
            provider_url: self.provider_url,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/metadata/search
///
/// Candidate catalog page URLs for a term, in relevance order. No scraping.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    let cancel = CancellationToken::new();
    state
        .resolver()
        .search_urls(&params.term, params.kind, &cancel)
        .await
        .map(Json)
        .map_err(internal_error)
}

/// GET /api/v1/metadata/resolve
///
/// Resolve a query to the single best match; 404 when nothing matches.
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<ResolvedMetadata>, ApiError> {
    let cancel = CancellationToken::new();
    let query = params.into_query();

    match state.resolver().resolve(&query, &cancel).await {
        Ok(Some(metadata)) => {
            RESOLVE_OUTCOMES_TOTAL.with_label_values(&["matched"]).inc();
            Ok(Json(metadata))
        }
        Ok(None) => {
            RESOLVE_OUTCOMES_TOTAL
                .with_label_values(&["no_match"])
                .inc();
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("No metadata found for '{}'", query.term),
                }),
            ))
        }
        Err(e) => {
            RESOLVE_OUTCOMES_TOTAL.with_label_values(&["error"]).inc();
            Err(internal_error(e))
        }
    }
}

/// GET /api/v1/metadata/candidates
///
/// Multi-result resolution for disambiguation UIs: every acceptable
/// candidate, fully scraped, in relevance order.
pub async fn candidates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<Vec<ResolvedMetadata>>, ApiError> {
    let cancel = CancellationToken::new();
    let query = params.into_query();

    state
        .resolver()
        .search_metadata(&query, &cancel)
        .await
        .map(Json)
        .map_err(internal_error)
}

/// GET /api/v1/metadata/artwork
///
/// Image-only lookup from the search JSON, without page scraping.
pub async fn artwork(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArtworkParams>,
) -> Result<Json<Vec<ImageCandidate>>, ApiError> {
    let cancel = CancellationToken::new();
    state
        .artwork()
        .search_artwork(&params.term, &cancel)
        .await
        .map(Json)
        .map_err(internal_error)
}
