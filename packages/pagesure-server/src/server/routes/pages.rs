//! Page resolution endpoints.
//!
//! - `POST /api/resolve` runs the lookup-or-fetch pipeline for a URL
//! - `GET /api/pages/{page_id}` reads an already cached record
//!
//! Every resolution failure is reported to clients with the same generic
//! message; the classified kind travels alongside for diagnostics.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pagesure::{
    ErrorKind, PageId, PageRecord, RecordSource, Resolution, ResolutionRequest, ResolveError,
};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveBody {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page_id: PageId,
    pub source: RecordSource,
    pub data: PageRecord,
}

impl From<Resolution> for PageResponse {
    fn from(resolution: Resolution) -> Self {
        Self {
            page_id: resolution.page_id,
            source: resolution.source,
            data: resolution.record,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
}

#[derive(Debug)]
pub enum ApiError {
    Resolve(ResolveError),
    NotFound(PageId),
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        ApiError::Resolve(err)
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmptyInput | ErrorKind::InvalidDomain | ErrorKind::UnresolvableIdentifier => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::ExtractionFailed | ErrorKind::MalformedResponse => StatusCode::BAD_GATEWAY,
        ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Resolve(err) => {
                let kind = err.kind();
                let body = ErrorBody {
                    error: err.user_message().to_string(),
                    kind: Some(kind),
                };
                (status_for(kind), Json(body)).into_response()
            }
            ApiError::NotFound(page_id) => {
                let body = ErrorBody {
                    error: format!("no cached page '{}'", page_id),
                    kind: None,
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
        }
    }
}

/// Resolve a submitted URL, extracting the page on a cache miss.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Json(body): Json<ResolveBody>,
) -> Result<Json<PageResponse>, ApiError> {
    let request = ResolutionRequest::new(body.url);
    let resolution = state.resolver.resolve(&request).await?;

    Ok(Json(PageResponse::from(resolution)))
}

/// Read a cached page by identifier. Never triggers extraction.
pub async fn page_handler(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<Json<PageResponse>, ApiError> {
    let page_id = PageId::from_key(page_id);

    match state.resolver.cached(&page_id).await? {
        Some(record) => Ok(Json(PageResponse {
            page_id,
            source: RecordSource::Cache,
            data: record,
        })),
        None => Err(ApiError::NotFound(page_id)),
    }
}
