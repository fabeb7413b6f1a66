//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use pagesure::{
    DocumentStore, Extractor, HttpExtractor, MemoryStore, PageResolver, SqliteStore,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{health_handler, page_handler, resolve_handler};

/// Resolver with type-erased collaborators, shared across requests.
pub type SharedResolver = PageResolver<Arc<dyn DocumentStore>, Arc<dyn Extractor>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<SharedResolver>,
}

impl AppState {
    pub fn new(resolver: SharedResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

/// Open the document store: SQLite when a database URL is configured,
/// otherwise an in-memory store.
pub async fn open_store(database_url: Option<&str>) -> Result<Arc<dyn DocumentStore>> {
    match database_url {
        Some(url) => {
            tracing::info!("Opening SQLite document store");
            let store = SqliteStore::new(url)
                .await
                .context("Failed to open SQLite document store")?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, cached pages will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Build the resolver and its collaborators from configuration.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let store = open_store(config.database_url.as_deref()).await?;
    let extractor: Arc<dyn Extractor> = Arc::new(
        HttpExtractor::new(config.extraction_config())
            .context("Failed to build extraction HTTP client")?,
    );

    tracing::info!(
        endpoint = %config.extraction_config().endpoint(),
        coalesce_misses = config.coalesce_misses,
        "Resolver configured"
    );

    Ok(AppState::new(PageResolver::with_config(
        store,
        extractor,
        config.resolver_config(),
    )))
}

/// Build the HTTP router.
pub fn build_app(state: AppState, cors_origin: Option<&str>) -> Result<Router> {
    let allow_origin = match cors_origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin).context("CORS_ALLOWED_ORIGIN is not a valid header value")?,
        ),
        None => AllowOrigin::from(Any),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/api/resolve", post(resolve_handler))
        .route("/api/pages/*page_id", get(page_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
