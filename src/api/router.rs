//! Analysis API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Layers: CORS (local origins only) → body limit → handler.

use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the analysis router.
///
/// `/static` is mounted only when the config names a static directory.
pub fn analysis_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.config.body_limit();
    let static_dir = ctx.config.static_dir.clone();

    let mut router = Router::new()
        .route("/analyze", post(endpoints::analyze::analyze))
        .route("/health", get(endpoints::health::check))
        .layer(DefaultBodyLimit::max(body_limit));

    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "Serving static assets under /static");
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router.layer(cors_layer()).with_state(ctx)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            origin.to_str().is_ok_and(is_local_origin)
        }))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

/// `http://localhost:<port>` or `http://127.0.0.1:<port>`, nothing else.
pub fn is_local_origin(origin: &str) -> bool {
    ["http://localhost:", "http://127.0.0.1:"]
        .iter()
        .filter_map(|prefix| origin.strip_prefix(prefix))
        .any(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
