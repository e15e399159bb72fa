//! HTTP boundary for report analysis.
//!
//! `POST /analyze` takes a multipart upload, runs `ReportAnalyzer` and
//! returns the sanitized answer with its disclaimer. The router is
//! composable: `analysis_router()` returns a `Router` that can be served by
//! any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::analysis_router;
pub use server::{start_server_on, AnalysisServer, ServerSession};
pub use types::ApiContext;
