//! HTTP surface for depot.
//!
//! Translates HTTP requests into repository and probe calls and renders
//! JSON responses. The service is stateless between requests; the only
//! shared state is the repository's root path.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
