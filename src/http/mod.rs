//! HTTP adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum, middleware stack)
//!     → request.rs (request ID, HTTP request → framework Request)
//!     → Application::handle on the blocking pool
//!     → response.rs (framework Response → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
