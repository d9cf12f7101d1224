//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with one catch-all handler
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Feed every request into the application kernel
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Routing happens in the framework, Axum only sees `/{*path}`
//! - Dispatch is synchronous, so it runs on the blocking pool

use std::future::Future;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::application::Application;
use crate::http::request::{request_id, to_mvc_request, RequestIdLayer, X_REQUEST_ID};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub app: Application,
    pub max_body_bytes: usize,
}

/// HTTP front end of the framework.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Build the server from the application's current listener and timeout settings.
    pub fn new(app: Application) -> Self {
        let config = app.config();
        let state = AppState {
            app,
            max_body_bytes: config.listener.max_body_bytes,
        };
        let router = Self::build_router(state, Duration::from_secs(config.timeouts.request_secs));
        Self { router }
    }

    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        let max_body_bytes = state.max_body_bytes;
        Router::new()
            .route("/", any(dispatch_handler))
            .route("/{*path}", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(RequestBodyLimitLayer::new(max_body_bytes))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!("request", method = %request.method(), uri = %request.uri(), request_id = %id)
            }))
            .layer(RequestIdLayer)
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Route and dispatch one HTTP request through the framework.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.to_string();
    let request_id = request_id(&parts).to_string();

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            metrics::record_request(&method, 413, start_time);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let mvc_request = to_mvc_request(&parts, &body);
    tracing::debug!(request_id = %request_id, uri = %mvc_request.request_uri(), "Dispatching request");

    let app = state.app.clone();
    let outcome = tokio::task::spawn_blocking(move || app.handle(mvc_request)).await;

    match outcome {
        Ok(Ok(response)) => {
            metrics::record_request(&method, response.status_code(), start_time);
            response.into_response()
        }
        Ok(Err(e)) => {
            tracing::error!(request_id = %request_id, error = %e, "Request handling failed");
            metrics::record_request(&method, 500, start_time);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Dispatch task failed");
            metrics::record_request(&method, 500, start_time);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
