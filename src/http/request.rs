//! Request identification and conversion.
//!
//! # Responsibilities
//! - Assign every request an `x-request-id` (kept if the client sent one)
//! - Echo the id on the response
//! - Turn an HTTP request into the framework's `Request`
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query parameters first, form body parameters override them

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::http::{header, request::Parts, HeaderName, HeaderValue, Request, Response};
use tower::{Layer, Service};
use url::form_urlencoded;
use uuid::Uuid;

use crate::mvc::Request as MvcRequest;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request id stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Adds `x-request-id` to requests and responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestIdService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let id = request
            .headers()
            .get(&X_REQUEST_ID)
            .cloned()
            .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());

        if let Some(id) = &id {
            request.headers_mut().insert(X_REQUEST_ID, id.clone());
            if let Ok(value) = id.to_str() {
                request.extensions_mut().insert(RequestId(value.to_string()));
            }
        }

        let future = self.inner.call(request);
        Box::pin(async move {
            let mut response = future.await?;
            if let Some(id) = id {
                response.headers_mut().insert(X_REQUEST_ID, id);
            }
            Ok(response)
        })
    }
}

/// Request id of an HTTP request, `"unknown"` when absent.
pub fn request_id(parts: &Parts) -> &str {
    parts
        .headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Build a framework request from HTTP parts and the buffered body.
pub fn to_mvc_request(parts: &Parts, body: &[u8]) -> MvcRequest {
    let mut request = MvcRequest::new();

    let uri = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| parts.uri.path());
    request.set_request_uri(uri).set_method(parts.method.clone());

    if let Some(query) = parts.uri.query() {
        request.set_parameters(form_urlencoded::parse(query.as_bytes()).into_owned());
    }

    if is_form(parts) {
        request.set_parameters(form_urlencoded::parse(body).into_owned());
    }

    request
}

fn is_form(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}
