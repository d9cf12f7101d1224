//! Response conversion.
//!
//! # Design Decisions
//! - Unknown status codes map to 500
//! - Headers that are not valid HTTP are logged and dropped

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;

use crate::mvc::Response as MvcResponse;

impl IntoResponse for MvcResponse {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.content().to_owned()).into_response();

        let headers = response.headers_mut();
        for (name, value) in self.headers() {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_status_headers_and_body() {
        let mut response = MvcResponse::new();
        response
            .set_status_code(301)
            .add_header("Location", "/next")
            .add_header("Bad Header", "x");

        let http = response.into_response();
        assert_eq!(http.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(http.headers()[header::LOCATION], "/next");
        assert!(http.headers().get("bad header").is_none());
    }

    #[test]
    fn test_content_type_overrides_default() {
        let mut response = MvcResponse::new();
        response.add_header("Content-Type", "application/json").set_content("{}");

        let http = response.into_response();
        assert_eq!(http.headers()[header::CONTENT_TYPE], "application/json");
    }
}
