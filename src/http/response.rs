//! HTTP response building module
//!
//! Every builder sets `Content-Type` and `Content-Length` explicitly so HEAD
//! responses can drop the body and keep the headers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::cache::MEDIA_CACHE_CONTROL;

const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Plain UTF-8 text response
pub fn build_text_response(status: StatusCode, text: impl Into<String>) -> Response<Full<Bytes>> {
    build_body_response(status, "text/plain; charset=utf-8", Bytes::from(text.into()))
}

/// JSON response
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Full<Bytes>>, serde_json::Error> {
    let json = serde_json::to_vec(body)?;
    Ok(build_body_response(status, "application/json", Bytes::from(json)))
}

/// JSON error body: `{"error": true, "reason": "..."}`
pub fn build_error_response(status: StatusCode, reason: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": true, "reason": reason });
    build_body_response(status, "application/json", Bytes::from(body.to_string()))
}

/// 404 for paths no route matches
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// 413 Payload Too Large
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type, If-None-Match")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// 304 Not Modified for a fresh media `ETag`
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", MEDIA_CACHE_CONTROL)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 200 with raw media bytes
pub fn build_media_response(data: Bytes, content_type: &str, etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", data.len())
        .header("ETag", etag)
        .header("Cache-Control", MEDIA_CACHE_CONTROL)
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("media", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Drop the body of a HEAD response, keeping status and headers
pub fn strip_body(response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let (parts, _) = response.into_parts();
    Response::from_parts(parts, Full::new(Bytes::new()))
}

/// Add the `Server` header unless the name is not a valid header value
pub fn with_server_header(mut response: Response<Full<Bytes>>, server_name: &str) -> Response<Full<Bytes>> {
    if let Ok(value) = HeaderValue::from_str(server_name) {
        response.headers_mut().insert(SERVER, value);
    }
    response
}

fn build_body_response(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", body.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_text_response() {
        let response = build_text_response(StatusCode::OK, "Hello");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["Content-Type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers()["Content-Length"], "5");
        assert_eq!(body_string(response).await, "Hello");
    }

    #[tokio::test]
    async fn test_error_response_body() {
        let response = build_404_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, serde_json::json!({"error": true, "reason": "Not Found"}));
    }

    #[tokio::test]
    async fn test_strip_body_keeps_length() {
        let response = strip_body(build_text_response(StatusCode::OK, "Hello"));
        assert_eq!(response.headers()["Content-Length"], "5");
        assert_eq!(body_string(response).await, "");
    }

    #[test]
    fn test_options_response() {
        let response = build_options_response(true);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()["Allow"], ALLOWED_METHODS);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert!(build_options_response(false)
            .headers()
            .get("Access-Control-Allow-Origin")
            .is_none());
    }

    #[test]
    fn test_server_header() {
        let response = with_server_header(build_404_response(), "content-server/0.1");
        assert_eq!(response.headers()[SERVER], "content-server/0.1");
    }
}
