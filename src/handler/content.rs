//! Catalog endpoints: `/content`, `/images` and `/status`

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::config::AppState;
use crate::content::{gallery::listing, ContentType};
use crate::error::HandlerError;
use crate::http::build_json_response;
use crate::routing::QueryParams;
use crate::server::LifecycleState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerStatus<'a> {
    state: LifecycleState,
    server_address: &'a str,
    images_address: String,
}

/// `/content?id=<id>&content_type=<type>`
pub fn lookup(query: &QueryParams, state: &AppState) -> Result<Response<Full<Bytes>>, HandlerError> {
    let id = query.require("id")?;
    let raw_type = query.require("content_type")?;
    let content_type: ContentType = raw_type.parse().map_err(|_| HandlerError::InvalidValue {
        name: "content_type".to_string(),
        value: raw_type.to_string(),
    })?;

    let info = state
        .catalog
        .lookup(id, content_type)
        .ok_or_else(|| HandlerError::ContentNotFound {
            id: id.to_string(),
            content_type: content_type.to_string(),
        })?;

    Ok(build_json_response(StatusCode::OK, info)?)
}

/// `/images`
pub fn gallery(state: &AppState) -> Result<Response<Full<Bytes>>, HandlerError> {
    let entries = listing(&state.base_url);
    Ok(build_json_response(StatusCode::OK, &entries)?)
}

/// `/status`: lifecycle state plus the addresses clients should use
pub fn status(state: &AppState) -> Result<Response<Full<Bytes>>, HandlerError> {
    let status = ServerStatus {
        state: state.lifecycle.state(),
        server_address: &state.base_url,
        images_address: format!("{}/images", state.base_url),
    };
    Ok(build_json_response(StatusCode::OK, &status)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    fn state() -> AppState {
        AppState::new(Config::default()).unwrap()
    }

    async fn json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_image() {
        let query = QueryParams::parse(Some("id=image_content_1&content_type=imageContent"));
        let body = json(lookup(&query, &state()).unwrap()).await;
        assert_eq!(body["id"], "image_content_1");
        assert_eq!(body["contentType"], "imageContent");
        assert_eq!(body["orientation"], "landscape");
    }

    #[test]
    fn test_lookup_errors() {
        let state = state();

        let query = QueryParams::parse(Some("id=image_content_1&content_type=canvasContent"));
        let err = lookup(&query, &state).unwrap_err();
        assert!(matches!(err, HandlerError::ContentNotFound { .. }));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let query = QueryParams::parse(Some("id=image_content_1&content_type=video"));
        let err = lookup(&query, &state).unwrap_err();
        assert!(matches!(err, HandlerError::InvalidValue { .. }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let query = QueryParams::parse(Some("id=image_content_1"));
        assert!(matches!(
            lookup(&query, &state),
            Err(HandlerError::MissingQuery(key)) if key == "content_type"
        ));
    }

    #[tokio::test]
    async fn test_gallery() {
        let body = json(gallery(&state()).unwrap()).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0]["url"]
            .as_str()
            .unwrap()
            .starts_with("http://127.0.0.1:4004/image/"));
    }

    #[tokio::test]
    async fn test_status() {
        let body = json(status(&state()).unwrap()).await;
        assert_eq!(body["state"], "stopped");
        assert_eq!(body["serverAddress"], "http://127.0.0.1:4004");
        assert_eq!(body["imagesAddress"], "http://127.0.0.1:4004/images");
    }
}
