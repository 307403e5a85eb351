//! Text endpoints: greeting, restaurant demo routes, search and hello

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::error::HandlerError;
use crate::http::build_text_response;
use crate::routing::{PathParams, QueryParams};

const ANONYMOUS: &str = "Anonymous";

pub fn greeting() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::OK, "Hello")
}

pub fn fixed(text: &'static str) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::OK, text)
}

/// `/restaurants/speciality/:region`
pub fn region_speciality(params: &PathParams) -> Result<Response<Full<Bytes>>, HandlerError> {
    let region = params.require("region")?;
    Ok(build_text_response(
        StatusCode::OK,
        format!("Restaurants with {region} speciality"),
    ))
}

/// `/restaurants/:location/speciality/:region`
pub fn location_speciality(params: &PathParams) -> Result<Response<Full<Bytes>>, HandlerError> {
    let location = params.require("location")?;
    let region = params.require("region")?;
    Ok(build_text_response(
        StatusCode::OK,
        format!("Restaurants in {location} with {region} speciality"),
    ))
}

/// `/restaurants/starRating/:stars`
pub fn star_rating(params: &PathParams) -> Result<Response<Full<Bytes>>, HandlerError> {
    let stars = params.require("stars")?;
    Ok(build_text_response(
        StatusCode::OK,
        format!("Restaurants rated {stars} stars"),
    ))
}

/// `/search?keyword=<k>&page=<p>`; both values are required
pub fn search(query: &QueryParams) -> Result<Response<Full<Bytes>>, HandlerError> {
    let keyword = query.require("keyword")?;
    let page = query.require("page")?;
    Ok(build_text_response(
        StatusCode::OK,
        format!("Search for Keyword {keyword} on Page {page}"),
    ))
}

/// `/hello` and `/hello/:name`
pub fn hello(params: &PathParams) -> Response<Full<Bytes>> {
    let name = params.get("name").unwrap_or(ANONYMOUS);
    build_text_response(StatusCode::OK, format!("Hello, {name}!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> PathParams {
        let mut params = PathParams::default();
        for (name, value) in pairs {
            params.insert(name, value);
        }
        params
    }

    #[tokio::test]
    async fn test_search() {
        let query = QueryParams::parse(Some("keyword=pizza&page=2"));
        assert_eq!(
            text(search(&query).unwrap()).await,
            "Search for Keyword pizza on Page 2"
        );

        let query = QueryParams::parse(Some("keyword=pizza"));
        let err = search(&query).unwrap_err();
        assert!(matches!(&err, HandlerError::MissingQuery(key) if key == "page"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_speciality_echoes_region() {
        let response = region_speciality(&params(&[("region", "korean")])).unwrap();
        assert_eq!(text(response).await, "Restaurants with korean speciality");

        let response =
            location_speciality(&params(&[("location", "leeds"), ("region", "thai")])).unwrap();
        assert_eq!(text(response).await, "Restaurants in leeds with thai speciality");
    }

    #[test]
    fn test_missing_parameter_is_bad_request() {
        let err = star_rating(&PathParams::default()).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_hello() {
        assert_eq!(text(hello(&params(&[("name", "Ada")]))).await, "Hello, Ada!");
        assert_eq!(text(hello(&PathParams::default())).await, "Hello, Anonymous!");
    }
}
