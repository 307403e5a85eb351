//! Route table
//!
//! Every endpoint the server answers, registered once at startup.

use crate::error::ConfigError;
use crate::routing::Router;

/// Handler bound to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Greeting,
    Status,
    Gallery,
    MediaByName,
    MediaByQuery,
    Content,
    /// Fixed response body
    FixedText(&'static str),
    RegionSpeciality,
    LocationSpeciality,
    StarRating,
    Search,
    Hello,
}

/// Register all GET routes
pub fn build_router() -> Result<Router<Endpoint>, ConfigError> {
    let mut router = Router::new();

    router.get("/", Endpoint::Greeting)?;
    router.get("/status", Endpoint::Status)?;

    // Media and content
    router.get("/images", Endpoint::Gallery)?;
    router.get("/image/:filename", Endpoint::MediaByName)?;
    router.get("/image", Endpoint::MediaByQuery)?;
    router.get("/content", Endpoint::Content)?;

    // Restaurants
    router.get("/restaurants", Endpoint::FixedText("All restaurants"))?;
    router.get(
        "/restaurants/speciality/chinese",
        Endpoint::FixedText("Restaurants with Chinese speciality"),
    )?;
    router.get(
        "/restaurants/speciality/indian",
        Endpoint::FixedText("Restaurants with Indian speciality"),
    )?;
    router.get(
        "/restaurants/speciality/thai",
        Endpoint::FixedText("Restaurants with Thai speciality"),
    )?;
    router.get("/restaurants/speciality/:region", Endpoint::RegionSpeciality)?;
    router.get(
        "/restaurants/:location/speciality/:region",
        Endpoint::LocationSpeciality,
    )?;
    router.get("/restaurants/starRating/:stars", Endpoint::StarRating)?;

    // Wildcards
    router.get(
        "/routeany/*/endpoint",
        Endpoint::FixedText("Matched /routeany/*/endpoint"),
    )?;
    router.get("/routeany/*", Endpoint::FixedText("Matched /routeany/*"))?;
    router.get("/routeany/**", Endpoint::FixedText("Matched /routeany/**"))?;

    router.get("/search", Endpoint::Search)?;
    router.get("/hello", Endpoint::Hello)?;
    router.get("/hello/:name", Endpoint::Hello)?;

    Ok(router)
}
