//! Media streaming: `/image/:filename` and `/image?path=<name>`

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::router::RequestContext;
use crate::config::AppState;
use crate::error::HandlerError;
use crate::http::{build_304_response, build_media_response, cache};
use crate::routing::PathParams;

pub async fn by_name(
    params: &PathParams,
    ctx: &RequestContext,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    serve(params.require("filename")?, ctx, state).await
}

pub async fn by_query(
    ctx: &RequestContext,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    serve(ctx.query.require("path")?, ctx, state).await
}

async fn serve(
    name: &str,
    ctx: &RequestContext,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    let file = state.media.open(name).await?;
    let etag = cache::etag_for(&file.data);

    if cache::is_fresh(ctx.if_none_match.as_deref(), &etag) {
        return Ok(build_304_response(&etag));
    }
    Ok(build_media_response(file.data, file.content_type, &etag))
}
