use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::{Method, Request, Response, StatusCode, body::Incoming};
use std::{convert::Infallible, sync::Arc};
use tracing::warn;

use crate::frontend::context::FrontendContext;
use crate::shared::response::detail;

use super::endpoints;

enum Route<'a> {
    Root,
    Health,
    Info,
    Tables,
    TableSchema(&'a str),
    Query,
    MultiPeerQuery,
}

impl<'a> Route<'a> {
    fn resolve(path: &'a str) -> Option<Self> {
        match path {
            "/" => Some(Route::Root),
            "/health" => Some(Route::Health),
            "/info" => Some(Route::Info),
            "/tables" => Some(Route::Tables),
            "/query" => Some(Route::Query),
            "/query/multi-peer" => Some(Route::MultiPeerQuery),
            p => p
                .strip_prefix("/tables/")
                .and_then(|rest| rest.strip_suffix("/schema"))
                .filter(|name| !name.is_empty() && !name.contains('/'))
                .map(Route::TableSchema),
        }
    }

    fn method(&self) -> Method {
        match self {
            Route::Query | Route::MultiPeerQuery => Method::POST,
            _ => Method::GET,
        }
    }
}

/// Routes one request. Split from [`handle_request`] so it can be driven
/// without a socket.
pub async fn route(
    ctx: &FrontendContext,
    method: &Method,
    path: &str,
    body: Bytes,
) -> Response<String> {
    if ctx.server_state.is_shutting_down() {
        return detail(StatusCode::SERVICE_UNAVAILABLE, "Server is shutting down");
    }

    let Some(route) = Route::resolve(path) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    if *method != route.method() {
        return detail(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    }

    match route {
        Route::Root => endpoints::root(ctx),
        Route::Health => endpoints::health(ctx),
        Route::Info => endpoints::info(ctx),
        Route::Tables => endpoints::tables(ctx),
        Route::TableSchema(name) => endpoints::table_schema(ctx, name),
        Route::Query => endpoints::query(ctx, &body),
        Route::MultiPeerQuery => endpoints::multi_peer_query(ctx, &body).await,
    }
}

pub async fn handle_request(
    req: Request<Incoming>,
    ctx: Arc<FrontendContext>,
) -> Result<Response<String>, Infallible> {
    let _guard = ctx.server_state.track_request();
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(target: "lake_peer::http", error = %e, "Failed to read request body");
            return Ok(detail(StatusCode::BAD_REQUEST, "Failed to read request body"));
        }
    };
    Ok(route(&ctx, &parts.method, parts.uri.path(), body).await)
}
