use bytes::Bytes;
use hyper::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::frontend::context::FrontendContext;
use crate::shared::response::{detail, json_response};
use crate::shared::wire::{
    HealthResponse, InfoResponse, MultiPeerRequest, MultiPeerResponse, QueryRequest,
    QueryResponse, RootResponse, SchemaResponse, TablesResponse,
};

const SERVICE_NAME: &str = "P2P Data Lake Peer";

pub fn root(ctx: &FrontendContext) -> Response<String> {
    json_response(
        StatusCode::OK,
        &RootResponse {
            message: SERVICE_NAME.to_string(),
            peer_id: ctx.node.peer_id.clone(),
            status: "running".to_string(),
        },
    )
}

pub fn health(ctx: &FrontendContext) -> Response<String> {
    json_response(
        StatusCode::OK,
        &HealthResponse {
            status: "healthy".to_string(),
            peer_id: ctx.node.peer_id.clone(),
        },
    )
}

pub fn info(ctx: &FrontendContext) -> Response<String> {
    let tables = ctx.executor.tables();
    json_response(
        StatusCode::OK,
        &InfoResponse {
            peer_id: ctx.node.peer_id.clone(),
            host: ctx.node.host.clone(),
            port: ctx.node.port,
            table_count: tables.len(),
            tables,
        },
    )
}

pub fn tables(ctx: &FrontendContext) -> Response<String> {
    json_response(
        StatusCode::OK,
        &TablesResponse {
            tables: ctx.executor.tables(),
        },
    )
}

pub fn table_schema(ctx: &FrontendContext, table: &str) -> Response<String> {
    match ctx.executor.table_schema(table) {
        Some(schema) => json_response(
            StatusCode::OK,
            &SchemaResponse {
                table_name: table.to_string(),
                schema,
            },
        ),
        None => detail(StatusCode::NOT_FOUND, format!("Table '{table}' not found")),
    }
}

/// Runs the query on this node only. Engine failures are reported in the
/// body with a 200 status.
pub fn query(ctx: &FrontendContext, body: &Bytes) -> Response<String> {
    let request: QueryRequest = match parse_body(body) {
        Ok(req) => req,
        Err(resp) => return resp,
    };
    debug!(target: "lake_peer::http", query = %request.query, "Local query");
    let outcome = ctx.dispatcher.execute_locally(&request.query);
    json_response(StatusCode::OK, &QueryResponse::from(outcome))
}

pub async fn multi_peer_query(ctx: &FrontendContext, body: &Bytes) -> Response<String> {
    let request: MultiPeerRequest = match parse_body(body) {
        Ok(req) => req,
        Err(resp) => return resp,
    };
    info!(
        target: "lake_peer::http",
        query = %request.query,
        peers = ?request.peers,
        "Multi-peer query"
    );
    let result = ctx.dispatcher.run(&request.query, &request.peers).await;
    json_response(StatusCode::OK, &MultiPeerResponse::from(result))
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, Response<String>> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(target: "lake_peer::http", error = %e, "Rejected request body");
        detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Invalid request body: {e}"),
        )
    })
}
