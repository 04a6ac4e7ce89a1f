use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::error;

use crate::shared::wire::ErrorDetail;

/// Serializes `body` into a JSON response. A serialization failure degrades
/// to a plain-text 500 instead of panicking inside the connection task.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<String> {
    match serde_json::to_string(body) {
        Ok(text) => build(status, "application/json", text),
        Err(e) => {
            error!(target: "lake_peer::http", error = %e, "Failed to serialize response body");
            plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// `{"detail": msg}` with the given status.
pub fn detail(status: StatusCode, msg: impl Into<String>) -> Response<String> {
    json_response(
        status,
        &ErrorDetail {
            detail: msg.into(),
        },
    )
}

pub fn plain(status: StatusCode, msg: &str) -> Response<String> {
    build(status, "text/plain", msg.to_string())
}

fn build(status: StatusCode, content_type: &'static str, body: String) -> Response<String> {
    let mut resp = Response::new(body);
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    resp
}
