use bytes::Bytes;
use hyper::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::frontend::context::FrontendContext;
use crate::frontend::http::endpoints;
use crate::logging::init_for_tests;
use crate::shared::wire::{MultiPeerResponse, QueryResponse};
use crate::test_helpers::factory::{Factory, MockTransport};

fn context(transport: MockTransport) -> Arc<FrontendContext> {
    FrontendContext::with_transport(
        Arc::new(Factory::settings().create()),
        Arc::new(Factory::memory_engine().with_sales().create()),
        Arc::new(transport),
    )
}

fn body_json(resp: &hyper::Response<String>) -> Value {
    serde_json::from_str(resp.body()).expect("response body should be JSON")
}

#[test]
fn root_and_health_report_peer_id() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let root = endpoints::root(&ctx);
    assert_eq!(root.status(), StatusCode::OK);
    assert_eq!(
        body_json(&root),
        json!({"message": "P2P Data Lake Peer", "peer_id": "peer_1", "status": "running"})
    );

    let health = endpoints::health(&ctx);
    assert_eq!(
        body_json(&health),
        json!({"status": "healthy", "peer_id": "peer_1"})
    );
    assert_eq!(
        health.headers()[hyper::header::CONTENT_TYPE],
        "application/json"
    );
}

#[test]
fn info_and_tables_list_loaded_tables() {
    init_for_tests();
    let ctx = context(Factory::transport());

    assert_eq!(
        body_json(&endpoints::info(&ctx)),
        json!({
            "peer_id": "peer_1",
            "host": "localhost",
            "port": 8001,
            "tables": ["sales"],
            "table_count": 1
        })
    );
    assert_eq!(
        body_json(&endpoints::tables(&ctx)),
        json!({"tables": ["sales"]})
    );
}

#[test]
fn table_schema_known_and_unknown() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let found = endpoints::table_schema(&ctx, "sales");
    assert_eq!(found.status(), StatusCode::OK);
    let body = body_json(&found);
    assert_eq!(body["table_name"], "sales");
    assert_eq!(
        body["schema"][0],
        json!({"column_name": "region", "column_type": "VARCHAR"})
    );

    let missing = endpoints::table_schema(&ctx, "nope");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(&missing), json!({"detail": "Table 'nope' not found"}));
}

#[test]
fn query_runs_on_local_engine() {
    init_for_tests();
    let transport = Arc::new(Factory::transport());
    let ctx = FrontendContext::with_transport(
        Arc::new(Factory::settings().create()),
        Arc::new(Factory::memory_engine().with_sales().create()),
        transport.clone(),
    );

    let body = Bytes::from_static(br#"{"query": "SELECT COUNT(*) FROM sales"}"#);
    let resp = endpoints::query(&ctx, &body);

    assert_eq!(resp.status(), StatusCode::OK);
    let parsed: QueryResponse = serde_json::from_str(resp.body()).unwrap();
    assert!(parsed.success);
    assert_eq!(parsed.peer_id.as_deref(), Some("peer_1"));
    assert_eq!(parsed.data, vec![vec![json!(4)]]);
    assert_eq!(parsed.row_count, 1);
    assert_eq!(body_json(&resp)["error"], Value::Null);
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn query_accepts_sql_alias() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let resp = endpoints::query(&ctx, &Bytes::from_static(br#"{"sql": "SELECT 1"}"#));

    assert_eq!(body_json(&resp)["data"], json!([[1]]));
}

#[test]
fn query_engine_failure_is_still_ok_status() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let resp = endpoints::query(
        &ctx,
        &Bytes::from_static(br#"{"query": "SELECT * FROM missing"}"#),
    );

    assert_eq!(resp.status(), StatusCode::OK);
    let parsed: QueryResponse = serde_json::from_str(resp.body()).unwrap();
    assert!(!parsed.success);
    assert_eq!(parsed.error.as_deref(), Some("Table 'missing' not found"));
    assert_eq!(parsed.row_count, 0);
}

#[tokio::test]
async fn malformed_bodies_are_unprocessable() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let bodies: [&[u8]; 3] = [b"not json", br#"{"peers": []}"#, br#"{"query": 5}"#];
    for raw in bodies {
        let body = Bytes::copy_from_slice(raw);
        let single = endpoints::query(&ctx, &body);
        assert_eq!(single.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(&single)["detail"].is_string());

        let multi = endpoints::multi_peer_query(&ctx, &body).await;
        assert_eq!(multi.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn multi_peer_merges_self_remote_and_dead_peers() {
    init_for_tests();
    let remote = Factory::query_response()
        .with_peer_id(Some("peer_2"))
        .with_columns(&["count_star()"])
        .with_rows(vec![vec![json!(10)]])
        .to_json();
    let ctx = context(Factory::transport().healthy_peer("http://peer-b:8002", &remote));

    let body = Bytes::from(
        json!({
            "query": "SELECT COUNT(*) FROM sales;",
            "peers": ["http://localhost:8001", "http://peer-b:8002", "http://peer-c:8003"]
        })
        .to_string(),
    );
    let resp = endpoints::multi_peer_query(&ctx, &body).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let parsed: MultiPeerResponse = serde_json::from_str(resp.body()).unwrap();
    assert!(parsed.success);
    assert_eq!(parsed.error, None);
    assert_eq!(parsed.columns, vec!["count_star()"]);
    assert_eq!(parsed.aggregated_data, vec![vec![json!(4)], vec![json!(10)]]);
    assert_eq!(parsed.total_rows, 2);

    let ids: Vec<_> = parsed
        .results
        .iter()
        .map(|r| r.peer_id.clone().unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["peer_1", "peer_2", "http://peer-c:8003"]);
    assert_eq!(
        parsed.results[2].error.as_deref(),
        Some("Peer is offline or not reachable")
    );
}

#[tokio::test]
async fn multi_peer_with_no_peers_fails() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let resp = endpoints::multi_peer_query(
        &ctx,
        &Bytes::from_static(br#"{"query": "SELECT 1", "peers": []}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(&resp);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "All peer queries failed");
    assert_eq!(body["results"], json!([]));
}
