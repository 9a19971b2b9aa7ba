mod common;
use common::RecordingTransport;

use bgw_mcp::app::App;
use bgw_mcp::mcp::server::McpServer;
use bgw_mcp::services::transport::ApiResult;
use serde_json::{json, Value};
use std::sync::Arc;

fn server_replying(reply: ApiResult) -> (McpServer, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::replying(reply));
    let app = App::with_transport(transport.clone()).unwrap();
    (McpServer::new(app), transport)
}

async fn roundtrip(server: &McpServer, request: Value) -> Option<Value> {
    server
        .handle_line(&request.to_string())
        .await
        .map(|response| serde_json::to_value(response).unwrap())
}

fn tool_text(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn initialize_reports_server_info() {
    let (server, _) = server_replying(ApiResult::Success(json!({})));
    let response = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}))
        .await
        .unwrap();
    assert_eq!(response["result"]["serverInfo"]["name"], "bgw-mcp");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn tools_list_serves_every_operation() {
    let (server, _) = server_replying(ApiResult::Success(json!({})));
    let response = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await
        .unwrap();
    let names: Vec<&str> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "token_info",
            "token_price",
            "batch_token_info",
            "kline",
            "tx_info",
            "rankings",
            "liquidity",
            "security_audit",
            "swap_quote",
            "swap_calldata",
        ]
    );
    assert!(response["result"]["tools"][0]["inputSchema"].is_object());
}

#[tokio::test]
async fn tools_call_wraps_result_as_text() {
    let (server, transport) = server_replying(ApiResult::Success(json!({
        "data": {"list": [{"symbol": "ETH"}]}
    })));
    let response = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "token_info", "arguments": {"chain": "eth"}}
        }),
    )
    .await
    .unwrap();

    assert_eq!(response["result"]["isError"], false);
    assert_eq!(tool_text(&response), json!({"symbol": "ETH"}));
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn remote_failures_set_is_error() {
    let (server, _) = server_replying(ApiResult::HttpStatus {
        status: 500,
        message: "server error".to_string(),
    });
    let response = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "rankings", "arguments": {}}
        }),
    )
    .await
    .unwrap();

    assert_eq!(response["result"]["isError"], true);
    assert_eq!(
        tool_text(&response),
        json!({"error": "HTTP 500", "message": "server error"})
    );
}

#[tokio::test]
async fn invalid_arguments_become_json_rpc_errors() {
    let (server, transport) = server_replying(ApiResult::Success(json!({})));
    let response = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {"name": "kline", "arguments": {"chain": "eth"}}
        }),
    )
    .await
    .unwrap();

    assert_eq!(response["error"]["code"], -32602);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("missing required field 'contract'"));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn notifications_and_garbage() {
    let (server, _) = server_replying(ApiResult::Success(json!({})));
    assert!(roundtrip(
        &server,
        json!({"jsonrpc": "2.0", "method": "notifications/cancelled"})
    )
    .await
    .is_none());

    let parse_error = server.handle_line("{not json").await.unwrap();
    assert_eq!(parse_error.error.unwrap().code, -32700);

    let unknown = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"}))
        .await
        .unwrap();
    assert_eq!(unknown["error"]["code"], -32601);
}

#[tokio::test]
async fn serve_answers_each_line() {
    let (server, _) = server_replying(ApiResult::Success(json!({})));
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n"
    );
    let mut output = Vec::new();
    server
        .serve(tokio::io::BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["id"], 2);
}
