//! HTTP-level tests for the Jira client
//!
//! A raw `TcpListener` plays the Jira server, answering one connection with
//! a canned HTTP/1.1 response and handing the captured request back to the
//! test. This exercises the real request primitive: URL construction, auth
//! headers, query-string handling, and non-2xx classification.

use jira_bridge::error::JiraError;
use jira_bridge::mcp::JiraMcpServer;
use jira_bridge::{Credentials, JiraApi, JiraClient, JiraConfig, SearchOptions};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{json, Map, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn no_content_response() -> String {
    "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string()
}

/// Serve exactly one connection with a canned response; resolves to the
/// captured request text.
async fn spawn_stub(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(header_end) = find_header_end(&data) {
            let headers = String::from_utf8_lossy(&data[..header_end]);
            let body_len = content_length(&headers);
            if data.len() >= header_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|window| window == b"\r\n\r\n")
}

fn content_length(headers: &str) -> usize {
    headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

fn bearer_client(base_url: &str) -> JiraClient {
    let config = JiraConfig::new(
        base_url,
        Credentials::Bearer {
            token: "test-token".to_string(),
        },
    )
    .unwrap();
    JiraClient::new(config).unwrap()
}

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn response_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => &text.text,
        _ => panic!("expected text content"),
    }
}

#[tokio::test]
async fn search_error_body_is_flattened_through_dispatch() {
    let (base_url, captured) = spawn_stub(http_response(
        "400 Bad Request",
        r#"{"errorMessages":["JQL is invalid"]}"#,
    ))
    .await;

    let server = JiraMcpServer::new(bearer_client(&base_url));
    let result = server
        .dispatch_tool("jira_search_issues", args(json!({ "jql": "bad" })))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    let text = response_text(&result);
    assert!(text.contains("Jira API Error"), "text: {text}");
    assert!(text.contains("JQL is invalid"), "text: {text}");

    let request = captured.await.unwrap();
    assert!(request.starts_with("POST /rest/api/2/search HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer test-token"));
}

#[tokio::test]
async fn add_comment_tolerates_204_no_content() {
    let (base_url, captured) = spawn_stub(no_content_response()).await;

    let server = JiraMcpServer::new(bearer_client(&base_url));
    let result = server
        .dispatch_tool(
            "jira_add_comment",
            args(json!({ "issueKey": "PROJ-123", "body": "done" })),
        )
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    let parsed: Value = serde_json::from_str(response_text(&result)).unwrap();
    assert_eq!(parsed, json!({}));

    let request = captured.await.unwrap();
    assert!(request.starts_with("POST /rest/api/2/issue/PROJ-123/comment HTTP/1.1"));
}

#[tokio::test]
async fn get_issue_sends_selectors_as_query_parameters() {
    let (base_url, captured) =
        spawn_stub(http_response("200 OK", r#"{"key":"PROJ-123"}"#)).await;

    let client = bearer_client(&base_url);
    let fields = vec!["summary".to_string(), "status".to_string()];
    let expand = vec!["changelog".to_string()];
    let issue = client.get_issue("PROJ-123", &fields, &expand).await.unwrap();
    assert_eq!(issue, json!({"key": "PROJ-123"}));

    let request = captured.await.unwrap();
    assert!(request.starts_with(
        "GET /rest/api/2/issue/PROJ-123?fields=summary%2Cstatus&expand=changelog HTTP/1.1"
    ));
}

#[tokio::test]
async fn get_issue_omits_empty_selectors_from_the_url() {
    let (base_url, captured) =
        spawn_stub(http_response("200 OK", r#"{"key":"PROJ-123"}"#)).await;

    let client = bearer_client(&base_url);
    client.get_issue("PROJ-123", &[], &[]).await.unwrap();

    let request = captured.await.unwrap();
    assert!(request.starts_with("GET /rest/api/2/issue/PROJ-123 HTTP/1.1"));
}

#[tokio::test]
async fn basic_credentials_become_a_basic_auth_header() {
    let (base_url, captured) =
        spawn_stub(http_response("200 OK", r#"{"key":"PROJ-1"}"#)).await;

    let config = JiraConfig::new(
        &base_url,
        Credentials::Basic {
            username: "user".to_string(),
            password: "pass".to_string(),
        },
    )
    .unwrap();
    let client = JiraClient::new(config).unwrap();
    client.get_issue("PROJ-1", &[], &[]).await.unwrap();

    let request = captured.await.unwrap().to_ascii_lowercase();
    // base64("user:pass")
    assert!(request.contains("authorization: basic dxnlcjpwyxnz"));
}

#[tokio::test]
async fn search_substitutes_the_default_projection() {
    let (base_url, captured) = spawn_stub(http_response(
        "200 OK",
        r#"{"total":0,"startAt":0,"maxResults":50,"issues":[]}"#,
    ))
    .await;

    let client = bearer_client(&base_url);
    client
        .search_issues("project = TEST", SearchOptions::default())
        .await
        .unwrap();

    let request = captured.await.unwrap();
    let body_start = request.find("\r\n\r\n").unwrap() + 4;
    let body: Value = serde_json::from_str(&request[body_start..]).unwrap();

    assert_eq!(body["jql"], "project = TEST");
    assert_eq!(body["maxResults"], 50);
    assert_eq!(body["startAt"], 0);
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_str().unwrap())
        .collect();
    assert!(fields.contains(&"issuetype"));
    assert!(fields.contains(&"created"));
    assert!(fields.contains(&"updated"));
}

#[tokio::test]
async fn explicit_fields_override_the_default_projection() {
    let (base_url, captured) = spawn_stub(http_response(
        "200 OK",
        r#"{"total":0,"startAt":0,"maxResults":5,"issues":[]}"#,
    ))
    .await;

    let client = bearer_client(&base_url);
    client
        .search_issues(
            "project = TEST",
            SearchOptions {
                max_results: 5,
                start_at: 0,
                fields: Some(vec!["summary".to_string()]),
            },
        )
        .await
        .unwrap();

    let request = captured.await.unwrap();
    let body_start = request.find("\r\n\r\n").unwrap() + 4;
    let body: Value = serde_json::from_str(&request[body_start..]).unwrap();
    assert_eq!(body["fields"], json!(["summary"]));
    assert_eq!(body["maxResults"], 5);
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_status_text() {
    let (base_url, _captured) =
        spawn_stub(http_response("502 Bad Gateway", "<html>upstream sad</html>")).await;

    let client = bearer_client(&base_url);
    let error = client.get_issue("PROJ-1", &[], &[]).await.unwrap_err();
    match error {
        JiraError::Api {
            message,
            status,
            errors,
        } => {
            assert_eq!(message, "HTTP 502: Bad Gateway");
            assert_eq!(status, Some(502));
            assert!(errors.is_none());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Bind and immediately drop to get a port nobody is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = bearer_client(&format!("http://{addr}"));
    let error = client.get_issue("PROJ-1", &[], &[]).await.unwrap_err();
    assert!(matches!(error, JiraError::Transport(_)));
}

#[tokio::test]
async fn transport_errors_render_as_generic_business_errors() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let server = JiraMcpServer::new(bearer_client(&format!("http://{addr}")));
    let result = server
        .dispatch_tool("jira_get_issue", args(json!({ "issueKey": "PROJ-1" })))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    let text = response_text(&result);
    assert!(text.starts_with("Jira request failed:"), "text: {text}");
    assert!(!text.contains("test-token"));
}

#[tokio::test]
async fn create_issue_posts_the_wrapped_fields_object() {
    let (base_url, captured) = spawn_stub(http_response(
        "201 Created",
        r#"{"id":"10003","key":"TEST-42","self":"http://jira/rest/api/2/issue/10003"}"#,
    ))
    .await;

    let client = bearer_client(&base_url);
    let created = client
        .create_issue(json!({ "project": { "key": "TEST" }, "summary": "x" }))
        .await
        .unwrap();
    assert_eq!(created["key"], "TEST-42");

    let request = captured.await.unwrap();
    assert!(request.starts_with("POST /rest/api/2/issue HTTP/1.1"));
    let body_start = request.find("\r\n\r\n").unwrap() + 4;
    let body: Value = serde_json::from_str(&request[body_start..]).unwrap();
    assert_eq!(body, json!({ "fields": { "project": { "key": "TEST" }, "summary": "x" } }));
}
