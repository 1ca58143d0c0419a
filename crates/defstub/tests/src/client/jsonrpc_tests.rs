use tokio::io::BufReader;

use super::*;

fn frame(body: &str) -> Vec<u8> {
    format!("Content-Length: {}\r\n\r\n{body}", body.len()).into_bytes()
}

#[test]
fn request_omits_null_params() {
    let message = request(7, "shutdown", Value::Null);
    assert_eq!(message, json!({ "jsonrpc": "2.0", "id": 7, "method": "shutdown" }));

    let message = request(8, "textDocument/definition", json!({ "position": { "line": 1 } }));
    assert_eq!(message["params"]["position"]["line"], 1);
}

#[test]
fn notification_has_no_id() {
    let message = notification("initialized", json!({}));
    assert_eq!(message, json!({ "jsonrpc": "2.0", "method": "initialized", "params": {} }));
}

#[test]
fn null_response_echoes_id() {
    assert_eq!(null_response(json!("abc")), json!({ "jsonrpc": "2.0", "id": "abc", "result": null }));
}

#[tokio::test]
async fn write_message_frames_body() {
    let mut out = Vec::new();
    let message = notification("exit", Value::Null);
    write_message(&mut out, &message).await.unwrap();

    let body = r#"{"jsonrpc":"2.0","method":"exit"}"#;
    assert_eq!(String::from_utf8(out).unwrap(), format!("Content-Length: {}\r\n\r\n{body}", body.len()));
}

#[tokio::test]
async fn reads_consecutive_messages() {
    let mut bytes = frame(r#"{"jsonrpc":"2.0","method":"window/logMessage","params":{"type":3,"message":"hi"}}"#);
    bytes.extend(frame(r#"{"jsonrpc":"2.0","id":1,"result":{"uri":"file:///a.cpp"}}"#));
    let mut reader = BufReader::new(bytes.as_slice());

    let first = read_message(&mut reader).await.unwrap().unwrap();
    assert_eq!(first.method.as_deref(), Some("window/logMessage"));
    assert!(!first.is_server_request());
    assert!(!first.is_response_to(1));

    let second = read_message(&mut reader).await.unwrap().unwrap();
    assert!(second.is_response_to(1));
    assert!(!second.is_response_to(2));
    assert_eq!(second.result, Some(json!({ "uri": "file:///a.cpp" })));

    assert!(read_message(&mut reader).await.unwrap().is_none());
}

#[tokio::test]
async fn header_name_is_case_insensitive_and_extra_headers_are_ignored() {
    let body = r#"{"jsonrpc":"2.0","id":3,"error":{"code":-32601,"message":"unknown"}}"#;
    let raw = format!(
        "content-length: {}\r\nContent-Type: application/vscode-jsonrpc; charset=utf-8\r\n\r\n{body}",
        body.len()
    );
    let mut reader = BufReader::new(raw.as_bytes());

    let message = read_message(&mut reader).await.unwrap().unwrap();
    assert!(message.is_response_to(3));
    assert_eq!(
        message.error,
        Some(ResponseError {
            code: -32601,
            message: "unknown".to_string(),
        })
    );
}

#[tokio::test]
async fn server_requests_are_recognized() {
    let bytes = frame(r#"{"jsonrpc":"2.0","id":"w1","method":"window/workDoneProgress/create","params":{}}"#);
    let mut reader = BufReader::new(bytes.as_slice());

    let message = read_message(&mut reader).await.unwrap().unwrap();
    assert!(message.is_server_request());
    assert!(!message.is_response_to(1));
}

#[tokio::test]
async fn invalid_length_is_an_error() {
    let mut reader = BufReader::new("Content-Length: many\r\n\r\n{}".as_bytes());
    let error = read_message(&mut reader).await.unwrap_err();
    assert_eq!(error.kind(), std::io::ErrorKind::InvalidData);
}

#[tokio::test]
async fn truncated_body_is_an_error() {
    let mut reader = BufReader::new("Content-Length: 40\r\n\r\n{\"jsonrpc\"".as_bytes());
    assert!(read_message(&mut reader).await.is_err());
}
