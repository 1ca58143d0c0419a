//! `Content-Length` framed JSON-RPC over a child process' stdio.

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

/// Any message the server may send: response, request or notification.
#[derive(Debug, Deserialize)]
pub(crate) struct IncomingMessage {
    #[serde(default)]
    pub(crate) id: Option<Value>,
    #[serde(default)]
    pub(crate) method: Option<String>,
    #[serde(default)]
    pub(crate) result: Option<Value>,
    #[serde(default)]
    pub(crate) error: Option<ResponseError>,
}

impl IncomingMessage {
    pub(crate) fn is_response_to(
        &self,
        id: i64,
    ) -> bool {
        self.method.is_none() && self.id.as_ref().and_then(Value::as_i64) == Some(id)
    }

    pub(crate) fn is_server_request(&self) -> bool {
        self.method.is_some() && self.id.is_some()
    }
}

/// `Null` params are omitted: `shutdown` and `exit` take none.
pub(crate) fn request(
    id: i64,
    method: &str,
    params: Value,
) -> Value {
    let mut message = json!({ "jsonrpc": "2.0", "id": id, "method": method });
    attach_params(&mut message, params);
    message
}

pub(crate) fn notification(
    method: &str,
    params: Value,
) -> Value {
    let mut message = json!({ "jsonrpc": "2.0", "method": method });
    attach_params(&mut message, params);
    message
}

fn attach_params(
    message: &mut Value,
    params: Value,
) {
    if !params.is_null()
        && let Some(object) = message.as_object_mut()
    {
        object.insert("params".to_string(), params);
    }
}

/// Empty success reply to a server-initiated request.
pub(crate) fn null_response(id: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": null })
}

pub(crate) async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &Value,
) -> std::io::Result<()> {
    let body = serde_json::to_vec(message)?;
    writer.write_all(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await
}

/// Read one framed message. `Ok(None)` means the stream ended.
pub(crate) async fn read_message<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<Option<IncomingMessage>> {
    let mut content_length = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let line = line.trim_end();
        if line.is_empty() {
            if content_length.is_some() {
                break;
            }
            continue;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.trim().eq_ignore_ascii_case("content-length")
        {
            let length = value
                .trim()
                .parse::<usize>()
                .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))?;
            content_length = Some(length);
        }
    }

    let mut body = vec![0u8; content_length.unwrap_or_default()];
    reader.read_exact(&mut body).await?;
    let message = serde_json::from_slice(&body)?;
    Ok(Some(message))
}

#[cfg(test)]
#[path = "../../tests/src/client/jsonrpc_tests.rs"]
mod tests;
