use std::{collections::HashSet, path::Path, process::Stdio, time::Duration};

use lsp_types::{
    ClientCapabilities, ClientInfo, DidOpenTextDocumentParams, GotoDefinitionParams, GotoDefinitionResponse,
    InitializeParams, InitializeResult, InitializedParams, OneOf, PartialResultParams, Position,
    TextDocumentIdentifier, TextDocumentItem, TextDocumentPositionParams, Url, WorkDoneProgressParams,
    notification::{DidOpenTextDocument, Exit, Initialized, Notification},
    request::{GotoDefinition, Initialize, Request, Shutdown},
};
use serde_json::Value;
use tokio::{
    io::BufReader,
    process::{Child, ChildStdin, ChildStdout, Command},
    runtime::Runtime,
};
use tracing::{debug, info, warn};

use crate::{
    client::{
        ClientError, DefinitionClient, DefinitionReply,
        jsonrpc::{self, ResponseError},
    },
    config::ServerSettings,
    document::Buffer,
    ide::lsp::definition_response_locations,
};

const LANGUAGE_ID: &str = "cpp";
const INTERNAL_ERROR: i64 = -32603;
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// A language server spawned as a child process and spoken to over stdio.
///
/// The client owns a current-thread runtime and blocks on every request, so
/// it must not be used from inside another tokio runtime.
///
/// A request that times out may leave a partially read frame behind, so the
/// connection is considered stalled afterwards: later definition requests
/// report [`DefinitionReply::TimedOut`] without touching the stream.
pub struct StdioLanguageClient {
    name: String,
    runtime: Runtime,
    connection: Connection,
    state: ConnectionState,
    timeout: Duration,
    definition_provider: bool,
    opened: HashSet<Url>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionState {
    Ready,
    /// A read was cancelled mid-message; framing can no longer be trusted.
    Stalled,
    Closed,
}

impl StdioLanguageClient {
    /// Spawn the configured server and complete the `initialize` handshake.
    pub fn connect(
        settings: &ServerSettings,
        root: &Path,
    ) -> Result<Self, ClientError> {
        let runtime =
            tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(ClientError::Runtime)?;
        let timeout = Duration::from_millis(settings.timeout_ms);
        let root_uri = Url::from_directory_path(root).ok();

        let (connection, result) = runtime.block_on(async {
            let mut connection = Connection::spawn(&settings.command, &settings.args)?;
            let params = serde_json::to_value(initialize_params(root_uri))
                .map_err(|error| ClientError::Protocol(error.to_string()))?;
            let reply = tokio::time::timeout(timeout, connection.request(Initialize::METHOD, params))
                .await
                .map_err(|_| ClientError::TimedOut {
                    method: Initialize::METHOD,
                })??;
            let value = reply.map_err(ClientError::Rejected)?.unwrap_or(Value::Null);
            let result: InitializeResult =
                serde_json::from_value(value).map_err(|error| ClientError::Protocol(error.to_string()))?;
            let params = serde_json::to_value(InitializedParams {})
                .map_err(|error| ClientError::Protocol(error.to_string()))?;
            connection.notify(Initialized::METHOD, params).await?;
            Ok::<_, ClientError>((connection, result))
        })?;

        let definition_provider = match result.capabilities.definition_provider {
            Some(OneOf::Left(enabled)) => enabled,
            Some(OneOf::Right(_)) => true,
            None => false,
        };
        let name = result.server_info.map(|info| info.name).unwrap_or_else(|| settings.command.clone());
        info!("Connected to {name} (definition support: {definition_provider})");

        Ok(Self {
            name,
            runtime,
            connection,
            state: ConnectionState::Ready,
            timeout,
            definition_provider,
            opened: HashSet::new(),
        })
    }

    /// Send `shutdown` and `exit`. Later calls are no-ops.
    pub fn shutdown(&mut self) -> Result<(), ClientError> {
        let state = std::mem::replace(&mut self.state, ConnectionState::Closed);
        match state {
            ConnectionState::Ready => {},
            ConnectionState::Stalled => {
                return Err(ClientError::Protocol("connection stalled after a timed-out request".to_string()));
            },
            ConnectionState::Closed => return Ok(()),
        }

        let connection = &mut self.connection;
        let outcome = self.runtime.block_on(async move {
            tokio::time::timeout(SHUTDOWN_GRACE, async {
                let reply = connection.request(Shutdown::METHOD, Value::Null).await?;
                reply.map_err(ClientError::Rejected)?;
                connection.notify(Exit::METHOD, Value::Null).await?;
                Ok::<_, ClientError>(())
            })
            .await
        });
        outcome.map_err(|_| ClientError::TimedOut {
            method: Shutdown::METHOD,
        })?
    }

    /// Send `textDocument/didOpen` for the buffer unless it is already open.
    pub fn open_document(
        &mut self,
        buffer: &Buffer,
    ) -> Result<(), ClientError> {
        if self.opened.contains(&buffer.uri) {
            return Ok(());
        }
        let params = DidOpenTextDocumentParams {
            text_document: TextDocumentItem::new(buffer.uri.clone(), LANGUAGE_ID.to_string(), 0, buffer.text.clone()),
        };
        let params = serde_json::to_value(params).map_err(|error| ClientError::Protocol(error.to_string()))?;
        let connection = &mut self.connection;
        self.runtime.block_on(connection.notify(DidOpenTextDocument::METHOD, params))?;
        self.opened.insert(buffer.uri.clone());
        debug!("Opened {} in {}", buffer.uri, self.name);
        Ok(())
    }
}

impl DefinitionClient for StdioLanguageClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_definition(&self) -> bool {
        self.definition_provider
    }

    fn find_definition(
        &mut self,
        uri: &Url,
        position: Position,
    ) -> DefinitionReply {
        match self.state {
            ConnectionState::Ready => {},
            ConnectionState::Stalled => return DefinitionReply::TimedOut,
            ConnectionState::Closed => {
                return DefinitionReply::Error {
                    code: INTERNAL_ERROR,
                    message: "connection is closed".to_string(),
                };
            },
        }

        let params = GotoDefinitionParams {
            text_document_position_params: TextDocumentPositionParams::new(
                TextDocumentIdentifier::new(uri.clone()),
                position,
            ),
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };
        let params = match serde_json::to_value(params) {
            Ok(params) => params,
            Err(error) => {
                return DefinitionReply::Error {
                    code: INTERNAL_ERROR,
                    message: error.to_string(),
                };
            },
        };

        let connection = &mut self.connection;
        let timeout = self.timeout;
        let outcome = self.runtime.block_on(async move {
            tokio::time::timeout(timeout, connection.request(GotoDefinition::METHOD, params)).await
        });

        match outcome {
            Err(_) => {
                debug!("{}: no definition reply within {:?}; connection stalled", self.name, self.timeout);
                self.state = ConnectionState::Stalled;
                DefinitionReply::TimedOut
            },
            Ok(Err(error)) => {
                self.state = ConnectionState::Closed;
                DefinitionReply::Error {
                    code: INTERNAL_ERROR,
                    message: error.to_string(),
                }
            },
            Ok(Ok(Err(error))) => DefinitionReply::Error {
                code: error.code,
                message: error.message,
            },
            Ok(Ok(Ok(result))) => {
                let result = result.unwrap_or(Value::Null);
                match serde_json::from_value::<Option<GotoDefinitionResponse>>(result) {
                    Ok(response) => DefinitionReply::Locations(definition_response_locations(response)),
                    Err(error) => DefinitionReply::Error {
                        code: INTERNAL_ERROR,
                        message: format!("malformed definition response: {error}"),
                    },
                }
            },
        }
    }
}

impl Drop for StdioLanguageClient {
    fn drop(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        match self.shutdown() {
            Ok(()) => debug!("{} shut down", self.name),
            Err(error) => warn!("{} did not shut down cleanly: {error}", self.name),
        }
    }
}

struct Connection {
    // Held so the server is killed when the client goes away.
    _child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: i64,
}

impl Connection {
    fn spawn(
        command: &str,
        args: &[String],
    ) -> Result<Self, ClientError> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| ClientError::Spawn {
                command: command.to_string(),
                reason: error.to_string(),
            })?;

        let stdin = child.stdin.take().ok_or_else(|| ClientError::Protocol("child stdin unavailable".into()))?;
        let stdout = child.stdout.take().ok_or_else(|| ClientError::Protocol("child stdout unavailable".into()))?;

        Ok(Self {
            _child: child,
            stdin,
            stdout: BufReader::new(stdout),
            next_id: 1,
        })
    }

    async fn notify(
        &mut self,
        method: &str,
        params: Value,
    ) -> Result<(), ClientError> {
        jsonrpc::write_message(&mut self.stdin, &jsonrpc::notification(method, params)).await?;
        Ok(())
    }

    /// Send a request and wait for its response, answering any server
    /// requests that arrive in between with an empty result.
    async fn request(
        &mut self,
        method: &str,
        params: Value,
    ) -> Result<Result<Option<Value>, ResponseError>, ClientError> {
        let id = self.next_id;
        self.next_id += 1;
        jsonrpc::write_message(&mut self.stdin, &jsonrpc::request(id, method, params)).await?;

        loop {
            let Some(message) = jsonrpc::read_message(&mut self.stdout).await? else {
                return Err(ClientError::Disconnected);
            };

            if message.is_response_to(id) {
                return Ok(match message.error {
                    Some(error) => Err(error),
                    None => Ok(message.result),
                });
            }

            if message.is_server_request()
                && let Some(request_id) = message.id
            {
                debug!("Answering server request {:?}", message.method);
                jsonrpc::write_message(&mut self.stdin, &jsonrpc::null_response(request_id)).await?;
            }
        }
    }
}

#[allow(deprecated)]
fn initialize_params(root_uri: Option<Url>) -> InitializeParams {
    InitializeParams {
        process_id: Some(std::process::id()),
        root_uri,
        capabilities: ClientCapabilities::default(),
        client_info: Some(ClientInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
        ..InitializeParams::default()
    }
}

#[cfg(test)]
#[path = "../../tests/src/client/stdio_tests.rs"]
mod tests;
