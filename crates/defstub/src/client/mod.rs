//! Language-server clients able to answer `textDocument/definition`.

mod jsonrpc;
mod stdio;

use std::fmt::{Display, Formatter};

use lsp_types::{Location, Position, Url};

pub use jsonrpc::ResponseError;
pub use stdio::StdioLanguageClient;

/// Outcome of one `textDocument/definition` request.
#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionReply {
    /// Possibly empty; an absent result is reported as an empty list.
    Locations(Vec<Location>),
    Error {
        code: i64,
        message: String,
    },
    TimedOut,
}

/// A connected language server.
///
/// Requests are synchronous; implementations enforce their own timeout.
pub trait DefinitionClient {
    fn name(&self) -> &str;

    fn supports_definition(&self) -> bool;

    fn find_definition(
        &mut self,
        uri: &Url,
        position: Position,
    ) -> DefinitionReply;
}

#[derive(Debug)]
pub enum ClientError {
    Runtime(std::io::Error),
    Spawn {
        command: String,
        reason: String,
    },
    Io(std::io::Error),
    Disconnected,
    TimedOut {
        method: &'static str,
    },
    Rejected(ResponseError),
    Protocol(String),
}

impl Display for ClientError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Runtime(error) => write!(f, "failed to start async runtime: {error}"),
            Self::Spawn {
                command,
                reason,
            } => {
                write!(f, "failed to launch {command}: {reason}")
            },
            Self::Io(error) => write!(f, "language server I/O failed: {error}"),
            Self::Disconnected => write!(f, "language server closed the connection"),
            Self::TimedOut {
                method,
            } => write!(f, "{method} timed out"),
            Self::Rejected(error) => write!(f, "language server returned error {}: {}", error.code, error.message),
            Self::Protocol(reason) => write!(f, "unexpected language server message: {reason}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}
