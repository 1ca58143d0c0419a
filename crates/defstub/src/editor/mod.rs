//! The host editor as seen by the generate command.

mod terminal;

use crate::ide::{RawPosition, SelectionMode};

pub use terminal::{STDOUT_REGISTER, TerminalEditor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

/// Selection marks exactly as the editor reports them (1-based, unordered).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSelection {
    pub start: RawPosition,
    pub end: RawPosition,
    pub mode: SelectionMode,
}

pub trait Editor {
    fn selection(&self) -> Option<RawSelection>;

    /// Store `lines` linewise in the named register.
    fn write_register(
        &mut self,
        register: &str,
        lines: &[String],
    ) -> std::io::Result<()>;

    fn notify(
        &mut self,
        level: NotifyLevel,
        message: &str,
    );
}
