use std::{
    fs,
    io::{Stdout, Write},
    path::Path,
};

use tracing::{error, info, warn};

use crate::editor::{Editor, NotifyLevel, RawSelection};

/// Register name that prints to the terminal instead of a file.
pub const STDOUT_REGISTER: &str = "stdout";

/// Editor backed by command-line arguments.
///
/// The selection comes from the command line, registers are files (or the
/// terminal for [`STDOUT_REGISTER`]) and notifications go to the log.
pub struct TerminalEditor<W: Write = Stdout> {
    selection: Option<RawSelection>,
    stdout: W,
}

impl TerminalEditor<Stdout> {
    pub fn new(selection: Option<RawSelection>) -> Self {
        Self::with_writer(selection, std::io::stdout())
    }
}

impl<W: Write> TerminalEditor<W> {
    pub fn with_writer(
        selection: Option<RawSelection>,
        stdout: W,
    ) -> Self {
        Self {
            selection,
            stdout,
        }
    }

    pub fn writer(&self) -> &W {
        &self.stdout
    }
}

impl<W: Write> Editor for TerminalEditor<W> {
    fn selection(&self) -> Option<RawSelection> {
        self.selection
    }

    fn write_register(
        &mut self,
        register: &str,
        lines: &[String],
    ) -> std::io::Result<()> {
        let mut content = lines.join("\n");
        content.push('\n');

        if register == STDOUT_REGISTER {
            self.stdout.write_all(content.as_bytes())?;
            return self.stdout.flush();
        }

        let path = Path::new(register);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    fn notify(
        &mut self,
        level: NotifyLevel,
        message: &str,
    ) {
        match level {
            NotifyLevel::Info => info!("{message}"),
            NotifyLevel::Warn => warn!("{message}"),
            NotifyLevel::Error => error!("{message}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/editor/terminal_tests.rs"]
mod tests;
