use lsp_types::Url;
use tree_sitter::Tree;

use super::*;
use crate::{
    editor::RawSelection,
    ide::{RawPosition, SelectionMode},
    syntax::{CppParser, SyntaxError},
};

struct FailingParser;

impl SyntaxParser for FailingParser {
    fn parse(
        &mut self,
        _source: &str,
    ) -> Result<Tree, SyntaxError> {
        Err(SyntaxError::ParseFailed)
    }
}

#[derive(Default)]
struct FakeEditor {
    selection: Option<RawSelection>,
    reject_writes: bool,
    written: Vec<(String, Vec<String>)>,
    notifications: Vec<(NotifyLevel, String)>,
}

impl Editor for FakeEditor {
    fn selection(&self) -> Option<RawSelection> {
        self.selection
    }

    fn write_register(
        &mut self,
        register: &str,
        lines: &[String],
    ) -> std::io::Result<()> {
        if self.reject_writes {
            return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only register"));
        }
        self.written.push((register.to_string(), lines.to_vec()));
        Ok(())
    }

    fn notify(
        &mut self,
        level: NotifyLevel,
        message: &str,
    ) {
        self.notifications.push((level, message.to_string()));
    }
}

const SOURCE: &str = "struct Counter {\n    void reset();\n    int value() const;\n};\n";

fn buffer() -> Buffer {
    Buffer::new(Url::parse("file:///src/counter.hpp").unwrap(), SOURCE.to_string())
}

fn whole_file() -> Option<RawSelection> {
    Some(RawSelection {
        start: RawPosition::new(1, 1),
        end: RawPosition::new(4, 1),
        mode: SelectionMode::Line,
    })
}

fn run(
    parser: &mut dyn SyntaxParser,
    editor: &mut FakeEditor,
) -> Result<usize, CommandError> {
    let buffer = buffer();
    let mut clients: Vec<Box<dyn DefinitionClient>> = Vec::new();
    let mut ctx = Context {
        buffer: &buffer,
        parser,
        clients: &mut clients,
        editor,
        register: "stubs",
    };
    generate_definitions(&mut ctx)
}

#[test]
fn without_selection_nothing_happens() {
    let mut editor = FakeEditor::default();
    let count = run(&mut CppParser::new().unwrap(), &mut editor).unwrap();
    assert_eq!(count, 0);
    assert!(editor.written.is_empty());
    assert!(editor.notifications.is_empty());
}

#[test]
fn parse_failure_is_reported_as_error() {
    let mut editor = FakeEditor {
        selection: whole_file(),
        ..FakeEditor::default()
    };
    let count = run(&mut FailingParser, &mut editor).unwrap();
    assert_eq!(count, 0);
    assert!(editor.written.is_empty());
    assert_eq!(editor.notifications.len(), 1);
    assert_eq!(editor.notifications[0].0, NotifyLevel::Error);
    assert!(editor.notifications[0].1.starts_with(COMMAND_NAME), "{}", editor.notifications[0].1);
}

#[test]
fn writes_stubs_and_reports_count() {
    let mut editor = FakeEditor {
        selection: whole_file(),
        ..FakeEditor::default()
    };
    let count = run(&mut CppParser::new().unwrap(), &mut editor).unwrap();
    assert_eq!(count, 2);
    assert_eq!(
        editor.written,
        vec![(
            "stubs".to_string(),
            vec!["void Counter::reset() {}".to_string(), "int Counter::value() const {}".to_string()]
        )]
    );

    let (level, message) = editor.notifications.last().unwrap();
    assert_eq!(*level, NotifyLevel::Info);
    assert_eq!(message, "2 definition(s) written to register `stubs`");
}

#[test]
fn register_failure_is_returned() {
    let mut editor = FakeEditor {
        selection: whole_file(),
        reject_writes: true,
        ..FakeEditor::default()
    };
    let error = run(&mut CppParser::new().unwrap(), &mut editor).unwrap_err();
    assert!(matches!(&error, CommandError::Register { register, .. } if register == "stubs"));
    assert!(std::error::Error::source(&error).is_some());
    assert!(editor.notifications.iter().all(|(level, _)| *level != NotifyLevel::Info));
}

#[test]
fn char_selection_picks_only_touched_declaration() {
    let mut editor = FakeEditor {
        selection: Some(RawSelection {
            start: RawPosition::new(3, 9),
            end: RawPosition::new(3, 9),
            mode: SelectionMode::Char,
        }),
        ..FakeEditor::default()
    };
    let count = run(&mut CppParser::new().unwrap(), &mut editor).unwrap();
    assert_eq!(count, 1);
    assert_eq!(editor.written[0].1, vec!["int Counter::value() const {}".to_string()]);
}
