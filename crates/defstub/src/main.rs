use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use defstub::{
    Buffer, Context, CppParser, DefinitionClient, RawSelection, StdioLanguageClient, TerminalEditor,
    config::{LogLevel, Settings, resolve_settings},
    generate_definitions,
    ide::{RawPosition, SelectionMode},
};

#[derive(Parser, Debug)]
#[command(name = "defstub", version, about)]
struct Args {
    #[arg(long, short, global = true)]
    verbose: bool,

    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write out-of-line definition stubs for undefined declarations in a selection.
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// C++ source or header file.
    file: PathBuf,

    /// Selection start as LINE:COLUMN (1-based).
    #[arg(long)]
    start: RawPosition,

    /// Selection end as LINE:COLUMN (1-based).
    #[arg(long)]
    end: RawPosition,

    /// `char`, `line` or `block` (Vim's `v`, `V` and CTRL-V are accepted too).
    #[arg(long, default_value = "char")]
    mode: SelectionMode,

    /// Settings file; defaults to the nearest `defstub.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Language server command, overriding `server.command`.
    #[arg(long)]
    server: Option<String>,

    /// Skip the language server and treat every declaration as undefined.
    #[arg(long)]
    no_server: bool,

    #[arg(long)]
    timeout_ms: Option<u64>,

    /// `stdout` or a file path to write the stubs to.
    #[arg(long)]
    register: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match args.command {
        Command::Generate(ref generate) => match run_generate(generate, args.verbose, args.log_file.as_deref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("defstub: {error}");
                ExitCode::FAILURE
            },
        },
    }
}

fn run_generate(
    args: &GenerateArgs,
    verbose: bool,
    log_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut settings, config_path) = resolve_settings(args.config.as_deref(), &args.file)?;
    apply_overrides(&mut settings, args);

    init_logging(verbose, log_file, settings.logging.level);
    if let Some(path) = &config_path {
        info!("Using settings from {}", path.display());
    }

    let buffer = Buffer::from_path(&args.file)?;
    let mut parser = CppParser::new()?;
    let mut clients: Vec<Box<dyn DefinitionClient>> = Vec::new();

    if settings.server.enable {
        let root = workspace_root(&settings, config_path.as_deref(), &args.file)?;
        match StdioLanguageClient::connect(&settings.server, &root) {
            Ok(mut client) => {
                if let Err(error) = client.open_document(&buffer) {
                    warn!("Failed to open {} in {}: {error}", buffer.uri, client.name());
                }
                clients.push(Box::new(client));
            },
            Err(error) => warn!("Language server `{}` unavailable: {error}", settings.server.command),
        }
    }

    let mut editor = TerminalEditor::new(Some(RawSelection {
        start: args.start,
        end: args.end,
        mode: args.mode,
    }));

    let mut ctx = Context {
        buffer: &buffer,
        parser: &mut parser,
        clients: &mut clients,
        editor: &mut editor,
        register: &settings.output.register,
    };
    generate_definitions(&mut ctx)?;
    Ok(())
}

fn apply_overrides(
    settings: &mut Settings,
    args: &GenerateArgs,
) {
    if let Some(server) = &args.server {
        settings.server.command = server.clone();
    }
    if args.no_server {
        settings.server.enable = false;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        settings.server.timeout_ms = timeout_ms;
    }
    if let Some(register) = &args.register {
        settings.output.register = register.clone();
    }
    settings.normalize();
}

/// Configured root, else the settings file's directory, else the source file's directory.
fn workspace_root(
    settings: &Settings,
    config_path: Option<&Path>,
    file: &Path,
) -> std::io::Result<PathBuf> {
    let root = settings
        .server
        .root
        .clone()
        .or_else(|| config_path.and_then(Path::parent).map(Path::to_path_buf))
        .or_else(|| file.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let root = if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    };
    std::path::absolute(root)
}

fn init_logging(
    verbose: bool,
    log_file: Option<&Path>,
    level: LogLevel,
) {
    let directive = if verbose {
        "defstub=debug".to_string()
    } else {
        format!("defstub={}", level.as_str())
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(EnvFilter::new(&directive));

    let file_layer = log_file.map(|path| {
        let file_appender = tracing_appender::rolling::never(
            path.parent().unwrap_or(Path::new(".")),
            path.file_name().unwrap_or(std::ffi::OsStr::new("defstub.log")),
        );
        fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(EnvFilter::new(&directive))
    });

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
}
