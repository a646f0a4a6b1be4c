mod script;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use clap::Parser;
use editor::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use editor::engine::{Action, CanvasConfig, EditorCore, EditorState};
use editor::render::SceneItem;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::script::{ScriptError, read_events};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to write report: {0}")]
    Output(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "svgedit", about = "Replay a scripted editing session through the shape editor core")]
struct Cli {
    #[arg(long, env = "SVGEDIT_WIDTH", default_value_t = DEFAULT_CANVAS_WIDTH)]
    width: f64,

    #[arg(long, env = "SVGEDIT_HEIGHT", default_value_t = DEFAULT_CANVAS_HEIGHT)]
    height: f64,

    #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
    input: String,

    #[arg(long, default_value_t = false, help = "Include the actions each event produced")]
    actions: bool,
}

#[derive(Serialize)]
struct EventActions {
    line: usize,
    actions: Vec<Action>,
}

#[derive(Serialize)]
struct Report<'a> {
    canvas: CanvasConfig,
    state: &'a EditorState,
    scene: Vec<SceneItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    actions: Vec<EventActions>,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!(width = cli.width, height = cli.height, input = %cli.input, "replaying session");

    let reader: Box<dyn BufRead> = if cli.input == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&cli.input).map_err(|source| CliError::Open { path: cli.input.clone(), source })?;
        Box::new(BufReader::new(file))
    };
    let events = read_events(reader)?;

    let mut core = EditorCore::with_config(CanvasConfig { width: cli.width, height: cli.height });
    let mut log = Vec::new();
    for script_event in events {
        let line = script_event.line;
        match core.dispatch(script_event.event) {
            Ok(actions) => {
                if cli.actions {
                    log.push(EventActions { line, actions });
                }
            }
            Err(e) => tracing::warn!(line, error = %e, "event skipped"),
        }
    }

    tracing::info!(shapes = core.shapes().len(), dots = core.dots().len(), "session replayed");

    let report = Report { canvas: core.config(), state: core.state(), scene: core.scene(), actions: log };
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}
