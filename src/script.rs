//! Scripted sessions: one JSON-encoded [`HostEvent`] per line.
//!
//! Blank lines and lines starting with `#` are skipped, so scripts can be
//! annotated by hand.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::{self, BufRead};

use editor::input::HostEvent;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: invalid event: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// An event and the 1-based script line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
    pub line: usize,
    pub event: HostEvent,
}

/// Read every event from `reader`.
///
/// # Errors
///
/// Returns [`ScriptError::Io`] if reading fails, or [`ScriptError::Parse`]
/// naming the first line that is not a valid event.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<ScriptEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| ScriptError::Parse { line: index + 1, source })?;
        events.push(ScriptEvent { line: index + 1, event });
    }
    Ok(events)
}
