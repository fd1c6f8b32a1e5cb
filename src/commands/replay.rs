// Replay files - JSON-lines streams of already-parsed events
//
//   {"event":"session","name":"t/basic.t"}
//   {"event":"result","kind":"plan","planned":2,"raw":"1..2"}
//   {"event":"result","kind":"test","number":1,"raw":"ok 1"}
//   {"event":"exit","exit":0,"wait":0}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::SessionError;
use crate::report::SessionArgs;
use crate::state::{ResultEvent, RunStatistics};

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ReplayLine {
    Session(serde_json::Map<String, serde_json::Value>),
    Result(ResultEvent),
    Exit(RunStatistics),
}

/// One test file's recorded run
#[derive(Debug, Clone)]
pub struct Replay {
    pub path: PathBuf,
    pub args: SessionArgs,
    pub events: Vec<ResultEvent>,
    /// Process-level statistics recorded after the run
    pub finished: Option<RunStatistics>,
}

impl Replay {
    /// Load a replay file, or stdin for `-`
    pub fn load(path: &Path) -> Result<Self> {
        let content = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read events from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        };

        Self::parse(path, &content).with_context(|| format!("Invalid replay {}", path.display()))
    }

    /// Parse replay content. The session name defaults to the file path.
    pub fn parse(path: &Path, content: &str) -> crate::error::Result<Self> {
        let mut args = SessionArgs::new(path.display().to_string());
        let mut events = Vec::new();
        let mut finished = None;

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parsed: ReplayLine =
                serde_json::from_str(line).map_err(|e| SessionError::InvalidEvent {
                    line: index + 1,
                    message: e.to_string(),
                })?;

            match parsed {
                ReplayLine::Session(fields) => {
                    args = SessionArgs::from_json(serde_json::Value::Object(fields))?;
                }
                ReplayLine::Result(event) => events.push(event),
                ReplayLine::Exit(stats) => finished = Some(stats),
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            args,
            events,
            finished,
        })
    }
}
