// State module - run statistics exposed by the protocol parser
// The reporting session only reads these through `RunStatus`

pub mod result;

pub use result::{Directive, ResultEvent, ResultKind};

use serde::{Deserialize, Serialize};

/// Read-only view of a parser's running statistics.
///
/// Counts are trusted as reported; nothing here is validated.
pub trait RunStatus {
    fn tests_planned(&self) -> Option<u64>;
    fn tests_run(&self) -> u64;
    fn passed(&self) -> u64;
    fn failed(&self) -> u64;
    fn skipped(&self) -> u64;
    fn todo_passed(&self) -> u64;
    fn has_problems(&self) -> bool;
    fn exit(&self) -> Option<i32>;
    fn wait(&self) -> Option<i32>;
    /// Seconds since the epoch
    fn start_time(&self) -> Option<f64>;
    fn end_time(&self) -> Option<f64>;
    /// Reason given by a `1..0 # SKIP` plan
    fn skip_all(&self) -> Option<&str>;
}

/// Statistics snapshot for a single test file's run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    #[serde(default)]
    pub tests_planned: Option<u64>,
    #[serde(default)]
    pub tests_run: u64,
    #[serde(default)]
    pub passed: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub todo_passed: u64,
    #[serde(default)]
    pub exit: Option<i32>,
    #[serde(default)]
    pub wait: Option<i32>,
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub skip_all: Option<String>,
    #[serde(default)]
    pub bailed_out: bool,
}

impl RunStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one result event into the running counts
    pub fn record(&mut self, event: &ResultEvent) {
        match event.kind {
            ResultKind::Plan => {
                self.tests_planned = event.planned;
                if event.planned == Some(0) && event.has_skip() {
                    self.skip_all = Some(event.explanation().to_string());
                }
            }
            ResultKind::Test => {
                self.tests_run += 1;
                if event.is_ok() {
                    self.passed += 1;
                } else {
                    self.failed += 1;
                }
                if event.has_skip() {
                    self.skipped += 1;
                }
                if event.has_todo() && event.is_actual_ok() {
                    self.todo_passed += 1;
                }
            }
            ResultKind::Bailout => self.bailed_out = true,
            ResultKind::Comment | ResultKind::Version | ResultKind::Unknown => {}
        }
    }

    /// Copy process-level fields reported once the test program has exited
    pub fn finish(&mut self, finished: &RunStatistics) {
        self.exit = finished.exit.or(self.exit);
        self.wait = finished.wait.or(self.wait);
        self.start_time = finished.start_time.or(self.start_time);
        self.end_time = finished.end_time.or(self.end_time);
    }
}

impl RunStatus for RunStatistics {
    fn tests_planned(&self) -> Option<u64> {
        self.tests_planned
    }

    fn tests_run(&self) -> u64 {
        self.tests_run
    }

    fn passed(&self) -> u64 {
        self.passed
    }

    fn failed(&self) -> u64 {
        self.failed
    }

    fn skipped(&self) -> u64 {
        self.skipped
    }

    fn todo_passed(&self) -> u64 {
        self.todo_passed
    }

    fn has_problems(&self) -> bool {
        self.failed > 0
            || self.tests_planned.is_some_and(|planned| planned != self.tests_run)
            || self.exit.is_some_and(|code| code != 0)
            || self.wait.is_some_and(|status| status != 0)
            || self.bailed_out
    }

    fn exit(&self) -> Option<i32> {
        self.exit
    }

    fn wait(&self) -> Option<i32> {
        self.wait
    }

    fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    fn end_time(&self) -> Option<f64> {
        self.end_time
    }

    fn skip_all(&self) -> Option<&str> {
        self.skip_all.as_deref()
    }
}
