// End-of-run failure summary

use std::io;

use super::OutputSink;
use crate::state::RunStatus;

/// Totals behind the summary printed for a run with problems
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Planned count, or the number run when no plan was seen
    pub total: u64,
    /// Failed tests plus planned tests that never ran. Not clamped: more
    /// tests than planned drives this below `failed`.
    pub failed: i64,
    pub passed: u64,
    pub skipped: u64,
    pub todo_passed: u64,
    pub exit: Option<i32>,
    pub wait: Option<i32>,
}

impl Summary {
    pub fn from_status<P: RunStatus>(status: &P) -> Self {
        let tests_run = status.tests_run();
        let total = status.tests_planned().unwrap_or(tests_run);
        let failed = status.failed() as i64 + (total as i64 - tests_run as i64);

        Self {
            total,
            failed,
            passed: status.passed(),
            skipped: status.skipped(),
            todo_passed: status.todo_passed(),
            exit: status.exit(),
            wait: status.wait(),
        }
    }

    /// Write the summary, unless the sink is really quiet
    pub fn write_to<S: OutputSink>(&self, sink: &mut S) -> io::Result<()> {
        if sink.options().really_quiet() {
            return Ok(());
        }

        if let Some(exit) = self.exit.filter(|&code| code != 0) {
            let wait = self.wait.unwrap_or(0);
            sink.write_failure(&format!(
                " Dubious, test returned {} (wstat {}, 0x{:x})\n",
                exit, wait, wait
            ))?;
        }

        if self.failed == 0 {
            if self.total > 0 {
                sink.write_failure(&format!(" All {} subtests passed ", self.total))?;
            } else {
                sink.write_failure(" No subtests run ")?;
            }
        } else {
            sink.write_failure(&format!(
                " Failed {}/{} subtests ",
                self.failed, self.total
            ))?;
            if self.total == 0 {
                sink.write_failure("\nNo tests run!")?;
            }
        }

        if self.skipped > 0 {
            let okay = self.passed as i64 - self.skipped as i64;
            let noun = if self.skipped != 1 { "subtests" } else { "subtest" };
            sink.write(&format!(
                "\n\t(less {} skipped {}: {} okay)",
                self.skipped, noun, okay
            ))?;
        }

        if self.todo_passed > 0 {
            let noun = if self.todo_passed > 1 { "tests" } else { "test" };
            sink.write(&format!(
                "\n\t({} TODO {} unexpectedly succeeded)",
                self.todo_passed, noun
            ))?;
        }

        sink.write("\n")
    }
}
