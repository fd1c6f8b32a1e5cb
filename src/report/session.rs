// Console reporting session - one test file's run, header to close

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, trace, warn};

use super::{OutputSink, ProgressChannel, ProgressTracker, ResultStyle, Summary};
use crate::error::{Result, SessionError};
use crate::state::{ResultEvent, RunStatus};
use crate::time;

/// Arguments a session is constructed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionArgs {
    pub name: String,
    /// Force the progress counter on or off; defaults to terminal detection
    pub show_count: Option<bool>,
}

#[derive(Deserialize)]
struct RawArgs {
    name: String,
    #[serde(default)]
    show_count: Option<bool>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

impl SessionArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            show_count: None,
        }
    }

    pub fn show_count(mut self, show_count: bool) -> Self {
        self.show_count = Some(show_count);
        self
    }

    /// Build arguments from a JSON object, rejecting keys nobody reads
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let raw: RawArgs = serde_json::from_value(value)?;
        if !raw.unknown.is_empty() {
            return Err(SessionError::UnknownArguments {
                keys: raw.unknown.into_keys().collect(),
            });
        }
        Ok(Self {
            name: raw.name,
            show_count: raw.show_count,
        })
    }
}

/// Settings fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub name: String,
    /// Name as printed, padded by the formatter
    pub display_name: String,
    pub really_quiet: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub directives: bool,
    pub failures: bool,
    pub comments: bool,
    pub timer: bool,
    pub hires_time: bool,
    pub color: bool,
    pub show_count: bool,
}

impl SessionConfig {
    /// Resolve session settings against the formatter hosting it
    pub fn resolve<S: OutputSink>(args: &SessionArgs, sink: &S) -> Self {
        let options = sink.options();
        let verbose = options.verbose();
        // Counting only makes sense on a terminal, and verbose output
        // would scroll it away anyway.
        let show_count = args.show_count.unwrap_or_else(|| sink.is_interactive()) && !verbose;

        Self {
            name: args.name.clone(),
            display_name: sink.format_name(&args.name),
            really_quiet: options.really_quiet(),
            quiet: options.quiet(),
            verbose,
            directives: options.directives,
            failures: options.failures,
            comments: options.comments,
            timer: options.timer,
            hires_time: options.hires_time,
            color: options.color,
            show_count,
        }
    }
}

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Opened,
    Reporting,
    Closed,
}

/// Renders one test file's results to an output sink.
///
/// The session borrows the sink exclusively, so only one session can
/// write at a time.
pub struct Session<'a, S: OutputSink> {
    sink: &'a mut S,
    config: SessionConfig,
    phase: Phase,
    plan: Option<String>,
    tracker: ProgressTracker,
    newline_printed: bool,
    channel: Option<ProgressChannel>,
}

impl<'a, S: OutputSink> Session<'a, S> {
    pub fn new(sink: &'a mut S, args: SessionArgs) -> Self {
        let config = SessionConfig::resolve(&args, &*sink);
        debug!(
            name = %config.name,
            show_count = config.show_count,
            "session created"
        );
        Self {
            sink,
            config,
            phase: Phase::Created,
            plan: None,
            tracker: ProgressTracker::new(),
            newline_printed: false,
            channel: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The `/N ` suffix of the progress counter, once known
    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    /// Print the test name that starts this session's line
    pub fn header(&mut self) -> Result<()> {
        if !self.config.really_quiet {
            self.sink.write(&self.config.display_name)?;
        }
        self.phase = Phase::Opened;
        Ok(())
    }

    /// Report one result event
    pub fn result<P: RunStatus>(&mut self, parser: &P, event: &ResultEvent) -> Result<()> {
        if self.phase == Phase::Closed {
            warn!(name = %self.config.name, "result after close ignored");
            return Ok(());
        }
        self.phase = Phase::Reporting;

        if event.is_bailout() {
            self.sink.write_failure(&format!(
                "Bailout called. Further testing stopped: {}\n",
                event.explanation()
            ))?;
        }

        if self.config.really_quiet {
            return Ok(());
        }

        let plan = self
            .plan
            .get_or_insert_with(|| format!("/{} ", parser.tests_planned().unwrap_or(0)))
            .clone();
        let channel = match self.channel {
            Some(channel) => channel,
            None => {
                let channel = self.sink.progress_channel();
                debug!(name = %self.config.name, ?channel, "progress channel chosen");
                self.channel = Some(channel);
                channel
            }
        };

        if self.config.show_count && event.is_test() {
            let number = event.number.unwrap_or(0);
            if self.tracker.should_display(number) {
                let shown = event.number.map(|n| n.to_string()).unwrap_or_default();
                let text = format!("\r{}{}{}", self.config.display_name, shown, plan);
                self.write_progress(channel, &text)?;
            }
        }

        if self.should_echo(event) {
            if !self.newline_printed {
                self.sink.write("\n")?;
                self.newline_printed = true;
            }
            self.echo(event)?;
            self.sink.write("\n")?;
        }

        Ok(())
    }

    /// Finish the session's line: erase the counter, then print `ok`,
    /// the skip reason or the failure summary.
    pub fn close<P: RunStatus>(&mut self, parser: &P) -> Result<()> {
        if self.phase == Phase::Closed {
            return Ok(());
        }
        self.phase = Phase::Closed;

        if self.config.show_count && !self.config.really_quiet {
            let plan = self.plan.as_deref().unwrap_or("");
            let width = erase_width(&self.config.display_name, plan, parser.tests_run());
            let text = format!("\r{}\r{}", " ".repeat(width), self.config.display_name);
            let channel = match self.channel {
                Some(channel) => channel,
                None => self.sink.progress_channel(),
            };
            self.write_progress(channel, &text)?;
        }

        if let Some(reason) = parser.skip_all() {
            if !self.config.really_quiet {
                self.sink.write(&format!("skipped: {}\n", reason))?;
            }
        } else if !parser.has_problems() {
            if !self.config.really_quiet {
                let line = format!("ok{}\n", self.time_report(parser));
                self.sink.write(&line)?;
            }
        } else {
            Summary::from_status(parser).write_to(&mut *self.sink)?;
        }

        debug!(
            name = %self.config.name,
            tests_run = parser.tests_run(),
            failed = parser.failed(),
            "session closed"
        );
        Ok(())
    }

    fn should_echo(&self, event: &ResultEvent) -> bool {
        let config = &self.config;
        !config.quiet
            && ((config.verbose && !config.failures)
                || (event.is_test() && config.failures && !event.is_ok())
                || (event.has_directive() && config.directives)
                || (event.is_comment() && config.comments))
    }

    fn echo(&mut self, event: &ResultEvent) -> Result<()> {
        if !self.config.color {
            self.sink.write(event.as_str())?;
            return Ok(());
        }
        let colors = ResultStyle::classify(event).colors();
        if !colors.is_empty() {
            self.sink.set_colors(colors)?;
        }
        self.sink.write(event.as_str())?;
        self.sink.reset_colors()?;
        Ok(())
    }

    fn write_progress(&mut self, channel: ProgressChannel, text: &str) -> Result<()> {
        match channel {
            ProgressChannel::Terminal => self.sink.write(text)?,
            ProgressChannel::Redirected => {
                trace!(name = %self.config.name, "progress redraw dropped for redirected output");
            }
        }
        Ok(())
    }

    fn time_report<P: RunStatus>(&self, parser: &P) -> String {
        if !self.config.timer {
            return String::new();
        }
        match (parser.start_time(), parser.end_time()) {
            (Some(start), Some(end)) => time::format_elapsed(end - start, self.config.hires_time),
            _ => String::new(),
        }
    }
}

/// Number of spaces needed to blank out `.<name><plan><tests_run>`
pub fn erase_width(display_name: &str, plan: &str, tests_run: u64) -> usize {
    1 + display_name.chars().count() + plan.chars().count() + tests_run.to_string().len()
}
