use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Diagnostic log line format: `# LEVEL [HH:MM:SS] target: message`.
///
/// The leading `#` keeps log lines readable as TAP comments when they end
/// up interleaved with a report.
pub struct DiagnosticFormatter;

impl<S, N> FormatEvent<S, N> for DiagnosticFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let timestamp = Local::now().format("%H:%M:%S");

        let level = match *metadata.level() {
            tracing::Level::TRACE => "TRACE",
            tracing::Level::DEBUG => "DEBUG",
            tracing::Level::INFO => "INFO ",
            tracing::Level::WARN => "WARN ",
            tracing::Level::ERROR => "ERROR",
        };

        write!(
            writer,
            "# {} [{}] {}: ",
            level,
            timestamp,
            metadata.target()
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Default filter directive for the given debug flag
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "tapconsole=debug,warn"
    } else {
        "tapconsole=warn"
    }
}

/// Install the global subscriber. Logs go to stderr so reports on stdout
/// stay clean; `RUST_LOG` overrides the default filter.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let _ = tracing_subscriber::fmt()
        .event_format(DiagnosticFormatter)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
