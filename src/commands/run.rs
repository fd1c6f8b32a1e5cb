// Run command - replay event files through console sessions

use anyhow::Result;
use tracing::{debug, info, warn};

use super::replay::Replay;
use crate::cli::Cli;
use crate::config::Config;
use crate::report::{ConsoleFormatter, OutputSink, Session};
use crate::state::{RunStatistics, RunStatus};
use crate::time;

/// How one replayed file ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub problems: bool,
    pub bailed_out: bool,
}

/// Drive one session over a replay. Stops feeding results after a
/// bailout; the session itself only reports it.
pub fn replay_session<S: OutputSink>(
    sink: &mut S,
    replay: &Replay,
    show_count: Option<bool>,
) -> crate::error::Result<Outcome> {
    let mut args = replay.args.clone();
    if show_count.is_some() {
        args.show_count = show_count;
    }

    let mut stats = RunStatistics::new();
    stats.start_time = Some(time::now_epoch_secs());

    let mut session = Session::new(sink, args);
    session.header()?;

    for event in &replay.events {
        stats.record(event);
        session.result(&stats, event)?;
        if event.is_bailout() {
            info!(path = %replay.path.display(), "bailout, skipping remaining events");
            break;
        }
    }

    stats.end_time = Some(time::now_epoch_secs());
    if let Some(finished) = &replay.finished {
        stats.finish(finished);
    }

    session.close(&stats)?;

    Ok(Outcome {
        problems: stats.has_problems(),
        bailed_out: stats.bailed_out,
    })
}

/// Replay every file named on the command line. Returns whether all
/// files passed.
pub fn run_replays(cli: &Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path).unwrap_or_else(|| {
            warn!("Could not load config from {}, using defaults", path.display());
            Config::default()
        }),
        None => Config::load().unwrap_or_default(),
    };

    let color_capable = console::colors_enabled();
    let options = cli.formatter_options(&config.formatter, color_capable);
    debug!(?options, "formatter options");

    let replays = cli
        .files
        .iter()
        .map(|path| Replay::load(path))
        .collect::<Result<Vec<_>>>()?;

    info!("Replaying {} file(s)", replays.len());

    let mut formatter = ConsoleFormatter::new(options);
    formatter.prepare(replays.iter().map(|r| r.args.name.as_str()));

    let mut all_passed = true;
    for replay in &replays {
        let outcome = replay_session(&mut formatter, replay, cli.show_count())?;
        all_passed &= !outcome.problems;
        if outcome.bailed_out {
            warn!("Bailout in {}, stopping", replay.path.display());
            break;
        }
    }

    Ok(all_passed)
}
