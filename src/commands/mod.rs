// Commands module - handles CLI command execution

pub mod replay;
pub mod run;

pub use replay::Replay;
pub use run::{Outcome, replay_session, run_replays};
