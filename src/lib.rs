pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod state;
pub mod time;

pub use error::{Result, SessionError};
pub use report::{OutputSink, Session, SessionArgs};
pub use state::{ResultEvent, RunStatistics, RunStatus};
