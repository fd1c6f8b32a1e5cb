// Command-line front-end

pub mod args;

pub use args::Cli;
