//! Subcommand implementations

mod parse;
mod replay;

pub use parse::run_parse;
pub use replay::run_replay;
