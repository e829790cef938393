pub mod commands;
pub mod report;
pub mod summarize;

pub use commands::{Cli, Commands};
