//! cmdkit: flag, environment and config-file binding for command-line programs
//!
//! [`config`] resolves declared settings with precedence flag > environment >
//! config source > default and writes them into caller-owned variables.
//! [`utils`] carries the small helpers (URLs, paths, strings, time, HTTP
//! headers, JSON) the binary exposes as subcommands.

pub mod config;
pub mod utils;
