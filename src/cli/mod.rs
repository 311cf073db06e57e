//! Command Line Interface (CLI) layer for cardsmith.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `generate`, `extract` and
//! `slice` subcommands. It merges command-line options over the optional
//! config file and hands the result to `cardsmith::api`.
//!
//! If you are embedding cardsmith into another application, prefer using
//! the high-level `cardsmith::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
