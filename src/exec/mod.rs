// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running external programs using
//! `tokio::process::Command` and mapping how they ended onto results.
//!
//! - [`command`] describes an invocation (`CommandSpec`).
//! - [`backend`] provides the `ProcessRunner` trait and the production
//!   `RealProcessRunner`, which tests can replace with a fake.
//! - [`supervisor`] runs one command and separates success, nonzero exit
//!   and spawn failure.

pub mod backend;
pub mod command;
pub mod supervisor;

pub use backend::{ExitReport, ProcessRunner, RealProcessRunner, RunFuture};
pub use command::{CommandSpec, StdioMode};
pub use supervisor::{supervise, ProcessError};
