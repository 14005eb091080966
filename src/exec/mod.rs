// src/exec/mod.rs

//! External command layer.
//!
//! Everything relkit needs from version control goes through a
//! [`CommandRunner`], so tests can swap in a scripted fake while production
//! uses [`SystemCommandRunner`].
//!
//! - [`command`] holds the runner trait and the `std::process` implementation.
//! - [`git`] builds the concrete git invocations on top of a runner.

pub mod command;
pub mod git;

pub use command::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};
pub use git::Git;
