// src/registry/mod.rs

//! Append-only registry of named build tasks.
//!
//! - [`task`] defines a task (name, edges, optional action).
//! - [`task_registry`] owns all tasks, the "task added" subscriptions and
//!   edge insertion.
//! - [`graph`] holds the petgraph helpers used to keep edges acyclic.

pub mod graph;
pub mod task;
pub mod task_registry;

pub use task::{Task, TaskAction, TaskName};
pub use task_registry::{TaskHandle, TaskListener, TaskRegistry};
