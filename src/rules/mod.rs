// src/rules/mod.rs

//! Naming-rule engine that wires pre-release dependencies onto host tasks.
//!
//! - [`naming`] holds the immutable name predicates and their target sets.
//! - [`engine`] evaluates every rule against every task the registry
//!   announces, and installs itself as a registry listener.

pub mod engine;
pub mod naming;

pub use engine::RuleEngine;
pub use naming::{NamePattern, NamingRule};
