// src/tasks/mod.rs

//! Actions behind the tasks relkit registers.
//!
//! - [`verify`]: version-control, build-server and stage-URL checks.
//! - [`changelog`]: project and generic changelog generation.
//! - [`bump`]: major/minor/build increments of the version record.
//! - [`tagging`]: release tag creation.
//! - [`modules`]: "add X module" scaffolding generators.
//! - [`flavors`]: flavor listing.

pub mod bump;
pub mod changelog;
pub mod flavors;
pub mod modules;
pub mod tagging;
pub mod verify;

pub use bump::IncreaseVersion;
pub use changelog::{GenerateGenericChangeLog, GenerateProjectChangeLog};
pub use flavors::GetFlavors;
pub use modules::{AddModule, ModuleSpec, MODULES};
pub use tagging::TagProject;
pub use verify::{Verification, VerifyBuildServer, VerifyNoStageUrl, VerifyVersionControl};
