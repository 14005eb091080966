// src/lib.rs

pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod output;
pub mod plugin;
pub mod project;
pub mod properties;
pub mod registry;
pub mod rules;
pub mod tasks;
pub mod version;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::load_and_validate;
use crate::context::BuildContext;
use crate::exec::SystemCommandRunner;
use crate::fs::RealFileSystem;
use crate::plugin::ReleasePlugin;
use crate::project::Project;
use crate::properties::PropertySource;
use crate::version::BuildExtensions;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and build properties
/// - the project, with relkit's tasks and naming rules applied
/// - the host's own tasks, which trigger the rules
/// - the requested subcommand
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;
    let properties = PropertySource::from_config_and_flags(&cfg.properties, &args.properties)?;

    let ctx = BuildContext::new(
        config_root_dir(&config_path),
        cfg,
        properties,
        Arc::new(RealFileSystem),
        Arc::new(SystemCommandRunner),
    );
    let project = configure(ctx)?;

    match args.command {
        Command::Tasks => print_tasks(&project),
        Command::Run { tasks } => {
            for task in tasks {
                project.run_task(&task)?;
            }
        }
        Command::Outputs => print_outputs(&project),
        Command::Version => print_version(&project.extensions())?,
    }

    Ok(())
}

/// Build a fully configured project: relkit applied, host tasks added, and
/// the resulting graph checked for cycles.
pub fn configure(ctx: BuildContext) -> errors::Result<Project> {
    let mut project = Project::new(ctx)?;
    ReleasePlugin.apply(&mut project)?;
    project.add_host_tasks()?;
    project.tasks().validate_acyclic()?;
    Ok(project)
}

/// Figure out the project root.
///
/// - If the config path has a non-empty parent (e.g. "app/Relkit.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Relkit.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Print every task with its edges, in registration order.
fn print_tasks(project: &Project) {
    println!("tasks ({}):", project.tasks().len());
    for task in project.tasks().tasks() {
        println!("  - {}", task.name());
        if !task.depends_on().is_empty() {
            println!("      depends_on: {:?}", task.depends_on());
        }
        if !task.must_run_after().is_empty() {
            println!("      must_run_after: {:?}", task.must_run_after());
        }
    }

    debug!("task listing complete");
}

fn print_outputs(project: &Project) {
    for variant in project.variants() {
        for output in &variant.outputs {
            println!(
                "{}/{}: {}",
                variant.flavor_name, variant.build_type, output.output_file_name
            );
        }
    }
}

fn print_version(ext: &BuildExtensions<'_>) -> errors::Result<()> {
    for name in BuildExtensions::NAMES {
        println!("{name} = {}", ext.get(name)?);
    }
    Ok(())
}
