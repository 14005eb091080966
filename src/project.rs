// src/project.rs

use tracing::debug;

use crate::context::BuildContext;
use crate::errors::Result;
use crate::output::BuildVariant;
use crate::registry::TaskRegistry;
use crate::version::BuildExtensions;

/// A configured build: context, task registry and variants.
#[derive(Debug)]
pub struct Project {
    ctx: BuildContext,
    tasks: TaskRegistry,
    variants: Vec<BuildVariant>,
}

impl Project {
    /// Create a project with an empty registry and the configured variants.
    ///
    /// Variants without an explicit version name read the version file, so a
    /// missing or malformed record fails here.
    pub fn new(ctx: BuildContext) -> Result<Self> {
        let ext = BuildExtensions::new(&ctx);
        let variants = ctx
            .config()
            .variants
            .iter()
            .map(|cfg| BuildVariant::from_config(cfg, &ext))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            tasks: TaskRegistry::new(),
            variants,
            ctx,
        })
    }

    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    pub fn extensions(&self) -> BuildExtensions<'_> {
        BuildExtensions::new(&self.ctx)
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskRegistry {
        &mut self.tasks
    }

    pub fn variants(&self) -> &[BuildVariant] {
        &self.variants
    }

    pub fn variants_mut(&mut self) -> &mut [BuildVariant] {
        &mut self.variants
    }

    /// Register the tasks the host build adds after plugins are applied.
    pub fn add_host_tasks(&mut self) -> Result<()> {
        let names = self.ctx.config().host.tasks.clone();
        for name in names {
            debug!(task = %name, "host adds task");
            self.tasks.register(&name, None)?;
        }
        Ok(())
    }

    /// Run the action of a single task.
    pub fn run_task(&self, name: &str) -> Result<()> {
        self.tasks.execute(name, &self.ctx)
    }
}
