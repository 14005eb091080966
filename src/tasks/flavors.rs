// src/tasks/flavors.rs

use std::collections::BTreeSet;

use tracing::info;

use crate::context::BuildContext;
use crate::errors::Result;
use crate::registry::TaskAction;

/// Prints the distinct configured flavor names, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetFlavors;

impl GetFlavors {
    pub fn flavors(ctx: &BuildContext) -> BTreeSet<&str> {
        ctx.config()
            .variants
            .iter()
            .map(|v| v.flavor.as_str())
            .collect()
    }
}

impl TaskAction for GetFlavors {
    fn execute(&self, ctx: &BuildContext) -> Result<()> {
        let flavors = Self::flavors(ctx);
        info!(count = flavors.len(), "configured flavors");
        for flavor in flavors {
            println!("{flavor}");
        }
        Ok(())
    }
}
