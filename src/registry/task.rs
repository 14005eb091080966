// src/registry/task.rs

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

use crate::context::BuildContext;
use crate::errors::Result;

pub type TaskName = String;

/// What a task does when the host decides to run it.
pub trait TaskAction: Send + Sync + Debug {
    fn execute(&self, ctx: &BuildContext) -> Result<()>;
}

/// A registered task. The name is fixed at registration; edges only grow.
#[derive(Debug, Clone)]
pub struct Task {
    name: TaskName,
    depends_on: BTreeSet<TaskName>,
    must_run_after: BTreeSet<TaskName>,
    action: Option<Arc<dyn TaskAction>>,
}

impl Task {
    pub(crate) fn new(name: TaskName, action: Option<Arc<dyn TaskAction>>) -> Self {
        Self {
            name,
            depends_on: BTreeSet::new(),
            must_run_after: BTreeSet::new(),
            action,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hard dependencies: these run, and succeed, before this task.
    pub fn depends_on(&self) -> &BTreeSet<TaskName> {
        &self.depends_on
    }

    /// Soft ordering: only relevant when both tasks are scheduled.
    pub fn must_run_after(&self) -> &BTreeSet<TaskName> {
        &self.must_run_after
    }

    pub fn action(&self) -> Option<&Arc<dyn TaskAction>> {
        self.action.as_ref()
    }

    pub(crate) fn depends_on_mut(&mut self) -> &mut BTreeSet<TaskName> {
        &mut self.depends_on
    }

    pub(crate) fn must_run_after_mut(&mut self) -> &mut BTreeSet<TaskName> {
        &mut self.must_run_after
    }
}
