// src/registry/task_registry.rs

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::context::BuildContext;
use crate::errors::{RelkitError, Result};
use crate::registry::graph::{ensure_acyclic, ensure_edge_keeps_acyclic, ordering_graph};
use crate::registry::task::{Task, TaskAction, TaskName};

/// Callback invoked once for every registered task.
///
/// Listeners get mutable access to the registry so they can add edges, or
/// register further tasks, from inside the notification.
pub type TaskListener = Box<dyn FnMut(&mut TaskRegistry, &str) -> Result<()>>;

struct ListenerSlot {
    /// `None` only while the callback itself is running.
    callback: Option<TaskListener>,
    /// Index into `order` of the next task this listener has not seen.
    cursor: usize,
}

/// Append-only collection of named tasks with "task added" notifications.
///
/// Every listener observes every task exactly once, in registration order:
/// a new subscriber is first replayed over the tasks that already exist, and
/// registrations made from inside a listener are delivered once the current
/// notification returns.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: HashMap<TaskName, Task>,
    order: Vec<TaskName>,
    listeners: Vec<ListenerSlot>,
    dispatching: bool,
}

impl fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("tasks", &self.order)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new task and notify listeners before returning.
    ///
    /// A listener error aborts configuration and is returned from here.
    pub fn register(
        &mut self,
        name: &str,
        action: Option<Arc<dyn TaskAction>>,
    ) -> Result<TaskHandle<'_>> {
        if name.is_empty() {
            return Err(RelkitError::ConfigError(
                "task name must not be empty".to_string(),
            ));
        }
        if self.tasks.contains_key(name) {
            return Err(RelkitError::DuplicateTask(name.to_string()));
        }

        self.tasks
            .insert(name.to_string(), Task::new(name.to_string(), action));
        self.order.push(name.to_string());
        debug!(task = %name, "registered task");

        self.dispatch()?;

        Ok(TaskHandle {
            registry: self,
            name: name.to_string(),
        })
    }

    /// Install a listener. It is replayed over all existing tasks, then sees
    /// every future registration.
    pub fn subscribe(&mut self, listener: TaskListener) -> Result<()> {
        self.listeners.push(ListenerSlot {
            callback: Some(listener),
            cursor: 0,
        });
        debug!(
            listeners = self.listeners.len(),
            replay = self.order.len(),
            "installed task listener"
        );
        self.dispatch()
    }

    /// Deliver pending notifications until every listener has caught up.
    ///
    /// Nested calls (a listener registering a task) return immediately; the
    /// outermost call keeps looping until nothing is left to deliver.
    fn dispatch(&mut self) -> Result<()> {
        if self.dispatching {
            return Ok(());
        }

        self.dispatching = true;
        let result = self.dispatch_rounds();
        self.dispatching = false;
        result
    }

    fn dispatch_rounds(&mut self) -> Result<()> {
        loop {
            let mut delivered = false;

            // One task per listener per round keeps listeners in step.
            for idx in 0..self.listeners.len() {
                let cursor = self.listeners[idx].cursor;
                if cursor >= self.order.len() {
                    continue;
                }
                let Some(mut callback) = self.listeners[idx].callback.take() else {
                    continue;
                };

                let name = self.order[cursor].clone();
                self.listeners[idx].cursor += 1;

                let outcome = callback(self, &name);
                self.listeners[idx].callback = Some(callback);
                outcome?;

                delivered = true;
            }

            if !delivered {
                return Ok(());
            }
        }
    }

    /// Add hard dependencies from `task` to each of `targets`.
    ///
    /// All targets must already be registered; nothing is applied if any
    /// target is missing or an edge would create a cycle. Returns the number
    /// of edges that were not present before.
    pub fn depends_on<I, S>(&mut self, task: &str, targets: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets = self.checked_targets(task, targets)?;
        Ok(insert_all(self.task_mut(task)?.depends_on_mut(), targets))
    }

    /// Add soft ordering constraints: `task` runs after each of `targets`
    /// whenever both are scheduled.
    pub fn must_run_after<I, S>(&mut self, task: &str, targets: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets = self.checked_targets(task, targets)?;
        Ok(insert_all(self.task_mut(task)?.must_run_after_mut(), targets))
    }

    /// Resolve and validate edge targets before any edge is inserted.
    fn checked_targets<I, S>(&self, task: &str, targets: I) -> Result<Vec<TaskName>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.tasks.contains_key(task) {
            return Err(RelkitError::TaskNotFound(task.to_string()));
        }

        let targets: Vec<TaskName> = targets
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect();

        for target in &targets {
            if !self.tasks.contains_key(target) {
                return Err(RelkitError::TaskNotFound(format!(
                    "'{target}' (referenced by '{task}')"
                )));
            }
        }

        let graph = ordering_graph(self.tasks.values());
        for target in &targets {
            ensure_edge_keeps_acyclic(&graph, task, target)?;
        }

        Ok(targets)
    }

    fn task_mut(&mut self, name: &str) -> Result<&mut Task> {
        self.tasks
            .get_mut(name)
            .ok_or_else(|| RelkitError::TaskNotFound(name.to_string()))
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Task names in registration order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Tasks in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|name| self.tasks.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Check the combined depends-on / must-run-after graph for cycles.
    pub fn validate_acyclic(&self) -> Result<()> {
        ensure_acyclic(&ordering_graph(self.tasks.values()))
    }

    /// Run the action of exactly this task. Its dependencies are not run:
    /// ordering and execution of the graph belong to the host.
    pub fn execute(&self, name: &str, ctx: &BuildContext) -> Result<()> {
        let task = self
            .tasks
            .get(name)
            .ok_or_else(|| RelkitError::TaskNotFound(name.to_string()))?;

        let Some(action) = task.action() else {
            info!(task = %name, "task has no action; nothing to do");
            return Ok(());
        };

        info!(task = %name, "executing task");
        match action.execute(ctx) {
            Ok(()) => {
                info!(task = %name, "task finished");
                Ok(())
            }
            Err(err) => {
                error!(task = %name, error = %err, kind = ?err.kind(), "task failed");
                Err(err)
            }
        }
    }
}

/// Returned by [`TaskRegistry::register`] for chaining edge declarations.
#[derive(Debug)]
pub struct TaskHandle<'a> {
    registry: &'a mut TaskRegistry,
    name: TaskName,
}

impl<'a> TaskHandle<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depends_on<I, S>(self, targets: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.depends_on(&self.name, targets)?;
        Ok(self)
    }

    pub fn must_run_after<I, S>(self, targets: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.must_run_after(&self.name, targets)?;
        Ok(self)
    }
}

/// Insert every item, returning how many were new.
fn insert_all(set: &mut BTreeSet<TaskName>, items: Vec<TaskName>) -> usize {
    items.into_iter().filter(|item| set.insert(item.clone())).count()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recording_listener(seen: Rc<RefCell<Vec<String>>>) -> TaskListener {
        Box::new(move |_reg: &mut TaskRegistry, name: &str| {
            seen.borrow_mut().push(name.to_string());
            Ok(())
        })
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut reg = TaskRegistry::new();
        reg.register("a", None).unwrap();
        let err = reg.register("a", None).unwrap_err();
        assert!(matches!(err, RelkitError::DuplicateTask(name) if name == "a"));
    }

    #[test]
    fn subscriber_is_replayed_then_sees_new_tasks_once() {
        let mut reg = TaskRegistry::new();
        reg.register("a", None).unwrap();
        reg.register("b", None).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        reg.subscribe(recording_listener(Rc::clone(&seen))).unwrap();
        reg.register("c", None).unwrap();

        assert_eq!(*seen.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn registration_from_inside_listener_is_delivered_once_in_order() {
        let mut reg = TaskRegistry::new();
        reg.subscribe(Box::new(|reg: &mut TaskRegistry, name: &str| {
            if name == "a" {
                reg.register("a2", None)?;
            }
            Ok(())
        }))
        .unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        reg.subscribe(recording_listener(Rc::clone(&seen))).unwrap();

        reg.register("a", None).unwrap();
        reg.register("b", None).unwrap();

        assert_eq!(*seen.borrow(), vec!["a", "a2", "b"]);
        assert_eq!(reg.task_names().collect::<Vec<_>>(), vec!["a", "a2", "b"]);
    }

    #[test]
    fn listener_error_is_returned_from_register() {
        let mut reg = TaskRegistry::new();
        reg.subscribe(Box::new(|_reg: &mut TaskRegistry, name: &str| {
            if name == "bad" {
                Err(RelkitError::ConfigError("no".into()))
            } else {
                Ok(())
            }
        }))
        .unwrap();

        assert!(reg.register("fine", None).is_ok());
        assert!(matches!(
            reg.register("bad", None),
            Err(RelkitError::ConfigError(_))
        ));
    }

    #[test]
    fn edges_have_set_semantics() {
        let mut reg = TaskRegistry::new();
        reg.register("a", None).unwrap();
        reg.register("b", None).unwrap();

        assert_eq!(reg.depends_on("b", ["a"]).unwrap(), 1);
        assert_eq!(reg.depends_on("b", ["a", "a"]).unwrap(), 0);
        assert_eq!(reg.task("b").unwrap().depends_on().len(), 1);
    }

    #[test]
    fn edge_to_unknown_task_applies_nothing() {
        let mut reg = TaskRegistry::new();
        reg.register("a", None).unwrap();
        reg.register("b", None).unwrap();

        let err = reg.depends_on("b", ["a", "missing"]).unwrap_err();
        assert!(matches!(err, RelkitError::TaskNotFound(msg) if msg.contains("missing")));
        assert!(reg.task("b").unwrap().depends_on().is_empty());
    }

    #[test]
    fn cyclic_edges_are_rejected_across_edge_kinds() {
        let mut reg = TaskRegistry::new();
        reg.register("a", None).unwrap();
        reg.register("b", None).unwrap();
        reg.register("c", None).unwrap();

        reg.depends_on("b", ["a"]).unwrap();
        reg.must_run_after("c", ["b"]).unwrap();

        assert!(matches!(
            reg.depends_on("a", ["c"]),
            Err(RelkitError::DagCycle(_))
        ));
        assert!(matches!(
            reg.must_run_after("a", ["a"]),
            Err(RelkitError::DagCycle(_))
        ));
        reg.validate_acyclic().unwrap();
    }

    #[test]
    fn handle_chains_edges() {
        let mut reg = TaskRegistry::new();
        reg.register("verify", None).unwrap();
        reg.register("tag", None)
            .unwrap()
            .must_run_after(["verify"])
            .unwrap();

        assert!(reg.task("tag").unwrap().must_run_after().contains("verify"));
    }
}
