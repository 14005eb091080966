// src/registry/graph.rs

use petgraph::algo::{has_path_connecting, toposort};
use petgraph::graphmap::DiGraphMap;

use crate::errors::{RelkitError, Result};
use crate::registry::task::Task;

/// Build the ordering graph of a set of tasks.
///
/// Edge direction: predecessor -> task. Both `depends_on` and
/// `must_run_after` contribute, since either kind of cycle makes the graph
/// unschedulable.
pub fn ordering_graph<'a>(tasks: impl Iterator<Item = &'a Task>) -> DiGraphMap<&'a str, ()> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for task in tasks {
        graph.add_node(task.name());
        for pred in task.depends_on().iter().chain(task.must_run_after()) {
            graph.add_edge(pred.as_str(), task.name(), ());
        }
    }

    graph
}

/// Fail if making `pred` a predecessor of `task` would close a cycle.
pub fn ensure_edge_keeps_acyclic(
    graph: &DiGraphMap<&str, ()>,
    task: &str,
    pred: &str,
) -> Result<()> {
    if task == pred {
        return Err(RelkitError::DagCycle(format!(
            "task '{task}' cannot be ordered after itself"
        )));
    }

    // pred -> task closes a cycle iff task already reaches pred.
    if graph.contains_node(task)
        && graph.contains_node(pred)
        && has_path_connecting(graph, task, pred, None)
    {
        return Err(RelkitError::DagCycle(format!(
            "ordering '{task}' after '{pred}' would create a cycle"
        )));
    }

    Ok(())
}

/// Fail if the graph contains any cycle.
pub fn ensure_acyclic(graph: &DiGraphMap<&str, ()>) -> Result<()> {
    match toposort(graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(RelkitError::DagCycle(format!(
            "cycle detected in task graph involving task '{}'",
            cycle.node_id()
        ))),
    }
}
