//! Dependency Graph Resolver
//!
//! Matches every constructor parameter against the catalog (by type) or the
//! closed list of external providers, then computes an instantiation order.
//!
//! ```text
//! Catalog ──► edges (component → dependency)
//!                │
//!                ├─► DFS with visiting stack ──► CyclicDependency
//!                │
//!                └─► Kahn, min-heap on discovery index ──► ordered descriptors
//! ```
//!
//! Every dependency precedes its dependents; components with no dependency
//! relationship keep their discovery order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, info};
use trellis_domain::{Error, Result};

use super::catalog::Catalog;
use super::descriptor::ComponentDescriptor;
use super::graph::ExternalProviders;

/// Order the catalog for instantiation
pub fn resolve(catalog: Catalog, externals: &ExternalProviders) -> Result<Vec<ComponentDescriptor>> {
    let edges = dependency_edges(&catalog, externals)?;

    if let Some(cycle) = find_cycle(&edges) {
        let names = cycle
            .into_iter()
            .map(|index| catalog.descriptors()[index].name().to_string())
            .collect();
        return Err(Error::cyclic(names));
    }

    let order = stable_topological_order(&edges);
    let mut slots: Vec<Option<ComponentDescriptor>> =
        catalog.into_descriptors().into_iter().map(Some).collect();
    let ordered: Vec<ComponentDescriptor> = order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect();

    info!(
        components = ordered.len(),
        order = ?ordered.iter().map(ComponentDescriptor::short_name).collect::<Vec<_>>(),
        "Dependency graph resolved"
    );
    Ok(ordered)
}

/// Internal edges per component (indices into the catalog)
///
/// Parameters satisfied by external providers produce no edge.
fn dependency_edges(catalog: &Catalog, externals: &ExternalProviders) -> Result<Vec<Vec<usize>>> {
    let index = catalog.type_index();
    let mut edges = Vec::with_capacity(catalog.len());
    for descriptor in catalog.descriptors() {
        let mut targets = Vec::new();
        for dependency in descriptor.dependencies() {
            if let Some(&target) = index.get(&dependency.type_id) {
                targets.push(target);
            } else if externals.contains(dependency.type_id) {
                debug!(
                    component = descriptor.name(),
                    parameter = dependency.parameter,
                    provider = dependency.type_name,
                    "Parameter supplied by external provider"
                );
            } else {
                return Err(Error::unresolved(
                    descriptor.name(),
                    dependency.parameter,
                    dependency.type_name,
                ));
            }
        }
        edges.push(targets);
    }
    Ok(edges)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Depth-first search for a back edge
///
/// Returns the cycle members in traversal order with the first member
/// repeated at the end.
fn find_cycle(edges: &[Vec<usize>]) -> Option<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; edges.len()];
    let mut stack: Vec<usize> = Vec::new();

    for root in 0..edges.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        // (node, next edge to inspect)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::Visiting;
        stack.push(root);

        while let Some(frame) = frames.last_mut() {
            let (node, next) = *frame;
            if let Some(&target) = edges[node].get(next) {
                frame.1 += 1;
                match marks[target] {
                    Mark::Unvisited => {
                        marks[target] = Mark::Visiting;
                        stack.push(target);
                        frames.push((target, 0));
                    }
                    Mark::Visiting => {
                        let start = stack.iter().position(|&n| n == target).unwrap_or(0);
                        let mut cycle = stack[start..].to_vec();
                        cycle.push(target);
                        return Some(cycle);
                    }
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                stack.pop();
                frames.pop();
            }
        }
    }
    None
}

/// Kahn's algorithm preferring the lowest discovery index among ready nodes
fn stable_topological_order(edges: &[Vec<usize>]) -> Vec<usize> {
    let mut pending: Vec<usize> = edges.iter().map(Vec::len).collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); edges.len()];
    for (node, targets) in edges.iter().enumerate() {
        for &target in targets {
            dependents[target].push(node);
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = pending
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(node, _)| Reverse(node))
        .collect();

    let mut order = Vec::with_capacity(edges.len());
    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);
        for &dependent in &dependents[node] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }
    order
}
