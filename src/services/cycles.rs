//! Detection of cyclic sharp dependencies.
//!
//! Two components depending on each other through `sharpDependencies` make a
//! component graph the DI framework will reject at its own build step. The
//! generator still emits both components; cycles are only surfaced as
//! warnings.

use std::collections::HashMap;

use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::models::{ComponentModel, TypeRef};

/// Returns every group of components that depend on each other, directly or
/// transitively. Each group lists its members in discovery order; groups are
/// ordered by their first member.
pub fn find_cycles(models: &[ComponentModel]) -> Vec<Vec<TypeRef>> {
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(models.len(), 0);
    let mut index: HashMap<String, NodeIndex> = HashMap::with_capacity(models.len());
    for (i, model) in models.iter().enumerate() {
        let node = graph.add_node(i);
        index.insert(model.target.qualified_name(), node);
    }

    for (i, model) in models.iter().enumerate() {
        let from = NodeIndex::new(i);
        for dependency in &model.sharp_dependencies {
            let Ok(dependency) = TypeRef::parse(dependency) else {
                continue;
            };
            if let Some(&to) = index.get(&dependency.qualified_name()) {
                graph.update_edge(from, to, ());
            }
        }
    }

    let mut cycles: Vec<Vec<usize>> = algo::tarjan_scc(&graph)
        .into_iter()
        .filter(|c| c.len() > 1 || graph.contains_edge(c[0], c[0]))
        .map(|c| {
            let mut members: Vec<usize> = c.into_iter().map(|node| graph[node]).collect();
            members.sort_unstable();
            members
        })
        .collect();
    cycles.sort();

    cycles
        .into_iter()
        .map(|c| c.into_iter().map(|i| models[i].target.clone()).collect())
        .collect()
}
