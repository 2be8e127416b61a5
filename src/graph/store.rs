//! Insertion-ordered adjacency store shared by both schema graphs

use indexmap::{IndexMap, IndexSet};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

/// Directed graph keyed by name with deduplicated edges
///
/// Node and edge order follow insertion order, which for the schema
/// builders is declaration order. Traversals are therefore reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a node exists (with no outgoing edges if new)
    pub fn add_node(&mut self, node: &str) {
        if !self.edges.contains_key(node) {
            self.edges.insert(node.to_string(), IndexSet::new());
        }
    }

    /// Add an edge, creating the source node if needed.
    ///
    /// Returns `false` when the edge already existed.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        self.add_node(from);
        match self.edges.get_mut(from) {
            Some(targets) => targets.insert(to.to_string()),
            None => false,
        }
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.edges.contains_key(node)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.get(from).is_some_and(|targets| targets.contains(to))
    }

    /// Outgoing edges of a node; `None` for names that only appear as targets
    pub fn dependencies(&self, node: &str) -> Option<&IndexSet<String>> {
        self.edges.get(node)
    }

    /// Source nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every node reachable from `start`, `start` included, in depth-first
    /// preorder. The visited set bounds the walk, so cycles terminate.
    pub fn reachable_from<'a>(&'a self, start: &'a str) -> IndexSet<&'a str> {
        let mut visited: IndexSet<&str> = IndexSet::new();
        let mut stack: Vec<&str> = vec![start];

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if let Some(targets) = self.edges.get(node) {
                for target in targets.iter().rev() {
                    if !visited.contains(target.as_str()) {
                        stack.push(target.as_str());
                    }
                }
            }
        }

        visited
    }

    /// Strongly connected components that contain a cycle: more than one
    /// member, or a single member with a self-loop.
    ///
    /// Members are sorted within a component and components are sorted,
    /// so the result does not depend on traversal order.
    pub fn strongly_connected_components(&self) -> Vec<Vec<String>> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

        for (from, targets) in &self.edges {
            let src = intern(&mut graph, &mut indices, from.as_str());
            for to in targets {
                let dst = intern(&mut graph, &mut indices, to.as_str());
                graph.update_edge(src, dst, ());
            }
        }

        let mut components: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&node| graph.find_edge(node, node).is_some())
            })
            .map(|component| {
                let mut names: Vec<String> = component
                    .into_iter()
                    .map(|idx| graph[idx].to_string())
                    .collect();
                names.sort_unstable();
                names
            })
            .collect();

        components.sort_unstable();
        components
    }
}

fn intern<'a>(
    graph: &mut DiGraph<&'a str, ()>,
    indices: &mut HashMap<&'a str, NodeIndex>,
    name: &'a str,
) -> NodeIndex {
    *indices.entry(name).or_insert_with(|| graph.add_node(name))
}
