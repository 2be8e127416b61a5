//! Type-reference cycle analysis
//!
//! Finds cycles in the [`TypeGraph`] with a depth-first search that keeps
//! a recursion stack and a single path buffer. Whenever an edge reaches a
//! type that is still on the stack, the path slice from that type's first
//! occurrence to the current type, closed with the repeated type, is one
//! cycle.
//!
//! # Canonical form
//!
//! A cycle is rotated to begin at its lexicographically smallest member,
//! with the closing repeat moved to the end. `A→B→C→A` and `B→C→A→B` both
//! become `A,B,C,A` and are counted once.
//!
//! The search only reports cycles closed by back edges of the DFS tree, so
//! the exact set depends on declaration order. Declaration order is
//! preserved by the graph, which makes the result reproducible.

use crate::graph::{build_type_graph, TypeGraph};
use crate::parsers::SchemaDocument;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// One simple cycle, closing element included (`[A, B, A]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub path: Vec<String>,
    /// Number of distinct types (path length minus the closing repeat)
    pub length: usize,
    /// Distinct member types in path order
    pub types: Vec<String>,
}

impl Cycle {
    /// Build from a closed path, canonicalizing it
    pub fn from_path(path: &[String]) -> Self {
        let path = canonicalize(path);
        let length = path.len().saturating_sub(1);
        let types = path.iter().take(length).cloned().collect();
        Self {
            path,
            length,
            types,
        }
    }

    /// Identity used for deduplication
    pub fn key(&self) -> String {
        self.path.join(",")
    }

    /// Display form, e.g. `A → B → A`
    pub fn display(&self) -> String {
        self.path.join(" → ")
    }
}

/// Rotate a closed cycle to start at its smallest member
///
/// The input's last element must repeat its first. Ties keep the first
/// occurrence.
pub fn canonicalize(cycle: &[String]) -> Vec<String> {
    if cycle.len() < 2 {
        return cycle.to_vec();
    }

    let body = &cycle[..cycle.len() - 1];
    let min_idx = body
        .iter()
        .enumerate()
        .min_by_key(|(_, name)| name.as_str())
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut normalized = Vec::with_capacity(cycle.len());
    normalized.extend_from_slice(&body[min_idx..]);
    normalized.extend_from_slice(&body[..min_idx]);
    normalized.push(body[min_idx].clone());
    normalized
}

/// Find all unique cycles in discovery order
pub fn find_cycles(graph: &TypeGraph) -> Vec<Cycle> {
    let mut search = CycleSearch::new(graph);
    for node in graph.nodes() {
        if !search.visited.contains(node) {
            search.visit(node);
        }
    }
    search.found.into_values().collect()
}

struct CycleSearch<'g> {
    graph: &'g TypeGraph,
    visited: HashSet<&'g str>,
    on_stack: HashSet<&'g str>,
    path: Vec<&'g str>,
    found: IndexMap<String, Cycle>,
}

impl<'g> CycleSearch<'g> {
    fn new(graph: &'g TypeGraph) -> Self {
        Self {
            graph,
            visited: HashSet::new(),
            on_stack: HashSet::new(),
            path: Vec::new(),
            found: IndexMap::new(),
        }
    }

    fn visit(&mut self, node: &'g str) {
        self.visited.insert(node);
        self.on_stack.insert(node);
        self.path.push(node);

        let graph = self.graph;
        if let Some(dependencies) = graph.dependencies(node) {
            for dependency in dependencies {
                let dependency = dependency.as_str();
                if !self.visited.contains(dependency) {
                    self.visit(dependency);
                } else if self.on_stack.contains(dependency) {
                    self.record(dependency);
                }
            }
        }

        self.on_stack.remove(node);
        self.path.pop();
    }

    fn record(&mut self, back_to: &str) {
        let Some(start) = self.path.iter().position(|&n| n == back_to) else {
            return;
        };
        let mut closed: Vec<String> = self.path[start..].iter().map(|n| n.to_string()).collect();
        closed.push(back_to.to_string());

        let cycle = Cycle::from_path(&closed);
        self.found.entry(cycle.key()).or_insert(cycle);
    }
}

/// Aggregate statistics over a set of cycles
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSummary {
    pub total_cycles: usize,
    pub cycles_by_length: BTreeMap<usize, usize>,
    /// How many (cycle, position) pairs include each type, closing
    /// position included
    pub type_involvement_count: BTreeMap<String, usize>,
    pub longest_cycle: Option<Cycle>,
    pub shortest_cycle: Option<Cycle>,
}

impl CycleSummary {
    pub fn from_cycles(cycles: &[Cycle]) -> Self {
        let mut summary = Self {
            total_cycles: cycles.len(),
            ..Default::default()
        };

        for cycle in cycles {
            *summary.cycles_by_length.entry(cycle.length).or_insert(0) += 1;

            for name in &cycle.path {
                *summary
                    .type_involvement_count
                    .entry(name.clone())
                    .or_insert(0) += 1;
            }

            if summary
                .longest_cycle
                .as_ref()
                .is_none_or(|longest| cycle.length > longest.length)
            {
                summary.longest_cycle = Some(cycle.clone());
            }
            if summary
                .shortest_cycle
                .as_ref()
                .is_none_or(|shortest| cycle.length < shortest.length)
            {
                summary.shortest_cycle = Some(cycle.clone());
            }
        }

        summary
    }
}

/// Full cycle analysis of one schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    pub total_cycles: usize,
    pub cycles: Vec<Cycle>,
    pub summary: CycleSummary,
    /// Groups of mutually reachable types (sorted), independent of which
    /// individual cycles the DFS happened to close
    pub strongly_connected: Vec<Vec<String>>,
}

/// Run cycle analysis over a prebuilt type graph
pub fn analyze_cycles(graph: &TypeGraph) -> CycleReport {
    let cycles = find_cycles(graph);
    let summary = CycleSummary::from_cycles(&cycles);
    let strongly_connected = graph.strongly_connected_components();

    debug!(
        "Found {} cycles across {} strongly connected groups",
        cycles.len(),
        strongly_connected.len()
    );

    CycleReport {
        total_cycles: cycles.len(),
        cycles,
        summary,
        strongly_connected,
    }
}

/// Build a fresh type graph for `document` and analyze it
pub fn analyze_schema(document: &SchemaDocument) -> CycleReport {
    let graph = build_type_graph(document);
    let report = analyze_cycles(&graph);
    info!("Cycle analysis found {} cycles", report.total_cycles);
    report
}
