//! Local subgraph of one label
//!
//! Vertices are the label itself, its member nodes, and every edge target they
//! reference (which may be other labels). Validation happens here so the walk
//! itself cannot fail.

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use std::collections::{HashSet, VecDeque};

use crate::error::{Error, Result};
use crate::graph::{DialogueGraph, Label, Node};

/// Validated local subgraph with its unique root
#[derive(Debug, Clone)]
pub(crate) struct LocalGraph<'g> {
    pub(crate) label: &'g Label,
    graph: DiGraphMap<&'g str, ()>,
    pub(crate) root: &'g str,
    /// Nodes reachable from the root without expanding jumps
    pub(crate) reachable_nodes: usize,
}

impl<'g> LocalGraph<'g> {
    pub(crate) fn build(dialogue: &'g DialogueGraph, label_id: &str) -> Result<Self> {
        let label = dialogue
            .label(label_id)
            .ok_or_else(|| Error::UnknownLabel(label_id.to_string()))?;

        let mut graph: DiGraphMap<&'g str, ()> = DiGraphMap::new();

        for target in &label.edges {
            check_target(dialogue, label, &label.id, target)?;
            graph.add_edge(label.id.as_str(), target.as_str(), ());
        }

        for node in dialogue.members(&label.id) {
            graph.add_node(node.id());
            for target in node.edges() {
                check_target(dialogue, label, node.id(), target)?;
                graph.add_edge(node.id(), target.as_str(), ());
            }
        }

        if let Err(cycle) = toposort(&graph, None) {
            return Err(Error::CyclicSubgraph {
                label: label.id.clone(),
                node: cycle.node_id().to_string(),
            });
        }

        let candidates: Vec<&str> = graph
            .nodes()
            .filter(|vertex| graph.neighbors_directed(*vertex, Direction::Incoming).next().is_none())
            .collect();

        let root = match candidates.as_slice() {
            [root] => *root,
            _ => {
                let mut candidates: Vec<String> = candidates.iter().map(ToString::to_string).collect();
                candidates.sort();
                return Err(Error::AmbiguousRoot {
                    label: label.id.clone(),
                    candidates,
                });
            }
        };

        let mut local = Self {
            label,
            graph,
            root,
            reachable_nodes: 0,
        };
        local.reachable_nodes = local.count_reachable_nodes(dialogue);

        tracing::debug!(
            "Label {} ({}): root {}, {} reachable nodes",
            label.id,
            label.name,
            root,
            local.reachable_nodes
        );
        Ok(local)
    }

    /// Outgoing neighbors of a vertex
    pub(crate) fn successors(&self, id: &'g str) -> impl Iterator<Item = &'g str> + '_ {
        self.graph.neighbors_directed(id, Direction::Outgoing)
    }

    /// Incoming neighbors of a vertex
    pub(crate) fn predecessors(&self, id: &'g str) -> impl Iterator<Item = &'g str> + '_ {
        self.graph.neighbors_directed(id, Direction::Incoming)
    }

    fn count_reachable_nodes(&self, dialogue: &'g DialogueGraph) -> usize {
        let mut seen: HashSet<&str> = HashSet::from([self.root]);
        let mut queue = VecDeque::from([self.root]);
        let mut count = 0;

        while let Some(current) = queue.pop_front() {
            let node = dialogue.node(current);
            if node.is_some() {
                count += 1;
            }
            if node.is_some_and(Node::is_jump) {
                continue;
            }
            for next in self.successors(current) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        count
    }
}

fn check_target(dialogue: &DialogueGraph, label: &Label, from: &str, target: &str) -> Result<()> {
    if dialogue.contains(target) {
        Ok(())
    } else {
        Err(Error::DanglingReference {
            label: label.id.clone(),
            from: from.to_string(),
            target: target.to_string(),
        })
    }
}
