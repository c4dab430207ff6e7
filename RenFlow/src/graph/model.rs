//! The dialogue graph and its read-only indices

use indexmap::IndexMap;
use std::collections::HashMap;

use super::speakers::{SpeakerIndex, is_null_speaker};
use super::types::{Character, Label, Node, Records, Variable};
use crate::error::{Error, Result};

/// Node id → ordinal, 0 for anything that is not a menu item
#[derive(Debug, Clone, Default)]
pub struct OrdinalIndex {
    ordinals: HashMap<String, i64>,
}

impl OrdinalIndex {
    /// Build the index from every menu item
    pub fn from_nodes<'a, I: IntoIterator<Item = &'a Node>>(nodes: I) -> Self {
        let ordinals = nodes
            .into_iter()
            .filter(|node| matches!(node, Node::MenuItem(_)))
            .map(|node| (node.id().to_string(), node.ordinal()))
            .collect();
        Self { ordinals }
    }

    /// Ordinal of an id; unknown ids and labels sort as 0
    pub fn get(&self, id: &str) -> i64 {
        self.ordinals.get(id).copied().unwrap_or(0)
    }
}

/// The whole dialogue graph, built once per export and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct DialogueGraph {
    /// Labels indexed by id, in export order
    pub labels: IndexMap<String, Label>,
    /// Nodes indexed by id, in export order
    pub nodes: IndexMap<String, Node>,
    pub characters: Vec<Character>,
    pub variables: Vec<Variable>,
    speakers: SpeakerIndex,
    ordinals: OrdinalIndex,
    /// Node id → id of the label it structurally belongs to
    enclosing: HashMap<String, String>,
    /// Label id → member node ids, in export order
    members: HashMap<String, Vec<String>>,
}

impl DialogueGraph {
    /// Build the graph and its indices from typed records
    pub fn new(records: Records) -> Result<Self> {
        let Records {
            characters,
            variables,
            labels: label_records,
            nodes: node_records,
        } = records;

        let mut labels = IndexMap::with_capacity(label_records.len());
        for label in label_records {
            if labels.contains_key(&label.id) {
                return Err(Error::DuplicateId { id: label.id });
            }
            labels.insert(label.id.clone(), label);
        }

        let mut nodes = IndexMap::with_capacity(node_records.len());
        for node in node_records {
            if nodes.contains_key(node.id()) || labels.contains_key(node.id()) {
                return Err(Error::DuplicateId {
                    id: node.id().to_string(),
                });
            }
            nodes.insert(node.id().to_string(), node);
        }

        let speakers = SpeakerIndex::from_characters(&characters);
        let ordinals = OrdinalIndex::from_nodes(nodes.values());

        let mut graph = Self {
            labels,
            nodes,
            characters,
            variables,
            speakers,
            ordinals,
            enclosing: HashMap::new(),
            members: HashMap::new(),
        };
        graph.index_membership();
        graph.check_speakers();

        tracing::debug!(
            "Dialogue graph built: {} labels, {} nodes, {} speakers",
            graph.labels.len(),
            graph.nodes.len(),
            graph.speakers.len()
        );
        Ok(graph)
    }

    /// Follow parent links from every node up to a label
    fn index_membership(&mut self) {
        let limit = self.nodes.len() + 1;

        for node in self.nodes.values() {
            let mut current = node.parent();
            let mut steps = 0;
            let owner = loop {
                if self.labels.contains_key(current) {
                    break Some(current);
                }
                match self.nodes.get(current) {
                    Some(parent) if steps < limit => {
                        current = parent.parent();
                        steps += 1;
                    }
                    _ => break None,
                }
            };

            match owner {
                Some(label_id) => {
                    self.enclosing.insert(node.id().to_string(), label_id.to_string());
                    self.members
                        .entry(label_id.to_string())
                        .or_default()
                        .push(node.id().to_string());
                }
                None => {
                    tracing::warn!("Node {} does not belong to any label (parent {})", node.id(), node.parent());
                }
            }
        }
    }

    /// Log every speaker id that has no character behind it
    fn check_speakers(&self) {
        for node in self.nodes.values() {
            if let Some(speaker_id) = node.speaker_id()
                && !is_null_speaker(speaker_id)
                && self.speakers.get(speaker_id).is_none()
            {
                tracing::warn!("Node {}: unknown speaker {}, writing as narration", node.id(), speaker_id);
            }
        }
    }

    /// Get a label by id
    #[must_use]
    pub fn label(&self, id: &str) -> Option<&Label> {
        self.labels.get(id)
    }

    /// Get a node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether an id names either a node or a label
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id) || self.labels.contains_key(id)
    }

    #[must_use]
    pub fn speakers(&self) -> &SpeakerIndex {
        &self.speakers
    }

    #[must_use]
    pub fn ordinals(&self) -> &OrdinalIndex {
        &self.ordinals
    }

    /// Id of the label a node belongs to
    #[must_use]
    pub fn enclosing_label(&self, node_id: &str) -> Option<&str> {
        self.enclosing.get(node_id).map(String::as_str)
    }

    /// Nodes belonging to a label, in export order
    pub fn members(&self, label_id: &str) -> impl Iterator<Item = &Node> {
        self.members
            .get(label_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.nodes.get(id))
    }

    /// Labels written to `target_file`, in export order
    pub fn labels_in_file<'a>(&'a self, target_file: &'a str) -> impl Iterator<Item = &'a Label> + 'a {
        self.labels
            .values()
            .filter(move |label| label.target_file == target_file)
    }

    /// Distinct target file names, in order of first appearance
    #[must_use]
    pub fn target_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for label in self.labels.values() {
            if !files.contains(&label.target_file.as_str()) {
                files.push(&label.target_file);
            }
        }
        files
    }

    /// Label name a jump target resolves to
    ///
    /// A node target resolves to the label enclosing it.
    #[must_use]
    pub fn jump_label_name(&self, target: &str) -> Option<&str> {
        if let Some(label) = self.labels.get(target) {
            return Some(&label.name);
        }
        self.enclosing_label(target)
            .and_then(|label_id| self.labels.get(label_id))
            .map(|label| label.name.as_str())
    }
}
