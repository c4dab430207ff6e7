//! Breadth-first walk with deferred branch reinsertion

use std::collections::{HashSet, VecDeque};

use super::subgraph::LocalGraph;
use crate::error::{Error, Result};
use crate::graph::{DialogueGraph, Label, Node};

/// One element of a label's linear order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderedId<'g> {
    /// A node to render
    Node(&'g Node),
    /// Control leaves for another label, reached from `from`
    Exit { label: &'g Label, from: &'g str },
    /// The walked label itself: the walk entry or a loop-back
    Continue(&'g Label),
}

impl<'g> OrderedId<'g> {
    /// The graph id this element stands for
    #[must_use]
    pub fn id(&self) -> &'g str {
        match *self {
            OrderedId::Node(node) => node.id(),
            OrderedId::Exit { label, .. } | OrderedId::Continue(label) => &label.id,
        }
    }
}

/// Lazy, deterministic linear order of one label
///
/// Construction validates the local subgraph ([`Error::AmbiguousRoot`],
/// [`Error::DanglingReference`], [`Error::CyclicSubgraph`]); iteration cannot
/// fail. Call [`SceneOrder::finish`] after iterating to check that every
/// reachable node was yielded exactly once.
#[derive(Debug, Clone)]
pub struct SceneOrder<'g> {
    dialogue: &'g DialogueGraph,
    local: LocalGraph<'g>,
    queue: VecDeque<(&'g str, Option<&'g str>)>,
    enqueued: HashSet<&'g str>,
    yielded_nodes: usize,
}

impl<'g> SceneOrder<'g> {
    /// Prepare the walk for `label_id`
    pub fn new(dialogue: &'g DialogueGraph, label_id: &str) -> Result<Self> {
        let local = LocalGraph::build(dialogue, label_id)?;
        let root = local.root;

        Ok(Self {
            dialogue,
            local,
            queue: VecDeque::from([(root, None)]),
            enqueued: HashSet::from([root]),
            yielded_nodes: 0,
        })
    }

    /// The label being walked
    #[must_use]
    pub fn label(&self) -> &'g Label {
        self.local.label
    }

    /// Local predecessors of a vertex, in edge insertion order
    #[must_use]
    pub fn predecessors(&self, id: &'g str) -> Vec<&'g str> {
        self.local.predecessors(id).collect()
    }

    /// Drain the walk and check it covered every reachable node once
    pub fn finish(mut self) -> Result<()> {
        while self.next().is_some() {}

        if self.yielded_nodes == self.local.reachable_nodes {
            Ok(())
        } else {
            Err(Error::IncompleteWalk {
                label: self.local.label.id.clone(),
                visited: self.yielded_nodes,
                expected: self.local.reachable_nodes,
            })
        }
    }

    /// Another label's id; these are emitted at every exit reaching them
    fn is_exit(&self, id: &str) -> bool {
        id != self.local.label.id && self.dialogue.label(id).is_some()
    }

    /// A lone jump or exit is handled right after the node leading to it
    fn is_immediate(&self, id: &str) -> bool {
        self.is_exit(id) || self.dialogue.node(id).is_some_and(Node::is_jump)
    }

    fn classify(&self, id: &'g str, from: Option<&'g str>) -> Option<OrderedId<'g>> {
        if let Some(node) = self.dialogue.node(id) {
            return Some(OrderedId::Node(node));
        }
        let walked: &'g Label = self.local.label;
        let label = self.dialogue.label(id)?;
        if label.id == walked.id {
            Some(OrderedId::Continue(label))
        } else {
            Some(OrderedId::Exit {
                label,
                from: from.unwrap_or(walked.id.as_str()),
            })
        }
    }

    fn expand(&mut self, current: &'g str) {
        let mut children: Vec<&'g str> = self
            .local
            .successors(current)
            .filter(|child| self.is_exit(child) || !self.enqueued.contains(child))
            .collect();

        if let [only] = children.as_slice()
            && self.is_immediate(only)
        {
            let only = *only;
            self.enqueued.insert(only);
            self.queue.push_front((only, Some(current)));
            return;
        }

        let dialogue = self.dialogue;
        let ordinals = dialogue.ordinals();
        children.sort_by(|a, b| ordinals.get(a).cmp(&ordinals.get(b)).then_with(|| a.cmp(b)));
        for child in children {
            self.enqueued.insert(child);
            self.queue.push_back((child, Some(current)));
        }
    }
}

impl<'g> Iterator for SceneOrder<'g> {
    type Item = OrderedId<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let (current, from) = self.queue.pop_front()?;
        // every vertex was checked against the graph when the subgraph was built
        let item = self.classify(current, from)?;

        match item {
            OrderedId::Node(node) => {
                self.yielded_nodes += 1;
                if !node.is_jump() {
                    self.expand(current);
                }
            }
            OrderedId::Continue(_) | OrderedId::Exit { .. } => self.expand(current),
        }

        Some(item)
    }
}

/// Order a label and collect the result
pub fn order_label<'g>(dialogue: &'g DialogueGraph, label_id: &str) -> Result<Vec<OrderedId<'g>>> {
    let mut order = SceneOrder::new(dialogue, label_id)?;
    let items: Vec<OrderedId<'g>> = order.by_ref().collect();
    order.finish()?;
    Ok(items)
}

/// Order a label and return the ids only
pub fn order_ids(dialogue: &DialogueGraph, label_id: &str) -> Result<Vec<String>> {
    Ok(order_label(dialogue, label_id)?
        .iter()
        .map(|item| item.id().to_string())
        .collect())
}
