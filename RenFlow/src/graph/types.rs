//! Typed records of a dialogue graph
//!
//! These are the records the export adapter hands to [`DialogueGraph`](super::DialogueGraph).
//! Nodes are a closed set of variants; rendering dispatches on [`Node`] directly.

use std::slice;

/// A speaking character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// Display name as authored
    pub name: String,
    /// Hex color without `#`
    pub color: String,
    /// Speaker id referenced by fragments
    pub speaker: String,
}

/// Declared type of a global variable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VariableType {
    #[default]
    Boolean,
    Integer,
    String,
    Other(String),
}

impl From<&str> for VariableType {
    fn from(s: &str) -> Self {
        match s {
            "Boolean" | "bool" => VariableType::Boolean,
            "Integer" | "int" => VariableType::Integer,
            "String" | "string" => VariableType::String,
            other => VariableType::Other(other.to_string()),
        }
    }
}

impl VariableType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            VariableType::Boolean => "Boolean",
            VariableType::Integer => "Integer",
            VariableType::String => "String",
            VariableType::Other(s) => s,
        }
    }
}

/// A namespaced global variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub namespace: String,
    pub name: String,
    pub var_type: VariableType,
    /// Raw default value from the export
    pub value: String,
    pub description: String,
}

/// A dialogue, written out as one script label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: String,
    /// Script label name
    pub name: String,
    /// Output file this label is written to
    pub target_file: String,
    /// Targets of the label's own output pins
    pub edges: Vec<String>,
}

/// A spoken line, optionally guarded
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub id: String,
    pub parent: String,
    pub speaker_id: String,
    pub text: String,
    pub stage_direction: Option<String>,
    /// Condition wrapping the line in an `if` block
    pub guard: Option<String>,
    /// Statement executed after the line
    pub effect: Option<String>,
    pub edges: Vec<String>,
}

/// A branch option below a menu
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuItem {
    pub id: String,
    pub parent: String,
    pub speaker_id: String,
    /// Option text shown in the choice list
    pub text: String,
    /// Sort key among sibling options
    pub ordinal: i64,
    pub guard: Option<String>,
    pub effect: Option<String>,
    /// Line spoken once the option is picked
    pub selected_text: Option<String>,
    pub edges: Vec<String>,
}

/// An authored, unconditional jump
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Jump {
    pub id: String,
    pub parent: String,
    pub target: String,
}

/// Node kind, mostly for logs and listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Fragment,
    Menu,
    MenuItem,
    Jump,
}

impl NodeKind {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::Fragment => "Fragment",
            NodeKind::Menu => "Menu",
            NodeKind::MenuItem => "Menu Item",
            NodeKind::Jump => "Jump",
        }
    }
}

/// A sequenceable element below a label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Fragment(Fragment),
    /// Branch point; the fragment text is the menu prompt
    Menu(Fragment),
    MenuItem(MenuItem),
    Jump(Jump),
}

impl Node {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Node::Fragment(f) | Node::Menu(f) => &f.id,
            Node::MenuItem(item) => &item.id,
            Node::Jump(jump) => &jump.id,
        }
    }

    #[must_use]
    pub fn parent(&self) -> &str {
        match self {
            Node::Fragment(f) | Node::Menu(f) => &f.parent,
            Node::MenuItem(item) => &item.parent,
            Node::Jump(jump) => &jump.parent,
        }
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Fragment(_) => NodeKind::Fragment,
            Node::Menu(_) => NodeKind::Menu,
            Node::MenuItem(_) => NodeKind::MenuItem,
            Node::Jump(_) => NodeKind::Jump,
        }
    }

    /// Outgoing edges; a jump has exactly one, its target
    #[must_use]
    pub fn edges(&self) -> &[String] {
        match self {
            Node::Fragment(f) | Node::Menu(f) => &f.edges,
            Node::MenuItem(item) => &item.edges,
            Node::Jump(jump) => slice::from_ref(&jump.target),
        }
    }

    /// Speaker id, `None` for jumps
    #[must_use]
    pub fn speaker_id(&self) -> Option<&str> {
        match self {
            Node::Fragment(f) | Node::Menu(f) => Some(&f.speaker_id),
            Node::MenuItem(item) => Some(&item.speaker_id),
            Node::Jump(_) => None,
        }
    }

    /// Sibling ordering key; only menu items carry one
    #[must_use]
    pub fn ordinal(&self) -> i64 {
        match self {
            Node::MenuItem(item) => item.ordinal,
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_jump(&self) -> bool {
        matches!(self, Node::Jump(_))
    }
}

/// Everything the adapter extracted from one export
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub characters: Vec<Character>,
    pub variables: Vec<Variable>,
    pub labels: Vec<Label>,
    pub nodes: Vec<Node>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_edges_are_its_target() {
        let node = Node::Jump(Jump {
            id: "J1".to_string(),
            parent: "L1".to_string(),
            target: "L2".to_string(),
        });
        assert_eq!(node.edges(), ["L2".to_string()]);
        assert_eq!(node.speaker_id(), None);
        assert!(node.is_jump());
    }

    #[test]
    fn test_ordinal_defaults_to_zero() {
        let fragment = Node::Fragment(Fragment::default());
        let item = Node::MenuItem(MenuItem {
            ordinal: 3,
            ..Default::default()
        });
        assert_eq!(fragment.ordinal(), 0);
        assert_eq!(item.ordinal(), 3);
        assert_eq!(item.kind().display_name(), "Menu Item");
    }

    #[test]
    fn test_variable_type_names() {
        assert_eq!(VariableType::from("Boolean"), VariableType::Boolean);
        assert_eq!(VariableType::from("Integer").as_str(), "Integer");
        assert_eq!(VariableType::from("Float"), VariableType::Other("Float".to_string()));
    }
}
