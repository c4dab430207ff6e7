//! Scene file rendering

use super::layout::{Container, Layout};
use super::writer::{Line, ScriptWriter};
use crate::config::OutputSettings;
use crate::error::{Error, Result};
use crate::graph::{DialogueGraph, Fragment, Jump, MenuItem, Node};
use crate::ordering::{OrderedId, SceneOrder};

/// Formatting knobs shared by scene and declaration output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per indentation level
    pub indent_width: usize,
    /// Class used for `define` lines
    pub character_class: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            character_class: "Character".to_string(),
        }
    }
}

impl From<&OutputSettings> for RenderOptions {
    fn from(settings: &OutputSettings) -> Self {
        Self {
            indent_width: settings.indent_width,
            character_class: settings.character_class.clone(),
        }
    }
}

/// Escape text for a double-quoted script string
#[must_use]
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// `if <guard>`, keeping an authored `if` and dropping a trailing colon
fn condition(guard: &str) -> String {
    let guard = guard.trim().trim_end_matches(':').trim_end();
    if guard.starts_with("if ") {
        guard.to_string()
    } else {
        format!("if {guard}")
    }
}

/// One `$` statement per non-empty line of an effect
fn statements(effect: &str) -> impl Iterator<Item = String> + '_ {
    effect
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with('$') {
                line.to_string()
            } else {
                format!("$ {line}")
            }
        })
}

/// Renders labels of one dialogue graph
#[derive(Debug, Clone)]
pub struct SceneEmitter<'g> {
    graph: &'g DialogueGraph,
    options: RenderOptions,
}

impl<'g> SceneEmitter<'g> {
    pub fn new(graph: &'g DialogueGraph, options: RenderOptions) -> Self {
        Self { graph, options }
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render one label block, from `label <name>:` to its last line
    pub fn render_label(&self, label_id: &str) -> Result<String> {
        let mut order = SceneOrder::new(self.graph, label_id)?;
        let label = order.label();
        let mut layout = Layout::new();

        while let Some(item) = order.next() {
            match item {
                OrderedId::Node(node) => {
                    let predecessors = order.predecessors(node.id());
                    self.place_node(&mut layout, label_id, node, &predecessors)?;
                }
                OrderedId::Exit { label: target, from } => {
                    let container = layout.locate(&[from]);
                    let level = layout.level(container);
                    layout.push(container, Line::text(level, format!("jump {}", target.name)));
                }
                // a loop-back writes nothing
                OrderedId::Continue(_) => {}
            }
        }
        order.finish()?;

        let mut lines = vec![Line::block(0, format!("label {}:", label.name))];
        layout.into_lines(&mut lines);

        let mut writer = ScriptWriter::new(self.options.indent_width);
        writer.write_lines(&lines);
        tracing::debug!("Rendered label {} ({} lines)", label.name, lines.len());
        Ok(writer.finish())
    }

    fn place_node(&self, layout: &mut Layout<'g>, label_id: &str, node: &'g Node, predecessors: &[&'g str]) -> Result<()> {
        if let Node::MenuItem(item) = node {
            self.place_option(layout, item, predecessors);
            return Ok(());
        }

        let container = layout.locate(predecessors);
        let level = layout.level(container);
        layout.record(container, node.id());

        match node {
            Node::Fragment(fragment) => {
                for line in self.fragment_lines(fragment, level) {
                    layout.push(container, line);
                }
            }
            Node::Menu(menu) => {
                layout.push(container, Line::block(level, "menu:"));
                if let Some(prompt) = self.say(&menu.speaker_id, &menu.text) {
                    layout.push(container, Line::text(level + 1, prompt));
                }
                layout.open_menu(container, &menu.id, level);
            }
            Node::Jump(jump) => {
                let target = self.jump_target(label_id, jump)?;
                layout.push(container, Line::text(level, format!("jump {target}")));
            }
            Node::MenuItem(_) => {}
        }
        Ok(())
    }

    fn place_option(&self, layout: &mut Layout<'g>, item: &'g MenuItem, predecessors: &[&'g str]) {
        let scope = if let Some(scope) = layout.menu_scope(predecessors) {
            scope
        } else {
            tracing::warn!("Menu item {} does not follow a menu, opening one", item.id);
            let container = layout.locate(predecessors);
            let level = layout.level(container);
            layout.record(container, &item.id);
            layout.push(container, Line::block(level, "menu:"));
            layout.open_menu(container, &item.id, level)
        };

        let level = layout.option_level(scope);
        let mut header = quote(&item.text);
        if let Some(guard) = &item.guard {
            header.push(' ');
            header.push_str(&condition(guard));
        }
        header.push(':');

        let branch = layout.open_branch(scope, &item.id, Line::block(level, header));
        if let Some(effect) = &item.effect {
            for statement in statements(effect) {
                layout.push(branch, Line::text(level + 1, statement));
            }
        }
        if let Some(selected) = &item.selected_text
            && let Some(line) = self.say(&item.speaker_id, selected)
        {
            layout.push(branch, Line::text(level + 1, line));
        }
    }

    fn fragment_lines(&self, fragment: &Fragment, level: usize) -> Vec<Line> {
        let mut lines = Vec::new();
        let body_level = match &fragment.guard {
            Some(guard) => {
                lines.push(Line::block(level, format!("{}:", condition(guard))));
                level + 1
            }
            None => level,
        };

        if let Some(stage) = &fragment.stage_direction {
            lines.push(Line::text(body_level, format!("scene {}", stage.trim())));
        }
        if let Some(line) = self.say(&fragment.speaker_id, &fragment.text) {
            lines.push(Line::text(body_level, line));
        }
        if let Some(effect) = &fragment.effect {
            lines.extend(statements(effect).map(|statement| Line::text(body_level, statement)));
        }
        lines
    }

    /// `speaker "text"`, or just the quoted text for narration
    fn say(&self, speaker_id: &str, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        let speaker = self.graph.speakers().resolve(speaker_id);
        if speaker.is_empty() {
            Some(quote(text))
        } else {
            Some(format!("{speaker} {}", quote(text)))
        }
    }

    fn jump_target(&self, label_id: &str, jump: &Jump) -> Result<&'g str> {
        self.graph
            .jump_label_name(&jump.target)
            .ok_or_else(|| Error::DanglingReference {
                label: label_id.to_string(),
                from: jump.id.clone(),
                target: jump.target.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Character, Label, Records};
    use pretty_assertions::assert_eq;

    fn label(id: &str, name: &str, edges: &[&str]) -> Label {
        Label {
            id: id.to_string(),
            name: name.to_string(),
            target_file: "script.rpy".to_string(),
            edges: edges.iter().map(ToString::to_string).collect(),
        }
    }

    fn say(id: &str, speaker: &str, text: &str, edges: &[&str]) -> Node {
        Node::Fragment(Fragment {
            id: id.to_string(),
            parent: "L1".to_string(),
            speaker_id: speaker.to_string(),
            text: text.to_string(),
            edges: edges.iter().map(ToString::to_string).collect(),
            ..Default::default()
        })
    }

    fn option(id: &str, ordinal: i64, text: &str, edges: &[&str]) -> Node {
        Node::MenuItem(MenuItem {
            id: id.to_string(),
            parent: "M1".to_string(),
            text: text.to_string(),
            ordinal,
            edges: edges.iter().map(ToString::to_string).collect(),
            ..Default::default()
        })
    }

    fn faye() -> Character {
        Character {
            name: "Faye".to_string(),
            color: "c8ffc8".to_string(),
            speaker: "S1".to_string(),
        }
    }

    fn render(labels: Vec<Label>, nodes: Vec<Node>) -> String {
        let graph = DialogueGraph::new(Records {
            characters: vec![faye()],
            labels,
            nodes,
            ..Default::default()
        })
        .unwrap();
        SceneEmitter::new(&graph, RenderOptions::default())
            .render_label("L1")
            .unwrap()
    }

    #[test]
    fn test_linear_label() {
        let output = render(
            vec![label("L1", "start", &[])],
            vec![
                say("F1", "S1", "Hello there.", &["F2"]),
                say("F2", "", "The wind howls.", &[]),
            ],
        );
        assert_eq!(output, "label start:\n    faye \"Hello there.\"\n    \"The wind howls.\"\n");
    }

    #[test]
    fn test_stage_direction_guard_and_effect() {
        let output = render(
            vec![label("L1", "start", &[])],
            vec![Node::Fragment(Fragment {
                id: "F1".to_string(),
                parent: "L1".to_string(),
                speaker_id: "S1".to_string(),
                text: "Nice \"hat\".".to_string(),
                stage_direction: Some("bg park".to_string()),
                guard: Some("met_faye".to_string()),
                effect: Some("points += 1".to_string()),
                edges: vec![],
            })],
        );
        assert_eq!(
            output,
            "label start:\n    if met_faye:\n        scene bg park\n        faye \"Nice \\\"hat\\\".\"\n        $ points += 1\n"
        );
    }

    #[test]
    fn test_menu_with_exits() {
        let mut item = option("I2", 1, "Stay", &["L2"]);
        if let Node::MenuItem(item) = &mut item {
            item.guard = Some("if brave".to_string());
            item.effect = Some("courage = True".to_string());
            item.selected_text = Some("I'll stay.".to_string());
            item.speaker_id = "S1".to_string();
        }

        let output = render(
            vec![label("L1", "start", &[]), label("L2", "stay", &[]), label("L3", "leave", &[])],
            vec![
                Node::Menu(Fragment {
                    id: "M1".to_string(),
                    parent: "L1".to_string(),
                    speaker_id: "S1".to_string(),
                    text: "What now?".to_string(),
                    edges: vec!["I1".to_string(), "I2".to_string()],
                    ..Default::default()
                }),
                option("I1", 2, "Leave", &["L3"]),
                item,
            ],
        );

        assert_eq!(
            output,
            concat!(
                "label start:\n",
                "    menu:\n",
                "        faye \"What now?\"\n",
                "        \"Stay\" if brave:\n",
                "            $ courage = True\n",
                "            faye \"I'll stay.\"\n",
                "            jump stay\n",
                "        \"Leave\":\n",
                "            jump leave\n",
            )
        );
    }

    #[test]
    fn test_divergent_branches_stay_nested() {
        let output = render(
            vec![label("L1", "start", &[])],
            vec![
                Node::Menu(Fragment {
                    id: "M1".to_string(),
                    parent: "L1".to_string(),
                    edges: vec!["I1".to_string(), "I2".to_string()],
                    ..Default::default()
                }),
                option("I1", 1, "One", &["A1"]),
                option("I2", 2, "Two", &["B1"]),
                say("A1", "", "a1", &["A2"]),
                say("A2", "", "a2", &["F9"]),
                say("B1", "", "b1", &["F9"]),
                say("F9", "", "together", &[]),
            ],
        );

        assert_eq!(
            output,
            concat!(
                "label start:\n",
                "    menu:\n",
                "        \"One\":\n",
                "            \"a1\"\n",
                "            \"a2\"\n",
                "        \"Two\":\n",
                "            \"b1\"\n",
                "    \"together\"\n",
            )
        );
    }

    #[test]
    fn test_jump_node_and_loop_back() {
        let output = render(
            vec![label("L1", "start", &["L2"]), label("L2", "next", &[])],
            vec![
                say("F1", "S1", "Again?", &["F2"]),
                say("F2", "S1", "Fine.", &["L1"]),
            ],
        );
        assert_eq!(output, "label start:\n    faye \"Again?\"\n    faye \"Fine.\"\n    jump next\n");

        let output = render(
            vec![label("L1", "start", &[]), label("L2", "next", &[])],
            vec![
                say("F1", "", "Off we go.", &["J1"]),
                Node::Jump(Jump {
                    id: "J1".to_string(),
                    parent: "L1".to_string(),
                    target: "L2".to_string(),
                }),
            ],
        );
        assert_eq!(output, "label start:\n    \"Off we go.\"\n    jump next\n");
    }

    #[test]
    fn test_loop_back_keeps_sibling_option_nested() {
        let output = render(
            vec![label("L1", "start", &["L2"]), label("L2", "next", &[])],
            vec![
                Node::Menu(Fragment {
                    id: "M1".to_string(),
                    parent: "L1".to_string(),
                    edges: vec!["I1".to_string(), "I2".to_string()],
                    ..Default::default()
                }),
                option("I1", 1, "Skip", &["L1"]),
                option("I2", 2, "Talk", &["B1"]),
                say("B1", "", "only if talking", &["L1"]),
            ],
        );

        assert_eq!(
            output,
            concat!(
                "label start:\n",
                "    menu:\n",
                "        \"Skip\":\n",
                "            pass\n",
                "        \"Talk\":\n",
                "            \"only if talking\"\n",
                "    jump next\n",
            )
        );
    }

    #[test]
    fn test_unknown_speaker_is_narration() {
        let output = render(vec![label("L1", "start", &[])], vec![say("F1", "S404", "Who said that?", &[])]);
        assert_eq!(output, "label start:\n    \"Who said that?\"\n");
    }

    #[test]
    fn test_condition_and_statements() {
        assert_eq!(condition("x > 1"), "if x > 1");
        assert_eq!(condition("if x > 1:"), "if x > 1");
        let lines: Vec<String> = statements("a = 1\n\n$ b = 2").collect();
        assert_eq!(lines, vec!["$ a = 1", "$ b = 2"]);
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    }
}
