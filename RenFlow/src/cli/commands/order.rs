//! CLI command for printing the linear order of a dialogue

use console::style;
use std::path::Path;

use super::{load_config, open_converter};
use crate::ordering::{OrderedId, order_label};

pub fn execute(input: &Path, label: &str, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let converter = open_converter(input, &config)?;
    let graph = converter.graph();

    let label = graph
        .labels
        .values()
        .find(|candidate| candidate.id == label || candidate.name == label)
        .ok_or_else(|| anyhow::anyhow!("No dialogue with id or name '{label}'"))?;

    println!("{} ({})", style(&label.name).bold(), label.id);
    for (i, item) in order_label(graph, &label.id)?.iter().enumerate() {
        let description = match item {
            OrderedId::Node(node) => node.kind().display_name().to_string(),
            OrderedId::Exit { label, from } => format!("exit to {} from {}", label.name, from),
            OrderedId::Continue(_) => "continue".to_string(),
        };
        println!("{:>4}  {:<24} {}", i + 1, item.id(), style(description).dim());
    }
    Ok(())
}
