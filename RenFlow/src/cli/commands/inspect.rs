//! CLI command for summarizing an export

use console::style;
use std::path::Path;

use super::{load_config, open_converter};
use crate::ordering::SceneOrder;

pub fn execute(input: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let converter = open_converter(input, &config)?;
    let graph = converter.graph();

    println!(
        "{}: {} dialogues, {} nodes, {} characters, {} variables",
        style(input.display()).bold(),
        graph.labels.len(),
        graph.nodes.len(),
        graph.characters.len(),
        graph.variables.len()
    );

    let mut broken = 0usize;
    for target in graph.target_files() {
        println!();
        println!("{}", style(target).cyan().bold());

        for label in graph.labels_in_file(target) {
            let members = graph.members(&label.id).count();
            let status = SceneOrder::new(graph, &label.id).and_then(|mut order| {
                let steps = order.by_ref().count();
                order.finish().map(|()| steps)
            });

            match status {
                Ok(steps) => println!(
                    "  {:<32} {:>4} nodes {:>4} steps  {}",
                    label.name,
                    members,
                    steps,
                    style("ok").green()
                ),
                Err(error) => {
                    broken += 1;
                    println!(
                        "  {:<32} {:>4} nodes  {}",
                        label.name,
                        members,
                        style(error).red()
                    );
                }
            }
        }
    }

    if broken > 0 {
        println!();
        println!("{} dialogues cannot be converted", style(broken).red().bold());
    }
    Ok(())
}
