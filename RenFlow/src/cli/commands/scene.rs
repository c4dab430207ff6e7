//! CLI command for writing one scene file

use std::path::Path;

use super::{load_config, open_converter};
use crate::cli::progress::print_failure;

pub fn execute(input: &Path, target: &str, output: Option<&Path>, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let converter = open_converter(input, &config)?;

    let failures = if let Some(path) = output {
        let report = converter.write_scene_file(target, path, config.output.parallel)?;
        println!("Wrote {} labels to {}", report.rendered, path.display());
        report.failures
    } else {
        let scene = converter.render_scene_file(target, config.output.parallel)?;
        print!("{}", scene.text);
        scene.failures
    };

    for failure in &failures {
        print_failure(&failure.label_name, &failure.error.to_string());
    }
    if !failures.is_empty() {
        anyhow::bail!("{} labels of {} were skipped", failures.len(), target);
    }
    Ok(())
}
