//! CLI command for converting a whole export

use std::path::Path;
use std::time::Instant;

use super::{load_config, open_converter};
use crate::cli::progress::{DISK, GEAR, LOOKING_GLASS, print_done, print_failure, print_step};
use crate::pipeline::ConvertOptions;

pub fn execute(
    input: Option<&Path>,
    output: Option<&Path>,
    config_path: Option<&Path>,
    scenes: &[String],
    parallel: bool,
    allow_partial: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let config = load_config(config_path)?;

    let input = input
        .or(config.project.input.as_deref())
        .ok_or_else(|| anyhow::anyhow!("No input export given (pass a path or set project.input in renflow.toml)"))?;
    let output_dir = output.unwrap_or(&config.project.output_dir);

    let mut options = ConvertOptions::from(&config.output);
    if !scenes.is_empty() {
        options.scenes = scenes.to_vec();
    }
    options.parallel |= parallel;

    print_step(1, 3, LOOKING_GLASS, &format!("Reading {}...", input.display()));
    let converter = open_converter(input, &config)?;

    print_step(2, 3, GEAR, "Ordering and rendering dialogues...");
    let summary = converter.convert_all(output_dir, &options)?;

    print_step(
        3,
        3,
        DISK,
        &format!(
            "Wrote {} scene files and {} init files to {}",
            summary.scenes.len(),
            summary.init_files.len(),
            output_dir.display()
        ),
    );
    for failure in summary.failures() {
        print_failure(&failure.label_name, &failure.error.to_string());
    }

    if !summary.is_complete() && !allow_partial {
        anyhow::bail!(
            "{} of {} labels were skipped (rerun with --allow-partial to accept)",
            summary.failed_labels(),
            summary.failed_labels() + summary.rendered_labels()
        );
    }

    print_done(started.elapsed());
    Ok(())
}
