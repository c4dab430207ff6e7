//! CLI command for converting a directory of exports

use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use super::{load_config, open_converter};
use crate::cli::progress::{LOOKING_GLASS, TRUCK, print_done, print_failure, print_step, simple_bar};
use crate::pipeline::ConvertOptions;

/// Every `.json` file below `source`, sorted
fn find_exports(source: &Path) -> Vec<PathBuf> {
    let mut exports: Vec<PathBuf> = WalkDir::new(source)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    exports.sort();
    exports
}

pub fn execute(
    source: &Path,
    output: &Path,
    config_path: Option<&Path>,
    parallel: bool,
    show_progress: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let config = load_config(config_path)?;
    let mut options = ConvertOptions::from(&config.output);
    options.parallel |= parallel;

    print_step(1, 2, LOOKING_GLASS, &format!("Scanning {}...", source.display()));
    let exports = find_exports(source);
    if exports.is_empty() {
        anyhow::bail!("No .json exports found below {}", source.display());
    }

    print_step(2, 2, TRUCK, &format!("Converting {} exports...", exports.len()));
    let bar = show_progress.then(|| simple_bar(exports.len() as u64, "Converting"));

    let mut failed_exports = Vec::new();
    let mut skipped_labels = 0usize;
    for export in &exports {
        let stem = export.file_stem().unwrap_or_default();
        let result = open_converter(export, &config).and_then(|converter| {
            converter
                .convert_all(output.join(stem), &options)
                .map_err(anyhow::Error::from)
        });

        match result {
            Ok(summary) => skipped_labels += summary.failed_labels(),
            Err(error) => {
                tracing::warn!("Failed to convert {}: {}", export.display(), error);
                failed_exports.push((export.clone(), error));
            }
        }
        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    for (export, error) in &failed_exports {
        print_failure(&export.display().to_string(), &error.to_string());
    }
    println!(
        "Converted {} of {} exports ({} labels skipped)",
        exports.len() - failed_exports.len(),
        exports.len(),
        skipped_labels
    );
    print_done(started.elapsed());

    if failed_exports.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} exports failed to convert", failed_exports.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_exports_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("nested").join("a.JSON"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let exports = find_exports(dir.path());
        assert_eq!(exports.len(), 2);
        assert!(exports[0].ends_with("b.json"));
        assert!(exports[1].ends_with("nested/a.JSON"));
    }
}
