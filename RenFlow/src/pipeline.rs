//! Conversion pipeline: one graph, many output files
//!
//! The graph is built once. Each scene file renders its labels independently,
//! sequentially or on the rayon pool; either way the bytes written are the
//! same. A label that fails a structural check is left out of its file and
//! reported; any other error aborts the run.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ExportSchema, OutputSettings};
use crate::emitter::{InitKind, RenderOptions, SceneEmitter, render_characters, render_variables};
use crate::error::{Error, Result};
use crate::formats::articy::read_records;
use crate::graph::{DialogueGraph, Label, Records};

/// What [`Converter::convert_all`] writes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Scene target files; empty means every target file in the export
    pub scenes: Vec<String>,
    pub characters_file: Option<String>,
    pub variables_file: Option<String>,
    /// Render labels on the rayon pool
    pub parallel: bool,
}

impl From<&OutputSettings> for ConvertOptions {
    fn from(settings: &OutputSettings) -> Self {
        Self {
            scenes: settings.scenes.clone(),
            characters_file: settings.characters_file.clone(),
            variables_file: settings.variables_file.clone(),
            parallel: settings.parallel,
        }
    }
}

/// A label left out of its file
#[derive(Debug)]
pub struct LabelFailure {
    pub label_id: String,
    pub label_name: String,
    pub error: Error,
}

/// Text of one scene file plus the labels that did not make it
#[derive(Debug)]
pub struct RenderedScene {
    pub target_file: String,
    pub text: String,
    /// Number of labels written
    pub rendered: usize,
    pub failures: Vec<LabelFailure>,
}

/// Outcome of writing one scene file
#[derive(Debug)]
pub struct SceneReport {
    pub target_file: String,
    pub path: PathBuf,
    pub rendered: usize,
    pub failures: Vec<LabelFailure>,
}

/// Outcome of [`Converter::convert_all`]
#[derive(Debug, Default)]
pub struct ConversionSummary {
    pub scenes: Vec<SceneReport>,
    pub init_files: Vec<PathBuf>,
}

impl ConversionSummary {
    /// Every label failure across all scene files
    pub fn failures(&self) -> impl Iterator<Item = &LabelFailure> {
        self.scenes.iter().flat_map(|scene| scene.failures.iter())
    }

    #[must_use]
    pub fn failed_labels(&self) -> usize {
        self.failures().count()
    }

    #[must_use]
    pub fn rendered_labels(&self) -> usize {
        self.scenes.iter().map(|scene| scene.rendered).sum()
    }

    /// Whether every label of every requested file was written
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_labels() == 0
    }
}

/// Builds the graph once and writes scene and init files from it
#[derive(Debug, Clone)]
pub struct Converter {
    graph: DialogueGraph,
    options: RenderOptions,
}

impl Converter {
    pub fn new(graph: DialogueGraph, options: RenderOptions) -> Self {
        Self { graph, options }
    }

    pub fn from_records(records: Records, options: RenderOptions) -> Result<Self> {
        Ok(Self::new(DialogueGraph::new(records)?, options))
    }

    /// Read an articy export and build the graph
    pub fn from_file<P: AsRef<Path>>(path: P, schema: &ExportSchema, options: RenderOptions) -> Result<Self> {
        Self::from_records(read_records(path, schema)?, options)
    }

    #[must_use]
    pub fn graph(&self) -> &DialogueGraph {
        &self.graph
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[must_use]
    pub fn emitter(&self) -> SceneEmitter<'_> {
        SceneEmitter::new(&self.graph, self.options.clone())
    }

    /// Render every label of a target file, isolating structural failures
    pub fn render_scene_file(&self, target_file: &str, parallel: bool) -> Result<RenderedScene> {
        let labels: Vec<&Label> = self.graph.labels_in_file(target_file).collect();
        if labels.is_empty() {
            return Err(Error::UnknownTargetFile(target_file.to_string()));
        }

        let emitter = self.emitter();
        let results: Vec<Result<String>> = if parallel {
            labels.par_iter().map(|label| emitter.render_label(&label.id)).collect()
        } else {
            labels.iter().map(|label| emitter.render_label(&label.id)).collect()
        };

        let mut blocks = Vec::with_capacity(labels.len());
        let mut failures = Vec::new();
        for (label, result) in labels.iter().zip(results) {
            match result {
                Ok(block) => blocks.push(block),
                Err(error) if error.is_structural() => {
                    tracing::warn!("Skipping label {} ({}): {}", label.name, label.id, error);
                    failures.push(LabelFailure {
                        label_id: label.id.clone(),
                        label_name: label.name.clone(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(RenderedScene {
            target_file: target_file.to_string(),
            text: join_blocks(&blocks),
            rendered: blocks.len(),
            failures,
        })
    }

    /// Render a target file and write it to `path`
    pub fn write_scene_file<P: AsRef<Path>>(&self, target_file: &str, path: P, parallel: bool) -> Result<SceneReport> {
        let path = path.as_ref();
        let scene = self.render_scene_file(target_file, parallel)?;
        write_output(path, &scene.text)?;
        tracing::info!("Wrote {} ({} labels)", path.display(), scene.rendered);

        Ok(SceneReport {
            target_file: scene.target_file,
            path: path.to_path_buf(),
            rendered: scene.rendered,
            failures: scene.failures,
        })
    }

    /// Text of an init file
    #[must_use]
    pub fn render_init(&self, kind: InitKind) -> String {
        match kind {
            InitKind::Character => render_characters(&self.graph.characters, &self.options.character_class),
            InitKind::Variable => render_variables(&self.graph.variables),
        }
    }

    /// Write an init file to `path`
    pub fn write_init_file<P: AsRef<Path>>(&self, kind: InitKind, path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        write_output(path, &self.render_init(kind))?;
        tracing::info!("Wrote {} declarations to {}", kind, path.display());
        Ok(path.to_path_buf())
    }

    /// Write every requested scene file and init file below `output_dir`
    pub fn convert_all<P: AsRef<Path>>(&self, output_dir: P, options: &ConvertOptions) -> Result<ConversionSummary> {
        let output_dir = output_dir.as_ref();
        create_dir(output_dir)?;

        let targets: Vec<String> = if options.scenes.is_empty() {
            self.graph.target_files().into_iter().map(ToString::to_string).collect()
        } else {
            options.scenes.clone()
        };

        let mut summary = ConversionSummary::default();
        for target in &targets {
            let report = self.write_scene_file(target, output_dir.join(target), options.parallel)?;
            summary.scenes.push(report);
        }

        let init_files = [
            (InitKind::Character, &options.characters_file),
            (InitKind::Variable, &options.variables_file),
        ];
        for (kind, file) in init_files {
            if let Some(file) = file {
                summary.init_files.push(self.write_init_file(kind, output_dir.join(file))?);
            }
        }

        tracing::info!(
            "Converted {} scene files ({} labels, {} failed) into {}",
            summary.scenes.len(),
            summary.rendered_labels(),
            summary.failed_labels(),
            output_dir.display()
        );
        Ok(summary)
    }
}

/// Join label blocks with exactly one blank line between them
fn join_blocks<S: AsRef<str>>(blocks: &[S]) -> String {
    let mut output = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(block.as_ref());
    }
    output
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::OutputDirFailed {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir(parent)?;
    }
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Character, Fragment, Node};

    fn converter() -> Converter {
        let label = |id: &str, name: &str, file: &str| Label {
            id: id.to_string(),
            name: name.to_string(),
            target_file: file.to_string(),
            edges: Vec::new(),
        };
        let line = |id: &str, parent: &str, text: &str| {
            Node::Fragment(Fragment {
                id: id.to_string(),
                parent: parent.to_string(),
                text: text.to_string(),
                ..Default::default()
            })
        };

        Converter::from_records(
            Records {
                characters: vec![Character {
                    name: "Faye".to_string(),
                    color: "ffffff".to_string(),
                    speaker: "S1".to_string(),
                }],
                labels: vec![
                    label("L1", "first", "a.rpy"),
                    label("L2", "broken", "a.rpy"),
                    label("L3", "third", "a.rpy"),
                    label("L4", "other", "b.rpy"),
                ],
                nodes: vec![
                    line("F1", "L1", "one"),
                    line("F2", "L2", "two"),
                    line("F3", "L2", "two again"),
                    line("F4", "L3", "three"),
                    line("F5", "L4", "four"),
                ],
                ..Default::default()
            },
            RenderOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_structural_failure_isolated_to_label() {
        let scene = converter().render_scene_file("a.rpy", false).unwrap();
        assert_eq!(scene.rendered, 2);
        assert_eq!(scene.failures.len(), 1);
        assert_eq!(scene.failures[0].label_name, "broken");
        assert!(matches!(scene.failures[0].error, Error::AmbiguousRoot { .. }));
        assert_eq!(scene.text, "label first:\n    \"one\"\n\nlabel third:\n    \"three\"\n");
    }

    #[test]
    fn test_join_blocks_single_blank_line() {
        assert_eq!(join_blocks(&["a\n", "b\n", "c\n"]), "a\n\nb\n\nc\n");
        assert_eq!(join_blocks(&["only\n"]), "only\n");
        assert_eq!(join_blocks::<&str>(&[]), "");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let converter = converter();
        let sequential = converter.render_scene_file("a.rpy", false).unwrap();
        let parallel = converter.render_scene_file("a.rpy", true).unwrap();
        assert_eq!(sequential.text, parallel.text);
    }

    #[test]
    fn test_unknown_target_file() {
        let err = converter().render_scene_file("missing.rpy", false).unwrap_err();
        assert!(matches!(err, Error::UnknownTargetFile(_)));
    }

    #[test]
    fn test_convert_all_writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConvertOptions {
            characters_file: Some("characters.rpy".to_string()),
            variables_file: None,
            ..Default::default()
        };

        let summary = converter().convert_all(dir.path().join("game"), &options).unwrap();
        assert_eq!(summary.scenes.len(), 2);
        assert_eq!(summary.rendered_labels(), 3);
        assert_eq!(summary.failed_labels(), 1);
        assert!(!summary.is_complete());
        assert_eq!(summary.init_files, vec![dir.path().join("game").join("characters.rpy")]);

        let b = fs::read_to_string(dir.path().join("game").join("b.rpy")).unwrap();
        assert_eq!(b, "label other:\n    \"four\"\n");
        assert!(!dir.path().join("game").join("variables.rpy").exists());
    }
}
