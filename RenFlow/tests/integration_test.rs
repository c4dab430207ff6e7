use pretty_assertions::assert_eq;
use renflow::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn expected(name: &str) -> String {
    fs::read_to_string(fixture("expected").join(name)).unwrap()
}

fn sample_converter() -> Converter {
    Converter::from_file(fixture("export.json"), &ExportSchema::default(), RenderOptions::default()).unwrap()
}

fn default_options() -> ConvertOptions {
    ConvertOptions::from(&OutputSettings::default())
}

#[test]
fn test_sample_export_converts_to_expected_files() {
    let dir = tempdir().unwrap();
    let summary = sample_converter().convert_all(dir.path(), &default_options()).unwrap();

    for name in ["script.rpy", "park.rpy", "characters.rpy", "variables.rpy"] {
        let written = fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(written, expected(name), "{name}");
    }

    assert_eq!(summary.scenes.len(), 3);
    assert_eq!(summary.init_files.len(), 2);
    assert_eq!(summary.rendered_labels(), 3);
}

#[test]
fn test_broken_dialogue_is_reported_not_fatal() {
    let dir = tempdir().unwrap();
    let summary = sample_converter().convert_all(dir.path(), &default_options()).unwrap();

    let failures: Vec<_> = summary.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].label_name, "broken");
    match &failures[0].error {
        Error::AmbiguousRoot { candidates, .. } => assert_eq!(candidates.len(), 2),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!summary.is_complete());
    assert_eq!(fs::read_to_string(dir.path().join("extras.rpy")).unwrap(), "");
}

#[test]
fn test_conversion_is_repeatable() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let converter = sample_converter();

    converter.convert_all(first.path(), &default_options()).unwrap();
    converter.convert_all(second.path(), &default_options()).unwrap();
    // writing over existing output gives the same bytes again
    converter.convert_all(first.path(), &default_options()).unwrap();

    for name in ["script.rpy", "park.rpy", "extras.rpy", "characters.rpy", "variables.rpy"] {
        assert_eq!(
            fs::read(first.path().join(name)).unwrap(),
            fs::read(second.path().join(name)).unwrap(),
            "{name}"
        );
    }
}

#[test]
fn test_parallel_output_is_identical() {
    let converter = sample_converter();
    for target in ["script.rpy", "park.rpy", "extras.rpy"] {
        let sequential = converter.render_scene_file(target, false).unwrap();
        let parallel = converter.render_scene_file(target, true).unwrap();
        assert_eq!(sequential.text, parallel.text);
        assert_eq!(sequential.rendered, parallel.rendered);
    }
}

#[test]
fn test_selected_scenes_only() {
    let dir = tempdir().unwrap();
    let options = ConvertOptions {
        scenes: vec!["park.rpy".to_string()],
        ..Default::default()
    };
    let summary = sample_converter().convert_all(dir.path().join("out"), &options).unwrap();

    assert_eq!(summary.scenes.len(), 1);
    assert!(summary.is_complete());
    assert!(summary.init_files.is_empty());
    assert!(dir.path().join("out").join("park.rpy").exists());
    assert!(!dir.path().join("out").join("script.rpy").exists());
}

#[test]
fn test_walk_order_of_sample_dialogue() {
    let converter = sample_converter();
    let ids = order_ids(converter.graph(), "0x0100000000000D01").unwrap();
    assert_eq!(
        ids,
        vec![
            "0x0100000000000F01",
            "0x0100000000000E01",
            "0x0100000000000A02",
            "0x0100000000000D03",
            "0x0100000000000A01",
            "0x0100000000000F02",
            "0x0100000000000B01",
        ]
    );
}

#[test]
fn test_config_formatting_applies() {
    let config = ProjectConfig::parse(
        r#"
        [output]
        indent_width = 2
        character_class = "DynamicCharacter"
        "#,
    )
    .unwrap();
    let converter = Converter::from_file(
        fixture("export.json"),
        &config.export,
        RenderOptions::from(&config.output),
    )
    .unwrap();

    let park = converter.render_scene_file("park.rpy", false).unwrap();
    assert_eq!(park.text, "label park:\n  \"Birds are singing.\"\n  faye \"Lovely.\"\n  jump cafe\n");
    assert!(
        converter
            .render_init(InitKind::Character)
            .contains("define faye = DynamicCharacter(\"Faye\", color=\"#c8ffc8\")")
    );
}

#[test]
fn test_single_file_and_init_writers() {
    let dir = tempdir().unwrap();
    let converter = sample_converter();

    let report = converter
        .write_scene_file("script.rpy", dir.path().join("nested").join("script.rpy"), false)
        .unwrap();
    assert_eq!(report.rendered, 2);
    assert_eq!(fs::read_to_string(&report.path).unwrap(), expected("script.rpy"));

    let path = converter
        .write_init_file("variables".parse().unwrap(), dir.path().join("vars.rpy"))
        .unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), expected("variables.rpy"));

    let err = converter.write_scene_file("nowhere.rpy", dir.path().join("x.rpy"), false).unwrap_err();
    assert!(matches!(err, Error::UnknownTargetFile(_)));
}
