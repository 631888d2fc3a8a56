use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::export::{
    ExportError, ExportMode, ExportOptions, Exported, OutputFormat, export_files, extract_sources,
    read_inputs, render, run, write_output,
};
use crate::test_utils::{SAMPLE_STYLESHEET, write_stylesheet};

#[test]
fn test_output_format_from_str() {
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
    assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
    assert!(matches!(
        "toml".parse::<OutputFormat>(),
        Err(ExportError::UnsupportedFormat { format }) if format == "toml"
    ));
}

#[test]
fn test_export_mode_from_str() {
    assert_eq!("array".parse::<ExportMode>().unwrap(), ExportMode::Array);
    assert_eq!("structured".parse::<ExportMode>().unwrap(), ExportMode::Structured);
    assert!("nested".parse::<ExportMode>().is_err());
}

#[test]
fn test_read_inputs_requires_files() {
    assert!(matches!(read_inputs(&[]), Err(ExportError::NoInput)));
}

#[test]
fn test_read_inputs_reports_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.scss");

    match read_inputs(&[missing.clone()]) {
        Err(ExportError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected IO error, got {:?}", other),
    }
}

#[test]
fn test_extract_sources_structured_merges_in_order() {
    let sources = vec![
        "$a: 1;\n//@sass-export-section=\"colors\"\n$red: #f00;".to_string(),
        "$b: 2;\n//@sass-export-section=\"colors\"\n$blue: #00f;".to_string(),
    ];

    let Exported::Structured(result) = extract_sources(&sources, ExportMode::Structured) else {
        panic!("Expected structured export");
    };
    let variables: Vec<&str> = result
        .section("variables")
        .unwrap()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    let colors: Vec<&str> = result
        .section("colors")
        .unwrap()
        .iter()
        .map(|d| d.name.as_str())
        .collect();

    assert_eq!(variables, vec!["a", "b"]);
    assert_eq!(colors, vec!["red", "blue"]);
}

#[test]
fn test_extract_sources_array_concatenates() {
    let sources = vec!["$a: 1;".to_string(), String::new(), "$b: 2;\n$c: 3;".to_string()];

    let Exported::Array(declarations) = extract_sources(&sources, ExportMode::Array) else {
        panic!("Expected array export");
    };
    let names: Vec<&str> = declarations.iter().map(|d| d.name.as_str()).collect();

    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_render_json() {
    let exported = extract_sources(&[SAMPLE_STYLESHEET.to_string()], ExportMode::Structured);
    let compact = render(&exported, OutputFormat::Json, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&compact).unwrap();

    assert_eq!(value["variables"].as_array().unwrap().len(), 3);
    assert_eq!(value["variables"][2]["mapValue"][1]["value"], "1200px");
    assert_eq!(value["colors"][0]["metaData"]["description"], "Brand gray");
    assert_eq!(value["colors-params"]["displayName"], "Colors");
    assert!(!compact.contains('\n'));

    let pretty = render(&exported, OutputFormat::Json, true).unwrap();
    assert!(pretty.contains('\n'));
    assert_eq!(serde_json::from_str::<serde_json::Value>(&pretty).unwrap(), value);
}

#[test]
fn test_render_yaml() {
    let exported = extract_sources(&[SAMPLE_STYLESHEET.to_string()], ExportMode::Array);
    let yaml = render(&exported, OutputFormat::Yaml, false).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(value[0]["name"].as_str(), Some("black"));
    assert_eq!(value[3]["mapValue"][0]["name"].as_str(), Some("small"));
}

#[test]
fn test_render_empty_structured() {
    let exported = extract_sources(&[String::new()], ExportMode::Structured);

    assert!(exported.is_empty());
    assert_eq!(render(&exported, OutputFormat::Json, false).unwrap(), "{}");
}

#[test]
fn test_write_output_creates_directories() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("tokens").join("variables.json");

    write_output(Some(output.as_path()), "{}").unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "{}");
}

#[test]
fn test_export_files() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_stylesheet(temp_dir.path(), "theme.scss", SAMPLE_STYLESHEET);
    let options = ExportOptions {
        inputs: vec![input],
        mode: ExportMode::Array,
        ..Default::default()
    };

    let rendered = export_files(&options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value.as_array().unwrap().len(), 4);
    assert_eq!(value[2]["name"], "brand-gray");
    assert!(value[2].get("metaData").is_none());
}

#[test]
fn test_run_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_stylesheet(temp_dir.path(), "a.scss", "$a: 1;");
    let second = write_stylesheet(temp_dir.path(), "b.scss", "//@sass-export-section=\"b\"\n$b: 2;");
    let output: PathBuf = temp_dir.path().join("out.yaml");
    let options = ExportOptions {
        inputs: vec![first, second],
        output: Some(output.clone()),
        mode: ExportMode::Structured,
        format: OutputFormat::Yaml,
        pretty: true,
    };

    run(&options).unwrap();

    let value: serde_yaml::Value = serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["variables"][0]["name"].as_str(), Some("a"));
    assert_eq!(value["b"][0]["value"].as_str(), Some("2"));
}
