//! End-to-end processing of kiwi sources

use kiwi::kiwi::config::{KiwiConfig, Loader};
use kiwi::kiwi::parsing::ParseError;
use kiwi::kiwi::processor::{process_file, process_source, ProcessingError, ProcessingSpec};
use std::fs;
use std::path::PathBuf;

const SOURCE: &str = "package demo\nimport a.b as c\nfun main(): Unit\n";

fn spec(name: &str) -> ProcessingSpec {
    ProcessingSpec::from_string(name).unwrap()
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kiwi-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn token_simple_lists_one_token_per_line() {
    let output = process_source("package a\n", &spec("token-simple"), &KiwiConfig::default()).unwrap();
    let lines: Vec<_> = output.lines().map(str::trim_start).collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("1:1"));
    assert!(lines[0].contains("NAME"));
    assert!(lines[0].ends_with("\"package\""));
    assert!(lines[1].starts_with("1:9"));
    assert!(lines[2].contains("NEWLINE"));
    assert!(lines[3].starts_with("2:1"));
    assert!(lines[3].contains("ENDMARKER"));
}

#[test]
fn token_json_is_an_array_of_tokens() {
    let output = process_source("$x", &spec("token-json"), &KiwiConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let tokens = value.as_array().unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0]["kind"], "CNAME");
    assert_eq!(tokens[0]["text"], "$x");
    assert_eq!(tokens[0]["start"]["column"], 1);
    assert_eq!(tokens[1]["kind"], "NEWLINE");
    assert_eq!(tokens[2]["kind"], "ENDMARKER");
}

#[test]
fn ast_json_tags_every_node_with_its_type() {
    let output = process_source(SOURCE, &spec("ast-json"), &KiwiConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["type"], "File");
    assert_eq!(value["package_header"]["type"], "PackageHeader");
    assert_eq!(value["imports"][0]["suffix"]["type"], "ImportAlias");
    assert_eq!(value["declarations"][0]["type"], "FunctionDeclaration");
    assert_eq!(value["declarations"][0]["return_type"]["type"], "UserType");
    assert_eq!(value["span"]["start"]["row"], 1);
}

#[test]
fn ast_yaml_renders_the_same_tree() {
    let output = process_source(SOURCE, &spec("ast-yaml"), &KiwiConfig::default()).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();

    assert_eq!(value["type"].as_str(), Some("File"));
    assert_eq!(
        value["declarations"][0]["identifier"]["token"]["text"].as_str(),
        Some("main")
    );
}

#[test]
fn ast_treeviz_starts_at_the_file() {
    let output = process_source(SOURCE, &spec("ast-treeviz"), &KiwiConfig::default()).unwrap();

    assert!(output.starts_with("File"));
    assert!(output.contains("FunctionDeclaration"));
    assert!(output.contains("\"main\""));
}

#[test]
fn syntax_errors_surface_as_parse_errors() {
    let result = process_source("package\n", &spec("ast-json"), &KiwiConfig::default());

    match result {
        Err(ProcessingError::Parse(ParseError::Forced { expected, .. })) => {
            assert_eq!(expected, "identifier");
        }
        other => panic!("expected a forced parse error, got {:?}", other),
    }
}

#[test]
fn process_file_reads_from_disk() {
    let path = scratch_file("demo.kiwi", SOURCE);
    let output = process_file(&path, &spec("ast-treeviz"), &KiwiConfig::default()).unwrap();

    assert!(output.contains("PackageHeader"));
}

#[test]
fn config_file_overrides_the_defaults() {
    let path = scratch_file("kiwi.toml", "[inspect]\nshow_spans = false\n\n[lexer]\nfuse_sigil_names = false\n");
    let config = Loader::new().with_file(&path).build().unwrap();

    assert!(!config.inspect.show_spans);
    assert!(!config.lexer.fuse_sigil_names);
    assert!(config.parser.packrat);

    let output = process_source("$x", &spec("token-json"), &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 4);
}

#[test]
fn later_layers_win_over_optional_ones() {
    let local = scratch_file("local.toml", "[parser]\npackrat = false\n\n[inspect]\nshow_spans = false\n");
    let explicit = scratch_file("explicit.toml", "[inspect]\nshow_spans = true\n");
    let config = Loader::new()
        .with_optional_file(&local)
        .with_file(&explicit)
        .build()
        .unwrap();

    assert!(!config.parser.packrat);
    assert!(config.inspect.show_spans);
}

#[test]
fn missing_config_file_is_an_error() {
    let missing = std::env::temp_dir().join("kiwi-tests-no-such-config.toml");
    assert!(Loader::new().with_file(missing).build().is_err());
}
