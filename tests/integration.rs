//! Integration tests for the extraction pipeline with real files

use std::fs;
use std::path::Path;

use chattune::parsers::{hinge_data_file_name, write_hinge_data};
use chattune::prelude::*;
use serde_json::Value;
use tempfile::{TempDir, tempdir};

/// Writes an Instagram inbox with two threads.
///
/// Messages are stored newest-first, as in a real export.
fn setup_inbox() -> TempDir {
    let dir = tempdir().unwrap();

    let sam = dir.path().join("sam_123");
    fs::create_dir_all(&sam).unwrap();
    fs::write(
        sam.join("message_1.json"),
        r#"{
  "participants": [{"name": "Sam"}, {"name": "Lydia"}],
  "messages": [
    {"sender_name": "Lydia", "timestamp_ms": 1705314780000, "content": "see you there https://maps.example.com/x"},
    {"sender_name": "Sam", "timestamp_ms": 1705314720000, "content": "at the cafe?"},
    {"sender_name": "Sam", "timestamp_ms": 1705314700000, "content": "Sam sent an attachment."},
    {"sender_name": "Lydia", "timestamp_ms": 1705314690000, "content": "hiii"},
    {"sender_name": "Lydia", "timestamp_ms": 1705314680000, "content": "omg hey"},
    {"sender_name": "Sam", "timestamp_ms": 1705314660000, "content": "wanna grab coffee"},
    {"sender_name": "Sam", "timestamp_ms": 1705314600000, "content": "hey"}
  ],
  "title": "Sam"
}"#,
    )
    .unwrap();

    let ana = dir.path().join("ana_456");
    fs::create_dir_all(&ana).unwrap();
    fs::write(
        ana.join("message_1.json"),
        r#"{
  "messages": [
    {"sender_name": "Ana", "timestamp_ms": 1705400060000, "content": "Liked a message"},
    {"sender_name": "Lydia", "timestamp_ms": 1705400030000, "content": "cafÃ© later?"},
    {"sender_name": "Ana", "timestamp_ms": 1705400000000, "content": "ð\u009f\u0098\u0082"},
    {"sender_name": "Ana", "timestamp_ms": 1705399990000, "photos": [{"uri": "a.jpg"}]}
  ]
}"#,
    )
    .unwrap();

    dir
}

fn write_hinge_export(dir: &Path) {
    fs::write(
        dir.join("matches.json"),
        r#"[
  {"chats": [
    {"body": "two truths and a lie, go", "timestamp": "2024-02-01 20:00:00"},
    {"body": "   ", "timestamp": "2024-02-01 20:01:00"}
  ]},
  {"like": [{"timestamp": "2024-02-02"}]},
  {"chats": [{"body": "I make a mean carbonara", "timestamp": "2024-02-03 19:00:00"}]}
]"#,
    )
    .unwrap();
    fs::write(
        dir.join("prompts.json"),
        r#"[
  {"prompt": "My simple pleasures", "text": "Sunday markets", "created": "2024-01-10"},
  {"prompt": "Empty", "text": "", "created": "2024-01-11"}
]"#,
    )
    .unwrap();
    fs::write(dir.join("user.json"), r#"{"profile": {"first_name": "Lydia"}}"#).unwrap();
}

#[test]
fn test_inbox_pairs() {
    let inbox = setup_inbox();
    let config = ExtractConfig::new(inbox.path(), "Lydia");

    let dataset = build_dataset(&config, &BoilerplateFilter::default()).unwrap();

    // ana_456 sorts first
    assert_eq!(
        dataset.records,
        vec![
            TrainingRecord::pair("😂", "café later?"),
            TrainingRecord::pair("wanna grab coffee", "omg hey"),
            // URL span removed, surrounding text kept as is
            TrainingRecord::pair("at the cafe?", "see you there "),
        ]
    );

    assert_eq!(dataset.stats.conversations, 2);
    assert_eq!(dataset.stats.messages_read, 11);
    assert_eq!(dataset.stats.pairs, 3);
    assert_eq!(dataset.stats.singletons, 0);
}

#[test]
fn test_no_fix_encoding_keeps_mojibake() {
    let inbox = setup_inbox();
    let config = ExtractConfig::new(inbox.path(), "Lydia").with_fix_encoding(false);

    let dataset = build_dataset(&config, &BoilerplateFilter::default()).unwrap();
    assert_eq!(dataset.records[0].assistant_content(), Some("cafÃ© later?"));
}

#[test]
fn test_unknown_self_name_yields_nothing() {
    let inbox = setup_inbox();
    let config = ExtractConfig::new(inbox.path(), "Nobody");

    let dataset = build_dataset(&config, &BoilerplateFilter::default()).unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.stats.conversations, 2);
}

#[test]
fn test_missing_inbox_is_io_error() {
    let dir = tempdir().unwrap();
    let config = ExtractConfig::new(dir.path().join("nope"), "Lydia");

    let err = build_dataset(&config, &BoilerplateFilter::default()).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_malformed_conversation_names_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("message_1.json"), "{ not json").unwrap();
    let config = ExtractConfig::new(dir.path(), "Lydia");

    let err = build_dataset(&config, &BoilerplateFilter::default()).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("message_1.json"));
}

#[test]
fn test_hinge_clean_then_extract() {
    let export = tempdir().unwrap();
    write_hinge_export(export.path());
    let clean_dir = export.path().join("Clean_data");

    let data = HingeParser::new()
        .parse_dir(&HingeConfig::new(export.path(), &clean_dir))
        .unwrap();
    assert_eq!(data.user_name, "Lydia");
    assert_eq!(data.messages.len(), 2);
    assert_eq!(data.prompts.len(), 1);

    let path = write_hinge_data(&data, &clean_dir).unwrap();
    assert_eq!(path, clean_dir.join(hinge_data_file_name("Lydia")));
    assert!(path.ends_with("lydia_hinge_data.json"));

    let inbox = setup_inbox();
    let output = export.path().join("out.jsonl");
    let config = ExtractConfig::new(inbox.path(), "Lydia")
        .with_hinge_data(&path)
        .with_output(&output);

    let dataset = build_dataset(&config, &BoilerplateFilter::default()).unwrap();
    assert_eq!(dataset.stats.pairs, 3);
    assert_eq!(dataset.stats.singletons, 3);

    // Hinge records follow the Instagram pairs
    let tail: Vec<_> = dataset.records[3..]
        .iter()
        .map(|r| r.assistant_content().unwrap())
        .collect();
    assert_eq!(
        tail,
        vec!["two truths and a lie, go", "I make a mean carbonara", "Sunday markets"]
    );
    assert!(dataset.records[3..].iter().all(|r| !r.is_pair()));

    let written = write_jsonl(&dataset.records, &output).unwrap();
    assert_eq!(written, 6);
}

#[test]
fn test_jsonl_file_shape() {
    let inbox = setup_inbox();
    let dir = tempdir().unwrap();
    let output = dir.path().join("formatted_finetuning_data.jsonl");
    let config = ExtractConfig::new(inbox.path(), "Lydia").with_output(&output);

    let dataset = build_dataset(&config, &BoilerplateFilter::default()).unwrap();
    write_jsonl(&dataset.records, &output).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), dataset.len());

    for (line, record) in lines.iter().zip(&dataset.records) {
        let value: Value = serde_json::from_str(line).unwrap();
        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");

        let parsed: TrainingRecord = serde_json::from_str(line).unwrap();
        assert_eq!(&parsed, record);
    }
}

#[test]
fn test_custom_filter_rules() {
    let inbox = setup_inbox();
    let config = ExtractConfig::new(inbox.path(), "Lydia");
    let filter = BoilerplateFilter::default()
        .with_pattern("^omg")
        .unwrap();

    let dataset = build_dataset(&config, &filter).unwrap();
    // "omg hey" is gone, so "hiii" answers "wanna grab coffee"
    assert!(dataset.records.contains(&TrainingRecord::pair("wanna grab coffee", "hiii")));
}
