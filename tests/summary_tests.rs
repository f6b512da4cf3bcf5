use std::fs;
use tempfile::tempdir;
use valhook::{JsonLinesSummaryWriter, SummaryWriter};

#[test]
fn test_json_lines_writer_appends_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("summaries.jsonl");

    {
        let writer = JsonLinesSummaryWriter::create(&path).unwrap();
        writer.add_summary("val_error", 0.25, 100);
        writer.add_summary("val_cost", 2.75, 100);
        writer.flush();
    }
    {
        let writer = JsonLinesSummaryWriter::create(&path).unwrap();
        writer.add_summary("val_error", f64::NAN, 200);
    }

    let contents = fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["name"], "val_error");
    assert_eq!(records[0]["value"], 0.25);
    assert_eq!(records[0]["step"], 100);
    assert_eq!(records[1]["value"], 2.75);
    assert!(records[2]["value"].is_null());
    assert!(records[2]["wall_time"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_json_lines_writer_bad_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("summaries.jsonl");
    assert!(JsonLinesSummaryWriter::create(path).is_err());
}
