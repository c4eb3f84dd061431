use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use vt_core::ingest;

#[test]
fn test_render_table_aligns_columns() {
    let (table, _) = ingest(b"name,qty\nwidget,3\nab,\n", "t.csv").unwrap();
    assert_eq!(
        render_table(&table),
        "name    qty\n------  ---\nwidget  3\nab\n"
    );
}

#[test]
fn test_report_serializes_metadata_and_preview() {
    let (table, metadata) = ingest(b"a,b\n1,x\n,y\n", "t.csv").unwrap();
    let report = InspectReport {
        metadata: &metadata,
        column_types: column_summaries(&table),
        preview: table.head(1),
    };
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["name"], "t.csv");
    assert_eq!(json["rows"], 2);
    assert_eq!(json["column_types"][0]["type"], "integer");
    assert_eq!(json["column_types"][0]["missing"], 1);
    assert_eq!(json["column_types"][1]["type"], "text");
    assert_eq!(json["preview"].as_array().unwrap().len(), 1);
    assert_eq!(json["preview"][0]["b"], "x");
}

#[tokio::test]
async fn test_inspect_reads_file() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("in.csv");
    fs::write(&input, "a\n1\n").unwrap();

    let args = InspectArgs {
        input,
        rows: 5,
        output: InspectOutput::Json,
    };
    execute(&args, &GlobalArgs::default()).await.unwrap();
}

#[tokio::test]
async fn test_inspect_rejects_empty_file() {
    let temp_dir = tempdir().unwrap();
    let input: PathBuf = temp_dir.path().join("empty.csv");
    fs::write(&input, "").unwrap();

    let args = InspectArgs {
        input,
        rows: 5,
        output: InspectOutput::Table,
    };
    assert!(execute(&args, &GlobalArgs::default()).await.is_err());
}
