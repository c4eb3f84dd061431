use super::*;
use crate::ingest::ingest;

fn table(csv: &str) -> Table {
    ingest(csv.as_bytes(), "t.csv").unwrap().0
}

fn ops(remove_missing: bool, remove_duplicates: bool, columns: Option<&[&str]>) -> CleaningOperations {
    CleaningOperations {
        remove_missing,
        remove_duplicates,
        columns: columns.map(|c| c.iter().map(|s| s.to_string()).collect()),
    }
}

const MESSY: &str = "id,city,score\n\
1,Ankara,10\n\
2,,20\n\
1,Ankara,10\n\
3,Izmir,\n\
4,Izmir,30\n\
2,,20\n";

#[test]
fn test_upload_scenario_yields_single_row() {
    let t = table("a,b\n1,2\n1,2\n,3\n");
    let cleaned = clean(&t, &ops(true, true, None)).unwrap();
    assert_eq!(cleaned.row_count(), 1);
    let row = cleaned.row(0).unwrap();
    assert_eq!(row.get("a"), Some(&Cell::Integer(1)));
    assert_eq!(row.get("b"), Some(&Cell::Integer(2)));
}

#[test]
fn test_no_operations_is_identity() {
    let t = table(MESSY);
    assert_eq!(clean(&t, &ops(false, false, None)).unwrap(), t);
    assert_eq!(clean(&t, &ops(false, false, Some(&["city"]))).unwrap(), t);
}

#[test]
fn test_never_adds_rows_or_changes_columns() {
    let t = table(MESSY);
    for operations in [
        ops(true, false, None),
        ops(false, true, None),
        ops(true, true, None),
        ops(true, true, Some(&["city"])),
    ] {
        let cleaned = clean(&t, &operations).unwrap();
        assert!(cleaned.row_count() <= t.row_count());
        assert_eq!(cleaned.column_names(), t.column_names());
    }
}

#[test]
fn test_remove_missing_all_columns() {
    let t = table(MESSY);
    let cleaned = clean(&t, &ops(true, false, None)).unwrap();
    let ids: Vec<&Cell> = cleaned.rows().map(|r| r.get("id").unwrap()).collect();
    assert_eq!(
        ids,
        vec![&Cell::Integer(1), &Cell::Integer(1), &Cell::Integer(4)]
    );
}

#[test]
fn test_remove_missing_scoped() {
    let t = table(MESSY);
    let cleaned = clean(&t, &ops(true, false, Some(&["score"]))).unwrap();
    // Only the row with a missing score goes; missing cities stay.
    assert_eq!(cleaned.row_count(), 5);
    assert!(cleaned
        .rows()
        .all(|r| !r.get("score").unwrap().is_missing()));
}

#[test]
fn test_remove_duplicates_keeps_first_occurrence() {
    let t = table(MESSY);
    let cleaned = clean(&t, &ops(false, true, None)).unwrap();
    let ids: Vec<&Cell> = cleaned.rows().map(|r| r.get("id").unwrap()).collect();
    assert_eq!(
        ids,
        vec![
            &Cell::Integer(1),
            &Cell::Integer(2),
            &Cell::Integer(3),
            &Cell::Integer(4)
        ]
    );
}

#[test]
fn test_remove_duplicates_treats_missing_as_equal() {
    let t = table("a,b\n,1\n,1\n");
    let cleaned = clean(&t, &ops(false, true, None)).unwrap();
    assert_eq!(cleaned.row_count(), 1);
}

#[test]
fn test_remove_duplicates_scoped() {
    let t = table(MESSY);
    let cleaned = clean(&t, &ops(false, true, Some(&["city"]))).unwrap();
    let cities: Vec<String> = cleaned
        .rows()
        .map(|r| r.get("city").unwrap().render())
        .collect();
    assert_eq!(cities, vec!["Ankara", "", "Izmir"]);
    // The retained Izmir row is the earlier one (id 3).
    assert_eq!(cleaned.row(2).unwrap().get("id"), Some(&Cell::Integer(3)));
}

#[test]
fn test_missing_removal_runs_before_duplicate_removal() {
    // Row 0 is missing b; row 1 duplicates row 0 on `a`. Dropping missing
    // first means row 1 survives the duplicate pass.
    let t = table("a,b\n1,\n1,2\n");
    let cleaned = clean(&t, &ops(true, true, Some(&["a", "b"]))).unwrap();
    assert_eq!(cleaned.row_count(), 1);
    assert_eq!(cleaned.row(0).unwrap().get("b"), Some(&Cell::Integer(2)));

    let by_a = clean(&t, &ops(true, false, None))
        .and_then(|t| remove_duplicate_rows(&t, Some(&["a".to_string()])))
        .unwrap();
    assert_eq!(by_a.row(0).unwrap().get("b"), Some(&Cell::Integer(2)));
}

#[test]
fn test_duplicate_removal_is_idempotent() {
    let t = table(MESSY);
    let once = clean(&t, &ops(false, true, None)).unwrap();
    let twice = clean(&once, &ops(false, true, None)).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_missing_removal_is_idempotent() {
    let t = table(MESSY);
    let once = clean(&t, &ops(true, false, None)).unwrap();
    let twice = clean(&once, &ops(true, false, None)).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_empty_table_is_returned_unchanged() {
    let t = table("a,b\n");
    assert_eq!(clean(&t, &ops(true, true, None)).unwrap(), t);
    // Column validation is skipped for tables without rows.
    assert_eq!(clean(&t, &ops(true, true, Some(&["z"]))).unwrap(), t);
}

#[test]
fn test_unknown_column_is_rejected() {
    let t = table(MESSY);
    let err = clean(&t, &ops(true, false, Some(&["z"]))).unwrap_err();
    match err {
        CoreError::UnknownColumn { name, available } => {
            assert_eq!(name, "z");
            assert_eq!(available, "id, city, score");
        }
        other => panic!("expected UnknownColumn, got {:?}", other),
    }
}

#[test]
fn test_unknown_column_is_rejected_without_operations() {
    let t = table(MESSY);
    let err = clean(&t, &ops(false, false, Some(&["z"]))).unwrap_err();
    assert!(matches!(err, CoreError::UnknownColumn { .. }));
}

#[test]
fn test_empty_column_list_is_invalid() {
    let t = table(MESSY);
    let err = clean(&t, &ops(false, true, Some(&[]))).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput { .. }));
}

#[test]
fn test_table_without_columns_is_noop() {
    let t = Table::default();
    assert!(clean(&t, &ops(true, true, None)).unwrap().is_empty());
}

#[test]
fn test_input_is_not_mutated() {
    let t = table(MESSY);
    let before = t.clone();
    let _ = clean(&t, &ops(true, true, None)).unwrap();
    assert_eq!(t, before);
}

#[test]
fn test_operations_deserialize_with_defaults() {
    let parsed: CleaningOperations = serde_json::from_str("{}").unwrap();
    assert!(parsed.is_noop());
    assert_eq!(parsed.columns, None);

    let parsed: CleaningOperations =
        serde_json::from_str(r#"{"remove_duplicates": true, "columns": ["a"]}"#).unwrap();
    assert!(!parsed.remove_missing);
    assert!(parsed.remove_duplicates);
    assert_eq!(parsed.columns, Some(vec!["a".to_string()]));
}
