use super::*;

fn sample() -> Table {
    Table::from_rows(
        &["id", "name", "score"],
        vec![
            vec![
                Cell::Integer(1),
                Cell::Text("ada".to_string()),
                Cell::Float(9.5),
            ],
            vec![Cell::Integer(2), Cell::Missing, Cell::Float(7.0)],
        ],
    )
    .unwrap()
}

#[test]
fn test_from_rows_builds_columns() {
    let table = sample();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.column_names(), vec!["id", "name", "score"]);
    assert_eq!(
        table.column("id").unwrap().column_type(),
        ColumnType::Integer
    );
    assert_eq!(table.column("name").unwrap().column_type(), ColumnType::Text);
    assert_eq!(table.column("name").unwrap().missing_count(), 1);
}

#[test]
fn test_from_rows_rejects_ragged_row() {
    let err = Table::from_rows(&["a", "b"], vec![vec![Cell::Integer(1)]]).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput { .. }));
}

#[test]
fn test_new_rejects_unequal_columns() {
    let err = Table::new(vec![
        Column::new("a", vec![Cell::Integer(1), Cell::Integer(2)]),
        Column::new("b", vec![Cell::Integer(1)]),
    ])
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput { .. }));
}

#[test]
fn test_new_rejects_duplicate_names() {
    let err = Table::new(vec![
        Column::new("a", vec![Cell::Integer(1)]),
        Column::new("a", vec![Cell::Integer(2)]),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("duplicate column name 'a'"));
}

#[test]
fn test_empty_table_with_columns() {
    let table = Table::new(vec![Column::new("a", vec![]), Column::new("b", vec![])]).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.column_count(), 2);
    assert!(table.row(0).is_none());
}

#[test]
fn test_column_type_inference() {
    assert_eq!(
        ColumnType::infer(&[Cell::Integer(1), Cell::Missing]),
        ColumnType::Integer
    );
    assert_eq!(
        ColumnType::infer(&[Cell::Integer(1), Cell::Float(2.5)]),
        ColumnType::Float
    );
    assert_eq!(
        ColumnType::infer(&[Cell::Float(2.5), Cell::Text("x".to_string())]),
        ColumnType::Text
    );
    assert_eq!(ColumnType::infer(&[Cell::Missing]), ColumnType::Empty);
}

#[test]
fn test_missing_is_distinct_from_empty_text_and_zero() {
    assert_ne!(Cell::Missing, Cell::Text(String::new()));
    assert_ne!(Cell::Missing, Cell::Integer(0));
    assert_eq!(Cell::Missing, Cell::Missing);
}

#[test]
fn test_float_equality_normalizes_zero_and_nan() {
    assert_eq!(Cell::Float(0.0), Cell::Float(-0.0));
    assert_eq!(Cell::Float(f64::NAN), Cell::Float(f64::NAN));
    assert_ne!(Cell::Float(1.0), Cell::Integer(1));
}

#[test]
fn test_render() {
    assert_eq!(Cell::Missing.render(), "");
    assert_eq!(Cell::Integer(-4).render(), "-4");
    assert_eq!(Cell::Float(3.0).render(), "3.0");
    assert_eq!(Cell::Float(0.25).render(), "0.25");
    assert_eq!(Cell::Text("a,b".to_string()).render(), "a,b");
}

#[test]
fn test_row_access() {
    let table = sample();
    let row = table.row(1).unwrap();
    assert_eq!(row.index(), 1);
    assert_eq!(row.get("id"), Some(&Cell::Integer(2)));
    assert_eq!(row.get("name"), Some(&Cell::Missing));
    assert_eq!(row.get("nope"), None);
    let names: Vec<&str> = row.cells().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["id", "name", "score"]);
}

#[test]
fn test_head() {
    let table = sample();
    let head = table.head(1);
    assert_eq!(head.row_count(), 1);
    assert_eq!(head.column_names(), table.column_names());
    assert_eq!(table.head(10), table);
}

#[test]
fn test_row_serializes_in_column_order() {
    let table = sample();
    let json = serde_json::to_string(&table.row(1).unwrap()).unwrap();
    assert_eq!(json, r#"{"id":2,"name":null,"score":7.0}"#);
}

#[test]
fn test_metadata() {
    let meta = sample().metadata("people.csv", 42);
    assert_eq!(meta.name, "people.csv");
    assert_eq!(meta.size, 42);
    assert_eq!(meta.rows, 2);
    assert_eq!(meta.columns, 3);
    assert_eq!(meta.column_names, vec!["id", "name", "score"]);
}
