mod support;

use domo::{Column, ColumnType, Reflector, Schema, SchemaDiff, diff, diff_by_name, diff_by_position, find_schema_changes, has_schema_changed};
use support::{DomoEmbeddedSample, DomoNestedSample};

fn remote(columns: &[(&str, ColumnType)]) -> Schema {
    columns.iter().map(|(name, ty)| Column::new(*name, *ty)).collect()
}

fn embedded_sample_remote() -> Vec<(&'static str, ColumnType)> {
    vec![
        ("blah", ColumnType::Decimal),
        ("firstBlahDay", ColumnType::Date),
        ("firstBlahTime", ColumnType::Datetime),
        ("foo", ColumnType::String),
        ("bar", ColumnType::Long),
        ("baz", ColumnType::Double),
        ("BazBar", ColumnType::Long),
        ("obar", ColumnType::Long),
        ("obaz", ColumnType::Double),
    ]
}

#[test]
fn schema_matches_itself() {
    let reflector = Reflector::new();
    let local = reflector.generate_schema::<DomoEmbeddedSample>();
    assert_eq!(diff(&local, &local).diffs_count(), 0);
    assert_eq!(
        diff(&local, &reflector.generate_schema::<DomoNestedSample>()).diffs_count(),
        0
    );
    assert!(find_schema_changes(&local, &remote(&embedded_sample_remote())).is_ok());
}

#[test]
fn name_matching_without_differences() {
    let local = Reflector::new().generate_schema::<DomoEmbeddedSample>();
    let diffs = diff_by_name(&local, &remote(&embedded_sample_remote()));
    assert_eq!(diffs.diffs_count(), 0, "{diffs}");
}

#[test]
fn name_matching_finds_added_column() {
    let local = Reflector::new().generate_schema::<DomoEmbeddedSample>();
    let mut columns = embedded_sample_remote();
    columns.retain(|(name, _)| *name != "obaz");
    let diffs = diff(&local, &remote(&columns));

    assert_eq!(diffs.diffs_count(), 1, "{diffs}");
    let added = &diffs.columns_to_add[0];
    assert_eq!(added.compared_column_name.as_deref(), Some("obaz"));
    assert_eq!(added.compared_column_type, Some(ColumnType::Double));
    assert_eq!(added.remote_column_name, None);
}

#[test]
fn name_matching_finds_added_column_and_type_change() {
    let local = Reflector::new().generate_schema::<DomoEmbeddedSample>();
    let mut columns = embedded_sample_remote();
    columns.retain(|(name, _)| *name != "obaz");
    columns[4] = ("bar", ColumnType::String);
    let diffs = diff(&local, &remote(&columns));

    assert_eq!(diffs.diffs_count(), 2, "{diffs}");
    assert_eq!(diffs.columns_to_add.len(), 1);
    let retyped = &diffs.type_mismatches[0];
    assert_eq!(retyped.remote_column_name.as_deref(), Some("bar"));
    assert_eq!(retyped.remote_column_index, Some(4));
    assert_eq!(retyped.remote_column_type, Some(ColumnType::String));
    assert_eq!(retyped.compared_column_type, Some(ColumnType::Long));
}

#[test]
fn name_matching_finds_column_to_delete() {
    let local = Reflector::new().generate_schema::<DomoEmbeddedSample>();
    let mut columns = embedded_sample_remote();
    columns.push(("ColumnInDomoToDelete", ColumnType::String));
    let diffs = diff(&local, &remote(&columns));

    assert_eq!(diffs.diffs_count(), 1, "{diffs}");
    let deleted = &diffs.columns_to_delete[0];
    assert_eq!(deleted.remote_column_name.as_deref(), Some("ColumnInDomoToDelete"));
    assert_eq!(deleted.remote_column_type, Some(ColumnType::String));
    assert_eq!(deleted.remote_column_index, Some(9));
    assert_eq!(deleted.compared_column_name, None);
}

#[test]
fn positional_comparison_finds_name_and_type_changes() {
    let local = Reflector::new().generate_schema::<DomoEmbeddedSample>();
    let mut columns = embedded_sample_remote();
    columns[0] = ("blahblah", ColumnType::Decimal);
    columns[8] = ("obaz", ColumnType::Long);
    let diffs = diff_by_position(&local, &remote(&columns));

    assert_eq!(diffs.diffs_count(), 2, "{diffs}");
    let renamed = &diffs.name_mismatches[0];
    assert_ne!(renamed.remote_column_name, renamed.compared_column_name);
    assert_eq!(renamed.remote_column_index, Some(0));
    let retyped = &diffs.type_mismatches[0];
    assert_ne!(retyped.remote_column_type, retyped.compared_column_type);
    assert_eq!(retyped.remote_column_index, Some(8));
    assert!(has_schema_changed(&local, &remote(&columns)));
}

#[test]
fn renamed_column_with_count_change_is_delete_plus_add() {
    let local = Reflector::new().generate_schema::<DomoEmbeddedSample>();
    let mut columns = embedded_sample_remote();
    columns[3] = ("Foo", ColumnType::String);
    columns.push(("legacy", ColumnType::Long));
    let diffs = diff(&local, &remote(&columns));

    let deleted: Vec<_> = diffs
        .columns_to_delete
        .iter()
        .filter_map(|m| m.remote_column_name.as_deref())
        .collect();
    assert_eq!(deleted, ["Foo", "legacy"]);
    assert_eq!(diffs.columns_to_add[0].compared_column_name.as_deref(), Some("foo"));
    assert!(diffs.name_mismatches.is_empty());
}

#[test]
fn diff_result_doubles_as_error() {
    let local = Reflector::new().generate_schema::<DomoEmbeddedSample>();
    let err: SchemaDiff = find_schema_changes(&local, &Schema::default()).unwrap_err();
    assert_eq!(err.columns_to_add.len(), 9);

    let boxed: Box<dyn std::error::Error> = Box::new(err);
    let report = boxed.to_string();
    assert!(report.starts_with("9 schema differences found:\n"));
    assert_eq!(report.lines().count(), 10);
}

#[test]
fn remote_schema_from_json_body() {
    let body = r#"{
        "columns": [
            { "type": "DECIMAL", "name": "blah" },
            { "type": "DATE", "name": "firstBlahDay" },
            { "type": "DATETIME", "name": "firstBlahTime" },
            { "type": "STRING", "name": "foo" },
            { "type": "LONG", "name": "bar" },
            { "type": "DOUBLE", "name": "baz" },
            { "type": "LONG", "name": "BazBar" },
            { "type": "LONG", "name": "obar" },
            { "type": "DOUBLE", "name": "obaz" }
        ]
    }"#;
    let remote: Schema = serde_json::from_str(body).unwrap();
    let local = Reflector::new().generate_schema::<DomoNestedSample>();
    assert!(!has_schema_changed(&local, &remote));
}
