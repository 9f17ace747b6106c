use triplequery::{
    Column, Direction, RDF_TYPE, SearchMethod, Table, TripleError, clean,
    fixtures::{TripleKind, dummy_table, dummy_triples, dummy_triples_for, entity_ids},
    neighbor_attr_triples, neighbor_rel_triples, neighbor_set, search, select, select_by_type,
    select_rel,
};

fn is_shape_error<T>(result: Result<T, TripleError>, found: usize) -> bool {
    matches!(result, Err(TripleError::Shape { found: f }) if f == found)
}

#[test]
fn test_triple_tables_pass_every_operation() {
    let rel = dummy_triples(10, TripleKind::Relation, 42);
    let attr = dummy_triples_for(&entity_ids(10), 10, TripleKind::Attribute, 42);
    let mut attr_copy = attr.clone();
    assert!(clean(&mut attr_copy).is_ok());
    assert!(select(&rel, "e0", Column::Head).is_ok());
    assert!(select_rel(&rel, "rel0").is_ok());
    assert!(select_by_type(&rel, "type1", RDF_TYPE).is_ok());
    assert!(search(&attr_copy, "lorem", SearchMethod::Close).is_ok());
    assert!(neighbor_set(&rel, "e0", Direction::Both).is_ok());
    assert!(neighbor_rel_triples(&rel, "e0", Direction::Both, true).is_ok());
    assert!(neighbor_attr_triples(&rel, &attr, "e0", Direction::Both).is_ok());
}

#[test]
fn test_wide_tables_fail_every_operation() {
    let bad = dummy_table(10, 5, 42);
    let mut bad_copy = bad.clone();
    assert!(is_shape_error(clean(&mut bad_copy), 5));
    assert_eq!(bad_copy, bad);
    assert!(is_shape_error(select(&bad, "e0", Column::Head), 5));
    assert!(is_shape_error(select_rel(&bad, "rel0"), 5));
    assert!(is_shape_error(select_by_type(&bad, "type1", RDF_TYPE), 5));
    assert!(is_shape_error(search(&bad, "x", SearchMethod::Exact), 5));
    assert!(is_shape_error(neighbor_set(&bad, "e0", Direction::Both), 5));
    assert!(is_shape_error(
        neighbor_rel_triples(&bad, "e0", Direction::Both, true),
        5
    ));
}

#[test]
fn test_neighbor_attr_triples_checks_both_tables() {
    let rel = dummy_triples(10, TripleKind::Relation, 1);
    let attr = dummy_triples(10, TripleKind::Attribute, 1);
    let bad = dummy_table(10, 5, 1);
    assert!(is_shape_error(
        neighbor_attr_triples(&bad, &attr, "e0", Direction::Both),
        5
    ));
    assert!(is_shape_error(
        neighbor_attr_triples(&rel, &bad, "e0", Direction::Both),
        5
    ));
}

#[test]
fn test_narrow_tables_fail_with_count_in_message() {
    let bad = dummy_table(3, 2, 9);
    let err = select(&bad, "e0", Column::Head).unwrap_err();
    assert!(err.to_string().contains("does not contain triples"));
    assert!(err.to_string().contains("found 2 columns"));
}

#[test]
fn test_renamed_columns_are_read_by_position() {
    let table = Table::from_triples([("e1", "rel0", "e2"), ("e2", "rel1", "e3")])
        .with_columns(vec!["subject", "predicate", "object"])
        .expect("rename");
    let found = select_rel(&table, "rel1").expect("select rel");
    assert_eq!(found.columns(), &["subject", "predicate", "object"]);
    assert_eq!(found.text(0, 0), Some("e2"));
}
