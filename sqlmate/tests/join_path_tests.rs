//! Join path resolution tests

#[path = "testutils/mod.rs"]
mod testutils;

use sqlmate::{GraphError, JoinPathResolver, SchemaGraph, SnapshotIntrospector, SnapshotTable, SqlMateConfig};
use testutils::test_fixture::{init_logging, TestFixture};

fn build(tables: Vec<SnapshotTable>) -> SchemaGraph {
    init_logging();
    SchemaGraph::build(&SnapshotIntrospector::new(tables), &SqlMateConfig::default()).unwrap()
}

#[test]
fn test_same_table_needs_no_join() {
    let fixture = TestFixture::new();
    let graph = fixture.coordinator.graph();
    let resolver = JoinPathResolver::new(&graph);

    for table in graph.tables() {
        assert_eq!(resolver.find_join_clause(table, table).unwrap(), "");
    }
}

#[test]
fn test_orders_to_customers() {
    let fixture = TestFixture::new();
    let graph = fixture.coordinator.graph();
    assert_eq!(
        JoinPathResolver::new(&graph)
            .find_join_clause("orders", "customers")
            .unwrap(),
        "JOIN customers ON orders.customer_id=customers.id"
    );
}

#[test]
fn test_multi_hop_path() {
    let fixture = TestFixture::new();
    let graph = fixture.coordinator.graph();
    assert_eq!(
        JoinPathResolver::new(&graph)
            .find_join_clause("order_items", "regions")
            .unwrap(),
        "JOIN orders ON order_items.order_id=orders.id \
         JOIN customers ON orders.customer_id=customers.id \
         JOIN regions ON customers.region_id=regions.id"
    );
}

#[test]
fn test_hop_minimal_with_insertion_order_tie_break() {
    // a-b, b-c, a-d, d-c: two equally short routes to c
    let graph = build(vec![
        SnapshotTable::new("b")
            .column("a_id", "int")
            .column("c_id", "int")
            .foreign_key("a_id", "a", "id")
            .foreign_key("c_id", "c", "id"),
        SnapshotTable::new("d")
            .column("a_id", "int")
            .column("c_id", "int")
            .foreign_key("a_id", "a", "id")
            .foreign_key("c_id", "c", "id"),
        SnapshotTable::new("a").column("id", "int"),
        SnapshotTable::new("c").column("id", "int"),
    ]);
    let resolver = JoinPathResolver::new(&graph);

    let path = resolver.find_join_path("a", "c").unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(
        resolver.find_join_clause("a", "c").unwrap(),
        "JOIN b ON a.id=b.a_id JOIN c ON b.c_id=c.id"
    );
}

#[test]
fn test_disconnected_components_have_no_path() {
    let graph = build(vec![
        SnapshotTable::new("a").column("b_id", "int").foreign_key("b_id", "b", "id"),
        SnapshotTable::new("b").column("id", "int"),
        SnapshotTable::new("c").column("d_id", "int").foreign_key("d_id", "d", "id"),
        SnapshotTable::new("d").column("id", "int"),
    ]);
    let resolver = JoinPathResolver::new(&graph);

    match resolver.find_join_clause("a", "c") {
        Err(GraphError::NoJoinPath { from, to }) => {
            assert_eq!(from, "a");
            assert_eq!(to, "c");
        }
        other => panic!("expected NoJoinPath, got {:?}", other),
    }
    assert!(resolver.find_join_clause("d", "b").is_err());
}

#[test]
fn test_unknown_table_has_no_path() {
    let fixture = TestFixture::new();
    let graph = fixture.coordinator.graph();
    assert!(matches!(
        JoinPathResolver::new(&graph).find_join_clause("orders", "missing"),
        Err(GraphError::NoJoinPath { .. })
    ));
}

#[test]
fn test_find_edge_requires_direct_relationship() {
    let fixture = TestFixture::new();
    let graph = fixture.coordinator.graph();
    let resolver = JoinPathResolver::new(&graph);

    let edge = resolver.find_edge("order_items", "products").unwrap();
    assert_eq!(edge.predicate(), "order_items.product_id=products.id");
    assert!(matches!(
        resolver.find_edge("order_items", "customers"),
        Err(GraphError::NoDirectEdge { .. })
    ));
}
