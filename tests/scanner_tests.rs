//! Tests for the breadth-first scanner

use conftree_search::{queue_search, queue_search_with, search, Node, Query, StructuralEquals};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn layered() -> Node {
    Node::from(json!({
        "classname": "Configuration", "name": "root",
        "a": {
            "classname": "Configuration", "name": "a",
            "deep": {
                "classname": "Configuration", "name": "deep",
                "deeper": {"target": "deep"}
            }
        },
        "b": {"target": "shallow"}
    }))
}

#[test]
fn test_find_first_returns_shallowest_match() {
    let tree = layered();
    let found = queue_search(&Query::for_key("target").first(), Some(&tree));

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].value, &Node::from("shallow"));

    // the tracer dives into `a` first
    let traced = search(&Query::for_key("target").first(), Some(&tree));
    assert_eq!(traced[0].value, &Node::from("deep"));
}

#[test]
fn test_results_come_out_level_by_level() {
    let tree = layered();
    let found = queue_search(&Query::for_key("target"), Some(&tree));

    let values: Vec<_> = found.iter().map(|m| m.value.as_str().unwrap()).collect();
    assert_eq!(values, vec!["shallow", "deep"]);
}

#[test]
fn test_find_first_returns_at_most_one_even_for_siblings() {
    let tree = Node::from(json!({"p": 5, "q": 5}));
    let five = Node::from(5_i64);

    assert_eq!(queue_search(&Query::for_value(&five).first(), Some(&tree)).len(), 1);
    assert_eq!(queue_search(&Query::for_value(&five), Some(&tree)).len(), 2);
}

#[test]
fn test_matched_containers_are_still_scanned() {
    let tree = Node::from(json!({
        "classname": "Configuration", "name": "outer",
        "a": {"classname": "Configuration", "name": "inner", "a": 2}
    }));

    let found = queue_search(&Query::for_key("a"), Some(&tree));
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].value, &Node::from(2_i64));
}

#[test]
fn test_absent_tree_yields_nothing() {
    assert!(queue_search(&Query::any(), None).is_empty());
}

#[test]
fn test_composites_match_by_identity_only() {
    let tree = layered();
    let copy = Node::from(json!({"target": "shallow"}));
    assert!(queue_search(&Query::for_value(&copy), Some(&tree)).is_empty());

    let same = tree.get("b").unwrap();
    let found = queue_search(&Query::for_value(same), Some(&tree));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].search_key, "b");
    assert!(std::ptr::eq(found[0].container, &tree));

    let structural = queue_search_with(&Query::for_value(&copy), Some(&tree), &StructuralEquals);
    assert_eq!(structural.len(), 1);
}

#[rstest]
#[case("lab", 1)]
#[case("gantry", 1)]
#[case("shop", 0)]
fn test_array_membership(#[case] tag: &str, #[case] expected: usize) {
    let tree = Node::from(json!({"classname": "Machine", "name": "m", "tags": ["gantry", "lab"]}));
    let wanted = Node::from(tag);

    assert_eq!(queue_search(&Query::for_key("tags").with_value(&wanted), Some(&tree)).len(), expected);
}

#[test]
fn test_record_embeds_container_fields() {
    let tree = layered();
    let found = queue_search(&Query::for_key("target").first(), Some(&tree));

    assert_eq!(
        serde_json::to_value(&found[0]).unwrap(),
        json!({"target": "shallow", "search_key": "target", "value": "shallow"})
    );
}

#[test]
fn test_record_overrides_existing_search_key_field() {
    let tree = Node::from(json!({"search_key": "old", "value": 1, "x": true}));
    let found = queue_search(&Query::for_key("x"), Some(&tree));

    assert_eq!(
        serde_json::to_string(&found[0]).unwrap(),
        r#"{"search_key":"x","value":true,"x":true}"#
    );
}

#[test]
fn test_array_containers_use_index_keys() {
    let tree = Node::from(json!([["a", "b"]]));
    let wanted = Node::from("b");
    let found = queue_search(&Query::for_value(&wanted), Some(&tree));

    // the outer array matches by membership, then the inner one holds "b" at "1"
    let keys: Vec<&str> = found.iter().map(|m| &*m.search_key).collect();
    assert_eq!(keys, vec!["0", "1"]);
    assert_eq!(
        serde_json::to_value(&found[1]).unwrap(),
        json!({"0": "a", "1": "b", "search_key": "1", "value": "b"})
    );
}

#[test]
fn test_flat_tree_counts_agree_with_tracer() {
    let tree = Node::from(json!({
        "classname": "Configuration", "name": "flat", "description": "", "x": 1, "y": true
    }));

    let scanned = queue_search(&Query::any(), Some(&tree));
    let traced = search(&Query::any(), Some(&tree));
    assert_eq!(scanned.len(), 5);
    assert_eq!(traced.len(), scanned.len());
}

#[test]
fn test_unfiltered_scan_visits_every_level() {
    let tree = layered();

    // every field at every depth
    assert_eq!(queue_search(&Query::any(), Some(&tree)).len(), 12);
    // a matched field is never descended, so only the top level shows up
    assert_eq!(search(&Query::any(), Some(&tree)).len(), 4);
}
