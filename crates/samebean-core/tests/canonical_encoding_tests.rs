mod common;

use common::{break_all_cycles, circular_reference_bean, one};
use samebean_core::canonical::{
    encode, encode_with_stats, CanonNode, CYCLE_MARKER, RENDER_DEPTH_LIMIT, TRUNCATED_MARKER,
};
use samebean_core::{Configuration, Obj, Value};
use serde_json::json;

// ===== DETERMINISM =====

#[test]
fn test_repeated_encoding_is_identical() {
    let bean = circular_reference_bean("parent", "child1", "child2");
    let config = Configuration::default();

    let first = encode(&Value::from(&bean), &config);
    let second = encode(&Value::from(&bean), &config);

    assert_eq!(first.to_json_root(), second.to_json_root());
    assert_eq!(first.to_string(), second.to_string());
    break_all_cycles(&bean);
}

#[test]
fn test_field_declaration_order_does_not_matter() {
    let a = Obj::composite("Person")
        .with_field("name", "Ada")
        .with_field("age", 36);
    let b = Obj::composite("Person")
        .with_field("age", 36)
        .with_field("name", "Ada");
    let config = Configuration::default();

    assert_eq!(
        encode(&Value::from(a), &config).to_string(),
        encode(&Value::from(b), &config).to_string()
    );
}

#[test]
fn test_circular_bean_rendering() {
    let bean = circular_reference_bean("parent", "child1", "child2");

    let tree = encode(&Value::from(&bean), &Configuration::default());

    assert_eq!(
        tree.to_json_root(),
        json!({
            "children": [
                {"children": [], "name": "child1", "parent": CYCLE_MARKER},
                {"children": [], "name": "child2", "parent": CYCLE_MARKER}
            ],
            "name": "parent",
            "parent": null
        })
    );
    break_all_cycles(&bean);
}

// ===== SHARED REFERENCES =====

#[test]
fn test_diamond_is_expanded_per_occurrence() {
    let shared = Obj::composite("Leaf").with_field("v", 1);
    let root = Obj::composite("Root")
        .with_field("left", &shared)
        .with_field("right", &shared);

    let (tree, stats) = encode_with_stats(&Value::from(&root), &Configuration::default());

    assert_eq!(
        tree.to_json_root(),
        json!({"left": {"v": 1}, "right": {"v": 1}})
    );
    assert_eq!(stats.cycles, 0);
}

#[test]
fn test_stats_count_cycles_and_depth() {
    let a = one();
    let b = one();
    a.set("genericObject", &b);
    b.set("genericObject", &a);

    let (_, stats) = encode_with_stats(&Value::from(&a), &Configuration::default());

    assert_eq!(stats.cycles, 1);
    assert_eq!(stats.max_depth, 2);
    assert_eq!(stats.adapted, 0);
    a.clear();
}

// ===== ADAPTERS AND SKIPS =====

#[test]
fn test_adapter_output_is_opaque() {
    let config = Configuration::builder()
        .register_fn("Money", |v| {
            let obj = v.as_obj().unwrap();
            json!(format!("{} EUR", obj.len()))
        })
        .build()
        .unwrap();
    let wallet = Obj::composite("Wallet").with_field(
        "balance",
        Obj::composite("Money").with_field("cents", 100),
    );

    let tree = encode(&Value::from(wallet), &config);

    assert_eq!(tree.to_json_root(), json!({"balance": "1 EUR"}));
    let CanonNode::Composite { fields, .. } = tree.root_node() else {
        panic!("expected composite root");
    };
    assert!(matches!(tree.node(fields[0].1), CanonNode::Opaque(_)));
}

#[test]
fn test_skip_moves_cycle_detection_to_tracked_ancestor() {
    let outer = Obj::composite("Outer");
    let inner = one();
    outer.set("inner", &inner);
    inner.set("genericObject", &outer);
    let config = Configuration::builder()
        .skip_circular_reference_check(|v| v.is_instance_of("One"))
        .build()
        .unwrap();

    let (tree, stats) = encode_with_stats(&Value::from(&outer), &config);

    assert_eq!(
        tree.to_json_root(),
        json!({"inner": {"genericObject": CYCLE_MARKER}})
    );
    assert_eq!(stats.untracked, 1);
    outer.clear();
}

// ===== MAPPINGS AND DEPTH =====

#[test]
fn test_mapping_with_object_keys_uses_compact_labels() {
    let key = Obj::composite("Point").with_field("y", 2).with_field("x", 1);
    let map = Obj::mapping("Map", [(Value::from(&key), Value::from("origin"))]);

    let tree = encode(&Value::from(map), &Configuration::default());

    assert_eq!(tree.to_json_root(), json!({r#"{"x":1,"y":2}"#: "origin"}));
}

#[test]
fn test_rendering_truncates_below_depth_limit() {
    let root = Obj::composite("Node");
    let mut tail = root.clone();
    for _ in 0..RENDER_DEPTH_LIMIT + 10 {
        let next = Obj::composite("Node");
        tail.set("next", &next);
        tail = next;
    }

    let rendered = encode(&Value::from(&root), &Configuration::default()).to_string();

    assert!(rendered.contains(TRUNCATED_MARKER));
    break_all_cycles(&root);
}
