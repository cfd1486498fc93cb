mod common;

use common::break_all_cycles;
use proptest::prelude::*;
use samebean_core::canonical::encode;
use samebean_core::{assert_that, compare_for_test, same_bean_as, Configuration, Obj, Value};

/// Plain description of a value graph, turned into `Obj`s by [`build`].
#[derive(Debug, Clone)]
enum Shape {
    Null,
    Int(i64),
    Text(String),
    Bean(String, Vec<(String, Shape)>),
    List(Vec<Shape>),
    Map(Vec<(String, Shape)>),
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        Just(Shape::Null),
        any::<i64>().prop_map(Shape::Int),
        "[a-z]{0,6}".prop_map(Shape::Text),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (
                "[A-C]",
                prop::collection::vec(("[a-e]", inner.clone()), 0..4)
            )
                .prop_map(|(t, fields)| Shape::Bean(t, fields)),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::List),
            prop::collection::vec(("[a-e]{1,2}", inner), 0..4).prop_map(Shape::Map),
        ]
    })
}

fn build(shape: &Shape) -> Value {
    match shape {
        Shape::Null => Value::Null,
        Shape::Int(n) => Value::from(*n),
        Shape::Text(s) => Value::from(s.as_str()),
        Shape::Bean(t, fields) => {
            let obj = Obj::composite(t.as_str());
            for (name, child) in fields {
                obj.set(name.as_str(), build(child));
            }
            Value::from(obj)
        }
        Shape::List(items) => Value::from(Obj::sequence("List", items.iter().map(build))),
        Shape::Map(entries) => Value::from(Obj::mapping(
            "Map",
            entries.iter().map(|(k, v)| (Value::from(k.as_str()), build(v))),
        )),
    }
}

/// Wrap `shape` in a bean that also points back at itself.
fn build_cyclic(shape: &Shape) -> Obj {
    let root = Obj::composite("Root").with_field("payload", build(shape));
    root.set("self", &root);
    root
}

proptest! {
    #[test]
    fn prop_self_comparison_is_equal(shape in arb_shape()) {
        let value = build(&shape);
        prop_assert!(compare_for_test(&value, &value, &Configuration::default()).is_equal());
    }

    #[test]
    fn prop_independent_builds_are_equal(shape in arb_shape()) {
        let expected = build_cyclic(&shape);
        let actual = build_cyclic(&shape);

        let outcome = assert_that(&actual, &same_bean_as(&expected));

        break_all_cycles(&expected);
        break_all_cycles(&actual);
        prop_assert!(outcome.is_ok());
    }

    #[test]
    fn prop_mapping_order_is_irrelevant(
        entries in prop::collection::vec(("[a-z]{1,3}", any::<i32>()), 0..8)
    ) {
        let forward = Obj::mapping("Map", entries.iter().map(|(k, v)| (k.as_str(), *v)));
        let backward = Obj::mapping("Map", entries.iter().rev().map(|(k, v)| (k.as_str(), *v)));

        let result = compare_for_test(
            &Value::from(forward),
            &Value::from(backward),
            &Configuration::default(),
        );
        prop_assert!(result.is_equal());
    }

    #[test]
    fn prop_rendering_never_contains_addresses(shape in arb_shape(), other in arb_shape()) {
        let expected = build_cyclic(&shape);
        let actual = build_cyclic(&other);
        let config = Configuration::default();

        let rendered = encode(&Value::from(&expected), &config).to_string();
        let outcome = assert_that(&actual, &same_bean_as(&expected));

        break_all_cycles(&expected);
        break_all_cycles(&actual);
        prop_assert!(!rendered.contains("0x"));
        if let Err(failure) = outcome {
            prop_assert!(!failure.expected().contains("0x"));
            prop_assert!(!failure.actual().contains("0x"));
            prop_assert!(!failure.message.contains("0x"));
        }
    }
}
