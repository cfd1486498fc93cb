use std::collections::HashSet;

use samebean_core::{Obj, Value};

/// Bean whose children point back at it through `parent`.
///
/// Shape: `parent { name, children: [child { name, parent: <parent> }, ...] }`.
#[allow(dead_code)]
pub fn circular_reference_bean(parent: &str, child1: &str, child2: &str) -> Obj {
    let root = Obj::composite("CircularReferenceBean")
        .with_field("name", parent)
        .with_field("parent", Value::Null);
    let children = Obj::sequence("List", Vec::<Value>::new());
    for name in [child1, child2] {
        let child = Obj::composite("CircularReferenceBean")
            .with_field("name", name)
            .with_field("parent", &root)
            .with_field("children", Obj::sequence("List", Vec::<Value>::new()));
        children.push(&child);
    }
    root.set("children", &children);
    root
}

/// Empty `One`; `genericObject` starts out null.
#[allow(dead_code)]
pub fn one() -> Obj {
    Obj::composite("One").with_field("genericObject", Value::Null)
}

/// Empty `Two`; same shape as [`one`] under a different type.
#[allow(dead_code)]
pub fn two() -> Obj {
    Obj::composite("Two").with_field("genericObject", Value::Null)
}

/// Empty `Four`, which adds `subClassField`.
#[allow(dead_code)]
pub fn four() -> Obj {
    Obj::composite("Four")
        .with_field("genericObject", Value::Null)
        .with_field("subClassField", Value::Null)
}

#[allow(dead_code)]
pub fn element(variant: &str) -> Value {
    Value::enumeration("Element", variant)
}

/// Exception-like node. A throwable with no cause points `cause` at itself.
#[allow(dead_code)]
pub fn throwable(type_name: &str, supertypes: &[&str], cause: Option<&Obj>) -> Obj {
    let node = Obj::composite(type_name)
        .extends(supertypes.iter().copied())
        .with_field("detailMessage", cause.map(|c| c.type_name()))
        .with_field("stackTrace", Obj::sequence("Array", Vec::<Value>::new()))
        .with_field(
            "suppressedExceptions",
            Obj::sequence("List", Vec::<Value>::new()),
        );
    match cause {
        Some(cause) => node.set("cause", cause),
        None => node.set("cause", &node),
    };
    node
}

/// `Throwable(Exception(RuntimeException(ClassCastException)))`.
#[allow(dead_code)]
pub fn nested_throwable_chain() -> Obj {
    let class_cast = throwable(
        "ClassCastException",
        &["RuntimeException", "Exception", "Throwable"],
        None,
    );
    let runtime = throwable(
        "RuntimeException",
        &["Exception", "Throwable"],
        Some(&class_cast),
    );
    let exception = throwable("Exception", &["Throwable"], Some(&runtime));
    throwable("Throwable", &[], Some(&exception))
}

/// Drop every child reference so `Rc` cycles are released.
#[allow(dead_code)]
pub fn break_cycles(nodes: &[&Obj]) {
    for node in nodes {
        node.clear();
    }
}

/// Clear a whole graph reachable from `root`, cycles included.
#[allow(dead_code)]
pub fn break_all_cycles(root: &Obj) {
    let mut stack = vec![root.clone()];
    let mut seen = HashSet::new();
    while let Some(node) = stack.pop() {
        if !seen.insert(node.identity()) {
            continue;
        }
        stack.extend(
            node.children()
                .into_iter()
                .filter_map(|child| child.as_obj().cloned()),
        );
        node.clear();
    }
}
