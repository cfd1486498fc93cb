mod common;

use std::sync::Arc;
use std::thread;

use common::one;
use samebean_core::config::{FnAdapter, DEFAULT_MAX_DIVERGENCES};
use samebean_core::{compare_for_test, same_bean_as, Configuration, SameBeanError, Value};
use serde_json::json;

#[test]
fn test_empty_type_name_is_reported_at_build() {
    let err = Configuration::builder()
        .register_fn("", |_| json!(1))
        .register_fn("One", |_| json!(1))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        SameBeanError::InvalidTypeName {
            type_name: String::new()
        }
    );
}

#[test]
fn test_zero_divergence_cap_is_rejected() {
    let err = Configuration::builder().max_divergences(0).build().unwrap_err();

    assert!(matches!(err, SameBeanError::InvalidConfiguration { .. }));
}

#[test]
fn test_default_cap() {
    assert_eq!(Configuration::default().max_divergences(), DEFAULT_MAX_DIVERGENCES);
}

#[test]
fn test_to_builder_keeps_existing_entries() {
    let base = Configuration::builder()
        .register_adapter("One", Arc::new(FnAdapter::new(|_: &Value| json!("one"))))
        .build()
        .unwrap();

    let extended = base
        .to_builder()
        .skip_circular_reference_check(|v| v.is_instance_of("Two"))
        .build()
        .unwrap();

    assert_eq!(extended.registry().len(), 1);
    assert_eq!(extended.skips().len(), 1);
    assert!(base.skips().is_empty());
}

#[test]
fn test_adapter_makes_differing_instances_equal() {
    let config = Configuration::builder()
        .register_fn("One", |_| json!("same"))
        .build()
        .unwrap();
    let a = one().with_field("genericObject", 1);
    let b = one().with_field("genericObject", 2);

    assert!(compare_for_test(&Value::from(a.clone()), &Value::from(b.clone()), &config).is_equal());
    assert!(!same_bean_as(&a).matches(&b));
}

#[test]
fn test_configuration_is_shared_across_threads() {
    let config = Configuration::builder()
        .register_fn("One", |_| json!("one"))
        .skip_circular_reference_check(|v| v.is_instance_of("Two"))
        .build()
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let config = config.clone();
            thread::spawn(move || {
                let expected = Value::from(one().with_field("n", i));
                let actual = Value::from(one().with_field("n", i + 1));
                compare_for_test(&expected, &actual, &config).is_equal()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
