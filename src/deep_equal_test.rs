use serde_json::json;

use super::*;

// =============================================================================
// Primitives
// =============================================================================

#[test]
fn identical_primitives_are_equal() {
    assert!(deep_equal(&json!(1), &json!(1)));
    assert!(deep_equal(&json!("a"), &json!("a")));
    assert!(deep_equal(&json!(true), &json!(true)));
    assert!(deep_equal(&json!(false), &json!(false)));
}

#[test]
fn different_primitives_are_not_equal() {
    assert!(!deep_equal(&json!(1), &json!(2)));
    assert!(!deep_equal(&json!("a"), &json!("b")));
    assert!(!deep_equal(&json!(true), &json!(false)));
    assert!(!deep_equal(&json!(1), &json!("1")));
}

#[test]
fn null_equals_only_null() {
    assert!(deep_equal(&json!(null), &json!(null)));
    assert!(!deep_equal(&json!(null), &json!({})));
    assert!(!deep_equal(&json!(0), &json!(null)));
    assert!(!deep_equal(&json!(""), &json!(null)));
}

#[test]
fn numbers_compare_by_value() {
    assert!(deep_equal(&json!(1), &json!(1.0)));
    assert!(deep_equal(&json!(-3), &json!(-3.0)));
    assert!(!deep_equal(&json!(1), &json!(1.5)));
    assert!(deep_equal(&json!(u64::MAX), &json!(u64::MAX)));
    assert!(!deep_equal(&json!(u64::MAX), &json!(-1)));
}

// =============================================================================
// Arrays
// =============================================================================

#[test]
fn arrays_compare_by_content_and_order() {
    assert!(deep_equal(&json!([1, 2, 3]), &json!([1, 2, 3])));
    assert!(!deep_equal(&json!([1, 2]), &json!([1, 2, 3])));
    assert!(!deep_equal(&json!([1, 2, 3]), &json!([1, 2])));
    assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
}

// =============================================================================
// Objects
// =============================================================================

#[test]
fn objects_ignore_key_order() {
    assert!(deep_equal(&json!({ "a": 1, "b": 2 }), &json!({ "b": 2, "a": 1 })));
    assert!(deep_equal(&json!({ "x": "x", "y": "y" }), &json!({ "y": "y", "x": "x" })));
}

#[test]
fn null_member_differs_from_missing_key() {
    assert!(!deep_equal(&json!({ "a": null }), &json!({})));
    assert!(!deep_equal(&json!({}), &json!({ "a": null })));
    assert!(!deep_equal(&json!({ "a": 1 }), &json!({ "a": 1, "b": null })));
    assert!(!deep_equal(&json!({ "a": 1, "b": null }), &json!({ "a": 1 })));
}

#[test]
fn null_members_on_both_sides_are_equal() {
    assert!(deep_equal(&json!({ "a": null }), &json!({ "a": null })));
    assert!(!deep_equal(&json!({ "a": null }), &json!({ "a": 0 })));
}

#[test]
fn nested_structures() {
    assert!(deep_equal(&json!({ "a": { "b": { "c": 1 } } }), &json!({ "a": { "b": { "c": 1 } } })));
    assert!(!deep_equal(&json!({ "a": { "b": 1 } }), &json!({ "a": { "b": 2 } })));
    assert!(deep_equal(&json!({ "items": [1, 2, 3] }), &json!({ "items": [1, 2, 3] })));
}

#[test]
fn objects_with_different_keys() {
    assert!(!deep_equal(&json!({ "a": 1 }), &json!({ "a": 1, "b": 2 })));
    assert!(!deep_equal(&json!({ "a": 1, "b": 2 }), &json!({ "a": 1 })));
}

#[test]
fn empty_containers() {
    assert!(deep_equal(&json!({}), &json!({})));
    assert!(deep_equal(&json!([]), &json!([])));
    assert!(!deep_equal(&json!({}), &json!([])));
}
