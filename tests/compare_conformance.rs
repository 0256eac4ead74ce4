//! Canonical JSON equivalence tests.
//!
//! Covers the documented comparison scenarios plus property tests for
//! idempotence, order insensitivity and symmetry.

use proptest::prelude::*;
use schema_hunter::compare::{compare_files, equivalent, CompareOptions, LineComparison};
use schema_hunter::json::{canonical_form, canonicalize, parse_document, sorted_deep, CanonicalOptions, JsonValue};
use schema_hunter::HunterError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

fn parse(text: &str) -> JsonValue {
    parse_document(Path::new("inline.json"), text.as_bytes()).unwrap()
}

fn write_pair(dir: &Path, left: &str, right: &str) -> (PathBuf, PathBuf) {
    let a = dir.join("A.json");
    let b = dir.join("B.json");
    fs::write(&a, left).unwrap();
    fs::write(&b, right).unwrap();
    (a, b)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_key_order() {
    let dir = tempfile::tempdir().unwrap();
    let (a, b) = write_pair(dir.path(), r#"{"a":1,"b":2}"#, "{\n  \"b\": 2,\n  \"a\": 1\n}");

    let report = compare_files(&a, &b, CompareOptions::default()).unwrap();
    assert!(report.canonical_match);
    assert!(!report.sizes_match());
    assert!(!report.line_counts_match());
    assert_eq!(report.lines, LineComparison::Match);
}

#[test]
fn scenario_scalar_array_order() {
    let dir = tempfile::tempdir().unwrap();
    let (a, b) = write_pair(dir.path(), r#"{"x":[3,1,2]}"#, r#"{"x":[1,2,3]}"#);

    let report = compare_files(&a, &b, CompareOptions::default()).unwrap();
    assert!(report.canonical_match);
    assert!(report.sizes_match());
}

#[test]
fn scenario_objects_in_array() {
    let dir = tempfile::tempdir().unwrap();
    let (a, b) = write_pair(
        dir.path(),
        r#"{"x":[{"b":1},{"a":1}]}"#,
        r#"{"x":[{"a":1},{"b":1}]}"#,
    );

    let report = compare_files(&a, &b, CompareOptions::default()).unwrap();
    assert!(report.canonical_match);
    assert!(report.lines.is_match());
}

#[test]
fn scenario_malformed_json_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let (a, b) = write_pair(dir.path(), r#"{"a":1}"#, r#"{"a":1,}"#);

    let err = compare_files(&a, &b, CompareOptions::default()).unwrap_err();
    match err {
        HunterError::Parse { path, .. } => assert_eq!(path, b),
        other => panic!("Expected Parse, got {:?}", other),
    }
    let err = compare_files(&b, &a, CompareOptions::default()).unwrap_err();
    assert!(matches!(err, HunterError::Parse { .. }));
}

#[test]
fn malformed_json_writes_no_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let (a, b) = write_pair(dir.path(), r#"{"a":1}"#, "not json");
    let options = CompareOptions {
        write_artifacts: true,
        ..CompareOptions::default()
    };

    assert!(compare_files(&a, &b, options).is_err());
    assert!(!dir.path().join("A_cmp.json").exists());
    assert!(!dir.path().join("B_cmp.json").exists());
}

#[test]
fn missing_document_is_path_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("A.json");
    fs::write(&a, "{}").unwrap();
    let err = compare_files(&a, &dir.path().join("nope.json"), CompareOptions::default()).unwrap_err();
    assert!(matches!(err, HunterError::PathNotFound { .. }));
}

#[test]
fn differing_documents_report_similarity() {
    let dir = tempfile::tempdir().unwrap();
    let (a, b) = write_pair(
        dir.path(),
        "{\n  \"a\": 1,\n  \"b\": 2,\n  \"c\": 3\n}\n",
        "{\n  \"c\": 3,\n  \"b\": 20,\n  \"a\": 1\n}\n",
    );

    let report = compare_files(&a, &b, CompareOptions::default()).unwrap();
    assert!(!report.canonical_match);
    // Sorted dumps: `  "a": 1,` / `  "b": 2(0),` / `  "c": 3` / `{` / `}`
    assert_eq!(report.lines, LineComparison::Mismatch { matched: 4, total: 5 });
    assert!(report.to_string().contains("Number of equal ordered lines: 4 / 5"));
}

#[test]
fn similarity_denominator_is_raw_line_count() {
    let dir = tempfile::tempdir().unwrap();
    let (a, b) = write_pair(dir.path(), r#"{"a":1,"b":2,"c":3}"#, "{\"a\":1,\n\"b\":20,\"c\":3}");

    let report = compare_files(&a, &b, CompareOptions::default()).unwrap();
    assert_eq!(report.line_counts, (1, 2));
    // One padding line goes on the left; five positions are compared.
    assert_eq!(report.lines, LineComparison::Mismatch { matched: 4, total: 2 });
}

#[test]
fn written_artifacts_land_beside_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let (a, b) = write_pair(dir.path(), r#"{"k":[2,1]}"#, r#"{"k":[1,2]}"#);
    let options = CompareOptions {
        write_artifacts: true,
        ..CompareOptions::default()
    };

    let report = compare_files(&a, &b, options).unwrap();
    let artifacts = report.artifacts.unwrap();
    assert_eq!(artifacts.documents[0], dir.path().join("A_cmp.json"));
    assert_eq!(artifacts.line_dumps[1], dir.path().join("B_cmp.json.txt"));

    let left = fs::read_to_string(&artifacts.documents[0]).unwrap();
    let right = fs::read_to_string(&artifacts.documents[1]).unwrap();
    assert_eq!(left, right);
    assert_eq!(left, "{\n  \"k\": [\n    1,\n    2\n  ]\n}");
}

#[test]
fn floats_and_strings_are_compared_by_value_text() {
    let options = CanonicalOptions::default();
    assert!(equivalent(&parse(r#"[1.5,"x",null]"#), &parse(r#"[null,"x",1.5]"#), options).unwrap());
    assert!(!equivalent(&parse("[1.5]"), &parse("[1.50001]"), options).unwrap());
    assert!(!equivalent(&parse(r#"["1"]"#), &parse("[1]"), options).unwrap());
}

#[test]
fn integers_beyond_u64_stay_distinct() {
    let options = CanonicalOptions::default();
    let a = parse(r#"{"a":18446744073709551616}"#);
    let b = parse(r#"{"a":18446744073709551617}"#);
    assert!(!equivalent(&a, &b, options).unwrap());
    assert!(equivalent(&a, &parse(r#"{"a":18446744073709551616}"#), options).unwrap());
}

#[test]
fn out_of_range_floats_are_valid_json() {
    let options = CanonicalOptions::default();
    let value = parse("[1e400, 1]");
    assert!(equivalent(&value, &parse("[1, 1e400]"), options).unwrap());
    assert!(!equivalent(&value, &parse("[1, 2e400]"), options).unwrap());
}

#[test]
fn equal_fractions_agree_but_int_and_float_differ() {
    let options = CanonicalOptions::default();
    assert!(equivalent(&parse("[1.0, 2.50]"), &parse("[2.5, 1.00]"), options).unwrap());
    assert!(!equivalent(&parse("[1]"), &parse("[1.0]"), options).unwrap());
}

#[test]
fn deep_nesting_reaches_fixed_point() {
    let value = parse(r#"[[[[3,2],[1]],[[0]]],[[[9,8]]]]"#);
    let once = canonical_form(&value).unwrap();
    assert_eq!(canonicalize(&once), "[[[[0]],[[1],[2,3]]],[[[8,9]]]]");
    assert_eq!(sorted_deep(&once), once);
}

// ============================================================================
// Properties
// ============================================================================

fn arb_json() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        (-1000i64..1000).prop_map(JsonValue::from),
        "[a-z]{0,4}".prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-e]{1,2}", inner, 0..5).prop_map(JsonValue::Object),
        ]
    })
}

/// Reverse every array and rebuild every object, recursively.
fn scramble(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(items) => JsonValue::Array(items.iter().rev().map(scramble).collect()),
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .rev()
                .map(|(k, v)| (k.clone(), scramble(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
        scalar => scalar.clone(),
    }
}

proptest! {
    #[test]
    fn canonical_form_is_idempotent(value in arb_json()) {
        let once = canonical_form(&value).unwrap();
        let twice = canonical_form(&once).unwrap();
        prop_assert_eq!(canonicalize(&once), canonicalize(&twice));
    }

    #[test]
    fn canonical_form_ignores_ordering(value in arb_json()) {
        let options = CanonicalOptions::default();
        prop_assert!(equivalent(&value, &scramble(&value), options).unwrap());
    }

    #[test]
    fn equivalence_is_symmetric(a in arb_json(), b in arb_json()) {
        let options = CanonicalOptions::default();
        prop_assert_eq!(
            equivalent(&a, &b, options).unwrap(),
            equivalent(&b, &a, options).unwrap()
        );
    }

    #[test]
    fn object_member_order_is_irrelevant(
        members in prop::collection::btree_map("[a-z]{1,3}", -50i64..50, 1..8)
    ) {
        let forward: Vec<String> = members.iter().map(|(k, v)| format!("\"{k}\":{v}")).collect();
        let backward: Vec<String> = forward.iter().rev().cloned().collect();
        let a = parse(&format!("{{{}}}", forward.join(",")));
        let b = parse(&format!("{{{}}}", backward.join(",")));
        prop_assert_eq!(
            canonicalize(&canonical_form(&a).unwrap()),
            canonicalize(&canonical_form(&b).unwrap())
        );
    }
}
