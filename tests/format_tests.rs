//! Wire format checks against serde_json.
//!
//! Compiled output of finite documents must be plain RFC 8259 JSON that
//! serde_json reads to the same tree, and text produced by serde_json must
//! parse to the same tree here.

use versioned_json::{value, JsonOptions, JsonSerializer, Serializer, Value};

fn sample() -> JsonSerializer {
    let mut serializer = JsonSerializer::new();
    serializer.set_entry("record", 3).unwrap();
    serializer.set_string("text", "tab\there \"quoted\" nul\0 bell\u{7} é").unwrap();
    serializer.set_i64("neg", i64::MIN).unwrap();
    serializer.set_u64("big", u64::MAX).unwrap();
    serializer.set_f64("ratio", 0.1).unwrap();
    serializer.set_f64("whole", 3.0).unwrap();
    serializer.set_null("nothing").unwrap();
    serializer.set_array("flags").unwrap();
    serializer.set_bool("", true).unwrap();
    serializer.set_bool("", false).unwrap();
    serializer.close_array().unwrap();
    serializer.close_entry().unwrap();
    serializer
}

#[test]
fn test_compact_output_is_read_by_serde_json() {
    let mut serializer = sample();
    serializer.compile().unwrap();

    let theirs: Value = serde_json::from_str(serializer.as_text()).unwrap();
    assert_eq!(theirs, serializer.to_value());

    let json: serde_json::Value = serde_json::from_str(serializer.as_text()).unwrap();
    assert_eq!(json["record"]["__VERSION__"], 3);
    assert_eq!(json["record"]["neg"], i64::MIN);
    assert_eq!(json["record"]["big"], u64::MAX);
    assert_eq!(json["record"]["ratio"], 0.1);
    assert_eq!(json["record"]["flags"][1], false);
    assert_eq!(
        json["record"]["text"],
        "tab\there \"quoted\" nul\0 bell\u{7} é"
    );
}

#[test]
fn test_pretty_output_is_read_by_serde_json() {
    let mut serializer = sample();
    serializer.compile_pretty().unwrap();
    let theirs: Value = serde_json::from_str(serializer.as_text()).unwrap();
    assert_eq!(theirs, serializer.to_value());
}

#[test]
fn test_serde_json_output_is_parsed() {
    let original = value!({
        "a": [1, (-2), 2.5, "x\u{1}y", null, true],
        "nested": { "__VERSION__": 1, "deep": { "deeper": [] } },
        "unicode": "日本 🦀"
    });
    let text = serde_json::to_string_pretty(&original).unwrap();

    let mut serializer = JsonSerializer::new();
    serializer.parse_text(&text).unwrap();
    assert_eq!(serializer.to_value(), original);
    assert_eq!(serializer.open_entry("nested").unwrap(), 1);
}

#[test]
fn test_escape_forms() {
    let mut serializer = JsonSerializer::new();
    serializer.set_string("s", "\0\u{1f}\n\"\\/").unwrap();
    serializer.compile().unwrap();
    assert_eq!(serializer.as_text(), r#"{"s":"\u0000\u001f\n\"\\/"}"#);
}

#[test]
fn test_double_forms() {
    let mut serializer = JsonSerializer::new();
    serializer.set_f64("whole", 1.0).unwrap();
    serializer.set_f64("negzero", -0.0).unwrap();
    serializer.set_f64("nan", f64::NAN).unwrap();
    serializer.set_f64("inf", f64::INFINITY).unwrap();
    serializer.set_f64("ninf", f64::NEG_INFINITY).unwrap();
    serializer.compile().unwrap();
    assert_eq!(
        serializer.as_text(),
        r#"{"whole":1.0,"negzero":-0.0,"nan":NaN,"inf":Infinity,"ninf":-Infinity}"#
    );
}

#[test]
fn test_non_finite_rejected_in_strict_mode() {
    let mut serializer = JsonSerializer::with_options(JsonOptions::strict());
    serializer.set_f64("x", f64::INFINITY).unwrap();
    assert!(serializer.compile().is_err());
    assert_eq!(serializer.size(), 0);

    assert!(serializer.parse_text(r#"{"x":Infinity}"#).is_err());
    assert!(serializer.is_f64("x"));
}

#[test]
fn test_integers_stay_integers() {
    let mut serializer = JsonSerializer::new();
    serializer.parse_text(r#"{"a":10,"b":10.0,"c":1e1,"d":-10}"#).unwrap();
    assert!(serializer.is_u32("a"));
    assert!(!serializer.is_f64("a"));
    assert!(serializer.is_f64("b"));
    assert!(serializer.is_f64("c"));
    assert_eq!(serializer.get_i32("d").unwrap(), -10);
}
