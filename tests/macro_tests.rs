use versioned_json::{value, JsonSerializer, Number, Serializer, Value, ValueMap};

#[test]
fn test_value_macro_numbers() {
    assert_eq!(value!(42), Value::Number(Number::Uint(42)));
    assert_eq!(value!((-123)), Value::Number(Number::Int(-123)));
    assert_eq!(value!(0.5), Value::Number(Number::Float(0.5)));
    assert_eq!(value!(u64::MAX), Value::Number(Number::Uint(u64::MAX)));
}

#[test]
fn test_value_macro_strings() {
    assert_eq!(value!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(value!(""), Value::String(String::new()));
    let owned = String::from("owned");
    assert_eq!(value!(owned), Value::String("owned".to_string()));
}

#[test]
fn test_value_macro_arrays() {
    assert_eq!(
        value!([1, "hello", true, null, (-1)]),
        Value::Array(vec![
            Value::Number(Number::Uint(1)),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
            Value::Number(Number::Int(-1)),
        ])
    );
    assert_eq!(
        value!([[1, 2], []]),
        Value::Array(vec![
            Value::Array(vec![Value::from(1), Value::from(2)]),
            Value::Array(vec![]),
        ])
    );
}

#[test]
fn test_value_macro_objects_keep_order() {
    let object = value!({
        "zeta": 1,
        "alpha": { "nested": [true] },
        "mid": null,
    });

    let map = object.as_object().unwrap();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);

    let mut nested = ValueMap::new();
    nested.insert("nested".to_string(), Value::Array(vec![Value::Bool(true)]));
    assert_eq!(map.get("alpha"), Some(&Value::Object(nested)));
}

#[test]
fn test_value_macro_feeds_serializer() {
    let mut serializer = JsonSerializer::from_value(value!({
        "save": {
            "__VERSION__": 4,
            "slots": [
                { "__VERSION__": 1, "name": "first" },
                { "__VERSION__": 1, "name": "second" }
            ]
        }
    }))
    .unwrap();

    assert_eq!(serializer.open_entry("save").unwrap(), 4);
    assert_eq!(serializer.array_len("slots").unwrap(), 2);
    serializer.open_array("slots").unwrap();
    assert!(serializer.move_array());
    assert_eq!(serializer.open_entry("").unwrap(), 1);
    assert_eq!(serializer.get_string("name").unwrap(), "second");
}

#[test]
fn test_from_value_requires_object() {
    assert!(JsonSerializer::from_value(value!([1, 2])).is_err());
    assert!(JsonSerializer::from_value(value!(null)).is_err());
}

#[test]
fn test_value_display_matches_compile() {
    let v = value!({ "a": [1, (-2), 0.5], "s": "q\"", "n": null });
    let mut serializer = JsonSerializer::from_value(v.clone()).unwrap();
    serializer.compile().unwrap();
    assert_eq!(v.to_string(), serializer.as_text());
}
