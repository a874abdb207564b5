/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Negative numbers inside arrays or objects must be parenthesised, since
/// they are not a single token.
///
/// # Examples
///
/// ```rust
/// use versioned_json::{value, Value};
///
/// let v = value!({
///     "name": "Alice",
///     "scores": [1, 2, (-3)],
///     "meta": null
/// });
/// assert!(v.is_object());
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ValueMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ValueMap::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($s:expr) => {
        $crate::Value::from($s)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, Value, ValueMap};

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(false), Value::Bool(false));
        assert_eq!(value!(42), Value::Number(Number::Uint(42)));
        assert_eq!(value!((-42)), Value::Number(Number::Int(-42)));
        assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_value_macro_nested() {
        assert_eq!(value!({}), Value::Object(ValueMap::new()));
        assert_eq!(value!([]), Value::Array(vec![]));

        let obj = value!({
            "name": "Alice",
            "flags": [true, false]
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(
                    map.get("flags"),
                    Some(&Value::Array(vec![Value::Bool(true), Value::Bool(false)]))
                );
            }
            _ => panic!("Expected object"),
        }
    }
}
