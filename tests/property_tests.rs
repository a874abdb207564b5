//! Property-based tests for the compile/parse round trip.
//!
//! Every value is written under one name, compiled (compact and pretty),
//! parsed into a fresh serializer and read back.

use proptest::prelude::*;
use versioned_json::{from_str, to_string, to_string_pretty, Serializable};

fn roundtrip<T: Serializable + PartialEq + std::fmt::Debug>(value: &T) -> bool {
    for text in [to_string(value, "v"), to_string_pretty(value, "v")] {
        let text = match text {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Serialize failed: {}", e);
                return false;
            }
        };
        match from_str::<T>(&text, "v") {
            Ok(back) if back == *value => {}
            Ok(back) => {
                eprintln!("Read back {:?} from {}", back, text);
                return false;
            }
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", text);
                return false;
            }
        }
    }
    true
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    // Bit-exact, NaN payloads aside
    #[test]
    fn prop_f64(f in any::<f64>()) {
        let text = to_string(&f, "v").unwrap();
        let back: f64 = from_str(&text, "v").unwrap();
        if f.is_nan() {
            prop_assert!(back.is_nan());
        } else {
            prop_assert_eq!(back.to_bits(), f.to_bits());
        }
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_nested_vec_string(v in prop::collection::vec(prop::collection::vec(any::<String>(), 0..4), 0..4)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_u64(opt in proptest::option::of(any::<u64>())) {
        prop_assert!(roundtrip(&opt));
    }
}
