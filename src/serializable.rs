//! Types that know how to write themselves through a [`Serializer`].
//!
//! Aggregates implement [`Serializable`] in terms of the serializer
//! primitives: they open a versioned entry, write or read their fields and
//! close it again. Readers decide what to do with the version they find, and
//! [`check_version`] covers the common case of accepting exactly one.
//!
//! ```rust
//! use versioned_json::{check_version, Result, Serializable, Serializer};
//!
//! #[derive(Debug, PartialEq)]
//! struct Node {
//!     label: String,
//!     next: Option<Box<Node>>,
//! }
//!
//! impl Serializable for Node {
//!     fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
//!         s.set_entry(name, 1)?;
//!         s.set_string("label", &self.label)?;
//!         self.next.serialize(s, "next")?;
//!         s.close_entry()
//!     }
//!
//!     fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
//!         check_version(1, s.open_entry(name)?)?;
//!         let label = s.get_string("label")?;
//!         let next = Serializable::deserialize(s, "next")?;
//!         s.close_entry()?;
//!         Ok(Node { label, next })
//!     }
//! }
//!
//! let list = Node {
//!     label: "a".into(),
//!     next: Some(Box::new(Node { label: "b".into(), next: None })),
//! };
//! let text = versioned_json::to_string(&list, "list").unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"list":{"__VERSION__":1,"label":"a","next":{"__VERSION__":1,"label":"b","next":null}}}"#
//! );
//! let back: Node = versioned_json::from_str(&text, "list").unwrap();
//! assert_eq!(back, list);
//! ```

use crate::{Error, Result, Serializer};

pub trait Serializable: Sized {
    /// Writes `self` under `name` in the frame currently open in `s`.
    fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()>;

    /// Reads a value previously written under `name`.
    fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self>;
}

/// Reads a `T` from `name`.
pub fn deserialize<T, S>(s: &mut S, name: &str) -> Result<T>
where
    T: Serializable,
    S: Serializer + ?Sized,
{
    T::deserialize(s, name)
}

/// Accepts `found` only if it equals `expected`.
pub fn check_version(expected: u64, found: u64) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        log::debug!("version mismatch: expected {}, found {}", expected, found);
        Err(Error::VersionMismatch { expected, found })
    }
}

macro_rules! impl_leaf {
    ($ty:ty, $set:ident, $get:ident) => {
        impl Serializable for $ty {
            fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
                s.$set(name, *self)
            }

            fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
                s.$get(name)
            }
        }
    };
}

impl_leaf!(bool, set_bool, get_bool);
impl_leaf!(i32, set_i32, get_i32);
impl_leaf!(u32, set_u32, get_u32);
impl_leaf!(i64, set_i64, get_i64);
impl_leaf!(u64, set_u64, get_u64);
impl_leaf!(f64, set_f64, get_f64);

impl Serializable for String {
    fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
        s.set_string(name, self)
    }

    fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
        s.get_string(name)
    }
}

/// `None` is written as `null`.
impl<T: Serializable> Serializable for Option<T> {
    fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
        match self {
            Some(value) => value.serialize(s, name),
            None => s.set_null(name),
        }
    }

    fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
        if s.is_null(name) {
            Ok(None)
        } else {
            T::deserialize(s, name).map(Some)
        }
    }
}

impl<T: Serializable> Serializable for Box<T> {
    fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
        (**self).serialize(s, name)
    }

    fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
        T::deserialize(s, name).map(Box::new)
    }
}

/// Written as an array, one element per item.
impl<T: Serializable> Serializable for Vec<T> {
    fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
        s.set_array(name)?;
        s.reserve_array(name, self.len())?;
        for item in self {
            item.serialize(s, name)?;
        }
        s.close_array()
    }

    fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
        let len = s.array_len(name)?;
        s.open_array(name)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::deserialize(s, name)?);
            s.move_array();
        }
        s.close_array()?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonSerializer;

    #[test]
    fn test_check_version() {
        assert!(check_version(3, 3).is_ok());
        assert_eq!(
            check_version(3, 2),
            Err(Error::VersionMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_option_and_nested_vec() {
        let mut serializer = JsonSerializer::new();
        let grid: Vec<Vec<Option<i32>>> = vec![vec![Some(1), None], vec![], vec![Some(-3)]];
        grid.serialize(&mut serializer, "grid").unwrap();
        serializer.compile().unwrap();
        assert_eq!(serializer.as_text(), r#"{"grid":[[1,null],[],[-3]]}"#);

        let back: Vec<Vec<Option<i32>>> = deserialize(&mut serializer, "grid").unwrap();
        assert_eq!(back, grid);
        assert_eq!(serializer.depth(), 0);
    }

    #[test]
    fn test_through_trait_object() {
        let mut json = JsonSerializer::new();
        let s: &mut dyn Serializer = &mut json;
        "hi".to_string().serialize(s, "greeting").unwrap();
        let back: String = deserialize(s, "greeting").unwrap();
        assert_eq!(back, "hi");
    }
}
