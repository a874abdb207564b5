//! A recursive structure written through `Serializable`.
//!
//! Each record owns an optional next record; the last one is written as
//! `null`.
//!
//! Run with: cargo run --example linked_records

use std::error::Error;
use versioned_json::{
    check_version, deserialize, from_str, to_string_pretty, Result, Serializable, Serializer,
};

#[derive(Debug, PartialEq)]
struct Record {
    title: String,
    weight: f64,
    ids: Vec<u64>,
    next: Option<Box<Record>>,
}

impl Serializable for Record {
    fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
        s.set_entry(name, 0)?;
        s.set_string("title", &self.title)?;
        s.set_f64("weight", self.weight)?;
        self.ids.serialize(s, "ids")?;
        self.next.serialize(s, "next")?;
        s.close_entry()
    }

    fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
        check_version(0, s.open_entry(name)?)?;
        let record = Record {
            title: s.get_string("title")?,
            weight: s.get_f64("weight")?,
            ids: deserialize(s, "ids")?,
            next: deserialize(s, "next")?,
        };
        s.close_entry()?;
        Ok(record)
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let chain = (0..3).rev().fold(None, |next, i| {
        Some(Box::new(Record {
            title: format!("record {}", i),
            weight: f64::from(i) / 3.0,
            ids: (0..=i as u64).collect(),
            next,
        }))
    });

    let text = to_string_pretty(&chain, "head")?;
    println!("{}\n", text);

    let back: Option<Box<Record>> = from_str(&text, "head")?;
    assert_eq!(back, chain);

    let mut count = 0;
    let mut cursor = back.as_deref();
    while let Some(record) = cursor {
        count += 1;
        cursor = record.next.as_deref();
    }
    println!("✓ Read back {} linked records", count);

    Ok(())
}
