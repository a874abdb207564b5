//! Reading data written by an older schema.
//!
//! Version 1 of `Settings` stored a single `volume` as an integer percentage.
//! Version 2 stores it as a double and adds `muted`. The reader accepts both.
//!
//! Run with: cargo run --example schema_versions

use std::error::Error;
use versioned_json::{from_str, to_string, Result, Serializable, Serializer};

#[derive(Debug, PartialEq)]
struct Settings {
    volume: f64,
    muted: bool,
}

impl Serializable for Settings {
    fn serialize<S: Serializer + ?Sized>(&self, s: &mut S, name: &str) -> Result<()> {
        s.set_entry(name, 2)?;
        s.set_f64("volume", self.volume)?;
        s.set_bool("muted", self.muted)?;
        s.close_entry()
    }

    fn deserialize<S: Serializer + ?Sized>(s: &mut S, name: &str) -> Result<Self> {
        let settings = match s.open_entry(name)? {
            1 => Settings {
                volume: f64::from(s.get_u32("volume")?) / 100.0,
                muted: false,
            },
            2 => Settings {
                volume: s.get_f64("volume")?,
                muted: s.get_bool("muted")?,
            },
            found => {
                return Err(versioned_json::Error::VersionMismatch {
                    expected: 2,
                    found,
                })
            }
        };
        s.close_entry()?;
        Ok(settings)
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let old = r#"{"settings":{"__VERSION__":1,"volume":80}}"#;
    let migrated: Settings = from_str(old, "settings")?;
    println!("v1 {} -> {:?}", old, migrated);

    let current = to_string(&migrated, "settings")?;
    println!("v2 {}", current);
    assert_eq!(from_str::<Settings>(&current, "settings")?, migrated);

    let future = r#"{"settings":{"__VERSION__":3}}"#;
    match from_str::<Settings>(future, "settings") {
        Err(e) => println!("v3 rejected: {}", e),
        Ok(settings) => println!("unexpectedly read {:?}", settings),
    }

    Ok(())
}
