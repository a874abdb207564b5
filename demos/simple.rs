//! Writing one versioned entry and reading it back.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use versioned_json::{JsonSerializer, Serializer};

fn main() -> Result<(), Box<dyn Error>> {
    let mut writer = JsonSerializer::new();

    writer.set_entry("Memingo", 0)?;
    writer.set_i32("hola", 42)?;
    writer.set_array("array")?;
    for i in 0..4 {
        writer.set_bool("", i % 2 == 0)?;
    }
    writer.close_array()?;
    writer.close_entry()?;

    writer.compile_pretty()?;
    println!("{}\n", writer.as_text());
    println!("{} bytes, {} characters\n", writer.size(), writer.length());

    let mut reader = JsonSerializer::new();
    reader.parse_text(writer.as_text())?;

    let version = reader.open_entry("Memingo")?;
    println!("Memingo v{}: hola = {}", version, reader.get_i32("hola")?);

    let len = reader.array_len("array")?;
    reader.open_array("array")?;
    let mut flags = Vec::with_capacity(len);
    for _ in 0..len {
        flags.push(reader.get_bool("")?);
        reader.move_array();
    }
    reader.close_array()?;
    reader.close_entry()?;

    assert_eq!(flags, [true, false, true, false]);
    println!("array = {:?}", flags);
    println!("✓ Round-trip successful");

    Ok(())
}
