//! Working with `Value` for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use std::error::Error;
use versioned_json::{value, JsonSerializer, Serializer, Value};

fn main() -> Result<(), Box<dyn Error>> {
    // Build a document dynamically with the value! macro
    let config = value!({
        "server": {
            "__VERSION__": 1,
            "host": "localhost",
            "port": 8080,
            "features": ["auth", "logging", "metrics"],
            "timeout": 2.5
        }
    });

    let mut serializer = JsonSerializer::from_value(config)?;
    serializer.compile_pretty()?;
    println!("Config:\n{}\n", serializer.as_text());

    // Navigate it with the cursor
    println!("server v{}", serializer.open_entry("server")?);
    println!("  host: {}", serializer.get_str("host")?);
    println!("  port: {}", serializer.get_u32("port")?);
    println!("  features: {} items", serializer.array_len("features")?);
    serializer.close_entry()?;

    // Export the tree and inspect it without a cursor
    let exported = serializer.to_value();
    let server = exported.as_object().and_then(|root| root.get("server"));
    if let Some(Value::Object(members)) = server {
        for (key, value) in members.iter() {
            println!("  {:<12} {:<7} {}", key, value.kind(), value);
        }
    }
    println!("\nversion tag: {:?}", server.and_then(Value::version));

    Ok(())
}
