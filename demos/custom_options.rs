//! Customizing serialization and parsing.
//!
//! Run with: cargo run --example custom_options

use serde_urlquery::{
    query, serialize, unserialize, QueryValue, SerializeOptions, SplitValues, UnserializeOptions,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let data = query!({ "ids": [3, 1, 4], "name": "a b" });
    let list = query!(["oh", "won", "too"]);

    println!("Default:");
    println!("{}\n", serialize(&data, &SerializeOptions::new()));

    println!("Indexed arrays:");
    let indexed = SerializeOptions::new().with_indexed(true);
    println!("{}\n", serialize(&data, &indexed));

    println!("Prefix (implies indexed):");
    let prefixed = SerializeOptions::new().with_prefix("foo");
    println!("{}\n", serialize(&list, &prefixed));

    println!("Arrays joined, raw:");
    let joined = SerializeOptions::new()
        .with_array_to_string(true)
        .with_raw(true);
    println!("{}\n", serialize(&data, &joined));

    let input = "?filter[status]=open&filter[owner]=sam&tags=a,b&flag";

    println!("Nested parse of {:?}:", input);
    print_map(unserialize(input, &UnserializeOptions::new()).into());

    println!("Shallow:");
    let shallow = UnserializeOptions::new().with_shallow(true);
    print_map(unserialize(input, &shallow).into());

    println!("Split on commas, empty flag as \"\":");
    let split = UnserializeOptions::new()
        .with_split_values(true)
        .with_empty("");
    print_map(unserialize(input, &split).into());

    println!("Split on a pattern:");
    let pattern = UnserializeOptions::new().with_split_values(SplitValues::pattern(r"[|;]")?);
    print_map(unserialize("ids=1|2;3", &pattern).into());

    Ok(())
}

fn print_map(value: QueryValue) {
    if let QueryValue::Object(map) = value {
        for (key, value) in &map {
            println!("  {} = {:?}", key, value);
        }
    }
    println!();
}
