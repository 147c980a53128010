//! Building query values with the query! macro.
//!
//! Run with: cargo run --example macro

use serde_urlquery::{query, serialize, unserialize, QueryValue, SerializeOptions, UnserializeOptions};

fn main() {
    let data = query!({
        "foo": { "bar": ["one", "two"] },
        "q": "yes I can",
        "page": 2,
        "draft": false,
        "cursor": null
    });

    let encoded = serialize(&data, &SerializeOptions::new());
    println!("Serialized:\n{}\n", encoded);

    let decoded = unserialize(&encoded, &UnserializeOptions::new());
    println!("Unserialized:");
    for (key, value) in &decoded {
        println!("  {} = {:?}", key, value);
    }

    // Scalars come back as strings; structure survives.
    assert_eq!(decoded.get("foo"), Some(&query!({ "bar": ["one", "two"] })));
    assert_eq!(decoded.get("page"), Some(&QueryValue::from("2")));
    println!("\n✓ Structure preserved");
}
