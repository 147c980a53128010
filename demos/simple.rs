//! Typed round trip through a query string.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_urlquery::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Search {
    q: String,
    page: u32,
    exact: bool,
    tags: Vec<String>,
    owner: Owner,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Owner {
    name: String,
    team: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let search = Search {
        q: "yes I can".to_string(),
        page: 2,
        exact: false,
        tags: vec!["rust".to_string(), "web & wasm".to_string()],
        owner: Owner {
            name: "Alice Johnson".to_string(),
            team: None,
        },
    };

    let query = to_string(&search)?;
    println!("Query string:\n{}\n", query);

    let search_back: Search = from_str(&query)?;
    assert_eq!(search, search_back);
    println!("✓ Round-trip successful");

    Ok(())
}
