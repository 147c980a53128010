//! Picking URLs apart with the location helpers.
//!
//! Run with: cargo run --example location

use serde_urlquery::{
    basename, hash_sanitize, loc, segment, segments, unserialize_location, Loc, Location,
    UnserializeOptions,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let href = "https://www.example.com:8443/path/to/file/yummy.html?skippy=jif&tags[]=a#top.section";

    let parts = loc(href, None);
    println!("{:#?}\n", parts);

    println!("segments:    {:?}", segments(href));
    println!("segment(-2): {:?}", segment(-2, href));
    println!("basename:    {:?}", basename(href, Some(".html")));
    println!("hash:        {:?}\n", hash_sanitize(&parts.hash));

    // A parsed URL stands in for the current location.
    let current = url::Url::parse(href)?;
    let relative = loc("/other/page", Some(&current as &dyn Location));
    println!("relative href: {}", relative.href);

    let from_current = Loc::from_location(&current);
    assert_eq!(from_current.pathname, parts.pathname);

    let params = unserialize_location(&current, &UnserializeOptions::new());
    println!("query params:  {:?}", params);

    Ok(())
}
