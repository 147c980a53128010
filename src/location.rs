//! URL and location helpers.
//!
//! The string helpers accept a full URL (`https://host/a/b?x=1#top`), a
//! protocol-relative one (`//host/a/b`) or a bare path (`/a/b`).
//! Protocol-relative URLs are read as `http:`.
//!
//! The "current location" is passed in through the [`Location`] trait,
//! implemented for [`url::Url`]. Nothing here reads process-global state.
//!
//! ```rust
//! use serde_urlquery::{basename, segment, segments};
//!
//! let url = "https://www.example.com/path/to/file/yummy.html?skippy=jif#top";
//! assert_eq!(basename(url, Some(".html")), "yummy");
//! assert_eq!(segments(url), vec!["path", "to", "file", "yummy.html"]);
//! assert_eq!(segment(-2, url), "file");
//! ```

use std::borrow::Cow;

/// A source of location parts, like a browser's `window.location`.
///
/// `protocol` includes the trailing `:`, `search` its leading `?` and
/// `hash` its leading `#`. Absent parts are empty strings.
pub trait Location {
    fn protocol(&self) -> String;
    fn host(&self) -> String;
    fn pathname(&self) -> String;
    fn search(&self) -> String;
    fn hash(&self) -> String;
}

impl Location for url::Url {
    fn protocol(&self) -> String {
        format!("{}:", self.scheme())
    }

    fn host(&self) -> String {
        match (self.host_str(), self.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        }
    }

    fn pathname(&self) -> String {
        self.path().to_string()
    }

    fn search(&self) -> String {
        match self.query() {
            Some(query) if !query.is_empty() => format!("?{query}"),
            _ => String::new(),
        }
    }

    fn hash(&self) -> String {
        match self.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        }
    }
}

/// Every part of a location, broken out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Loc {
    pub href: String,
    pub protocol: String,
    pub host: String,
    pub hostname: String,
    pub port: String,
    pub pathname: String,
    pub basename: String,
    pub search: String,
    pub hash: String,
}

impl Loc {
    /// Breaks `url` into its parts. See [`loc`].
    pub fn parse(url: &str, current: Option<&dyn Location>) -> Self {
        let pathname = pathname(url);
        let basename = basename(url, None);

        let mut rest = url;
        let hash = take_suffix(&mut rest, '#');
        let search = take_suffix(&mut rest, '?');

        let (protocol, rest) = match rest.split_once("//") {
            Some((protocol, tail)) if !tail.contains("//") => (protocol.to_string(), tail),
            _ => (String::new(), rest.rsplit("//").next().unwrap_or(rest)),
        };

        let host = if rest == pathname {
            current.map(|location| location.host()).unwrap_or_default()
        } else {
            rest.split('/').next().unwrap_or_default().to_string()
        };
        let (hostname, port) = split_host(&host);

        let href = format!(
            "{}//{host}{pathname}{search}{hash}",
            if protocol.is_empty() { "http:" } else { &protocol }
        );

        Loc {
            href,
            protocol,
            host,
            hostname,
            port,
            pathname,
            basename,
            search,
            hash,
        }
    }

    /// Reads every part from a [`Location`].
    pub fn from_location(location: &dyn Location) -> Self {
        let protocol = location.protocol();
        let host = location.host();
        let (hostname, port) = split_host(&host);
        let path = location.pathname();
        let pathname = pathname(&path);
        let basename = basename(&path, None);
        let search = location.search();
        let hash = location.hash();

        let href = format!(
            "{}//{host}{pathname}{search}{hash}",
            if protocol.is_empty() { "http:" } else { &protocol }
        );

        Loc {
            href,
            protocol,
            host,
            hostname,
            port,
            pathname,
            basename,
            search,
            hash,
        }
    }
}

/// Removes `marker` and everything after it from `rest`, returning the
/// removed text. Only a single, non-trailing marker counts.
fn take_suffix(rest: &mut &str, marker: char) -> String {
    let mut parts = rest.split(marker);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(head), Some(tail), None) if !tail.is_empty() => {
            let suffix = format!("{marker}{tail}");
            *rest = head;
            suffix
        }
        _ => String::new(),
    }
}

fn split_host(host: &str) -> (String, String) {
    let mut parts = host.split(':');
    let hostname = parts.next().unwrap_or_default().to_string();
    let port = parts.next().unwrap_or_default().to_string();
    (hostname, port)
}

/// Breaks `url` into a [`Loc`]. A path-only `url` takes its host from
/// `current`, or leaves it empty.
///
/// ```rust
/// use serde_urlquery::loc;
///
/// let parts = loc("http://www.example.com:8080/path/to/file?skippy=jif#top", None);
/// assert_eq!(parts.hostname, "www.example.com");
/// assert_eq!(parts.port, "8080");
/// assert_eq!(parts.basename, "file");
/// assert_eq!(parts.search, "?skippy=jif");
/// ```
pub fn loc(url: &str, current: Option<&dyn Location>) -> Loc {
    Loc::parse(url, current)
}

/// Returns the path of `url`, always starting with a single `/`.
pub fn pathname(url: &str) -> String {
    let url: Cow<'_, str> = if url.starts_with("//") {
        Cow::Owned(format!("http:{url}"))
    } else {
        Cow::Borrowed(url)
    };

    let path = url.split_once('#').map_or(&*url, |(head, _)| head);
    let path = path.split_once('?').map_or(path, |(head, _)| head);

    let path = if path.starts_with("http://") || path.starts_with("https://") {
        path.splitn(4, '/').nth(3).unwrap_or_default()
    } else {
        path
    };

    format!("/{}", path.strip_prefix('/').unwrap_or(path))
}

/// Returns the last segment of the path of `url`, with `ext` removed from
/// its end when given.
pub fn basename(url: &str, ext: Option<&str>) -> String {
    let path = pathname(url);
    let name = path.rsplit('/').next().unwrap_or_default();

    match ext {
        Some(ext) if !ext.is_empty() => name.strip_suffix(ext).unwrap_or(name).to_string(),
        _ => name.to_string(),
    }
}

/// Splits the path of `url` on `/`, ignoring one leading and one trailing
/// slash.
pub fn segments(url: &str) -> Vec<String> {
    let path = pathname(url);
    let path = path.strip_prefix('/').unwrap_or(&path);
    let path = path.strip_suffix('/').unwrap_or(path);
    path.split('/').map(str::to_string).collect()
}

/// Returns the `index`th segment of the path of `url`. Negative indices
/// count from the end. Out of range gives an empty string.
pub fn segment(index: i64, url: &str) -> String {
    let segs = segments(url);

    let position = if index < 0 {
        usize::try_from(index.unsigned_abs())
            .ok()
            .and_then(|back| segs.len().checked_sub(back))
    } else {
        usize::try_from(index).ok()
    };

    position
        .and_then(|i| segs.get(i))
        .cloned()
        .unwrap_or_default()
}

/// Strips a URL fragment down to `# _ - . ! /` and ASCII alphanumerics,
/// then escapes each `.` so the result is usable as a CSS selector.
///
/// ```rust
/// use serde_urlquery::hash_sanitize;
///
/// assert_eq!(hash_sanitize("#foo.bar"), "#foo\\.bar");
/// ```
pub fn hash_sanitize(hash: &str) -> String {
    hash.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '_' | '-' | '.' | '!' | '/'))
        .fold(String::with_capacity(hash.len()), |mut out, c| {
            if c == '.' {
                out.push('\\');
            }
            out.push(c);
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "http://www.example.com/path/to/file/?skippy=jif#foooooo";

    struct Fixed;

    impl Location for Fixed {
        fn protocol(&self) -> String {
            "http:".to_string()
        }
        fn host(&self) -> String {
            "localhost:8001".to_string()
        }
        fn pathname(&self) -> String {
            "/test/index.html".to_string()
        }
        fn search(&self) -> String {
            String::new()
        }
        fn hash(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn test_loc_from_full_href() {
        assert_eq!(
            loc(FULL, None),
            Loc {
                href: FULL.to_string(),
                protocol: "http:".to_string(),
                host: "www.example.com".to_string(),
                hostname: "www.example.com".to_string(),
                port: String::new(),
                pathname: "/path/to/file/".to_string(),
                basename: String::new(),
                search: "?skippy=jif".to_string(),
                hash: "#foooooo".to_string(),
            }
        );
    }

    #[test]
    fn test_loc_protocol_relative() {
        let parts = loc("//example.com/path/to/file#foooooo", None);
        assert_eq!(parts.href, "http://example.com/path/to/file#foooooo");
        assert_eq!(parts.protocol, "");
        assert_eq!(parts.host, "example.com");
        assert_eq!(parts.basename, "file");
        assert_eq!(parts.search, "");
        assert_eq!(parts.hash, "#foooooo");
    }

    #[test]
    fn test_loc_path_only_uses_current_host() {
        let parts = loc("/path/to/file", Some(&Fixed as &dyn Location));
        assert_eq!(parts.href, "http://localhost:8001/path/to/file");
        assert_eq!(parts.host, "localhost:8001");
        assert_eq!(parts.hostname, "localhost");
        assert_eq!(parts.port, "8001");
        assert_eq!(parts.pathname, "/path/to/file");

        assert_eq!(loc("/path/to/file", None).host, "");
    }

    #[test]
    fn test_loc_from_location() {
        let parts = Loc::from_location(&Fixed);
        assert_eq!(parts.href, "http://localhost:8001/test/index.html");
        assert_eq!(parts.basename, "index.html");
        assert_eq!(parts.port, "8001");
    }

    #[test]
    fn test_url_location() {
        let url = url::Url::parse("https://example.com:8443/a/b.html?x=1#top").unwrap();
        assert_eq!(Location::protocol(&url), "https:");
        assert_eq!(Location::host(&url), "example.com:8443");
        assert_eq!(Location::search(&url), "?x=1");
        assert_eq!(Location::hash(&url), "#top");

        let parts = Loc::from_location(&url);
        assert_eq!(parts.href, "https://example.com:8443/a/b.html?x=1#top");
        assert_eq!(parts.basename, "b.html");
    }

    #[test]
    fn test_pathname() {
        assert_eq!(pathname("/test/index.html"), "/test/index.html");
        assert_eq!(pathname(FULL), "/path/to/file/");
        assert_eq!(
            pathname("https://www.example.com/path/to/file/?skippy=jif#foooooo"),
            "/path/to/file/"
        );
        assert_eq!(
            pathname("//www.example.com/path/to/file/yummy.html?skippy=jif#foooooo"),
            "/path/to/file/yummy.html"
        );
        assert_eq!(pathname("http://www.example.com"), "/");
        assert_eq!(pathname("relative/path"), "/relative/path");
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("/test/index.html"), vec!["test", "index.html"]);
        assert_eq!(segments(FULL), vec!["path", "to", "file"]);
    }

    #[test]
    fn test_segment() {
        let path = "/test/index.html";
        assert_eq!(segment(0, path), "test");
        assert_eq!(segment(1, path), "index.html");
        assert_eq!(segment(2, path), "");
        assert_eq!(segment(-1, path), "index.html");
        assert_eq!(segment(-2, path), "test");
        assert_eq!(segment(-59, path), "");
        assert_eq!(segment(i64::MIN, path), "");

        assert_eq!(segment(1, FULL), "to");
        assert_eq!(segment(-1, FULL), "file");
        assert_eq!(segment(-2, FULL), "to");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/test/index.html", None), "index.html");
        assert_eq!(basename(FULL, None), "");
        assert_eq!(
            basename("http://www.example.com/path/to/file?skippy=jif#foooooo", None),
            "file"
        );
        assert_eq!(
            basename("//www.example.com/path/to/file/yummy.html?skippy=jif#foooooo", None),
            "yummy.html"
        );
        assert_eq!(
            basename(
                "https://www.example.com/path/to/file/yummy.html?skippy=jif#foooooo",
                Some(".html")
            ),
            "yummy"
        );
        assert_eq!(basename("/path/to/file.foo.js", Some(".js")), "file.foo");
    }

    #[test]
    fn test_hash_sanitize() {
        assert_eq!(hash_sanitize("#foo.bar"), "#foo\\.bar");
        assert_eq!(
            hash_sanitize("#foo<script>alert(\"sucka!\")</script>"),
            "#fooscriptalertsucka!/script"
        );
        assert_eq!(hash_sanitize(""), "");
    }
}
