//! Percent-encoding in the form browsers apply to URI components.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the set left intact
/// by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a value. Spaces become `%20`; the serializer turns those
/// into `+` once the whole string is assembled.
pub(crate) fn encode_component(input: &str) -> Cow<'_, str> {
    utf8_percent_encode(input, COMPONENT).into()
}

/// Percent-decodes a key or value without ever failing.
///
/// Escapes that are not followed by two hex digits are kept verbatim, and
/// byte sequences that do not form valid UTF-8 are replaced with U+FFFD.
pub(crate) fn decode_component(input: &str) -> Cow<'_, str> {
    let decoded = percent_decode_str(input).decode_utf8_lossy();
    if let Cow::Owned(ref s) = decoded {
        if s.contains('\u{FFFD}') && !input.contains('\u{FFFD}') {
            tracing::debug!(input, "percent-decoded bytes were not valid UTF-8");
        }
    }
    decoded
}

/// Decodes a value: `+` means space, then percent escapes are resolved.
pub(crate) fn decode_form_value(input: &str) -> String {
    if input.contains('+') {
        decode_component(&input.replace('+', " ")).into_owned()
    } else {
        decode_component(input).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_uri_component() {
        assert_eq!(encode_component("yes I can"), "yes%20I%20can");
        assert_eq!(encode_component("a,b&c=d"), "a%2Cb%26c%3Dd");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("caf\u{e9}"), "caf%C3%A9");
        assert_eq!(encode_component("[]"), "%5B%5D");
    }

    #[test]
    fn test_decode_is_lossy_not_failing() {
        assert_eq!(decode_component("caf%C3%A9"), "caf\u{e9}");
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
        assert_eq!(decode_component("%FF"), "\u{FFFD}");
    }

    #[test]
    fn test_decode_form_value() {
        assert_eq!(decode_form_value("yes+I+can"), "yes I can");
        assert_eq!(decode_form_value("1%2B1"), "1+1");
    }
}
