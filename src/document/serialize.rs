//! Script-safe state serialization.
//!
//! The serialized page state is embedded inside a `<script>` element.
//! Any `<` in the payload could open `</script>` and break out of the
//! element, so angle brackets, ampersands and the JS line separators are
//! emitted as unicode escapes (legal inside JSON string literals).

use serde::Serialize;

/// Serialize a value to a string safe to inline in a `<script>` body.
pub fn serialize_for_script<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn escapes_script_breakout() {
        let mut map = BTreeMap::new();
        map.insert("html", "</script><script>alert(1)</script>");

        let out = serialize_for_script(&map).unwrap();
        assert!(!out.contains("</script>"));
        assert!(out.contains("\\u003c/script\\u003e"));
    }

    #[test]
    fn escapes_line_separators() {
        let out = serialize_for_script(&"a\u{2028}b\u{2029}c").unwrap();
        assert_eq!(out, "\"a\\u2028b\\u2029c\"");
    }

    #[test]
    fn plain_payloads_pass_through() {
        let mut map = BTreeMap::new();
        map.insert("title", "Donald Trump");
        assert_eq!(
            serialize_for_script(&map).unwrap(),
            r#"{"title":"Donald Trump"}"#
        );
    }
}
