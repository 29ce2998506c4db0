//! JSON body encoding
//!
//! Serializes with `": "` after keys and `", "` between members, and escapes
//! every non-ASCII character as a lowercase `\uXXXX` sequence, matching the
//! output of a stock JSON dumper byte for byte.

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io::{self, Write};

/// Formatter producing `{"key": "value", "other": 1}`
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..idx])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Serialize `value` into a JSON body
pub fn to_body<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut body = Vec::with_capacity(64);
    let mut serializer = Serializer::with_formatter(&mut body, SpacedFormatter);
    value.serialize(&mut serializer)?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: &serde_json::Value) -> String {
        String::from_utf8(to_body(value).unwrap()).unwrap()
    }

    #[test]
    fn test_single_member_spacing() {
        assert_eq!(encode(&json!({"path": "/"})), r#"{"path": "/"}"#);
    }

    #[test]
    fn test_members_and_arrays() {
        let value = json!({"a": [1, 2, 3], "b": {}, "c": []});
        assert_eq!(encode(&value), r#"{"a": [1, 2, 3], "b": {}, "c": []}"#);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            encode(&json!("quote\" back\\ tab\t")),
            r#""quote\" back\\ tab\t""#
        );
        // Forward slashes are left alone
        assert_eq!(encode(&json!("/a/b")), r#""/a/b""#);
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        assert_eq!(encode(&json!("café")), r#""caf\u00e9""#);
        assert_eq!(encode(&json!("a😀b")), r#""a\ud83d\ude00b""#);
    }
}
