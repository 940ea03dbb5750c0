use std::fmt::Write;

use crate::error::{GeoHandleError, Result};

/// Whether `text` looks like hex-encoded WKB: a non-empty, even-length run of hex digits.
pub fn is_hex(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn to_hex(bytes: &[u8], uppercase: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Writing to a String cannot fail.
        let _ = if uppercase {
            write!(out, "{b:02X}")
        } else {
            write!(out, "{b:02x}")
        };
    }
    out
}

pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if !is_hex(text) {
        return Err(GeoHandleError::Parse(
            "hex input must be an even number of hex digits".to_string(),
        ));
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&text[i..i + 2], 16)
                .map_err(|err| GeoHandleError::Parse(err.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let bytes = vec![0x01, 0xab, 0x00, 0xff];
        assert_eq!(to_hex(&bytes, true), "01AB00FF");
        assert_eq!(to_hex(&bytes, false), "01ab00ff");
        assert_eq!(from_hex("01ab00FF").unwrap(), bytes);
    }

    #[test]
    fn detection() {
        assert!(is_hex("0101000000"));
        assert!(!is_hex("POINT(1 2)"));
        assert!(!is_hex("010"));
        assert!(!is_hex(""));
        assert!(from_hex("0G").is_err());
    }
}
