use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::wkb::Endianness;

/// Options of a thread's engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Byte order of WKB and HEX output.
    pub wkb_byte_order: Endianness,

    /// Whether HEX output uses uppercase digits.
    pub hex_uppercase: bool,

    /// Segments per quarter circle used by `buffer_default`.
    pub default_quadrant_segments: i32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            wkb_byte_order: Endianness::LittleEndian,
            hex_uppercase: true,
            default_quadrant_segments: 8,
        }
    }
}

impl EngineOptions {
    /// Parse options from a JSON object. Missing keys take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_json() {
        let options = EngineOptions::from_json(r#"{"wkb_byte_order": "BigEndian"}"#).unwrap();
        assert_eq!(options.wkb_byte_order, Endianness::BigEndian);
        assert!(options.hex_uppercase);
        assert_eq!(options.default_quadrant_segments, 8);
    }

    #[test]
    fn json_round_trip() {
        let options = EngineOptions {
            hex_uppercase: false,
            default_quadrant_segments: 4,
            ..Default::default()
        };
        let json = options.to_json().unwrap();
        assert_eq!(EngineOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn bad_json() {
        assert!(EngineOptions::from_json("{").is_err());
    }
}
