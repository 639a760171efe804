//! Note payload codec
//!
//! Notes are stored as a JSON object carrying the content fields. Values
//! written before the structured format existed are plain strings; those
//! decode as the note text with every other field zeroed.

use crate::error::Result;
use crate::models::NoteContent;

/// Outcome of parsing a stored value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedPayload {
    Decoded(NoteContent),
    LegacyFallback { text: String },
}

impl DecodedPayload {
    /// Parse a raw store value, classifying anything that is not the
    /// structured format as legacy text.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<NoteContent>(raw) {
            Ok(content) => DecodedPayload::Decoded(content),
            Err(_) => DecodedPayload::LegacyFallback {
                text: raw.to_string(),
            },
        }
    }

    pub fn into_content(self) -> NoteContent {
        match self {
            DecodedPayload::Decoded(content) => content,
            DecodedPayload::LegacyFallback { text } => NoteContent {
                text,
                tag: String::new(),
                original_ttl: 0,
                created_at: 0,
            },
        }
    }
}

/// Encode note content for storage
pub fn encode(content: &NoteContent) -> Result<String> {
    Ok(serde_json::to_string(content)?)
}

/// Decode a stored value. Never fails.
pub fn decode(raw: &str) -> NoteContent {
    DecodedPayload::parse(raw).into_content()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NoteContent {
        NoteContent {
            text: "buy milk".to_string(),
            tag: "errand".to_string(),
            original_ttl: 120,
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_round_trip() {
        let content = sample();

        let encoded = encode(&content).unwrap();
        let decoded = decode(&encoded);

        assert_eq!(decoded, content);
        assert_eq!(encode(&decoded).unwrap(), encoded);
    }

    #[test]
    fn test_round_trip_keeps_awkward_text() {
        let content = NoteContent {
            text: "line one\n\"quoted\" {braces} note:inside ünïcode".to_string(),
            tag: String::new(),
            original_ttl: -5,
            created_at: 0,
        };

        assert_eq!(decode(&encode(&content).unwrap()), content);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(encode(&sample()).unwrap(), encode(&sample()).unwrap());
    }

    #[test]
    fn test_encoding_excludes_id_and_remaining_ttl() {
        let value: serde_json::Value = serde_json::from_str(&encode(&sample()).unwrap()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("ttl"));
    }

    #[test]
    fn test_legacy_plain_string() {
        let decoded = decode("plain legacy string");

        assert_eq!(
            decoded,
            NoteContent {
                text: "plain legacy string".to_string(),
                tag: String::new(),
                original_ttl: 0,
                created_at: 0,
            }
        );
    }

    #[test]
    fn test_json_that_is_not_a_note_falls_back() {
        assert_eq!(
            DecodedPayload::parse("42"),
            DecodedPayload::LegacyFallback {
                text: "42".to_string()
            }
        );
        assert_eq!(decode(r#"{"text": 7}"#).text, r#"{"text": 7}"#);
        assert_eq!(decode("").text, "");
    }

    #[test]
    fn test_partial_object_fills_defaults() {
        let decoded = decode(r#"{"text":"only text"}"#);

        assert_eq!(decoded.text, "only text");
        assert_eq!(decoded.tag, "");
        assert_eq!(decoded.original_ttl, 0);
        assert_eq!(decoded.created_at, 0);
    }
}
