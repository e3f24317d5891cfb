//! Dictionary entry data model shared by the fetchers, the cache payload and
//! the renderer.

use std::collections::BTreeMap;

/// Merged dictionary entry for one word.
///
/// Symbols and exchange forms always come from the JSON dictionary source;
/// sentences only ever come from the XML source. The cache service stores the
/// serde_json encoding of this type, keyed by word.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Record {
    pub word_name: String,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
    /// Grammatical-form code (`word_pl`, `word_past`, ...) to form strings.
    #[serde(default)]
    pub exchange: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub sentences: Vec<SentencePair>,
}

/// One phonetic transcription variant with optional pronunciation audio.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Symbol {
    /// US phonetic spelling.
    pub ph_am: Option<String>,
    /// UK phonetic spelling.
    pub ph_en: Option<String>,
    /// TTS-derived spelling (often a resource path rather than IPA).
    pub ph_other: Option<String>,
    /// Raw audio bytes for the US pronunciation, when the clip fetch succeeded.
    #[serde(default)]
    pub ph_am_audio: Option<Vec<u8>>,
    #[serde(default)]
    pub ph_en_audio: Option<Vec<u8>>,
    #[serde(default)]
    pub ph_tts_audio: Option<Vec<u8>>,
    #[serde(default)]
    pub parts: Vec<PartOfSpeech>,
}

/// A grammatical category and its meanings.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PartOfSpeech {
    pub part: String,
    pub means: Vec<String>,
}

/// Example sentence with its translation.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SentencePair {
    pub orig: String,
    pub trans: String,
}

#[cfg(test)]
mod tests {
    use super::{PartOfSpeech, Record, SentencePair, Symbol};

    #[test]
    fn test_cache_payload_round_trip() {
        let record = Record {
            word_name: "test".to_string(),
            symbols: vec![Symbol {
                ph_am: Some("tɛst".to_string()),
                ph_am_audio: Some(vec![0xff, 0xfb]),
                parts: vec![PartOfSpeech {
                    part: "n.".to_string(),
                    means: vec!["a trial".to_string()],
                }],
                ..Symbol::default()
            }],
            exchange: [("word_pl".to_string(), vec!["tests".to_string()])]
                .into_iter()
                .collect(),
            sentences: vec![SentencePair {
                orig: "This is a test.".to_string(),
                trans: "这是个测试。".to_string(),
            }],
        };
        let bytes = serde_json::to_vec(&record).expect("record should serialize");
        let restored: Record =
            serde_json::from_slice(&bytes).expect("payload should deserialize");
        assert_eq!(restored, record);
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        let restored: Record =
            serde_json::from_slice(br#"{"word_name":"test"}"#).expect("minimal payload");
        assert_eq!(restored.word_name, "test");
        assert!(restored.symbols.is_empty());
        assert!(restored.exchange.is_empty());
        assert!(restored.sentences.is_empty());
    }
}
