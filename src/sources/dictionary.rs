//! Remote dictionary API fetchers, JSON and XML flavors.
//!
//! Both flavors hit the same endpoint with `{key, type, w}` query parameters.
//! The JSON flavor is authoritative for symbols and exchange forms and
//! prefetches the pronunciation clips referenced by each symbol; the XML
//! flavor only ever contributes example sentences.

use std::collections::BTreeMap;

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;

use crate::config::DictionaryConfig;
use crate::entry::{PartOfSpeech, Record, SentencePair, Symbol};
use crate::fetch_task::FetchTask;
use crate::sources;
use crate::sources::audio;

/// Client for the remote dictionary API.
#[derive(Clone)]
pub struct DictionaryClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
}

impl DictionaryClient {
    pub fn new(agent: ureq::Agent, config: &DictionaryConfig) -> Self {
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn request_url(&self, flavor: &str, word: &str) -> String {
        sources::request_url(
            &self.endpoint,
            &[("key", &self.api_key), ("type", flavor), ("w", word)],
        )
    }

    /// Starts the JSON-flavor lookup for `word`.
    ///
    /// Joins as the full record (sentences left empty) or `None` when the
    /// payload is invalid, which includes an HTTP 200 body without a
    /// top-level `word_name`.
    pub fn spawn_json_lookup(&self, word: &str) -> FetchTask<Record> {
        let agent = self.agent.clone();
        let url = self.request_url("json", word);
        FetchTask::spawn("dict-json", move || {
            let body = sources::fetch_bytes(&agent, &url)?;
            parse_json_payload(&agent, &body)
        })
    }

    /// Starts the XML-flavor lookup for `word`, joining as its sentence list.
    pub fn spawn_xml_lookup(&self, word: &str) -> FetchTask<Vec<SentencePair>> {
        let agent = self.agent.clone();
        let url = self.request_url("xml", word);
        FetchTask::spawn("dict-xml", move || {
            let body = sources::fetch_bytes(&agent, &url)?;
            parse_xml_sentences(&body)
        })
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn parse_parts(symbol_value: &Value) -> Vec<PartOfSpeech> {
    let Some(part_values) = symbol_value.get("parts").and_then(Value::as_array) else {
        return Vec::new();
    };
    part_values
        .iter()
        .map(|part_value| PartOfSpeech {
            part: part_value
                .get("part")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
            means: part_value
                .get("means")
                .and_then(Value::as_array)
                .map(|means| {
                    means
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

fn parse_exchange(payload: &Value) -> BTreeMap<String, Vec<String>> {
    let mut exchange = BTreeMap::new();
    let Some(object) = payload.get("exchange").and_then(Value::as_object) else {
        return exchange;
    };
    for (code, forms_value) in object {
        let forms = match forms_value {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Value::String(form) if !form.is_empty() => vec![form.clone()],
            _ => Vec::new(),
        };
        exchange.insert(code.clone(), forms);
    }
    exchange
}

fn spawn_symbol_clip(agent: &ureq::Agent, symbol_value: &Value, field: &str) -> Option<FetchTask<Vec<u8>>> {
    let url = string_field(symbol_value, field)?;
    Some(audio::spawn_clip_fetch(agent, &url))
}

/// Parses the JSON dictionary payload, prefetching pronunciation clips.
///
/// All clip fetches for the whole payload are started before any is joined;
/// joins then happen in symbol order, so attachment order matches the
/// payload's symbol order.
fn parse_json_payload(agent: &ureq::Agent, body: &[u8]) -> Option<Record> {
    let payload: Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(error) => {
            debug!("malformed JSON dictionary payload: {error}");
            return None;
        }
    };
    let word_name = string_field(&payload, "word_name")?;

    let no_symbols = Vec::new();
    let symbol_values = payload
        .get("symbols")
        .and_then(Value::as_array)
        .unwrap_or(&no_symbols);

    let mut symbols = Vec::new();
    let mut clip_tasks = Vec::new();
    for symbol_value in symbol_values {
        symbols.push(Symbol {
            ph_am: string_field(symbol_value, "ph_am"),
            ph_en: string_field(symbol_value, "ph_en"),
            ph_other: string_field(symbol_value, "ph_other"),
            ph_am_audio: None,
            ph_en_audio: None,
            ph_tts_audio: None,
            parts: parse_parts(symbol_value),
        });
        clip_tasks.push([
            spawn_symbol_clip(agent, symbol_value, "ph_am_mp3"),
            spawn_symbol_clip(agent, symbol_value, "ph_en_mp3"),
            spawn_symbol_clip(agent, symbol_value, "ph_tts_mp3"),
        ]);
    }

    for (symbol, tasks) in symbols.iter_mut().zip(clip_tasks) {
        let [am, en, tts] = tasks;
        symbol.ph_am_audio = am.and_then(|mut task| task.join());
        symbol.ph_en_audio = en.and_then(|mut task| task.join());
        symbol.ph_tts_audio = tts.and_then(|mut task| task.join());
    }

    Some(Record {
        word_name,
        symbols,
        exchange: parse_exchange(&payload),
        sentences: Vec::new(),
    })
}

/// Parses the XML dictionary payload into its example sentences.
///
/// Expects a root dict node with `<sent>` children carrying `<orig>` and
/// `<trans>` text (plain or CDATA). A document without the root node or
/// without any sentence is no result.
fn parse_xml_sentences(body: &[u8]) -> Option<Vec<SentencePair>> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();

    #[derive(Clone, Copy)]
    enum SentField {
        Orig,
        Trans,
    }

    let mut saw_root = false;
    let mut in_sentence = false;
    let mut field: Option<SentField> = None;
    let mut orig = String::new();
    let mut trans = String::new();
    let mut sentences = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) => match element.name().as_ref() {
                b"dict" => saw_root = true,
                b"sent" => {
                    in_sentence = true;
                    orig.clear();
                    trans.clear();
                }
                b"orig" if in_sentence => field = Some(SentField::Orig),
                b"trans" if in_sentence => field = Some(SentField::Trans),
                _ => {}
            },
            Ok(Event::End(element)) => match element.name().as_ref() {
                b"sent" => {
                    in_sentence = false;
                    sentences.push(SentencePair {
                        orig: orig.trim().to_string(),
                        trans: trans.trim().to_string(),
                    });
                }
                b"orig" | b"trans" => field = None,
                _ => {}
            },
            Ok(Event::Text(text)) => {
                if let Some(active) = field {
                    let Ok(chunk) = text.unescape() else {
                        debug!("undecodable text in XML dictionary payload");
                        return None;
                    };
                    match active {
                        SentField::Orig => orig.push_str(&chunk),
                        SentField::Trans => trans.push_str(&chunk),
                    }
                }
            }
            Ok(Event::CData(cdata)) => {
                if let Some(active) = field {
                    let chunk = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    match active {
                        SentField::Orig => orig.push_str(&chunk),
                        SentField::Trans => trans.push_str(&chunk),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => {
                debug!("malformed XML dictionary payload: {error}");
                return None;
            }
        }
        buf.clear();
    }

    if !saw_root || sentences.is_empty() {
        return None;
    }
    Some(sentences)
}

#[cfg(test)]
mod tests {
    use super::{parse_json_payload, parse_xml_sentences};
    use crate::sources::build_agent;

    #[test]
    fn test_json_payload_without_word_name_is_invalid() {
        let agent = build_agent();
        let body = br#"{"errno": 404, "symbols": []}"#;
        assert!(parse_json_payload(&agent, body).is_none());
    }

    #[test]
    fn test_malformed_json_payload_is_invalid() {
        let agent = build_agent();
        assert!(parse_json_payload(&agent, b"<html>not json</html>").is_none());
    }

    #[test]
    fn test_json_payload_parses_symbols_exchange_and_empty_sentences() {
        let agent = build_agent();
        // Clip URL carries the wrong extension, so no fetch is attempted and
        // the audio slot stays empty.
        let body = r#"{
            "word_name": "test",
            "exchange": {"word_pl": ["tests"], "word_past": ""},
            "symbols": [{
                "ph_am": "tɛst",
                "ph_en": "test",
                "ph_am_mp3": "http://127.0.0.1:1/a.wav",
                "parts": [{"part": "n.", "means": ["a trial", "an exam"]}]
            }]
        }"#;
        let record = parse_json_payload(&agent, body.as_bytes()).expect("payload should parse");
        assert_eq!(record.word_name, "test");
        assert!(record.sentences.is_empty());
        assert_eq!(record.exchange["word_pl"], vec!["tests".to_string()]);
        assert!(record.exchange["word_past"].is_empty());
        assert_eq!(record.symbols.len(), 1);
        let symbol = &record.symbols[0];
        assert_eq!(symbol.ph_am.as_deref(), Some("tɛst"));
        assert_eq!(symbol.ph_en.as_deref(), Some("test"));
        assert_eq!(symbol.ph_am_audio, None);
        assert_eq!(symbol.parts.len(), 1);
        assert_eq!(symbol.parts[0].part, "n.");
        assert_eq!(symbol.parts[0].means, vec!["a trial", "an exam"]);
    }

    #[test]
    fn test_xml_payload_parses_plain_and_cdata_sentences() {
        let body = r#"<dict>
            <sent>
                <orig><![CDATA[This is a test.]]></orig>
                <trans><![CDATA[这是个测试。]]></trans>
            </sent>
            <sent>
                <orig>Second sentence.</orig>
                <trans>Second translation.</trans>
            </sent>
        </dict>"#;
        let sentences = parse_xml_sentences(body.as_bytes()).expect("payload should parse");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].orig, "This is a test.");
        assert_eq!(sentences[0].trans, "这是个测试。");
        assert_eq!(sentences[1].orig, "Second sentence.");
        assert_eq!(sentences[1].trans, "Second translation.");
    }

    #[test]
    fn test_xml_payload_without_root_is_invalid() {
        assert!(parse_xml_sentences(b"<sent><orig>x</orig></sent>").is_none());
        assert!(parse_xml_sentences(b"not xml at all").is_none());
    }

    #[test]
    fn test_xml_payload_without_sentences_is_invalid() {
        assert!(parse_xml_sentences(b"<dict><key>test</key></dict>").is_none());
    }
}
