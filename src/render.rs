//! Markdown-style rendering of a dictionary record into display lines.

use crate::entry::{Record, Symbol};

/// Display labels for the grammatical-form codes the API emits.
const EXCHANGE_LABELS: [(&str, &str); 7] = [
    ("word_pl", "复数"),
    ("word_past", "过去时"),
    ("word_done", "完成时"),
    ("word_ing", "进行时"),
    ("word_third", "第三人称单数"),
    ("word_er", "比较级"),
    ("word_est", "最高级"),
];

/// Marker appended after a phonetic spelling whose clip bytes are present.
const AUDIO_MARKER: &str = "🔇";

const TTS_HOST_PREFIX: &str = "http://res-tts.iciba.com";

fn exchange_label(code: &str) -> &str {
    EXCHANGE_LABELS
        .iter()
        .find(|(known_code, _)| *known_code == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

/// The TTS field often carries a resource path; strip the host prefix and a
/// stray leading comma before display.
fn clean_tts_spelling(spelling: &str) -> &str {
    let trimmed = spelling.strip_prefix(TTS_HOST_PREFIX).unwrap_or(spelling);
    trimmed.strip_prefix(',').unwrap_or(trimmed)
}

fn phonetics_line(symbol: &Symbol) -> Option<String> {
    let mut line = "*".to_string();
    if let Some(ph_am) = &symbol.ph_am {
        line.push_str(&format!(" US: [{ph_am}]"));
        if symbol.ph_am_audio.is_some() {
            line.push_str(AUDIO_MARKER);
        }
    }
    if let Some(ph_en) = &symbol.ph_en {
        line.push_str(&format!(" UK: [{ph_en}]"));
        if symbol.ph_en_audio.is_some() {
            line.push_str(AUDIO_MARKER);
        }
    }
    if let Some(ph_other) = &symbol.ph_other {
        line.push_str(&format!(" TTS: [{}]", clean_tts_spelling(ph_other)));
        if symbol.ph_tts_audio.is_some() {
            line.push_str(AUDIO_MARKER);
        }
    }
    (line.len() > 1).then_some(line)
}

/// Renders `record` as markdown-style lines for an editor buffer.
pub fn render_lines(record: &Record) -> Vec<String> {
    let mut lines = vec![format!("### {}", record.word_name)];

    let exchange_lines: Vec<String> = EXCHANGE_LABELS
        .iter()
        .map(|(code, _)| *code)
        .chain(
            record
                .exchange
                .keys()
                .map(String::as_str)
                .filter(|code| !EXCHANGE_LABELS.iter().any(|(known, _)| known == code)),
        )
        .filter_map(|code| {
            let forms = record.exchange.get(code)?;
            (!forms.is_empty())
                .then(|| format!(" * {}: {}", exchange_label(code), forms.join("; ")))
        })
        .collect();
    if !exchange_lines.is_empty() {
        lines.push(String::new());
        lines.push("* exchange:".to_string());
        lines.extend(exchange_lines);
    }

    for symbol in &record.symbols {
        lines.push(String::new());
        if let Some(line) = phonetics_line(symbol) {
            lines.push(line);
        }
        for part in &symbol.parts {
            if !part.part.is_empty() {
                lines.push(format!(" * {}", part.part));
            }
            for meaning in &part.means {
                lines.push(format!("  * {meaning}"));
            }
            lines.push(String::new());
        }
    }

    for sentence in &record.sentences {
        lines.push(format!("> {}", sentence.orig));
        lines.push(format!("> {}", sentence.trans));
        lines.push(String::new());
    }

    lines
}
