//! Pronunciation clip fetcher.

use crate::fetch_task::FetchTask;
use crate::sources;

const AUDIO_EXTENSION: &str = "mp3";

/// Whether `target` points at a pronunciation clip we are willing to fetch.
pub fn is_audio_target(target: &str) -> bool {
    sources::is_valid_target(target) && target.ends_with(AUDIO_EXTENSION)
}

/// Starts a fetch of the raw clip bytes at `url`.
///
/// A target that is not a well-formed audio URL yields `None` without any
/// request being made. The body is returned unparsed; decoding and playback
/// belong to the audio subsystem.
pub fn spawn_clip_fetch(agent: &ureq::Agent, url: &str) -> FetchTask<Vec<u8>> {
    let agent = agent.clone();
    let url = url.to_string();
    FetchTask::spawn("audio-clip", move || {
        if !is_audio_target(&url) {
            return None;
        }
        sources::fetch_bytes(&agent, &url)
    })
}

#[cfg(test)]
mod tests {
    use super::{is_audio_target, spawn_clip_fetch};

    #[test]
    fn test_audio_target_requires_extension() {
        assert!(is_audio_target("http://res.iciba.com/resource/amp3/a.mp3"));
        assert!(!is_audio_target("http://res.iciba.com/resource/amp3/a.wav"));
        assert!(!is_audio_target("res.iciba.com/a.mp3"));
    }

    #[test]
    fn test_wrong_extension_short_circuits() {
        // No server behind this address; the extension gate must reject the
        // target before any connection is attempted.
        let agent = crate::sources::build_agent();
        let mut task = spawn_clip_fetch(&agent, "http://127.0.0.1:1/a.wav");
        assert_eq!(task.join(), None);
    }
}
