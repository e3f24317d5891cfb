//! Cache service client: blocking lookup plus fire-and-forget store/delete.

use std::thread;

use log::debug;

use crate::entry::Record;
use crate::fetch_task::FetchTask;
use crate::sources;

/// Client for the key-value cache service fronted by HTTP.
///
/// GET returns the stored payload for a word, PUT upserts it, DELETE removes
/// it. Payloads are the serde_json encoding of [`Record`]; anything the
/// service hands back that does not deserialize is treated as a miss.
#[derive(Clone)]
pub struct CacheClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl CacheClient {
    pub fn new(agent: ureq::Agent, endpoint: String) -> Self {
        Self { agent, endpoint }
    }

    /// Starts a cache lookup for `word`.
    ///
    /// Any failure (service down, key absent, undecodable payload) joins as
    /// `None`; the caller falls through to the remote dictionary sources.
    pub fn spawn_lookup(&self, word: &str) -> FetchTask<Record> {
        let agent = self.agent.clone();
        let url = sources::request_url(&self.endpoint, &[("word", word)]);
        FetchTask::spawn("cache-lookup", move || {
            let body = sources::fetch_bytes(&agent, &url)?;
            match serde_json::from_slice(&body) {
                Ok(record) => Some(record),
                Err(error) => {
                    debug!("discarding undecodable cache payload: {error}");
                    None
                }
            }
        })
    }

    /// Stores or deletes the entry for `word` on a detached worker.
    ///
    /// `Some(record)` upserts, `None` deletes. Best effort: the caller never
    /// observes the outcome, and two concurrent lookups racing on the same
    /// word simply leave whichever write lands last.
    pub fn store(&self, word: &str, record: Option<Record>) {
        let agent = self.agent.clone();
        let url = sources::request_url(&self.endpoint, &[("word", word)]);
        let word = word.to_string();
        let spawned = thread::Builder::new()
            .name(format!("cache-store-{word}"))
            .spawn(move || {
                let result = match record {
                    Some(record) => match serde_json::to_vec(&record) {
                        Ok(payload) => agent
                            .put(&url)
                            .set("Content-Type", "application/json")
                            .send_bytes(&payload)
                            .map(|_| ()),
                        Err(error) => {
                            debug!("cache store for '{word}' could not serialize: {error}");
                            return;
                        }
                    },
                    None => agent.delete(&url).call().map(|_| ()),
                };
                if let Err(error) = result {
                    debug!("cache store for '{word}' failed: {error}");
                }
            });
        if let Err(error) = spawned {
            debug!("failed to spawn cache store worker: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CacheClient;

    #[test]
    fn test_lookup_miss_when_service_unreachable() {
        let client = CacheClient::new(
            crate::sources::build_agent(),
            "http://127.0.0.1:1".to_string(),
        );
        let mut task = client.spawn_lookup("test");
        assert_eq!(task.join(), None);
    }

    #[test]
    fn test_store_failure_is_silent() {
        let client = CacheClient::new(
            crate::sources::build_agent(),
            "http://127.0.0.1:1".to_string(),
        );
        // Nothing listens on the endpoint; store must neither block the
        // caller nor surface the failure.
        client.store("test", None);
    }
}
