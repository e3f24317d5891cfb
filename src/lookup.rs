//! Cache-first word lookup over the dual-flavor dictionary API.

use log::{debug, info};

use crate::config::Config;
use crate::entry::Record;
use crate::sources;
use crate::sources::cache::CacheClient;
use crate::sources::dictionary::DictionaryClient;

/// Coordinates one lookup: cache check, concurrent JSON/XML remote fetch,
/// merge, and best-effort cache population.
pub struct LookupManager {
    cache: CacheClient,
    dictionary: DictionaryClient,
}

impl LookupManager {
    /// Creates a manager with a fresh HTTP agent shared by all fetchers.
    pub fn new(config: &Config) -> Self {
        let agent = sources::build_agent();
        Self {
            cache: CacheClient::new(agent.clone(), config.cache.endpoint.clone()),
            dictionary: DictionaryClient::new(agent, &config.dictionary),
        }
    }

    /// Looks up `word`, returning the merged record or no result.
    ///
    /// Cache hits return as-is without touching the dictionary API. On a miss
    /// both remote flavors are fetched concurrently: a failed JSON fetch fails
    /// the whole lookup (the XML task keeps running detached, its outcome
    /// discarded), while a failed XML fetch only leaves the sentences empty.
    /// The merged record is pushed to the cache on a detached worker; the
    /// caller never waits for or observes that write.
    pub fn fetch(&self, word: &str) -> Option<Record> {
        if let Some(record) = self.cache.spawn_lookup(word).join() {
            debug!("cache hit for '{word}'");
            return Some(record);
        }

        let mut json_task = self.dictionary.spawn_json_lookup(word);
        let mut xml_task = self.dictionary.spawn_xml_lookup(word);

        let Some(mut record) = json_task.join() else {
            info!("dictionary lookup for '{word}' returned no result");
            return None;
        };

        match xml_task.join() {
            Some(sentences) => record.sentences = sentences,
            None => debug!("no example sentences for '{word}'"),
        }

        self.cache.store(word, Some(record.clone()));
        Some(record)
    }

    /// Drops the cached entry for `word`, best effort.
    pub fn invalidate(&self, word: &str) {
        self.cache.store(word, None);
    }
}
