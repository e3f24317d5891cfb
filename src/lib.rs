//! # wordpane
//!
//! Cache-first dictionary lookup engine for editor integration: a word is
//! resolved against a local cache service first, then against the JSON and
//! XML flavors of the remote dictionary API in parallel (with pronunciation
//! clips prefetched alongside), merged, rendered as markdown-style lines, and
//! written back to the cache on a best-effort background worker.

pub mod config;
pub mod entry;
pub mod fetch_task;
pub mod lookup;
pub mod render;
pub mod sources;

pub use config::Config;
pub use entry::{PartOfSpeech, Record, SentencePair, Symbol};
pub use lookup::LookupManager;
