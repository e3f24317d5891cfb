//! Persistent application configuration model and defaults.

/// Root configuration persisted to `wordpane.toml`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    /// Remote dictionary API endpoint and credential.
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    /// Local cache service address.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Remote dictionary source configuration.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DictionaryConfig {
    #[serde(default = "default_dictionary_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_dictionary_api_key")]
    pub api_key: String,
}

/// Cache service configuration.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_endpoint")]
    pub endpoint: String,
}

fn default_dictionary_endpoint() -> String {
    "http://dict-co.iciba.com/api/dictionary.php".to_string()
}

fn default_dictionary_api_key() -> String {
    "E0F0D336AF47D3797C68372A869BDBC5".to_string()
}

fn default_cache_endpoint() -> String {
    "http://127.0.0.1:5432".to_string()
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_dictionary_endpoint(),
            api_key: default_dictionary_api_key(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            endpoint: default_cache_endpoint(),
        }
    }
}
