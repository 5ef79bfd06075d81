use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display};
use std::fs::OpenOptions;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("unknown index stage {0:?}")]
    UnknownStage(String),
}

pub const ENGINE_KEY_PREFIX: &str = "knowhere.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Build,
    Load,
    Search,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Load => "load",
            Self::Search => "search",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(Self::Build),
            "load" => Ok(Self::Load),
            "search" => Ok(Self::Search),
            other => Err(ConfigError::UnknownStage(other.to_string())),
        }
    }
}

/// Engine parameters keyed as `<index type>.<stage>.<name>`.
///
/// Entries are given with the `knowhere.` prefix; anything else is ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct IndexEngineConfig {
    params: BTreeMap<String, String>,
}

impl From<BTreeMap<String, String>> for IndexEngineConfig {
    fn from(raw: BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        for (key, value) in raw {
            config.insert(&key, value);
        }
        config
    }
}

impl From<IndexEngineConfig> for BTreeMap<String, String> {
    fn from(config: IndexEngineConfig) -> Self {
        config
            .params
            .into_iter()
            .map(|(k, v)| (format!("{ENGINE_KEY_PREFIX}{k}"), v))
            .collect()
    }
}

impl IndexEngineConfig {
    pub fn insert(&mut self, key: &str, value: String) {
        if let Some(key) = key.strip_prefix(ENGINE_KEY_PREFIX) {
            self.params.insert(key.to_string(), value);
        }
    }

    pub fn index_params(&self, index_type: &str, stage: Stage) -> HashMap<String, String> {
        let prefix = format!("{index_type}.{stage}.");
        self.params
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(&prefix)
                    .map(|name| (name.to_string(), v.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    pub index_engine: IndexEngineConfig,
    /// Per-shard segment estimate used when the caller supplies none.
    pub default_num_segments: usize,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            index_engine: IndexEngineConfig::default(),
            default_num_segments: 1,
        }
    }
}

impl TunerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = OpenOptions::new().read(true).open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn engine_config() -> IndexEngineConfig {
        let mut config = IndexEngineConfig::default();
        config.insert("knowhere.DISKANN.build.max_degree", "56".to_string());
        config.insert("knowhere.DISKANN.build.search_list_size", "100".to_string());
        config.insert("knowhere.DISKANN.search.search_list", "16".to_string());
        config.insert("knowhere.HNSW.build.M", "30".to_string());
        config.insert("queryNode.enableDisk", "true".to_string());
        config
    }

    #[test]
    fn index_params_by_stage() {
        let config = engine_config();
        assert_eq!(config.len(), 4);

        let build = config.index_params("DISKANN", Stage::Build);
        assert_eq!(
            build,
            HashMap::from([
                ("max_degree".to_string(), "56".to_string()),
                ("search_list_size".to_string(), "100".to_string()),
            ])
        );

        let search = config.index_params("DISKANN", Stage::Search);
        assert_eq!(search.get("search_list").map(String::as_str), Some("16"));
        assert_eq!(search.len(), 1);

        assert!(config.index_params("DISKANN", Stage::Load).is_empty());
        assert!(config.index_params("DISK", Stage::Build).is_empty());
    }

    #[test]
    fn stage_names() {
        assert_eq!("search".parse::<Stage>().unwrap(), Stage::Search);
        assert_eq!(Stage::Load.to_string(), "load");
        assert!(matches!(
            "train".parse::<Stage>(),
            Err(ConfigError::UnknownStage(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "index_engine": {{
                    "knowhere.HNSW.search.ef": "64",
                    "other.key": "x"
                }},
                "default_num_segments": 4
            }}"#
        )
        .unwrap();
        let config = TunerConfig::load(file.path()).unwrap();
        assert_eq!(config.default_num_segments, 4);
        assert_eq!(config.index_engine.len(), 1);
        assert_eq!(
            config
                .index_engine
                .index_params("HNSW", Stage::Search)
                .get("ef")
                .map(String::as_str),
            Some("64")
        );
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: TunerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TunerConfig::default());
        assert_eq!(config.default_num_segments, 1);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TunerConfig::load(dir.path().join("absent.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn engine_keys_keep_their_prefix_on_output() {
        let value = serde_json::to_value(engine_config()).unwrap();
        assert_eq!(value["knowhere.HNSW.build.M"], "30");
        assert!(value.get("queryNode.enableDisk").is_none());
    }
}
