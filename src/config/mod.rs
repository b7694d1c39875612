use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::{classifier::IntentCorpus, segmenter::LexiconEntry},
    errors::ConfigError,
    utils::app_data_dir,
};

const TMP_SUFFIX: &str = "tmp";

/// Tunables of the query pipeline. Every field has a default so partial
/// files load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryConfig {
    /// Best cosine similarity below which a query is `Unknown`.
    #[serde(default = "QueryConfig::default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// Maximum number of records sampled by the fallback handler.
    #[serde(default = "QueryConfig::default_sample_limit")]
    pub sample_limit: usize,
    /// Page size used when a handler scans recent records without a window.
    #[serde(default = "QueryConfig::default_record_scan_limit")]
    pub record_scan_limit: usize,
    /// Trailing window applied by time queries that name no period.
    #[serde(default = "QueryConfig::default_window_days")]
    pub default_window_days: i64,
    /// Extra words merged into the segmenter lexicon, e.g. merchant names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_lexicon: Vec<LexiconEntry>,
    /// Replacement example bank for the intent classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus: Option<IntentCorpus>,
}

impl QueryConfig {
    fn default_similarity_threshold() -> f64 {
        0.3
    }

    fn default_sample_limit() -> usize {
        10
    }

    fn default_record_scan_limit() -> usize {
        1000
    }

    fn default_window_days() -> i64 {
        30
    }

    /// The corpus to train on: the configured one, or the built-in bank.
    pub fn corpus_or_default(&self) -> IntentCorpus {
        self.corpus.clone().unwrap_or_default()
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: Self::default_similarity_threshold(),
            sample_limit: Self::default_sample_limit(),
            record_scan_limit: Self::default_record_scan_limit(),
            default_window_days: Self::default_window_days(),
            user_lexicon: Vec::new(),
            corpus: None,
        }
    }
}

/// Handles persistence of [`QueryConfig`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager rooted at `$BILL_QUERY_HOME` or `~/.bill_query`.
    pub fn new_default() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join("config.json")))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<QueryConfig, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(QueryConfig::default())
        }
    }

    pub fn save(&self, config: &QueryConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
