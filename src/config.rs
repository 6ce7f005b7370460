//! Configuration file management/parsing.
//!
//! Everything tunable lives in a single JSON file (`--config`, default
//! `config.json`). Relative paths inside the file resolve against the file's
//! own directory, so a corpus layout can be moved wholesale.
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::lang::Lang;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base directory holding `<dataset>/<lang>/` corpus trees.
    pub resource_path: PathBuf,
    /// Suffix of the partition directory name (`<lang>_<suffix>`).
    #[serde(default = "default_pre_processed_path")]
    pub pre_processed_path: String,
    /// Name of the per-language report directory.
    #[serde(default = "default_results_path")]
    pub results_path: String,
    /// Worker pool size, for both ingestion and analysis.
    #[serde(default = "default_n_processors")]
    pub n_processors: usize,
    /// Per-dataset ingestion settings, keyed by dataset identifier.
    pub resources: HashMap<String, ResourceConfig>,
    /// Per-language output encoding labels. Partitions are UTF-8 by
    /// construction, so only UTF-8 labels pass validation.
    #[serde(default)]
    pub encoding: HashMap<String, String>,
    #[serde(default)]
    pub frequency: FrequencyConfig,
    #[serde(default)]
    pub pos_frequency: PosFrequencyConfig,
    #[serde(default)]
    pub general_collocate: GeneralCollocateConfig,
    #[serde(default)]
    pub specific_collocate: SpecificCollocateConfig,
    /// Optional `word<TAB>TAG` lexicon for the bundled tagger.
    #[serde(default)]
    pub tagger_lexicon: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    /// Chunk size in bytes for raw file ingestion.
    pub chunk_size: u64,
    /// Tokens trimmed from the start of every line (metadata columns).
    #[serde(default)]
    pub lstrip: usize,
    /// Tokens trimmed from the end of every line.
    #[serde(default)]
    pub rstrip: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    pub phrase_length: usize,
    /// Per-partition counts at or below this are dropped before the merge.
    pub discard_threshold: u64,
    pub n_most_common: usize,
    pub dest_filename: String,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        FrequencyConfig {
            phrase_length: 1,
            discard_threshold: 0,
            n_most_common: 1000,
            dest_filename: "{l}_frequency.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PosFrequencyConfig {
    pub dest_filename: String,
}

impl Default for PosFrequencyConfig {
    fn default() -> Self {
        PosFrequencyConfig {
            dest_filename: "{l}_pos_frequency.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralCollocateConfig {
    pub dest_filename: String,
    /// Frequency report to pull anchors and baseline counts from.
    pub frequency_filename: String,
}

impl Default for GeneralCollocateConfig {
    fn default() -> Self {
        GeneralCollocateConfig {
            dest_filename: "{l}_general_collocate.csv".to_string(),
            frequency_filename: "{l}_frequency.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpecificCollocateConfig {
    pub dest_filename: String,
    pub frequency_filename: String,
    /// Anchor list, one word per line. Required for that analysis only.
    pub words_of_interest_filename: Option<PathBuf>,
    /// Signed window: `|n|` tokens before (`n < 0`) or after (`n > 0`) the
    /// anchor. Zero is rejected.
    #[serde(alias = "n")]
    pub window_size: isize,
}

impl Default for SpecificCollocateConfig {
    fn default() -> Self {
        SpecificCollocateConfig {
            dest_filename: "{l}_specific_collocate.csv".to_string(),
            frequency_filename: "{l}_frequency.csv".to_string(),
            words_of_interest_filename: None,
            window_size: 2,
        }
    }
}

impl Config {
    /// Loads and validates a configuration file.
    pub fn from_path(path: &Path) -> Result<Config, Error> {
        let raw = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&raw)?;

        // resolve relative paths against the config file location
        if let Some(base) = path.parent() {
            config.resource_path = base.join(&config.resource_path);
            if let Some(lexicon) = config.tagger_lexicon.take() {
                config.tagger_lexicon = Some(base.join(lexicon));
            }
            if let Some(words) = config.specific_collocate.words_of_interest_filename.take() {
                config.specific_collocate.words_of_interest_filename = Some(base.join(words));
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would only surface as failures deep in a worker.
    pub fn validate(&self) -> Result<(), Error> {
        if self.n_processors == 0 {
            return Err(Error::InvalidConfig("n_processors must be >= 1".to_string()));
        }
        for (dataset, resource) in &self.resources {
            if resource.chunk_size == 0 {
                return Err(Error::InvalidConfig(format!(
                    "resources.{}.chunk_size must be >= 1",
                    dataset
                )));
            }
        }
        if self.frequency.phrase_length == 0 {
            return Err(Error::InvalidConfig(
                "frequency.phrase_length must be >= 1".to_string(),
            ));
        }
        if self.specific_collocate.window_size == 0 {
            return Err(Error::InvalidConfig(
                "specific_collocate.window_size must not be 0".to_string(),
            ));
        }
        for (lang, label) in &self.encoding {
            if !is_utf8_label(label) {
                return Err(Error::InvalidConfig(format!(
                    "encoding.{}: unsupported encoding {:?}, partitions are UTF-8",
                    lang, label
                )));
            }
        }
        Ok(())
    }

    pub fn resource(&self, dataset: &str) -> Result<&ResourceConfig, Error> {
        self.resources.get(dataset).ok_or_else(|| {
            Error::InvalidConfig(format!("no resources.{} section configured", dataset))
        })
    }

    /// `<resource_path>/<dataset>/<lang>/`
    pub fn resource_dir(&self, lang: Lang, dataset: &str) -> PathBuf {
        self.resource_path.join(dataset).join(lang.code())
    }

    /// `<resource_path>/<dataset>/<lang>/<lang>_<pre_processed_path>/`
    pub fn partition_dir(&self, lang: Lang, dataset: &str) -> PathBuf {
        self.resource_dir(lang, dataset)
            .join(format!("{}_{}", lang, self.pre_processed_path))
    }

    /// `<resource_path>/<dataset>/<lang>/<results_path>/`
    pub fn results_dir(&self, lang: Lang, dataset: &str) -> PathBuf {
        self.resource_dir(lang, dataset).join(&self.results_path)
    }
}

/// Substitutes the `{l}` placeholder used in configured filenames.
pub fn templated_filename(template: &str, lang: Lang) -> String {
    template.replace("{l}", lang.code())
}

fn is_utf8_label(label: &str) -> bool {
    matches!(
        label.to_ascii_lowercase().as_str(),
        "utf-8" | "utf8" | "utf_8"
    )
}

fn default_pre_processed_path() -> String {
    "pre_processed".to_string()
}

fn default_results_path() -> String {
    "results".to_string()
}

fn default_n_processors() -> usize {
    4
}
