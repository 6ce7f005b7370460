//! Partition discovery.
//!
//! Analyses ask the store for the partition list of a (language, dataset)
//! pair. If none exist yet the raw corpus is ingested first; once partitions
//! are on disk the store is a pure directory lookup and raw-source changes
//! go unnoticed until the partition directory is cleared.
use std::path::PathBuf;

use glob::glob;
use log::info;

use crate::config::Config;
use crate::engine::WorkerPool;
use crate::error::Error;
use crate::ingest;
use crate::io::partition;
use crate::lang::Lang;

pub struct PartitionStore<'a> {
    config: &'a Config,
    lang: Lang,
    dataset: &'a str,
}

impl<'a> PartitionStore<'a> {
    pub fn new(config: &'a Config, lang: Lang, dataset: &'a str) -> Self {
        PartitionStore {
            config,
            lang,
            dataset,
        }
    }

    /// Ordered partition paths, ingesting the raw corpus first when the
    /// partition directory is missing or empty.
    pub fn load(&self, pool: &WorkerPool) -> Result<Vec<PathBuf>, Error> {
        let resource_dir = self.config.resource_dir(self.lang, self.dataset);
        if !resource_dir.is_dir() {
            return Err(Error::ResourceNotFound(resource_dir));
        }

        if self.needs_ingestion()? {
            info!(
                "no partitions for {}/{}, ingesting raw corpus",
                self.dataset, self.lang
            );
            ingest::ingest(self.config, pool, self.lang, self.dataset)?;
        }

        self.list()
    }

    /// Pure lookup of existing partitions, sorted by slot number.
    pub fn list(&self) -> Result<Vec<PathBuf>, Error> {
        let dir = self.config.partition_dir(self.lang, self.dataset);
        let mut parts: Vec<PathBuf> = glob(&partition::partition_pattern(&dir, self.lang))?
            .collect::<Result<_, _>>()?;
        // zero-padded slot numbers make lexicographic order the slot order
        parts.sort();
        Ok(parts)
    }

    fn needs_ingestion(&self) -> Result<bool, Error> {
        let dir = self.config.partition_dir(self.lang, self.dataset);
        if !dir.is_dir() {
            return Ok(true);
        }
        Ok(dir.read_dir()?.next().is_none())
    }
}
