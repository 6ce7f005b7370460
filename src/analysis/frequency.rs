//! Word/phrase frequency analysis.
//!
//! Counts every sliding window of `phrase_length` tokens across all
//! partitions. Workers prune their partial table against
//! `discard_threshold` before handing it to the coordinator, which bounds
//! peak memory but makes retained counts a lower bound for phrases spread
//! thinly across many partitions.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::analysis::Analysis;
use crate::config::{templated_filename, Config};
use crate::counting::CountTable;
use crate::engine::WorkerPool;
use crate::error::Error;
use crate::io::report;
use crate::io::PartitionStore;
use crate::lang::Lang;
use crate::tag::PosTagger;

/// Every contiguous run of `len` tokens, in line order. A line of `k`
/// tokens yields `k - len + 1` windows, none when `k < len`.
pub fn phrase_windows(tokens: &[&str], len: usize) -> Vec<String> {
    if len == 0 || tokens.len() < len {
        return Vec::new();
    }
    (0..=tokens.len() - len)
        .map(|i| tokens[i..i + len].join(" "))
        .collect()
}

#[derive(Debug, Serialize)]
struct FrequencyRow<'a> {
    phrase: &'a str,
    r#type: &'a str,
    count: u64,
    relative_frequency: f64,
}

pub struct FrequencyAnalysis<'a> {
    config: &'a Config,
    lang: Lang,
    dataset: &'a str,
    tagger: &'a dyn PosTagger,
}

impl<'a> FrequencyAnalysis<'a> {
    pub fn new(
        config: &'a Config,
        lang: Lang,
        dataset: &'a str,
        tagger: &'a dyn PosTagger,
    ) -> Self {
        FrequencyAnalysis {
            config,
            lang,
            dataset,
            tagger,
        }
    }

    fn count_partition(
        path: &Path,
        phrase_length: usize,
        discard_threshold: u64,
    ) -> Result<CountTable, Error> {
        let mut counts = CountTable::new();
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            for window in phrase_windows(&tokens, phrase_length) {
                counts.increment(&window);
            }
        }
        counts.retain_above(discard_threshold);
        Ok(counts)
    }

    fn write_report(&self, counts: &CountTable) -> Result<PathBuf, Error> {
        let task = &self.config.frequency;
        let path = self
            .config
            .results_dir(self.lang, self.dataset)
            .join(templated_filename(&task.dest_filename, self.lang));
        let mut writer = report::csv_writer(&path)?;

        let total = counts.total() as f64;
        for (phrase, count) in counts.most_common(task.n_most_common) {
            writer.serialize(FrequencyRow {
                phrase,
                r#type: self.tagger.tag(phrase),
                count,
                relative_frequency: count as f64 / total,
            })?;
        }
        writer.flush()?;
        info!("frequency report written to {:?}", path);
        Ok(path)
    }
}

impl Analysis<CountTable> for FrequencyAnalysis<'_> {
    fn run(&self) -> Result<CountTable, Error> {
        let task = &self.config.frequency;
        let pool = WorkerPool::new(self.config.n_processors)?;
        let parts = PartitionStore::new(self.config, self.lang, self.dataset).load(&pool)?;

        let phrase_length = task.phrase_length;
        let discard_threshold = task.discard_threshold;
        let counts = pool.map_reduce(
            &parts,
            |path: &PathBuf| Self::count_partition(path, phrase_length, discard_threshold),
            CountTable::merge,
            CountTable::new(),
        )?;

        self.write_report(&counts)?;
        Ok(counts)
    }
}
