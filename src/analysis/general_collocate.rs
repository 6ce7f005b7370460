//! Generic collocate analysis.
//!
//! Anchors are the phrases of a previously written frequency report. For
//! every anchor occurrence the single tokens at offsets -2, -1, +1, +2 are
//! counted, and each anchor's strongest collocates are reported relative to
//! the anchor's standalone frequency.
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::analysis::Analysis;
use crate::config::{templated_filename, Config};
use crate::counting::CollocateTable;
use crate::engine::WorkerPool;
use crate::error::Error;
use crate::io::report::{self, FrequencyTable};
use crate::io::PartitionStore;
use crate::lang::Lang;
use crate::tag::PosTagger;

const OFFSETS: [isize; 4] = [-2, -1, 1, 2];

/// Most collocates reported per anchor.
const COLLOCATES_PER_ANCHOR: usize = 100;

/// The token `offset` positions away from `i`, when that position exists.
pub fn offset_token<'t>(tokens: &[&'t str], i: usize, offset: isize) -> Option<&'t str> {
    let idx = i.checked_add_signed(offset)?;
    tokens.get(idx).copied()
}

#[derive(Debug, Serialize)]
struct CollocateRow<'a> {
    word: &'a str,
    collocate: &'a str,
    count: u64,
    relative_frequency: f64,
    word_type: &'a str,
    collocate_type: &'a str,
}

pub struct GeneralCollocateAnalysis<'a> {
    config: &'a Config,
    lang: Lang,
    dataset: &'a str,
    tagger: &'a dyn PosTagger,
}

impl<'a> GeneralCollocateAnalysis<'a> {
    pub fn new(
        config: &'a Config,
        lang: Lang,
        dataset: &'a str,
        tagger: &'a dyn PosTagger,
    ) -> Self {
        GeneralCollocateAnalysis {
            config,
            lang,
            dataset,
            tagger,
        }
    }

    fn frequency_path(&self) -> PathBuf {
        self.config
            .results_dir(self.lang, self.dataset)
            .join(templated_filename(
                &self.config.general_collocate.frequency_filename,
                self.lang,
            ))
    }

    fn count_partition(path: &Path, anchors: &HashSet<String>) -> Result<CollocateTable, Error> {
        let mut table = CollocateTable::default();
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            for (i, token) in tokens.iter().enumerate() {
                if !anchors.contains(*token) {
                    continue;
                }
                for offset in OFFSETS {
                    if let Some(collocate) = offset_token(&tokens, i, offset) {
                        table.increment(token, collocate);
                    }
                }
            }
        }
        Ok(table)
    }

    fn write_report(
        &self,
        frequency: &FrequencyTable,
        counts: &CollocateTable,
    ) -> Result<PathBuf, Error> {
        let path = self
            .config
            .results_dir(self.lang, self.dataset)
            .join(templated_filename(
                &self.config.general_collocate.dest_filename,
                self.lang,
            ));
        let mut writer = report::csv_writer(&path)?;

        struct Entry<'e> {
            word: &'e str,
            collocate: &'e str,
            count: u64,
            relative_frequency: f64,
        }

        let mut entries = Vec::new();
        for word in frequency.words() {
            let table = match counts.get(word) {
                Some(table) => table,
                None => continue,
            };
            for (collocate, count) in table.most_common(COLLOCATES_PER_ANCHOR) {
                let relative_frequency = match frequency.get(word) {
                    Some(base) if base > 0 => count as f64 / base as f64,
                    _ => 0.0,
                };
                entries.push(Entry {
                    word,
                    collocate,
                    count,
                    relative_frequency,
                });
            }
        }

        // strongest collocations first, stable across runs
        entries.sort_by(|a, b| {
            b.relative_frequency
                .total_cmp(&a.relative_frequency)
                .then_with(|| a.word.cmp(b.word))
                .then_with(|| a.collocate.cmp(b.collocate))
        });

        for entry in &entries {
            writer.serialize(CollocateRow {
                word: entry.word,
                collocate: entry.collocate,
                count: entry.count,
                relative_frequency: entry.relative_frequency,
                word_type: self.tagger.tag(entry.word),
                collocate_type: self.tagger.tag(entry.collocate),
            })?;
        }
        writer.flush()?;
        info!("general collocate report written to {:?}", path);
        Ok(path)
    }
}

impl Analysis<CollocateTable> for GeneralCollocateAnalysis<'_> {
    fn run(&self) -> Result<CollocateTable, Error> {
        let frequency = FrequencyTable::from_path(&self.frequency_path())?;
        info!(
            "{} anchor phrase(s) loaded from the frequency report",
            frequency.len()
        );

        let anchors: HashSet<String> = frequency.words().map(str::to_string).collect();
        let zero = CollocateTable::with_anchors(frequency.words());

        let pool = WorkerPool::new(self.config.n_processors)?;
        let parts = PartitionStore::new(self.config, self.lang, self.dataset).load(&pool)?;

        let counts = pool.map_reduce(
            &parts,
            |path: &PathBuf| Self::count_partition(path, &anchors),
            CollocateTable::merge,
            zero,
        )?;

        self.write_report(&frequency, &counts)?;
        Ok(counts)
    }
}
