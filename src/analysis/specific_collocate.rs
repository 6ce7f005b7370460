//! Targeted collocate analysis.
//!
//! Works from an explicit anchor word list. Every anchor occurrence bumps
//! the anchor's `TOTAL` pseudo-count and, when it fits inside the line, the
//! window of `|n|` tokens before (`n < 0`) or after (`n > 0`) the anchor.
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::info;

use crate::analysis::Analysis;
use crate::config::{templated_filename, Config};
use crate::counting::{CollocateTable, TOTAL_KEY};
use crate::engine::WorkerPool;
use crate::error::Error;
use crate::io::report::{self, FrequencyTable};
use crate::io::PartitionStore;
use crate::lang::Lang;

/// Most windows reported per anchor.
const WINDOWS_PER_ANCHOR: usize = 10;

/// The `|n|`-token window next to the anchor at `i`, `None` when any part
/// of it would fall outside the line.
pub fn collocate_window(tokens: &[&str], i: usize, n: isize) -> Option<String> {
    if n == 0 {
        return None;
    }
    if n < 0 {
        let span = n.unsigned_abs();
        if i < span {
            return None;
        }
        Some(tokens[i - span..i].join(" "))
    } else {
        let span = n as usize;
        let end = i.checked_add(span)?;
        if end >= tokens.len() {
            return None;
        }
        Some(tokens[i + 1..=end].join(" "))
    }
}

pub struct SpecificCollocateAnalysis<'a> {
    config: &'a Config,
    lang: Lang,
    dataset: &'a str,
}

impl<'a> SpecificCollocateAnalysis<'a> {
    pub fn new(config: &'a Config, lang: Lang, dataset: &'a str) -> Self {
        SpecificCollocateAnalysis {
            config,
            lang,
            dataset,
        }
    }

    fn words_path(&self) -> Result<&Path, Error> {
        self.config
            .specific_collocate
            .words_of_interest_filename
            .as_deref()
            .ok_or_else(|| {
                Error::InvalidConfig(
                    "specific_collocate.words_of_interest_filename is required".to_string(),
                )
            })
    }

    fn frequency_path(&self) -> PathBuf {
        self.config
            .results_dir(self.lang, self.dataset)
            .join(templated_filename(
                &self.config.specific_collocate.frequency_filename,
                self.lang,
            ))
    }

    fn count_partition(
        path: &Path,
        anchors: &HashSet<String>,
        n: isize,
    ) -> Result<CollocateTable, Error> {
        let mut table = CollocateTable::default();
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            for (i, token) in tokens.iter().enumerate() {
                if !anchors.contains(*token) {
                    continue;
                }
                table.increment(token, TOTAL_KEY);
                if let Some(window) = collocate_window(&tokens, i, n) {
                    table.increment(token, &window);
                }
            }
        }
        Ok(table)
    }

    fn write_report(
        &self,
        words: &[String],
        frequency: &FrequencyTable,
        counts: &CollocateTable,
    ) -> Result<PathBuf, Error> {
        let path = self
            .config
            .results_dir(self.lang, self.dataset)
            .join(templated_filename(
                &self.config.specific_collocate.dest_filename,
                self.lang,
            ));
        let mut writer = report::csv_writer(&path)?;

        let mut header = vec!["word".to_string(), "count".to_string()];
        for i in 1..=WINDOWS_PER_ANCHOR {
            header.push(format!("collocate_{}", i));
            header.push(format!("count_{}", i));
            header.push(format!("relative_frequency_{}", i));
        }
        writer.write_record(&header)?;

        for word in words {
            let table = match counts.get(word) {
                Some(table) => table,
                None => continue,
            };
            let mut record = vec![word.clone(), table.get(TOTAL_KEY).to_string()];
            for (window, count) in table.most_common_excluding(TOTAL_KEY, WINDOWS_PER_ANCHOR) {
                let relative_frequency = match frequency.get(window) {
                    Some(base) if base > 0 => count as f64 / base as f64,
                    _ => 0.0,
                };
                record.push(window.to_string());
                record.push(count.to_string());
                record.push(relative_frequency.to_string());
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        info!("specific collocate report written to {:?}", path);
        Ok(path)
    }
}

impl Analysis<CollocateTable> for SpecificCollocateAnalysis<'_> {
    fn run(&self) -> Result<CollocateTable, Error> {
        let n = self.config.specific_collocate.window_size;
        let words = report::load_words_of_interest(self.words_path()?)?;
        info!("{} word(s) of interest loaded", words.len());

        let frequency = FrequencyTable::from_path(&self.frequency_path())?;
        let anchors: HashSet<String> = words.iter().cloned().collect();
        let zero = CollocateTable::with_anchors(words.iter().map(String::as_str));

        let pool = WorkerPool::new(self.config.n_processors)?;
        let parts = PartitionStore::new(self.config, self.lang, self.dataset).load(&pool)?;

        let counts = pool.map_reduce(
            &parts,
            |path: &PathBuf| Self::count_partition(path, &anchors, n),
            CollocateTable::merge,
            zero,
        )?;

        self.write_report(&words, &frequency, &counts)?;
        Ok(counts)
    }
}
