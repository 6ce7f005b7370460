//! Report files: CSV output plus reloading earlier results.
//!
//! The collocate analyses feed on the frequency report, so alongside the
//! writer there is a loader that turns a frequency CSV back into a lookup
//! table, and a loader for the anchor word list.
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::Error;

/// Opens a CSV writer for a report path, creating the results directory on
/// the way. Flexible mode, collocate rows are ragged.
pub fn csv_writer(path: &Path) -> Result<csv::Writer<File>, Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(csv::WriterBuilder::new().flexible(true).from_path(path)?)
}

/// A frequency report read back into memory.
///
/// Keeps the file's row order, which is the frequency ranking, so the top
/// entries double as the anchor set of the general collocate analysis.
pub struct FrequencyTable {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    /// Loads `phrase -> count` from a frequency CSV. Rows whose count
    /// column does not parse are skipped.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let mut order = Vec::new();
        let mut counts = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let phrase = match record.get(0) {
                Some(phrase) => phrase,
                None => continue,
            };
            let count = match record.get(2).and_then(|count| count.parse::<u64>().ok()) {
                Some(count) => count,
                None => {
                    debug!("frequency table {:?}: skipping row for {:?}", path, phrase);
                    continue;
                }
            };
            if counts.insert(phrase.to_string(), count).is_none() {
                order.push(phrase.to_string());
            }
        }
        Ok(FrequencyTable { order, counts })
    }

    pub fn get(&self, phrase: &str) -> Option<u64> {
        self.counts.get(phrase).copied()
    }

    /// Phrases in ranking order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Loads the anchor word list: one word per line, case-folded and trimmed.
/// Blank lines and repeats are dropped.
pub fn load_words_of_interest(path: &Path) -> Result<Vec<String>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_lowercase();
        if !word.is_empty() && seen.insert(word.clone()) {
            words.push(word);
        }
    }
    Ok(words)
}
