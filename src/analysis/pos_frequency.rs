//! Part-of-speech transition analysis.
//!
//! Tags every token and counts adjacent tag pairs into a square matrix
//! over the fixed vocabulary. The report holds transition probabilities:
//! each row divided by its own total.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::info;

use crate::analysis::Analysis;
use crate::config::{templated_filename, Config};
use crate::counting::TransitionMatrix;
use crate::engine::WorkerPool;
use crate::error::Error;
use crate::io::report;
use crate::io::PartitionStore;
use crate::lang::Lang;
use crate::tag::{PosTagger, POS_TAGS};

pub struct PosFrequencyAnalysis<'a> {
    config: &'a Config,
    lang: Lang,
    dataset: &'a str,
    tagger: &'a dyn PosTagger,
}

impl<'a> PosFrequencyAnalysis<'a> {
    pub fn new(
        config: &'a Config,
        lang: Lang,
        dataset: &'a str,
        tagger: &'a dyn PosTagger,
    ) -> Self {
        PosFrequencyAnalysis {
            config,
            lang,
            dataset,
            tagger,
        }
    }

    fn count_partition(path: &Path, tagger: &dyn PosTagger) -> Result<TransitionMatrix, Error> {
        let mut matrix = TransitionMatrix::new();
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            let tags: Vec<&str> = line.split_whitespace().map(|word| tagger.tag(word)).collect();
            for (first, second) in tags.iter().copied().tuple_windows() {
                matrix.increment(first, second);
            }
        }
        Ok(matrix)
    }

    fn write_report(&self, matrix: &TransitionMatrix) -> Result<PathBuf, Error> {
        let task = &self.config.pos_frequency;
        let path = self
            .config
            .results_dir(self.lang, self.dataset)
            .join(templated_filename(&task.dest_filename, self.lang));
        let mut writer = report::csv_writer(&path)?;

        let mut header = vec!["pos"];
        header.extend(POS_TAGS);
        writer.write_record(&header)?;

        for tag in POS_TAGS {
            let mut record = vec![tag.to_string()];
            record.extend(
                matrix
                    .probabilities(tag)
                    .into_iter()
                    .map(|probability| probability.to_string()),
            );
            writer.write_record(&record)?;
        }
        writer.flush()?;
        info!("transition report written to {:?}", path);
        Ok(path)
    }
}

impl Analysis<TransitionMatrix> for PosFrequencyAnalysis<'_> {
    fn run(&self) -> Result<TransitionMatrix, Error> {
        let pool = WorkerPool::new(self.config.n_processors)?;
        let parts = PartitionStore::new(self.config, self.lang, self.dataset).load(&pool)?;

        let tagger = self.tagger;
        let matrix = pool.map_reduce(
            &parts,
            |path: &PathBuf| Self::count_partition(path, tagger),
            TransitionMatrix::merge,
            TransitionMatrix::new(),
        )?;

        self.write_report(&matrix)?;
        Ok(matrix)
    }
}
