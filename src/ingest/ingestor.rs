//! Ingestion coordinator.
//!
//! Walks every raw file of a (language, dataset) pair sequentially to
//! extract sentence-aligned chunks, then hands the chunks to the worker
//! pool. Chunks are numbered on the coordinator before dispatch, that
//! number is the partition slot, so workers never negotiate slots among
//! themselves. Slot numbering continues across files.
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use glob::glob;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::config::Config;
use crate::engine::WorkerPool;
use crate::error::Error;
use crate::ingest::chunk::ChunkReader;
use crate::io::partition;
use crate::lang::Lang;
use crate::normalize::normalize_line;

/// Most partitions one ingestion run may produce.
pub const PARTITION_CEILING: u64 = 500;

/// Turns the raw corpus files of `lang`/`dataset` into normalized
/// partition files.
///
/// Raw files are everything matching `<resource_dir>/<lang>.*`. The
/// expected partition count is checked against [`PARTITION_CEILING`] before
/// any chunk is processed; a violation rolls the partition directory back
/// so a corrected configuration starts clean.
pub fn ingest(config: &Config, pool: &WorkerPool, lang: Lang, dataset: &str) -> Result<(), Error> {
    let resource = config.resource(dataset)?;
    let resource_dir = config.resource_dir(lang, dataset);
    if !resource_dir.is_dir() {
        return Err(Error::ResourceNotFound(resource_dir));
    }

    let pattern = format!("{}/{}.*", resource_dir.display(), lang);
    let mut files: Vec<PathBuf> = glob(&pattern)?.collect::<Result<_, _>>()?;
    files.sort();
    if files.is_empty() {
        return Err(Error::NoResourceFiles(pattern));
    }

    let out_dir = config.partition_dir(lang, dataset);
    fs::create_dir_all(&out_dir)?;

    let skipped = Arc::new(AtomicUsize::new(0));
    let mut readers = Vec::with_capacity(files.len());
    for file in &files {
        readers.push(ChunkReader::open(
            file,
            resource.chunk_size,
            Arc::clone(&skipped),
        )?);
    }

    let expected: u64 = readers
        .iter()
        .map(|reader| reader.file_size() / resource.chunk_size)
        .sum();
    if expected > PARTITION_CEILING {
        warn!(
            "{}/{}: chunk_size {} would create around {} partitions",
            dataset, lang, resource.chunk_size, expected
        );
        fs::remove_dir_all(&out_dir)?;
        return Err(Error::TooManyPartitions {
            expected,
            limit: PARTITION_CEILING,
        });
    }

    info!(
        "ingesting {} raw file(s) for {}/{} into {:?}",
        files.len(),
        dataset,
        lang,
        out_dir
    );

    let lstrip = resource.lstrip;
    let rstrip = resource.rstrip;
    let chunks = readers.into_iter().flatten().enumerate();
    pool.install(|| {
        chunks.par_bridge().try_for_each(|(slot, chunk)| -> Result<(), Error> {
            let chunk = chunk?;
            let mut block = String::with_capacity(chunk.len());
            for line in chunk.lines() {
                block.push_str(&normalize_line(line, lstrip, rstrip));
                block.push('\n');
            }
            let path = partition::write_partition(&out_dir, lang, slot, &block)?;
            debug!("wrote partition {:?}", path);
            Ok(())
        })
    })?;

    let skipped = skipped.load(Ordering::Relaxed);
    if skipped > 0 {
        warn!(
            "{} undecodable byte window(s) skipped during ingestion of {}/{}",
            skipped, dataset, lang
        );
    }
    info!("ingestion of {}/{} done", dataset, lang);
    Ok(())
}
