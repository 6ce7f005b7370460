//! Partition file naming and creation.
//!
//! Partitions are numbered slots under the language's pre-processed
//! directory, `<lang>_part_000.txt` through `<lang>_part_999.txt`. Slots are
//! assigned by the ingestion coordinator and each file is created exactly
//! once with create-exclusive semantics, so two workers can never land on
//! the same slot.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::lang::Lang;

/// Hard cap on partition slots per language.
pub const MAX_PARTITIONS: usize = 1000;

/// Path of a numbered partition slot.
pub fn partition_path(dir: &Path, lang: Lang, slot: usize) -> PathBuf {
    dir.join(format!("{}_part_{:03}.txt", lang, slot))
}

/// Glob pattern matching every partition of `lang` in `dir`.
pub fn partition_pattern(dir: &Path, lang: Lang) -> String {
    format!("{}/{}_part_*", dir.display(), lang)
}

/// Writes one normalized block into its assigned slot.
///
/// The slot file must not exist yet. A slot at or past [`MAX_PARTITIONS`]
/// means the corpus outgrew the namespace, which is fatal.
pub fn write_partition(dir: &Path, lang: Lang, slot: usize, text: &str) -> Result<PathBuf, Error> {
    if slot >= MAX_PARTITIONS {
        return Err(Error::PartitionSlotExhausted {
            slots: MAX_PARTITIONS,
        });
    }

    let path = partition_path(dir, lang, slot);
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)?;
    file.write_all(text.as_bytes())?;
    Ok(path)
}
