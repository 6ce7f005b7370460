/*!
# Analyses

One module per analysis kind. Each analysis is a struct over
(config, language, dataset, tagger) implementing [`Analysis`]: `run()`
loads or ingests the partitions, map-reduces a per-partition counting
function over them, writes the CSV report and hands back the merged
aggregate.
!*/
mod frequency;
mod general_collocate;
mod pos_frequency;
mod specific_collocate;

pub use frequency::{phrase_windows, FrequencyAnalysis};
pub use general_collocate::{offset_token, GeneralCollocateAnalysis};
pub use pos_frequency::PosFrequencyAnalysis;
pub use specific_collocate::{collocate_window, SpecificCollocateAnalysis};

use crate::error::Error;

/// Implemented by every analysis, generic over the aggregate it returns so
/// callers and tests can inspect the merged result.
pub trait Analysis<T> {
    fn run(&self) -> Result<T, Error>;
}
