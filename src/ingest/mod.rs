//! Chunked ingestion: raw corpus files into normalized partitions.
mod chunk;
mod ingestor;
pub use chunk::ChunkReader;
pub use ingestor::{ingest, PARTITION_CEILING};
