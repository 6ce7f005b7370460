pub mod analysis;
pub mod cli;
pub mod config;
pub mod counting;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod io;
pub mod lang;
pub mod normalize;
pub mod tag;
