/*!
# IO utilities

Partition file handling and report reading/writing.
!*/
pub mod partition;
pub mod report;
mod store;
pub use store::PartitionStore;
