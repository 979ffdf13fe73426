//! Flash storage layout
//!
//! [`partition`] computes the block range reserved for the root filesystem
//! from a board's flash layout; [`device`] exposes that range as a block
//! device for the filesystem driver.

pub mod device;
pub mod partition;

pub use device::{BlockDevice, FlashPartition};
pub use partition::{FlashLayout, Partition, PartitionError, BLOCK_SIZE};
