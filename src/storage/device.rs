//! Block device view over a flash partition
//!
//! The filesystem driver collaborator consumes storage through the
//! [`BlockDevice`] trait; [`FlashPartition`] implements it as a bounded,
//! block-addressed window over a [`FlashInterface`], so the driver can never
//! reach the reserved storage or program regions.

use crate::platform::error::FlashError;
use crate::platform::{FlashInterface, Result};
use crate::storage::partition::{Partition, PartitionError};

/// Block-addressed storage consumed by filesystem drivers
pub trait BlockDevice {
    /// Block size in bytes
    fn block_size(&self) -> u32;

    /// Number of blocks in the device
    fn block_count(&self) -> u32;

    /// Read up to one block, starting at the beginning of `block`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if the
    /// block is out of range or `buf` is longer than a block.
    fn read(&mut self, block: u32, buf: &mut [u8]) -> Result<()>;

    /// Program up to one block, starting at the beginning of `block`
    ///
    /// The block must be erased first.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash` on range violations or program
    /// failure.
    fn program(&mut self, block: u32, data: &[u8]) -> Result<()>;

    /// Erase one block
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash` on range violations or erase failure.
    fn erase(&mut self, block: u32) -> Result<()>;
}

/// A flash partition exposed as a block device
///
/// Owns the flash peripheral for the lifetime of the mount; block indices
/// are relative to the partition start.
#[derive(Debug)]
pub struct FlashPartition<F: FlashInterface> {
    flash: F,
    partition: Partition,
}

impl<F: FlashInterface> FlashPartition<F> {
    /// Create a block device over `partition`
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::ExceedsDevice`] if the partition does not
    /// fit inside the flash peripheral's capacity - the board descriptor's
    /// total does not match the actual chip.
    pub fn new(flash: F, partition: Partition) -> core::result::Result<Self, PartitionError> {
        let device_blocks = flash.capacity() / flash.block_size();
        if partition.end_block() > device_blocks {
            return Err(PartitionError::ExceedsDevice {
                partition_end: partition.end_block(),
                device_blocks,
            });
        }
        Ok(Self { flash, partition })
    }

    /// The partition this device spans
    pub fn partition(&self) -> Partition {
        self.partition
    }

    /// Release the underlying flash peripheral
    pub fn into_inner(self) -> F {
        self.flash
    }

    fn address_of(&self, block: u32, len: usize) -> Result<u32> {
        if block >= self.partition.length_blocks {
            return Err(FlashError::InvalidAddress.into());
        }
        if len as u32 > self.flash.block_size() {
            return Err(FlashError::InvalidAddress.into());
        }
        Ok((self.partition.start_block + block) * self.flash.block_size())
    }
}

impl<F: FlashInterface> BlockDevice for FlashPartition<F> {
    fn block_size(&self) -> u32 {
        self.flash.block_size()
    }

    fn block_count(&self) -> u32 {
        self.partition.length_blocks
    }

    fn read(&mut self, block: u32, buf: &mut [u8]) -> Result<()> {
        let address = self.address_of(block, buf.len())?;
        self.flash.read(address, buf)
    }

    fn program(&mut self, block: u32, data: &[u8]) -> Result<()> {
        let address = self.address_of(block, data.len())?;
        self.flash.write(address, data)
    }

    fn erase(&mut self, block: u32) -> Result<()> {
        let address = self.address_of(block, 0)?;
        self.flash.erase(address, self.flash.block_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockFlash;
    use crate::platform::PlatformError;
    use crate::storage::partition::FlashLayout;

    fn partition_device(total_blocks: u32) -> FlashPartition<MockFlash> {
        let partition = FlashLayout::with_total(total_blocks)
            .filesystem_partition()
            .unwrap();
        FlashPartition::new(MockFlash::with_blocks(total_blocks), partition).unwrap()
    }

    #[test]
    fn test_partition_window_geometry() {
        let dev = partition_device(260);
        assert_eq!(dev.block_size(), 4096);
        assert_eq!(dev.block_count(), 128);
        assert_eq!(dev.partition().start_block, 132);
    }

    #[test]
    fn test_partition_rejects_oversized() {
        // Descriptor claims more flash than the chip has
        let partition = FlashLayout::with_total(3757)
            .filesystem_partition()
            .unwrap();
        let result = FlashPartition::new(MockFlash::with_blocks(260), partition);
        assert_eq!(
            result.err(),
            Some(PartitionError::ExceedsDevice {
                partition_end: 3757,
                device_blocks: 260,
            })
        );
    }

    #[test]
    fn test_block_io_lands_past_reserved_regions() {
        let mut dev = partition_device(260);
        dev.erase(0).unwrap();
        dev.program(0, &[0x42; 16]).unwrap();

        // Block 0 of the partition is absolute block 132
        let flash = dev.into_inner();
        assert_eq!(flash.contents(132 * 4096, 16), vec![0x42; 16]);
    }

    #[test]
    fn test_block_io_round_trip() {
        let mut dev = partition_device(260);
        dev.erase(5).unwrap();
        dev.program(5, &[0xA5; 64]).unwrap();

        let mut buf = [0u8; 64];
        dev.read(5, &mut buf).unwrap();
        assert_eq!(buf, [0xA5; 64]);
    }

    #[test]
    fn test_block_out_of_range() {
        let mut dev = partition_device(260);
        let mut buf = [0u8; 4];

        // 128 blocks in the partition; block 128 is one past the end
        assert!(matches!(
            dev.read(128, &mut buf),
            Err(PlatformError::Flash(FlashError::InvalidAddress))
        ));
        assert!(dev.program(128, &buf).is_err());
        assert!(dev.erase(128).is_err());
    }

    #[test]
    fn test_access_longer_than_block() {
        let mut dev = partition_device(260);
        let data = vec![0u8; 4097];
        assert!(dev.program(0, &data).is_err());
    }
}
