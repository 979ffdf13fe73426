//! Storage partition planner
//!
//! The flash area behind the firmware binary is carved into three regions:
//!
//! ```text
//! | storage (kv) | program image |      filesystem      |
//! |  4 blocks    |  128 blocks   |  rest of the device  |
//! ```
//!
//! The reserved region sizes are platform constants shared by every board
//! variant; only the total flash size differs per board. The filesystem
//! partition is whatever remains, and a board whose flash cannot fit one is
//! an inconsistent descriptor, rejected before anything touches the device.

use core::fmt;

/// Flash erase block size in bytes (RP2 flash sector)
pub const BLOCK_SIZE: u32 = 4096;

/// Blocks reserved for the key-value storage region (16 KiB)
pub const RESERVED_STORAGE_BLOCKS: u32 = 4;

/// Blocks reserved for the program image region (512 KiB)
pub const RESERVED_PROGRAM_BLOCKS: u32 = 128;

/// Per-board flash layout in erase blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub struct FlashLayout {
    /// Blocks reserved for boot metadata / key-value storage
    pub reserved_storage_blocks: u32,
    /// Blocks reserved for the program image
    pub reserved_program_blocks: u32,
    /// Total flash blocks available behind the firmware binary
    pub total_flash_blocks: u32,
}

/// A contiguous block range of flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub struct Partition {
    /// First block of the partition
    pub start_block: u32,
    /// Number of blocks in the partition
    pub length_blocks: u32,
}

/// Partition planning errors
///
/// Always fatal: an inconsistent layout is a build-time mismatch, never a
/// runtime condition to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum PartitionError {
    /// Total flash does not extend past the reserved regions
    InsufficientFlash {
        /// Total flash blocks declared by the board
        total_blocks: u32,
        /// Blocks claimed by the reserved regions
        reserved_blocks: u32,
    },
    /// Planned partition extends past the actual flash device
    ExceedsDevice {
        /// Block one past the end of the partition
        partition_end: u32,
        /// Blocks the device actually has
        device_blocks: u32,
    },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionError::InsufficientFlash {
                total_blocks,
                reserved_blocks,
            } => write!(
                f,
                "flash too small for a filesystem: {} total blocks, {} reserved",
                total_blocks, reserved_blocks
            ),
            PartitionError::ExceedsDevice {
                partition_end,
                device_blocks,
            } => write!(
                f,
                "partition ends at block {} but device has {} blocks",
                partition_end, device_blocks
            ),
        }
    }
}

impl FlashLayout {
    /// Layout with explicit reserved-region sizes
    pub const fn new(
        reserved_storage_blocks: u32,
        reserved_program_blocks: u32,
        total_flash_blocks: u32,
    ) -> Self {
        Self {
            reserved_storage_blocks,
            reserved_program_blocks,
            total_flash_blocks,
        }
    }

    /// Layout using the platform's fixed reserved-region sizes
    ///
    /// Boards only differ in flash chip size; the storage and program
    /// regions are the same across variants sharing one firmware.
    pub const fn with_total(total_flash_blocks: u32) -> Self {
        Self::new(
            RESERVED_STORAGE_BLOCKS,
            RESERVED_PROGRAM_BLOCKS,
            total_flash_blocks,
        )
    }

    /// First block past the reserved regions
    pub const fn reserved_blocks(&self) -> u32 {
        self.reserved_storage_blocks + self.reserved_program_blocks
    }

    /// Compute the filesystem partition for this layout
    ///
    /// The partition starts right after the reserved regions and spans the
    /// rest of the device: `start + length == total` always holds.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::InsufficientFlash`] when the total does not
    /// extend past the reserved regions. A zero-length partition is rejected
    /// too: mounting it would corrupt the program image or boot metadata.
    pub fn filesystem_partition(&self) -> Result<Partition, PartitionError> {
        let start_block = self.reserved_blocks();
        if self.total_flash_blocks <= start_block {
            return Err(PartitionError::InsufficientFlash {
                total_blocks: self.total_flash_blocks,
                reserved_blocks: start_block,
            });
        }
        Ok(Partition {
            start_block,
            length_blocks: self.total_flash_blocks - start_block,
        })
    }
}

impl Partition {
    /// Block one past the end of the partition
    pub const fn end_block(&self) -> u32 {
        self.start_block + self.length_blocks
    }

    /// Byte offset of the partition start
    pub const fn start_address(&self) -> u32 {
        self.start_block * BLOCK_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_formula() {
        // start == reserved sum and start + length == total, across sizes
        for total in [133, 260, 772, 3757, 65536] {
            let layout = FlashLayout::with_total(total);
            let p = layout.filesystem_partition().unwrap();
            assert_eq!(p.start_block, 132);
            assert_eq!(p.start_block + p.length_blocks, total);
            assert_eq!(p.end_block(), total);
        }
    }

    #[test]
    fn test_partition_exact_fit_rejected() {
        // A board whose flash equals the reserved regions exactly cannot
        // host a filesystem
        let layout = FlashLayout::new(4, 128, 132);
        assert_eq!(
            layout.filesystem_partition(),
            Err(PartitionError::InsufficientFlash {
                total_blocks: 132,
                reserved_blocks: 132,
            })
        );
    }

    #[test]
    fn test_partition_too_small_rejected() {
        let layout = FlashLayout::new(4, 128, 100);
        assert!(matches!(
            layout.filesystem_partition(),
            Err(PartitionError::InsufficientFlash { .. })
        ));

        let layout = FlashLayout::new(4, 128, 0);
        assert!(layout.filesystem_partition().is_err());
    }

    #[test]
    fn test_partition_pico_w() {
        // 2 MiB chip: 260 usable blocks behind the firmware binary
        let p = FlashLayout::with_total(260).filesystem_partition().unwrap();
        assert_eq!(p.start_block, 132);
        assert_eq!(p.length_blocks, 128);
    }

    #[test]
    fn test_partition_16mib_board() {
        // 16 MiB chip: the original Flash(132, 3625) block device
        let p = FlashLayout::with_total(3757)
            .filesystem_partition()
            .unwrap();
        assert_eq!(p.start_block, 132);
        assert_eq!(p.length_blocks, 3625);
    }

    #[test]
    fn test_partition_custom_reserved_regions() {
        let p = FlashLayout::new(0, 0, 10).filesystem_partition().unwrap();
        assert_eq!(p.start_block, 0);
        assert_eq!(p.length_blocks, 10);

        let p = FlashLayout::new(2, 6, 9).filesystem_partition().unwrap();
        assert_eq!(p.start_block, 8);
        assert_eq!(p.length_blocks, 1);
    }

    #[test]
    fn test_partition_addresses() {
        let p = Partition {
            start_block: 132,
            length_blocks: 128,
        };
        assert_eq!(p.start_address(), 132 * 4096);
        assert_eq!(p.end_block(), 260);
    }
}
