//! Mock filesystem driver for testing
//!
//! Stands in for the real littlefs binding behind the [`VfsDriver`] trait.
//! It only models the mount contract: a superblock magic in block 0
//! distinguishes a valid image (attach) from blank media (format when
//! allowed) and from garbage (fatal).

use crate::platform::Result as PlatformResult;
use crate::storage::BlockDevice;
use crate::vfs::{MountError, VfsDriver};

/// Magic written to block 0 on format
const SUPERBLOCK_MAGIC: [u8; 4] = *b"mlfs";

/// On-media format version
const FORMAT_VERSION: u32 = 1;

/// Superblock-magic mock of the filesystem driver collaborator
#[derive(Debug, Default)]
pub struct MockVfsDriver;

impl MockVfsDriver {
    /// New driver instance
    pub fn new() -> Self {
        Self
    }

    fn format(device: &mut dyn BlockDevice) -> PlatformResult<()> {
        let mut superblock = [0u8; 8];
        superblock[..4].copy_from_slice(&SUPERBLOCK_MAGIC);
        superblock[4..].copy_from_slice(&FORMAT_VERSION.to_le_bytes());
        device.erase(0)?;
        device.program(0, &superblock)
    }
}

impl VfsDriver for MockVfsDriver {
    fn mount(
        &self,
        device: &mut dyn BlockDevice,
        format_if_missing: bool,
    ) -> Result<(), MountError> {
        let mut header = [0u8; 8];
        device.read(0, &mut header).map_err(MountError::Io)?;

        if header[..4] == SUPERBLOCK_MAGIC {
            // Valid image: attach, contents preserved
            return Ok(());
        }

        if header.iter().all(|&b| b == 0xFF) {
            // Blank media
            if !format_if_missing {
                return Err(MountError::NoFilesystem);
            }
            return Self::format(device).map_err(MountError::Io);
        }

        Err(MountError::Corrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockFlash;
    use crate::storage::{FlashLayout, FlashPartition};

    fn device() -> FlashPartition<MockFlash> {
        let partition = FlashLayout::with_total(260).filesystem_partition().unwrap();
        FlashPartition::new(MockFlash::with_blocks(260), partition).unwrap()
    }

    #[test]
    fn test_format_writes_superblock() {
        let driver = MockVfsDriver::new();
        let mut dev = device();
        driver.mount(&mut dev, true).unwrap();

        let mut header = [0u8; 4];
        dev.read(0, &mut header).unwrap();
        assert_eq!(header, SUPERBLOCK_MAGIC);
    }

    #[test]
    fn test_attach_after_format() {
        let driver = MockVfsDriver::new();
        let mut dev = device();
        driver.mount(&mut dev, true).unwrap();
        // Attach path, formatting no longer required
        driver.mount(&mut dev, false).unwrap();
    }

    #[test]
    fn test_blank_without_format() {
        let driver = MockVfsDriver::new();
        let mut dev = device();
        assert_eq!(driver.mount(&mut dev, false), Err(MountError::NoFilesystem));
    }

    #[test]
    fn test_garbage_is_corrupted_even_with_format() {
        let driver = MockVfsDriver::new();
        let mut dev = device();
        dev.erase(0).unwrap();
        dev.program(0, &[0x12, 0x34, 0x56, 0x78]).unwrap();

        // format_if_missing covers missing, not corrupted
        assert_eq!(driver.mount(&mut dev, true), Err(MountError::Corrupted));
    }
}
