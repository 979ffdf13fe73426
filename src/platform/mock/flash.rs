//! Mock flash implementation for testing
//!
//! In-memory flash with NOR semantics: programming clears bits, erase sets
//! a whole block back to 0xFF. Tracks per-block erase counts and supports
//! corruption injection for mount-failure tests.

use crate::platform::error::FlashError;
use crate::platform::{FlashInterface, Result};
use core::cell::RefCell;

/// Flash erase block size (4 KiB, matching the RP2 flash sector)
const BLOCK_SIZE: u32 = 4096;

/// Default capacity: 4 MiB, 1024 blocks
const DEFAULT_BLOCKS: u32 = 1024;

/// Mock flash implementation
///
/// # Example
///
/// ```
/// use rp2_bringup::platform::mock::MockFlash;
/// use rp2_bringup::platform::FlashInterface;
///
/// let mut flash = MockFlash::new();
/// flash.erase(0x1000, 4096).unwrap();
/// flash.write(0x1000, &[0xA5; 4]).unwrap();
///
/// let mut buf = [0u8; 4];
/// flash.read(0x1000, &mut buf).unwrap();
/// assert_eq!(buf, [0xA5; 4]);
/// ```
#[derive(Debug)]
pub struct MockFlash {
    /// Storage, initialized to 0xFF (erased state)
    storage: RefCell<Vec<u8>>,
    /// Erase count per block
    erase_counts: RefCell<Vec<u32>>,
}

impl MockFlash {
    /// Mock flash with the default 4 MiB capacity
    pub fn new() -> Self {
        Self::with_blocks(DEFAULT_BLOCKS)
    }

    /// Mock flash sized to `blocks` erase blocks
    ///
    /// Size this to the board under test's `total_flash_blocks` so the
    /// filesystem partition fits.
    pub fn with_blocks(blocks: u32) -> Self {
        Self {
            storage: RefCell::new(vec![0xFF; (blocks * BLOCK_SIZE) as usize]),
            erase_counts: RefCell::new(vec![0; blocks as usize]),
        }
    }

    /// Flash contents at `address` (for test verification)
    pub fn contents(&self, address: u32, len: usize) -> Vec<u8> {
        let storage = self.storage.borrow();
        storage[address as usize..address as usize + len].to_vec()
    }

    /// Overwrite `len` bytes at `address` with a garbage pattern
    ///
    /// Bypasses NOR write rules; simulates a corrupted image.
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        let mut storage = self.storage.borrow_mut();
        for byte in &mut storage[address as usize..address as usize + len] {
            *byte = 0xAA;
        }
    }

    /// Erase count for the block containing `address`
    pub fn erase_count(&self, address: u32) -> u32 {
        self.erase_counts.borrow()[(address / BLOCK_SIZE) as usize]
    }

    fn in_range(&self, address: u32, len: usize) -> bool {
        address as usize + len <= self.storage.borrow().len()
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        if !self.in_range(address, buf.len()) {
            return Err(FlashError::InvalidAddress.into());
        }
        let storage = self.storage.borrow();
        buf.copy_from_slice(&storage[address as usize..address as usize + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        if !self.in_range(address, data.len()) {
            return Err(FlashError::InvalidAddress.into());
        }
        // NOR flash can only clear bits
        let mut storage = self.storage.borrow_mut();
        for (i, byte) in data.iter().enumerate() {
            storage[address as usize + i] &= byte;
        }
        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if address % BLOCK_SIZE != 0 || size % BLOCK_SIZE != 0 {
            return Err(FlashError::InvalidAddress.into());
        }
        if !self.in_range(address, size as usize) {
            return Err(FlashError::InvalidAddress.into());
        }

        let mut storage = self.storage.borrow_mut();
        for byte in &mut storage[address as usize..(address + size) as usize] {
            *byte = 0xFF;
        }

        let mut erase_counts = self.erase_counts.borrow_mut();
        for block in address / BLOCK_SIZE..(address + size) / BLOCK_SIZE {
            erase_counts[block as usize] += 1;
        }
        Ok(())
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        self.storage.borrow().len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_round_trip() {
        let mut flash = MockFlash::new();
        flash.erase(0x1000, 4096).unwrap();
        flash.write(0x1000, &[0x50, 0x41, 0x52, 0x41]).unwrap();

        let mut buf = [0u8; 4];
        flash.read(0x1000, &mut buf).unwrap();
        assert_eq!(buf, [0x50, 0x41, 0x52, 0x41]);
    }

    #[test]
    fn test_erase_resets_to_ff() {
        let mut flash = MockFlash::new();
        flash.erase(0x1000, 4096).unwrap();
        flash.write(0x1000, &[0x55; 256]).unwrap();

        flash.erase(0x1000, 4096).unwrap();
        assert!(flash.contents(0x1000, 256).iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_erase_counts_tracked() {
        let mut flash = MockFlash::new();
        flash.erase(0x1000, 4096).unwrap();
        flash.erase(0x1000, 4096).unwrap();
        flash.erase(0x1000, 4096).unwrap();
        assert_eq!(flash.erase_count(0x1000), 3);
        assert_eq!(flash.erase_count(0x2000), 0);
    }

    #[test]
    fn test_write_only_clears_bits() {
        let mut flash = MockFlash::new();
        flash.erase(0, 4096).unwrap();

        flash.write(0, &[0x0F]).unwrap();
        let mut buf = [0u8; 1];
        flash.read(0, &mut buf).unwrap();
        assert_eq!(buf[0], 0x0F);

        // Programming 0xFF over 0x0F cannot set bits back
        flash.write(0, &[0xFF]).unwrap();
        flash.read(0, &mut buf).unwrap();
        assert_eq!(buf[0], 0x0F);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut flash = MockFlash::with_blocks(2);
        let mut buf = [0u8; 4];
        assert!(flash.read(2 * 4096, &mut buf).is_err());
        assert!(flash.write(2 * 4096 - 2, &buf).is_err());
        assert!(flash.erase(2 * 4096, 4096).is_err());
    }

    #[test]
    fn test_unaligned_erase_rejected() {
        let mut flash = MockFlash::new();
        assert!(flash.erase(0x100, 4096).is_err());
        assert!(flash.erase(0x1000, 1024).is_err());
    }

    #[test]
    fn test_sized_capacity() {
        let flash = MockFlash::with_blocks(3757);
        assert_eq!(flash.capacity(), 3757 * 4096);
    }
}
