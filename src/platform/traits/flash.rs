//! Flash interface trait
//!
//! Byte-addressed access to the flash area that follows the firmware binary.
//! Addresses are relative to the start of that area; the filesystem block
//! device in [`crate::storage`] layers a block-addressed window on top.

use crate::platform::Result;

/// Flash interface trait
///
/// NOR-flash semantics: reads are unrestricted, programming can only clear
/// bits, and erasing (which sets a whole block back to `0xFF`) must happen
/// at block granularity.
pub trait FlashInterface {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if the
    /// range exceeds the device capacity.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Program `data` starting at `address`
    ///
    /// The target range must have been erased; programming only clears bits.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash` if the range is invalid or the
    /// operation fails.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `size` bytes starting at `address`
    ///
    /// Both `address` and `size` must be multiples of [`block_size`].
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash` if the range is unaligned, invalid,
    /// or the operation fails.
    ///
    /// [`block_size`]: FlashInterface::block_size
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Erase block size in bytes
    fn block_size(&self) -> u32;

    /// Device capacity in bytes
    fn capacity(&self) -> u32;
}
