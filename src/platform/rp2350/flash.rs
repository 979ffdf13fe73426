//! RP2350 flash implementation
//!
//! Flash access through the RP2350 boot ROM functions. Addresses on the
//! [`FlashInterface`] are relative to the first byte past the firmware
//! image region, so the reserved layout planned over this peripheral can
//! never touch the running binary.
//!
//! # Safety
//!
//! Erase and program leave XIP inaccessible while they run, so both execute
//! inside a critical section and must not touch flash-resident code.

use crate::log_warn;
use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use rp235x_hal::rom_data;

/// Flash region occupied by the firmware image (1008 KiB)
const FIRMWARE_REGION_SIZE: u32 = 1008 * 1024;

/// Flash erase block size (minimum erase unit)
const BLOCK_SIZE: u32 = 4096;

/// 4 KiB sector erase command
const SECTOR_ERASE_CMD: u8 = 0x20;

/// Flash is memory-mapped here for reads
const XIP_BASE: usize = 0x1000_0000;

/// RP2350 flash implementation
///
/// Erase and program are blocking and can take 100ms+; the other core must
/// not execute from flash while they run.
pub struct Rp2350Flash {
    capacity: u32,
}

impl Rp2350Flash {
    /// Flash peripheral for a chip of `chip_bytes` total flash
    ///
    /// The usable capacity excludes the firmware image region at the start
    /// of the chip.
    pub fn new(chip_bytes: u32) -> Self {
        if chip_bytes < FIRMWARE_REGION_SIZE {
            log_warn!(
                "flash chip ({} bytes) smaller than the firmware image region",
                chip_bytes
            );
        }
        Self {
            capacity: chip_bytes.saturating_sub(FIRMWARE_REGION_SIZE),
        }
    }

    /// Absolute chip offset for a peripheral-relative address
    fn absolute(&self, address: u32, len: usize) -> Result<u32> {
        if address >= self.capacity || len as u32 > self.capacity - address {
            return Err(FlashError::InvalidAddress.into());
        }
        Ok(FIRMWARE_REGION_SIZE + address)
    }

    /// Run `f` with XIP disabled
    ///
    /// # Safety
    ///
    /// `f` must not access XIP memory; interrupts are masked for the whole
    /// operation.
    unsafe fn with_xip_disabled<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        critical_section::with(|_cs| {
            // Prepare flash for serial operations before any erase/program
            rom_data::connect_internal_flash();
            rom_data::flash_exit_xip();

            let result = f();

            // Make the changes visible and restore execute-in-place
            rom_data::flash_flush_cache();
            rom_data::flash_enter_cmd_xip();

            result
        })
    }
}

impl FlashInterface for Rp2350Flash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        let absolute = self.absolute(address, buf.len())?;

        // Reads go through the XIP window; no mode switch required
        let flash_ptr = (XIP_BASE + absolute as usize) as *const u8;

        // SAFETY: range validated against capacity above
        unsafe {
            core::ptr::copy_nonoverlapping(flash_ptr, buf.as_mut_ptr(), buf.len());
        }

        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        let absolute = self.absolute(address, data.len())?;

        // SAFETY: XIP disabled for the duration; the ROM routine validates
        // program-page alignment
        unsafe {
            self.with_xip_disabled(|| {
                rom_data::flash_range_program(absolute, data.as_ptr(), data.len());
            });
        }

        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if address % BLOCK_SIZE != 0 || size % BLOCK_SIZE != 0 {
            return Err(FlashError::InvalidAddress.into());
        }
        let absolute = self.absolute(address, size as usize)?;

        // SAFETY: XIP disabled for the duration
        unsafe {
            self.with_xip_disabled(|| {
                rom_data::flash_range_erase(absolute, size as usize, BLOCK_SIZE, SECTOR_ERASE_CMD);
            });
        }

        Ok(())
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        self.capacity
    }
}
