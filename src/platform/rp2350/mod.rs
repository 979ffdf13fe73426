//! RP2350 platform implementation
//!
//! Hardware backend for RP2350-based boards. Peripherals that need
//! board-level setup (PIO wiring for the radio, flash geometry) are staged
//! by the firmware binary and handed to [`Rp2350Platform`], which then
//! serves them out through the platform traits.

pub mod flash;
pub mod gpio;
pub mod network;
pub mod platform;

pub use flash::Rp2350Flash;
pub use gpio::Rp2350Gpio;
pub use network::{start_radio, Cyw43NetDevice};
pub use platform::Rp2350Platform;
