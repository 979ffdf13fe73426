//! Platform abstraction traits
//!
//! The traits a platform implementation must provide for board bring-up.

pub mod flash;
pub mod gpio;
pub mod network;
pub mod platform;

// Re-export trait interfaces
pub use flash::FlashInterface;
pub use gpio::{GpioInterface, GpioMode};
pub use network::{NetDeviceInterface, FRAME_MTU};
pub use platform::{Platform, MAX_GPIO};
