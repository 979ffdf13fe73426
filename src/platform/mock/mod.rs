//! Mock platform implementation for testing
//!
//! In-memory implementations of the platform traits plus a
//! superblock-magic filesystem driver, so the whole bring-up sequence runs
//! on a host without hardware.
//!
//! Available during test builds and behind the `mock` feature.

#![cfg(any(test, feature = "mock"))]

mod flash;
mod gpio;
mod network;
mod platform;
mod vfs;

pub use flash::MockFlash;
pub use gpio::MockGpio;
pub use network::MockNetDevice;
pub use platform::{MockEvent, MockPlatform};
pub use vfs::MockVfsDriver;
