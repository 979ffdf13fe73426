//! Platform abstraction layer
//!
//! Hardware access for the bring-up sequence goes through the traits in this
//! module. All platform-specific code is isolated here; the rest of the crate
//! is generic over [`traits::Platform`].

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "rp2350")]
pub mod rp2350;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{FlashInterface, GpioInterface, NetDeviceInterface, Platform};
