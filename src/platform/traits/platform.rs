//! Root platform trait

use super::{FlashInterface, GpioInterface, NetDeviceInterface};
use crate::platform::Result;

/// Highest valid GPIO number on RP2 bank 0
pub const MAX_GPIO: u8 = 29;

/// Root platform trait
///
/// Aggregates the peripheral interfaces bring-up needs. Concrete peripheral
/// types are associated types, so dispatch is resolved at compile time and
/// the orchestrator stays generic over the backend (hardware or mock).
///
/// The wireless/network constructors exist even on boards without radio
/// hardware; the orchestrator only calls them when the board descriptor
/// declares networking.
pub trait Platform: Sized {
    /// GPIO peripheral type
    type Gpio: GpioInterface;

    /// Flash peripheral type
    type Flash: FlashInterface;

    /// Wireless device handle type
    type Wireless: NetDeviceInterface;

    /// Network device handle type
    type Network: NetDeviceInterface;

    /// Initialize the platform
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if the backend cannot
    /// construct itself without caller-provided peripherals.
    fn init() -> Result<Self>;

    /// Allocate a GPIO pin as an output
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidPin)` for pin numbers
    /// above [`MAX_GPIO`], and `GpioError::PinInUse` or
    /// `PlatformError::ResourceUnavailable` when the pin cannot be handed
    /// out.
    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio>;

    /// Take ownership of the flash peripheral
    ///
    /// Flash is a singleton; this succeeds at most once per platform
    /// instance.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if already taken.
    fn take_flash(&mut self) -> Result<Self::Flash>;

    /// Construct the wireless device handle
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the board has no
    /// wireless hardware staged, or it was already taken.
    fn create_wireless(&mut self) -> Result<Self::Wireless>;

    /// Construct the network device handle
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the board has no
    /// network hardware staged, or it was already taken.
    fn create_network(&mut self) -> Result<Self::Network>;
}
