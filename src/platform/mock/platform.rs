//! Mock platform implementation for testing

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{Platform, MAX_GPIO},
    Result,
};

use super::{MockFlash, MockGpio, MockNetDevice};

/// Observable side effect of a bring-up run against the mock platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEvent {
    /// An allocated pin was driven high
    GpioHigh(u8),
    /// An allocated pin was driven low
    GpioLow(u8),
    /// The wireless device handle was constructed
    WirelessCreated,
    /// The network device handle was constructed
    NetworkCreated,
}

/// Mock platform implementation
///
/// Hands out mock peripherals and records an event log so tests can assert
/// the order of provisioning steps (e.g. radio power before device
/// binding).
///
/// # Example
///
/// ```
/// use rp2_bringup::platform::mock::MockPlatform;
/// use rp2_bringup::platform::{GpioInterface, Platform};
///
/// let mut platform = MockPlatform::new();
/// let mut pin = platform.create_gpio(0).unwrap();
/// pin.set_high().unwrap();
/// ```
#[derive(Debug)]
pub struct MockPlatform {
    flash: Option<MockFlash>,
    gpio_allocated: Vec<u8>,
    events: Rc<RefCell<Vec<MockEvent>>>,
}

impl MockPlatform {
    /// Mock platform with the default 4 MiB flash
    pub fn new() -> Self {
        Self::with_flash(MockFlash::new())
    }

    /// Mock platform with flash sized to `blocks` erase blocks
    pub fn with_flash_blocks(blocks: u32) -> Self {
        Self::with_flash(MockFlash::with_blocks(blocks))
    }

    /// Mock platform over an existing flash image
    ///
    /// Lets tests carry flash contents across simulated reboots.
    pub fn with_flash(flash: MockFlash) -> Self {
        Self {
            flash: Some(flash),
            gpio_allocated: Vec::new(),
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Snapshot of the event log
    pub fn events(&self) -> Vec<MockEvent> {
        self.events.borrow().clone()
    }

    /// Direct access to the flash, while not yet taken
    pub fn flash_mut(&mut self) -> Option<&mut MockFlash> {
        self.flash.as_mut()
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MockPlatform {
    type Gpio = MockGpio;
    type Flash = MockFlash;
    type Wireless = MockNetDevice;
    type Network = MockNetDevice;

    fn init() -> Result<Self> {
        Ok(Self::new())
    }

    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio> {
        if pin > MAX_GPIO {
            return Err(PlatformError::Gpio(GpioError::InvalidPin));
        }
        if self.gpio_allocated.contains(&pin) {
            return Err(PlatformError::Gpio(GpioError::PinInUse));
        }
        self.gpio_allocated.push(pin);
        Ok(MockGpio::with_events(pin, self.events.clone()))
    }

    fn take_flash(&mut self) -> Result<Self::Flash> {
        self.flash.take().ok_or(PlatformError::ResourceUnavailable)
    }

    fn create_wireless(&mut self) -> Result<Self::Wireless> {
        self.events.borrow_mut().push(MockEvent::WirelessCreated);
        Ok(MockNetDevice::new())
    }

    fn create_network(&mut self) -> Result<Self::Network> {
        self.events.borrow_mut().push(MockEvent::NetworkCreated);
        Ok(MockNetDevice::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::GpioInterface;

    #[test]
    fn test_init() {
        let platform = MockPlatform::init().unwrap();
        assert!(platform.events().is_empty());
    }

    #[test]
    fn test_gpio_allocation() {
        let mut platform = MockPlatform::new();
        let mut pin = platform.create_gpio(5).unwrap();
        pin.set_high().unwrap();

        // Same pin twice
        assert_eq!(
            platform.create_gpio(5).err(),
            Some(PlatformError::Gpio(GpioError::PinInUse))
        );
        // Out of range
        assert_eq!(
            platform.create_gpio(30).err(),
            Some(PlatformError::Gpio(GpioError::InvalidPin))
        );
        // Another pin is fine
        assert!(platform.create_gpio(6).is_ok());
    }

    #[test]
    fn test_flash_taken_once() {
        let mut platform = MockPlatform::new();
        let _flash = platform.take_flash().unwrap();
        assert_eq!(
            platform.take_flash().err(),
            Some(PlatformError::ResourceUnavailable)
        );
    }

    #[test]
    fn test_device_creation_logged() {
        let mut platform = MockPlatform::new();
        let _w = platform.create_wireless().unwrap();
        let _n = platform.create_network().unwrap();
        assert_eq!(
            platform.events(),
            vec![MockEvent::WirelessCreated, MockEvent::NetworkCreated]
        );
    }

    #[test]
    fn test_gpio_events_flow_into_platform_log() {
        let mut platform = MockPlatform::new();
        let mut pin = platform.create_gpio(0).unwrap();
        pin.set_high().unwrap();
        assert_eq!(platform.events(), vec![MockEvent::GpioHigh(0)]);
    }
}
