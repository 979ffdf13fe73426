//! Radio power sequencer
//!
//! Boards with a discrete radio module hold it in reset until a control
//! pin reaches its asserted level. The sequence is a single synchronous
//! transition per boot - no retries, no readiness polling (readiness is the
//! radio driver's concern). There is no power-down path: once powered, the
//! module stays powered for the life of the process.

use crate::platform::{GpioInterface, Result};

/// Radio module power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum PowerState {
    /// Held in reset/power-down (initial)
    Unpowered,
    /// Out of reset (terminal for this boot)
    Powered,
}

/// One-shot power control for a discrete radio module
///
/// Owns the control pin for the rest of the boot, so nothing else can
/// drive the module back into reset.
#[derive(Debug)]
pub struct RadioPower<G: GpioInterface> {
    pin: G,
    power_on_high: bool,
    state: PowerState,
}

impl<G: GpioInterface> RadioPower<G> {
    /// Wrap the module's control pin
    ///
    /// `power_on_high` is the board-defined asserted level that takes the
    /// module out of reset.
    pub fn new(pin: G, power_on_high: bool) -> Self {
        Self {
            pin,
            power_on_high,
            state: PowerState::Unpowered,
        }
    }

    /// Drive the control pin to its asserted level
    ///
    /// A second call in the same boot is a no-op: the pin is not touched
    /// again and the module never reverts to reset.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio` if the pin cannot be driven.
    pub fn power_on(&mut self) -> Result<()> {
        if self.state == PowerState::Powered {
            return Ok(());
        }
        if self.power_on_high {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.state = PowerState::Powered;
        Ok(())
    }

    /// Current power state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// The control pin (for inspection)
    pub fn pin(&self) -> &G {
        &self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockGpio;

    #[test]
    fn test_power_on_asserts_high() {
        let mut radio = RadioPower::new(MockGpio::new_output(), true);
        assert_eq!(radio.state(), PowerState::Unpowered);
        assert!(!radio.pin().read());

        radio.power_on().unwrap();
        assert_eq!(radio.state(), PowerState::Powered);
        assert!(radio.pin().read());
    }

    #[test]
    fn test_power_on_asserts_low_for_active_low_modules() {
        let mut pin = MockGpio::new_output();
        pin.set_high().unwrap();
        let mut radio = RadioPower::new(pin, false);

        radio.power_on().unwrap();
        assert_eq!(radio.state(), PowerState::Powered);
        assert!(!radio.pin().read());
    }

    #[test]
    fn test_power_on_is_one_shot() {
        let mut radio = RadioPower::new(MockGpio::new_output(), true);
        radio.power_on().unwrap();
        // Second call must not revert or re-drive the pin
        radio.power_on().unwrap();
        assert_eq!(radio.state(), PowerState::Powered);
        assert!(radio.pin().read());
    }

    #[test]
    fn test_power_on_input_pin_fails() {
        let mut radio = RadioPower::new(MockGpio::new_input(), true);
        assert!(radio.power_on().is_err());
        assert_eq!(radio.state(), PowerState::Unpowered);
    }
}
