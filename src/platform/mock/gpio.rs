//! Mock GPIO implementation for testing

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};

use super::platform::MockEvent;

/// Mock GPIO implementation
///
/// Tracks level and mode; pins handed out by
/// [`MockPlatform`](super::MockPlatform) also append level changes to the
/// platform's event log so tests can assert sequencing.
#[derive(Debug)]
pub struct MockGpio {
    pin: u8,
    state: bool,
    mode: GpioMode,
    events: Option<Rc<RefCell<Vec<MockEvent>>>>,
}

impl MockGpio {
    /// Standalone mock pin in output mode
    pub fn new_output() -> Self {
        Self {
            pin: 0,
            state: false,
            mode: GpioMode::OutputPushPull,
            events: None,
        }
    }

    /// Standalone mock pin in input mode
    pub fn new_input() -> Self {
        Self {
            pin: 0,
            state: false,
            mode: GpioMode::Input,
            events: None,
        }
    }

    /// Output pin that reports level changes into `events`
    pub(super) fn with_events(pin: u8, events: Rc<RefCell<Vec<MockEvent>>>) -> Self {
        Self {
            pin,
            state: false,
            mode: GpioMode::OutputPushPull,
            events: Some(events),
        }
    }

    /// Simulate an external signal on an input pin
    pub fn set_input_state(&mut self, high: bool) {
        self.state = high;
    }

    fn record(&self, event: MockEvent) {
        if let Some(events) = &self.events {
            events.borrow_mut().push(event);
        }
    }

    fn is_output(&self) -> bool {
        matches!(
            self.mode,
            GpioMode::OutputPushPull | GpioMode::OutputOpenDrain
        )
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        if !self.is_output() {
            return Err(PlatformError::Gpio(GpioError::InvalidMode));
        }
        self.state = true;
        self.record(MockEvent::GpioHigh(self.pin));
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        if !self.is_output() {
            return Err(PlatformError::Gpio(GpioError::InvalidMode));
        }
        self.state = false;
        self.record(MockEvent::GpioLow(self.pin));
        Ok(())
    }

    fn read(&self) -> bool {
        self.state
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_pin_levels() {
        let mut gpio = MockGpio::new_output();
        assert!(!gpio.read());

        gpio.set_high().unwrap();
        assert!(gpio.read());

        gpio.set_low().unwrap();
        assert!(!gpio.read());
    }

    #[test]
    fn test_input_pin_rejects_drive() {
        let mut gpio = MockGpio::new_input();
        assert!(gpio.set_high().is_err());
        assert!(gpio.set_low().is_err());

        gpio.set_input_state(true);
        assert!(gpio.read());
    }

    #[test]
    fn test_event_recording() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut gpio = MockGpio::with_events(7, events.clone());

        gpio.set_high().unwrap();
        gpio.set_low().unwrap();

        assert_eq!(
            *events.borrow(),
            vec![MockEvent::GpioHigh(7), MockEvent::GpioLow(7)]
        );
    }
}
