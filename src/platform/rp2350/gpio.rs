//! RP2350 GPIO implementation
//!
//! GPIO support for RP2350 using the `rp235x-hal` crate.

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};
use rp235x_hal::gpio::{
    FunctionNull, FunctionSioInput, FunctionSioOutput, Pin, PinId, PullNone, PullType,
};

/// RP2350 GPIO implementation
///
/// Wraps an `rp235x-hal` pin behind the [`GpioInterface`] trait.
pub struct Rp2350Gpio<I: PinId, F: rp235x_hal::gpio::Function, P: PullType> {
    pin: Pin<I, F, P>,
    mode: GpioMode,
}

impl<I: PinId, F: rp235x_hal::gpio::Function, P: PullType> Rp2350Gpio<I, F, P> {
    /// Wrap a pre-configured HAL pin
    pub fn new(pin: Pin<I, F, P>, mode: GpioMode) -> Self {
        Self { pin, mode }
    }

    /// Convert to push-pull output mode
    pub fn into_output(self) -> Rp2350Gpio<I, FunctionSioOutput, PullNone>
    where
        I: rp235x_hal::gpio::ValidFunction<FunctionNull>,
        I: rp235x_hal::gpio::ValidFunction<FunctionSioOutput>,
    {
        let pin = self
            .pin
            .into_function::<FunctionNull>()
            .into_push_pull_output()
            .into_pull_type::<PullNone>();
        Rp2350Gpio {
            pin,
            mode: GpioMode::OutputPushPull,
        }
    }

    /// Convert to floating input mode
    pub fn into_input(self) -> Rp2350Gpio<I, FunctionSioInput, PullNone>
    where
        I: rp235x_hal::gpio::ValidFunction<FunctionNull>,
        I: rp235x_hal::gpio::ValidFunction<FunctionSioInput>,
    {
        let pin = self
            .pin
            .into_function::<FunctionNull>()
            .into_floating_input();
        Rp2350Gpio {
            pin,
            mode: GpioMode::Input,
        }
    }
}

impl<I: PinId, P: PullType> GpioInterface for Rp2350Gpio<I, FunctionSioOutput, P> {
    fn set_high(&mut self) -> Result<()> {
        use embedded_hal_0_2::digital::v2::OutputPin;
        self.pin
            .set_high()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))
    }

    fn set_low(&mut self) -> Result<()> {
        use embedded_hal_0_2::digital::v2::OutputPin;
        self.pin
            .set_low()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))
    }

    fn read(&self) -> bool {
        use embedded_hal_0_2::digital::v2::InputPin;
        self.pin.is_high().unwrap_or(false)
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}

impl<I: PinId, P: PullType> GpioInterface for Rp2350Gpio<I, FunctionSioInput, P> {
    fn set_high(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn set_low(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn read(&self) -> bool {
        use embedded_hal_0_2::digital::v2::InputPin;
        self.pin.is_high().unwrap_or(false)
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}
