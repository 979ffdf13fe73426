//! RP2350 platform implementation
//!
//! Root [`Platform`] impl for RP2350 boards. Peripherals needing board-level
//! setup are staged by the firmware binary before bring-up runs:
//!
//! ```no_run
//! # async fn example(spawner: embassy_executor::Spawner) {
//! use rp2_bringup::platform::rp2350::{start_radio, Rp2350Flash, Rp2350Platform};
//!
//! let p = embassy_rp::init(Default::default());
//! let fw = include_bytes!("../../../firmware/43439A0.bin");
//! let clm = include_bytes!("../../../firmware/43439A0_clm.bin");
//!
//! let mut platform = Rp2350Platform::new(Rp2350Flash::new(2 * 1024 * 1024));
//! let (wireless, network, _control) = start_radio(spawner, p, fw, clm).await.unwrap();
//! platform.stage_net_devices(wireless, network);
//! # }
//! ```

use rp235x_hal::gpio::{bank0::Gpio0, FunctionSioOutput, PullNone};

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{Platform, MAX_GPIO},
    Result,
};

use super::{Cyw43NetDevice, Rp2350Flash, Rp2350Gpio};

/// RP2350 platform implementation
///
/// Serves out peripherals staged by the firmware binary. The radio power
/// pin is fixed to GPIO 0 at the type level; boards whose descriptor names
/// another control pin need their pin staged here instead.
pub struct Rp2350Platform {
    flash: Option<Rp2350Flash>,
    radio_pin: Option<Rp2350Gpio<Gpio0, FunctionSioOutput, PullNone>>,
    wireless: Option<Cyw43NetDevice>,
    network: Option<Cyw43NetDevice>,
}

impl Rp2350Platform {
    /// Platform over a flash peripheral, no networking staged
    pub fn new(flash: Rp2350Flash) -> Self {
        Self {
            flash: Some(flash),
            radio_pin: None,
            wireless: None,
            network: None,
        }
    }

    /// Stage the radio module power pin
    pub fn stage_radio_pin(&mut self, pin: Rp2350Gpio<Gpio0, FunctionSioOutput, PullNone>) {
        self.radio_pin = Some(pin);
    }

    /// Stage the wireless/network device handles
    pub fn stage_net_devices(&mut self, wireless: Cyw43NetDevice, network: Cyw43NetDevice) {
        self.wireless = Some(wireless);
        self.network = Some(network);
    }
}

impl Platform for Rp2350Platform {
    type Gpio = Rp2350Gpio<Gpio0, FunctionSioOutput, PullNone>;
    type Flash = Rp2350Flash;
    type Wireless = Cyw43NetDevice;
    type Network = Cyw43NetDevice;

    fn init() -> Result<Self> {
        // Hardware setup needs the PAC peripherals; construct with `new`
        // and stage instead
        Err(PlatformError::InitializationFailed)
    }

    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio> {
        if pin > MAX_GPIO {
            return Err(PlatformError::Gpio(GpioError::InvalidPin));
        }
        if pin != 0 {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.radio_pin
            .take()
            .ok_or(PlatformError::ResourceUnavailable)
    }

    fn take_flash(&mut self) -> Result<Self::Flash> {
        self.flash.take().ok_or(PlatformError::ResourceUnavailable)
    }

    fn create_wireless(&mut self) -> Result<Self::Wireless> {
        self.wireless
            .take()
            .ok_or(PlatformError::ResourceUnavailable)
    }

    fn create_network(&mut self) -> Result<Self::Network> {
        self.network
            .take()
            .ok_or(PlatformError::ResourceUnavailable)
    }
}
