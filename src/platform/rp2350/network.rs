//! CYW43 radio bring-up
//!
//! Starts the CYW43439 driver over PIO SPI and exposes the resulting raw
//! ethernet device behind [`NetDeviceInterface`]. The wireless and network
//! capability slots both view the same chip, so the device handle is a
//! shareable reference to one driver instance.
//!
//! No IP stack lives here: consumers get raw frames and the WiFi control
//! handle, and bring their own stack if they want one.

use core::cell::RefCell;
use core::task::{Context, RawWaker, RawWakerVtable, Waker};

use cyw43::{Control, NetDriver};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use embassy_executor::Spawner;
use embassy_net_driver::{Driver, LinkState, RxToken, TxToken};
use embassy_rp::{
    bind_interrupts,
    gpio::{Level, Output},
    peripherals::{DMA_CH0, PIO0},
    pio::{InterruptHandler as PioInterruptHandler, Pio},
};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use static_cell::StaticCell;

use crate::platform::error::{NetError, PlatformError};
use crate::platform::traits::{NetDeviceInterface, FRAME_MTU};
use crate::platform::Result;

bind_interrupts!(struct PioIrqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

type SharedDriver = Mutex<CriticalSectionRawMutex, RefCell<NetDriver<'static>>>;

/// CYW43 driver task
///
/// Must be spawned on the executor for the radio to function.
#[embassy_executor::task]
async fn radio_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

/// Start the CYW43439 and return the capability device handles
///
/// Wires the chip's standard pins (PWR 23, CS 25, DIO 24, CLK 29) over
/// PIO0/DMA0, loads `fw`, spawns the driver task and applies the CLM blob.
/// Returns two handles onto the same device, one per capability slot, plus
/// the WiFi control handle for join/scan operations.
///
/// # Errors
///
/// Returns `PlatformError::InitializationFailed` if the driver task cannot
/// be spawned.
pub async fn start_radio(
    spawner: Spawner,
    p: embassy_rp::Peripherals,
    fw: &'static [u8],
    clm: &'static [u8],
) -> Result<(Cyw43NetDevice, Cyw43NetDevice, &'static mut Control<'static>)> {
    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, PioIrqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;

    spawner
        .spawn(radio_task(runner))
        .map_err(|_| PlatformError::InitializationFailed)?;

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    static DRIVER: StaticCell<SharedDriver> = StaticCell::new();
    let driver = DRIVER.init(Mutex::new(RefCell::new(net_device)));

    static CONTROL: StaticCell<Control<'static>> = StaticCell::new();
    let control = CONTROL.init(control);

    Ok((
        Cyw43NetDevice::new(driver),
        Cyw43NetDevice::new(driver),
        control,
    ))
}

/// Raw ethernet device over the CYW43 driver
///
/// A frame pulled from the driver into an undersized caller buffer is
/// staged in `pending` and delivered on the next `receive_frame` call; the
/// receive token is consumed either way, so staging is what keeps the
/// queued-until-delivered contract.
pub struct Cyw43NetDevice {
    driver: &'static SharedDriver,
    pending: heapless::Vec<u8, FRAME_MTU>,
}

impl Cyw43NetDevice {
    fn new(driver: &'static SharedDriver) -> Self {
        Self {
            driver,
            pending: heapless::Vec::new(),
        }
    }
}

// The driver API is poll-based; frame I/O here is synchronous, so polls run
// against a waker that never fires.
fn noop_waker() -> Waker {
    const VTABLE: RawWakerVtable = RawWakerVtable::new(|_| RAW, |_| {}, |_| {}, |_| {});
    const RAW: RawWaker = RawWaker::new(core::ptr::null(), &VTABLE);
    // SAFETY: all vtable entries are no-ops
    unsafe { Waker::from_raw(RAW) }
}

impl NetDeviceInterface for Cyw43NetDevice {
    fn link_up(&self) -> bool {
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        self.driver
            .lock(|d| d.borrow_mut().link_state(&mut cx) == LinkState::Up)
    }

    fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        if frame.len() > FRAME_MTU {
            return Err(NetError::FrameTooLarge.into());
        }
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        self.driver.lock(|d| {
            let mut driver = d.borrow_mut();
            match driver.transmit(&mut cx) {
                Some(tx) => {
                    tx.consume(frame.len(), |buf| buf.copy_from_slice(frame));
                    Ok(())
                }
                None => Err(NetError::Busy.into()),
            }
        })
    }

    fn receive_frame(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.pending.is_empty() {
            if self.pending.len() > buf.len() {
                return Err(NetError::BufferTooSmall.into());
            }
            let len = self.pending.len();
            buf[..len].copy_from_slice(&self.pending);
            self.pending.clear();
            return Ok(len);
        }

        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        let pending = &mut self.pending;
        self.driver.lock(|d| {
            let mut driver = d.borrow_mut();
            match driver.receive(&mut cx) {
                Some((rx, _tx)) => rx.consume(|frame| {
                    if frame.len() > buf.len() {
                        // Stage the frame for the next call
                        let _ = pending.extend_from_slice(frame);
                        return Err(NetError::BufferTooSmall.into());
                    }
                    buf[..frame.len()].copy_from_slice(frame);
                    Ok(frame.len())
                }),
                None => Ok(0),
            }
        })
    }
}
