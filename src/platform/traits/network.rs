//! Network device capability trait
//!
//! The floor of the capability interface held by the wireless and network
//! registry slots: link state plus raw frame I/O. Everything richer (scan,
//! join, IP configuration) belongs to the driver collaborator and is not
//! part of the bring-up contract.

use crate::platform::Result;

/// Ethernet-framing MTU used by the RP2 wireless silicon
pub const FRAME_MTU: usize = 1514;

/// Network device capability trait
pub trait NetDeviceInterface {
    /// Whether the link is up
    fn link_up(&self) -> bool;

    /// Queue one frame for transmission
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Net(NetError::FrameTooLarge)` if the frame
    /// exceeds [`FRAME_MTU`], or `NetError::Busy` if no transmit buffer is
    /// available.
    fn send_frame(&mut self, frame: &[u8]) -> Result<()>;

    /// Receive one pending frame into `buf`
    ///
    /// Returns the frame length, or `0` if nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Net(NetError::BufferTooSmall)` if `buf`
    /// cannot hold the pending frame (the frame stays queued).
    fn receive_frame(&mut self, buf: &mut [u8]) -> Result<usize>;
}
