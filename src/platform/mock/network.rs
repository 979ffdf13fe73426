//! Mock network device for testing
//!
//! Loopback implementation of the capability interface: sent frames are
//! queued and read back by `receive_frame`.

use std::collections::VecDeque;

use crate::platform::error::NetError;
use crate::platform::traits::{NetDeviceInterface, FRAME_MTU};
use crate::platform::Result;

/// Loopback mock of the wireless/network capability interface
#[derive(Debug)]
pub struct MockNetDevice {
    link_up: bool,
    frames: VecDeque<Vec<u8>>,
}

impl MockNetDevice {
    /// Device with the link up and no queued frames
    pub fn new() -> Self {
        Self {
            link_up: true,
            frames: VecDeque::new(),
        }
    }

    /// Force the link state (for consumer-side tests)
    pub fn set_link(&mut self, up: bool) {
        self.link_up = up;
    }

    /// Number of frames queued
    pub fn pending(&self) -> usize {
        self.frames.len()
    }
}

impl Default for MockNetDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl NetDeviceInterface for MockNetDevice {
    fn link_up(&self) -> bool {
        self.link_up
    }

    fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        if frame.len() > FRAME_MTU {
            return Err(NetError::FrameTooLarge.into());
        }
        self.frames.push_back(frame.to_vec());
        Ok(())
    }

    fn receive_frame(&mut self, buf: &mut [u8]) -> Result<usize> {
        let Some(frame) = self.frames.front() else {
            return Ok(0);
        };
        if frame.len() > buf.len() {
            return Err(NetError::BufferTooSmall.into());
        }
        let frame = self.frames.pop_front().unwrap();
        buf[..frame.len()].copy_from_slice(&frame);
        Ok(frame.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback() {
        let mut dev = MockNetDevice::new();
        dev.send_frame(b"hello").unwrap();
        dev.send_frame(b"world!").unwrap();
        assert_eq!(dev.pending(), 2);

        let mut buf = [0u8; 64];
        assert_eq!(dev.receive_frame(&mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], b"hello");
        assert_eq!(dev.receive_frame(&mut buf).unwrap(), 6);
        assert_eq!(&buf[..6], b"world!");
        assert_eq!(dev.receive_frame(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_mtu_enforced() {
        let mut dev = MockNetDevice::new();
        let oversized = vec![0u8; FRAME_MTU + 1];
        assert!(dev.send_frame(&oversized).is_err());
    }

    #[test]
    fn test_small_receive_buffer() {
        let mut dev = MockNetDevice::new();
        dev.send_frame(b"too big for buf").unwrap();

        let mut buf = [0u8; 4];
        assert!(dev.receive_frame(&mut buf).is_err());
        // Frame stays queued after the failed receive
        assert_eq!(dev.pending(), 1);
    }

    #[test]
    fn test_link_state() {
        let mut dev = MockNetDevice::new();
        assert!(dev.link_up());
        dev.set_link(false);
        assert!(!dev.link_up());
    }
}
