//! Device capability registry
//!
//! Two write-once-per-boot slots holding the wireless and network device
//! handles selected for the running board. The bring-up orchestrator is the
//! sole writer; afterwards the registry is read-mostly shared state inside
//! the sealed board context. Boards without networking leave both slots
//! unbound for the life of the process.

use core::fmt;

use crate::platform::NetDeviceInterface;

/// Identifies a capability slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum Slot {
    /// The 802.11 device handle
    Wireless,
    /// The network interface handle
    Network,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Wireless => write!(f, "wireless"),
            Slot::Network => write!(f, "network"),
        }
    }
}

/// Capability slot errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum SlotError {
    /// A second bind of an already-populated slot - a wiring bug, since
    /// board selection is immutable after boot
    AlreadyBound(Slot),
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::AlreadyBound(slot) => {
                write!(f, "{} device slot already bound", slot)
            }
        }
    }
}

/// Write-once wireless/network capability slots
#[derive(Debug)]
pub struct DeviceRegistry<W: NetDeviceInterface, N: NetDeviceInterface> {
    wireless: Option<W>,
    network: Option<N>,
}

impl<W: NetDeviceInterface, N: NetDeviceInterface> DeviceRegistry<W, N> {
    /// Registry with both slots unbound
    pub fn new() -> Self {
        Self {
            wireless: None,
            network: None,
        }
    }

    /// Bind the wireless device handle
    ///
    /// Crate-internal: only the bring-up orchestrator populates slots, so a
    /// slot left unbound at the end of bring-up stays unbound for the life
    /// of the process.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::AlreadyBound`] if the slot was populated
    /// earlier this boot.
    pub(crate) fn bind_wireless(&mut self, device: W) -> Result<(), SlotError> {
        if self.wireless.is_some() {
            return Err(SlotError::AlreadyBound(Slot::Wireless));
        }
        self.wireless = Some(device);
        Ok(())
    }

    /// Bind the network device handle
    ///
    /// Crate-internal, like [`bind_wireless`](Self::bind_wireless).
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::AlreadyBound`] if the slot was populated
    /// earlier this boot.
    pub(crate) fn bind_network(&mut self, device: N) -> Result<(), SlotError> {
        if self.network.is_some() {
            return Err(SlotError::AlreadyBound(Slot::Network));
        }
        self.network = Some(device);
        Ok(())
    }

    /// Whether `slot` is bound
    pub fn is_bound(&self, slot: Slot) -> bool {
        match slot {
            Slot::Wireless => self.wireless.is_some(),
            Slot::Network => self.network.is_some(),
        }
    }

    /// The wireless device, if this board bound one
    pub fn wireless(&self) -> Option<&W> {
        self.wireless.as_ref()
    }

    /// Mutable access to the wireless device
    pub fn wireless_mut(&mut self) -> Option<&mut W> {
        self.wireless.as_mut()
    }

    /// The network device, if this board bound one
    pub fn network(&self) -> Option<&N> {
        self.network.as_ref()
    }

    /// Mutable access to the network device
    pub fn network_mut(&mut self) -> Option<&mut N> {
        self.network.as_mut()
    }
}

impl<W: NetDeviceInterface, N: NetDeviceInterface> Default for DeviceRegistry<W, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockNetDevice;

    #[test]
    fn test_slots_start_unbound() {
        let registry: DeviceRegistry<MockNetDevice, MockNetDevice> = DeviceRegistry::new();
        assert!(!registry.is_bound(Slot::Wireless));
        assert!(!registry.is_bound(Slot::Network));
        assert!(registry.wireless().is_none());
        assert!(registry.network().is_none());
    }

    #[test]
    fn test_bind_populates_slot() {
        let mut registry = DeviceRegistry::new();
        registry.bind_wireless(MockNetDevice::new()).unwrap();
        assert!(registry.is_bound(Slot::Wireless));
        assert!(!registry.is_bound(Slot::Network));

        registry.bind_network(MockNetDevice::new()).unwrap();
        assert!(registry.is_bound(Slot::Network));
        assert!(registry.network().is_some());
    }

    #[test]
    fn test_rebind_rejected() {
        let mut registry = DeviceRegistry::new();
        registry.bind_wireless(MockNetDevice::new()).unwrap();
        assert_eq!(
            registry.bind_wireless(MockNetDevice::new()),
            Err(SlotError::AlreadyBound(Slot::Wireless))
        );

        registry.bind_network(MockNetDevice::new()).unwrap();
        assert_eq!(
            registry.bind_network(MockNetDevice::new()),
            Err(SlotError::AlreadyBound(Slot::Network))
        );
    }

    #[test]
    fn test_bound_device_usable() {
        use crate::platform::NetDeviceInterface;

        let mut registry: DeviceRegistry<MockNetDevice, MockNetDevice> = DeviceRegistry::new();
        registry.bind_network(MockNetDevice::new()).unwrap();

        let dev = registry.network_mut().unwrap();
        dev.send_frame(b"ping").unwrap();
        let mut buf = [0u8; 16];
        assert_eq!(dev.receive_frame(&mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], b"ping");
    }
}
