//! Platform error types
//!
//! Platform implementations map their HAL-specific failures onto these
//! variants so the rest of the crate stays backend-agnostic.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum PlatformError {
    /// GPIO operation failed
    Gpio(GpioError),
    /// Flash operation failed
    Flash(FlashError),
    /// Network device operation failed
    Net(NetError),
    /// Platform initialization failed
    InitializationFailed,
    /// Resource not available (already taken or not present on this board)
    ResourceUnavailable,
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum GpioError {
    /// Pin number outside the platform's valid range
    InvalidPin,
    /// Operation not valid for the pin's current mode
    InvalidMode,
    /// Pin already allocated
    PinInUse,
    /// Underlying HAL reported a failure
    HardwareError,
}

/// Flash-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum FlashError {
    /// Address or length outside the device, or not erase-aligned
    InvalidAddress,
    /// Program operation failed
    WriteFailed,
    /// Erase operation failed
    EraseFailed,
}

/// Network device errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum NetError {
    /// Frame exceeds the device MTU
    FrameTooLarge,
    /// No transmit buffer available
    Busy,
    /// Receive buffer too small for the pending frame
    BufferTooSmall,
}

impl From<GpioError> for PlatformError {
    fn from(e: GpioError) -> Self {
        PlatformError::Gpio(e)
    }
}

impl From<FlashError> for PlatformError {
    fn from(e: FlashError) -> Self {
        PlatformError::Flash(e)
    }
}

impl From<NetError> for PlatformError {
    fn from(e: NetError) -> Self {
        PlatformError::Net(e)
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::Flash(e) => write!(f, "flash error: {:?}", e),
            PlatformError::Net(e) => write!(f, "network device error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "platform initialization failed"),
            PlatformError::ResourceUnavailable => write!(f, "resource not available"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let e: PlatformError = GpioError::InvalidPin.into();
        assert_eq!(e, PlatformError::Gpio(GpioError::InvalidPin));

        let e: PlatformError = FlashError::InvalidAddress.into();
        assert_eq!(e, PlatformError::Flash(FlashError::InvalidAddress));

        let e: PlatformError = NetError::Busy.into();
        assert_eq!(e, PlatformError::Net(NetError::Busy));
    }

    #[test]
    fn test_error_display() {
        let e = PlatformError::Gpio(GpioError::InvalidPin);
        assert_eq!(format!("{}", e), "GPIO error: InvalidPin");
        assert_eq!(
            format!("{}", PlatformError::ResourceUnavailable),
            "resource not available"
        );
    }
}
