//! Device provisioning
//!
//! [`registry`] holds the write-once wireless/network capability slots;
//! [`radio`] drives the power-on sequence for boards whose radio module
//! sits behind a control pin.

pub mod radio;
pub mod registry;

pub use radio::{PowerState, RadioPower};
pub use registry::{DeviceRegistry, Slot, SlotError};
