#![cfg_attr(not(any(test, feature = "mock")), no_std)]

//! rp2-bringup - Board bring-up and resource provisioning for RP2-family boards
//!
//! This library provides the one-shot boot sequence that turns a board
//! descriptor into usable system resources: a mounted root filesystem over
//! the flash region left after the reserved storage and program partitions,
//! and bound wireless/network device capability slots on boards that have
//! networking hardware.
//!
//! The filesystem implementation, the radio driver, and the runtime that
//! executes afterwards are external collaborators behind traits; this crate
//! only selects, parameterizes, and sequences them.

// Platform abstraction layer (traits, errors, mock and hardware backends)
pub mod platform;

// Board descriptors and build-time board selection
pub mod board;

// Flash partition planning and the block device view over flash
pub mod storage;

// Filesystem driver registry and mount orchestration
pub mod vfs;

// Device capability registry and radio power sequencing
pub mod devices;

// The bring-up orchestrator
pub mod bringup;

// Logging macros (defmt on target, println in host tests)
pub mod logging;
