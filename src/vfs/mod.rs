//! Filesystem provisioning
//!
//! The filesystem implementation is an external collaborator behind
//! [`VfsDriver`]; this module only owns the registration-then-mount
//! contract: a driver kind must be registered before anything can be
//! mounted with it, and a failed mount is fatal to bring-up.

use core::fmt;

use crate::platform::error::PlatformError;
use crate::storage::BlockDevice;

/// Mount point for the root filesystem
pub const ROOT_MOUNT_POINT: &str = "/";

/// Registry capacity; one driver kind per filesystem family
const MAX_DRIVERS: usize = 2;

/// Filesystem driver kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum DriverKind {
    /// Log-structured flash filesystem
    LittleFs,
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverKind::LittleFs => write!(f, "lfs"),
        }
    }
}

/// Errors surfaced by a driver's mount attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum MountError {
    /// Device holds no filesystem and formatting was not requested
    NoFilesystem,
    /// Device holds data that is not a valid filesystem image
    Corrupted,
    /// Block device I/O failed
    Io(PlatformError),
}

/// Filesystem provisioning errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum VfsError {
    /// Mount requested for a kind nobody registered - missing build-time
    /// wiring
    DriverNotRegistered(DriverKind),
    /// Registry cannot hold another driver
    RegistryFull,
    /// Driver failed to mount
    Mount(MountError),
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsError::DriverNotRegistered(kind) => {
                write!(f, "no driver registered for '{}'", kind)
            }
            VfsError::RegistryFull => write!(f, "driver registry full"),
            VfsError::Mount(MountError::NoFilesystem) => {
                write!(f, "mount failed: no filesystem on device")
            }
            VfsError::Mount(MountError::Corrupted) => {
                write!(f, "mount failed: filesystem image corrupted")
            }
            VfsError::Mount(MountError::Io(e)) => write!(f, "mount failed: {}", e),
        }
    }
}

impl From<MountError> for VfsError {
    fn from(e: MountError) -> Self {
        VfsError::Mount(e)
    }
}

/// Filesystem driver collaborator interface
///
/// `mount` must handle both a device already carrying a valid image
/// (attach, preserving contents) and blank media, which it formats first
/// when `format_if_missing` is set.
pub trait VfsDriver {
    /// Attach to (or create) a filesystem on `device`
    ///
    /// # Errors
    ///
    /// - [`MountError::NoFilesystem`] - blank device, formatting not
    ///   requested
    /// - [`MountError::Corrupted`] - device content is not a filesystem
    /// - [`MountError::Io`] - block device failure
    fn mount(&self, device: &mut dyn BlockDevice, format_if_missing: bool)
        -> Result<(), MountError>;
}

/// Record of a successful root mount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilesystemMount {
    mount_point: &'static str,
    kind: DriverKind,
}

impl FilesystemMount {
    /// Path the filesystem is mounted at
    pub fn mount_point(&self) -> &'static str {
        self.mount_point
    }

    /// Driver kind backing the mount
    pub fn kind(&self) -> DriverKind {
        self.kind
    }
}

/// Driver kind registry and mount entry point
pub struct VfsRegistry<'d> {
    drivers: heapless::Vec<(DriverKind, &'d dyn VfsDriver), MAX_DRIVERS>,
}

impl<'d> VfsRegistry<'d> {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            drivers: heapless::Vec::new(),
        }
    }

    /// Register `driver` for `kind`, replacing any earlier registration
    ///
    /// # Errors
    ///
    /// Returns [`VfsError::RegistryFull`] when the fixed-capacity table
    /// cannot hold another kind.
    pub fn register(&mut self, kind: DriverKind, driver: &'d dyn VfsDriver) -> Result<(), VfsError> {
        if let Some(entry) = self.drivers.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = driver;
            return Ok(());
        }
        self.drivers
            .push((kind, driver))
            .map_err(|_| VfsError::RegistryFull)
    }

    /// Whether a driver is registered for `kind`
    pub fn is_registered(&self, kind: DriverKind) -> bool {
        self.drivers.iter().any(|(k, _)| *k == kind)
    }

    /// Mount `kind` on `device` at `mount_point`
    ///
    /// Called once per boot by the orchestrator. With
    /// `format_if_missing = true`, blank media is formatted before the
    /// attach; media with a prior valid image is attached as-is, contents
    /// preserved.
    ///
    /// # Errors
    ///
    /// [`VfsError::DriverNotRegistered`] when `kind` was never registered,
    /// otherwise whatever the driver's mount reports, wrapped in
    /// [`VfsError::Mount`].
    pub fn mount(
        &mut self,
        mount_point: &'static str,
        device: &mut dyn BlockDevice,
        kind: DriverKind,
        format_if_missing: bool,
    ) -> Result<FilesystemMount, VfsError> {
        let driver = self
            .drivers
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, d)| *d)
            .ok_or(VfsError::DriverNotRegistered(kind))?;

        driver.mount(device, format_if_missing)?;

        Ok(FilesystemMount { mount_point, kind })
    }
}

impl<'d> Default for VfsRegistry<'d> {
    fn default() -> Self {
        Self::new()
    }
}
