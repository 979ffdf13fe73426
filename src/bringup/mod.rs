//! Board bring-up orchestrator
//!
//! Runs the fixed provisioning sequence exactly once per boot, for the one
//! board descriptor this firmware was built for:
//!
//! 1. board identity
//! 2. radio power sequence (boards with a discrete module only)
//! 3. wireless/network capability binding (boards with networking)
//! 4. filesystem partition planning
//! 5. driver registration and root mount (`format_if_missing = true`)
//!
//! Bring-up is single-threaded and runs to completion before anything else;
//! any failure past identity setup is fatal. Without a root filesystem no
//! later code can load configuration or persisted state, so there is no
//! degraded mode - the process simply does not reach an operable state.

use core::fmt;

use crate::board::{BoardDescriptor, WirelessKind};
use crate::devices::{DeviceRegistry, RadioPower, SlotError};
use crate::platform::{Platform, PlatformError};
use crate::storage::{FlashPartition, PartitionError};
use crate::vfs::{DriverKind, FilesystemMount, VfsDriver, VfsError, VfsRegistry, ROOT_MOUNT_POINT};
use crate::{log_error, log_info};

/// Fatal bring-up errors
///
/// All variants end the boot: partition and slot errors are build-time
/// configuration mismatches, the rest are hardware or media failures with
/// no recovery path this early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum BringupError {
    /// Inconsistent flash layout in the board descriptor
    Partition(PartitionError),
    /// Capability slot wiring bug
    Slot(SlotError),
    /// Peripheral allocation or I/O failure
    Platform(PlatformError),
    /// Filesystem registration or mount failure
    Vfs(VfsError),
}

impl fmt::Display for BringupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BringupError::Partition(e) => write!(f, "bring-up failed: {}", e),
            BringupError::Slot(e) => write!(f, "bring-up failed: {}", e),
            BringupError::Platform(e) => write!(f, "bring-up failed: {}", e),
            BringupError::Vfs(e) => write!(f, "bring-up failed: {}", e),
        }
    }
}

impl From<PartitionError> for BringupError {
    fn from(e: PartitionError) -> Self {
        BringupError::Partition(e)
    }
}

impl From<SlotError> for BringupError {
    fn from(e: SlotError) -> Self {
        BringupError::Slot(e)
    }
}

impl From<PlatformError> for BringupError {
    fn from(e: PlatformError) -> Self {
        BringupError::Platform(e)
    }
}

impl From<VfsError> for BringupError {
    fn from(e: VfsError) -> Self {
        BringupError::Vfs(e)
    }
}

/// Provisioned board resources
///
/// The sealed result of a successful bring-up: by the time this exists,
/// the capability slots of a networked board are bound, the radio (if any)
/// is powered, and the root filesystem is mounted. Later subsystems take
/// this context instead of reaching for globals; it exposes no path to
/// populate a slot the orchestrator left unbound.
#[derive(Debug)]
pub struct BoardContext<P: Platform> {
    board: &'static BoardDescriptor,
    devices: DeviceRegistry<P::Wireless, P::Network>,
    radio: Option<RadioPower<P::Gpio>>,
    storage: FlashPartition<P::Flash>,
    root: FilesystemMount,
}

impl<P: Platform> BoardContext<P> {
    /// The board this system runs on
    pub fn board(&self) -> &'static BoardDescriptor {
        self.board
    }

    /// The device capability slots
    pub fn devices(&self) -> &DeviceRegistry<P::Wireless, P::Network> {
        &self.devices
    }

    /// Mutable access to the bound wireless device, if any
    pub fn wireless_mut(&mut self) -> Option<&mut P::Wireless> {
        self.devices.wireless_mut()
    }

    /// Mutable access to the bound network device, if any
    pub fn network_mut(&mut self) -> Option<&mut P::Network> {
        self.devices.network_mut()
    }

    /// The radio power sequencer, on boards with a discrete module
    pub fn radio(&self) -> Option<&RadioPower<P::Gpio>> {
        self.radio.as_ref()
    }

    /// The block device backing the root filesystem
    pub fn storage(&self) -> &FlashPartition<P::Flash> {
        &self.storage
    }

    /// Mutable access to the root block device
    pub fn storage_mut(&mut self) -> &mut FlashPartition<P::Flash> {
        &mut self.storage
    }

    /// The root mount record
    pub fn root(&self) -> FilesystemMount {
        self.root
    }

    /// Tear the context apart, releasing the root block device
    ///
    /// Only meaningful on hosts simulating reboots; on hardware the context
    /// lives for the process lifetime.
    pub fn into_storage(self) -> FlashPartition<P::Flash> {
        self.storage
    }
}

/// Run the bring-up sequence for `board`
///
/// `fs_driver` is the filesystem driver collaborator to register for
/// [`DriverKind::LittleFs`] and mount at `/`.
///
/// # Errors
///
/// Any error is fatal to the boot; see [`BringupError`]. Steps 1-2 (board
/// identity, built-in device binding) do not fail under normal conditions;
/// an invalid radio pin, an inconsistent flash layout, or a mount failure
/// ends bring-up immediately.
pub fn run<P: Platform>(
    board: &'static BoardDescriptor,
    platform: &mut P,
    fs_driver: &dyn VfsDriver,
) -> Result<BoardContext<P>, BringupError> {
    log_info!("bring-up: {}", board.name);

    // Networking first: a consumer must never observe a bound handle to a
    // powered-down radio, so for discrete modules the power sequence runs
    // before either slot is populated.
    let mut devices = DeviceRegistry::new();
    let mut radio = None;
    match board.wireless {
        WirelessKind::None => {}
        WirelessKind::OnBoard => {
            devices.bind_wireless(platform.create_wireless()?)?;
            devices.bind_network(platform.create_network()?)?;
        }
        WirelessKind::ExternalModule {
            power_pin,
            power_on_high,
        } => {
            let pin = platform.create_gpio(power_pin)?;
            let mut power = RadioPower::new(pin, power_on_high);
            power.power_on()?;
            log_info!("radio module powered via GPIO {}", power_pin);

            devices.bind_wireless(platform.create_wireless()?)?;
            devices.bind_network(platform.create_network()?)?;
            radio = Some(power);
        }
    }

    // Storage: plan the partition left after the reserved regions and
    // mount the root filesystem over it, creating it on first boot.
    let partition = board.flash.filesystem_partition().map_err(|e| {
        log_error!("inconsistent flash layout on {}", board.name);
        e
    })?;
    let flash = platform.take_flash()?;
    let mut storage = FlashPartition::new(flash, partition)?;

    let mut vfs = VfsRegistry::new();
    vfs.register(DriverKind::LittleFs, fs_driver)?;
    let root = vfs.mount(ROOT_MOUNT_POINT, &mut storage, DriverKind::LittleFs, true)?;
    log_info!(
        "mounted lfs at / ({} blocks from block {})",
        partition.length_blocks,
        partition.start_block
    );

    Ok(BoardContext {
        board,
        devices,
        radio,
        storage,
        root,
    })
}
