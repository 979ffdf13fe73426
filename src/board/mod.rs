//! Board descriptors
//!
//! Each supported hardware variant is a data-only [`BoardDescriptor`]
//! constant consumed by the one generic orchestrator in
//! [`crate::bringup`]; there is no per-board code. Exactly one board is
//! selected per build through a cargo feature, mirroring the one firmware
//! image flashed onto one board.

use crate::storage::FlashLayout;

/// How a board provides wireless networking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub enum WirelessKind {
    /// No networking hardware
    None,
    /// Built-in silicon, powered as part of the platform itself
    OnBoard,
    /// Discrete radio module gated by a power/reset pin
    ExternalModule {
        /// GPIO controlling the module's power rail
        power_pin: u8,
        /// Pin level that takes the module out of reset
        power_on_high: bool,
    },
}

impl WirelessKind {
    /// Whether the board has any radio hardware
    pub const fn has_radio(&self) -> bool {
        !matches!(self, WirelessKind::None)
    }
}

/// Static identity of a hardware variant
///
/// Immutable after boot; the orchestrator treats the selected descriptor as
/// the single source of truth for provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2350", derive(defmt::Format))]
pub struct BoardDescriptor {
    /// Board name, unique per build
    pub name: &'static str,
    /// On-board LED pin, if wired to a plain GPIO
    pub led_pin: Option<u8>,
    /// Networking hardware on this variant
    pub wireless: WirelessKind,
    /// Flash layout for this variant's chip
    pub flash: FlashLayout,
}

/// Raspberry Pi Pico W: 2 MiB flash, CYW43439 on board
pub const PICO_W: BoardDescriptor = BoardDescriptor {
    name: "pico-w",
    led_pin: None, // LED hangs off the wireless chip, not bank 0
    wireless: WirelessKind::OnBoard,
    flash: FlashLayout::with_total(260),
};

/// Pimoroni Pico Plus 2: 16 MiB flash, no radio
pub const PIMORONI_PICO_PLUS2: BoardDescriptor = BoardDescriptor {
    name: "pimoroni_pico_plus2_rp2350",
    led_pin: Some(25),
    wireless: WirelessKind::None,
    flash: FlashLayout::with_total(3757),
};

/// Pimoroni Pico Plus 2 W: 16 MiB flash, radio module behind GPIO 0
pub const PIMORONI_PICO_PLUS2W: BoardDescriptor = BoardDescriptor {
    name: "pimoroni_pico_plus2w_rp2350",
    led_pin: None,
    wireless: WirelessKind::ExternalModule {
        power_pin: 0,
        power_on_high: true,
    },
    flash: FlashLayout::with_total(3757),
};

#[cfg(all(feature = "pico_w", feature = "pimoroni_pico_plus2"))]
compile_error!("select exactly one board feature");
#[cfg(all(feature = "pico_w", feature = "pimoroni_pico_plus2w"))]
compile_error!("select exactly one board feature");
#[cfg(all(feature = "pimoroni_pico_plus2", feature = "pimoroni_pico_plus2w"))]
compile_error!("select exactly one board feature");

/// The board this firmware was built for
#[cfg(feature = "pico_w")]
pub const fn active() -> &'static BoardDescriptor {
    &PICO_W
}

/// The board this firmware was built for
#[cfg(feature = "pimoroni_pico_plus2")]
pub const fn active() -> &'static BoardDescriptor {
    &PIMORONI_PICO_PLUS2
}

/// The board this firmware was built for
#[cfg(feature = "pimoroni_pico_plus2w")]
pub const fn active() -> &'static BoardDescriptor {
    &PIMORONI_PICO_PLUS2W
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_names_unique() {
        let names = [
            PICO_W.name,
            PIMORONI_PICO_PLUS2.name,
            PIMORONI_PICO_PLUS2W.name,
        ];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_radio_presence() {
        assert!(PICO_W.wireless.has_radio());
        assert!(!PIMORONI_PICO_PLUS2.wireless.has_radio());
        assert!(PIMORONI_PICO_PLUS2W.wireless.has_radio());
    }

    #[test]
    fn test_all_boards_fit_a_filesystem() {
        for board in [&PICO_W, &PIMORONI_PICO_PLUS2, &PIMORONI_PICO_PLUS2W] {
            let p = board.flash.filesystem_partition().unwrap();
            assert_eq!(p.start_block, 132);
            assert!(p.length_blocks > 0);
        }
    }

    #[test]
    fn test_external_module_pin() {
        match PIMORONI_PICO_PLUS2W.wireless {
            WirelessKind::ExternalModule {
                power_pin,
                power_on_high,
            } => {
                assert_eq!(power_pin, 0);
                assert!(power_on_high);
            }
            _ => panic!("expected an external radio module"),
        }
    }
}
