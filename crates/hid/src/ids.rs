//! Recognised gamepad identifiers.
//!
//! A gamepad is identified by its USB vendor and product IDs packed into a
//! single `u32` as `(vendor_id << 16) | product_id`. Only the devices listed
//! in [`GamepadId`] are tracked by the observer; everything else maps to
//! [`GamepadId::UnknownGamepad`].

use serde::{Deserialize, Serialize};

/// Sony Interactive Entertainment USB vendor ID.
pub const SONY_VENDOR_ID: u16 = 0x054C;

/// SCUF Gaming USB vendor ID.
pub const SCUF_VENDOR_ID: u16 = 0x2E95;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadId {
    /// An unknown gamepad or a non-gamepad device.
    UnknownGamepad = 0,
    /// DualShock 3.
    SonyProduct0268 = 0x054c_0268,
    /// DualShock 4, first revision (CUH-ZCT1).
    SonyProduct05c4 = 0x054c_05c4,
    /// DualShock 4, second revision (CUH-ZCT2).
    SonyProduct09cc = 0x054c_09cc,
    /// DualShock 4 USB wireless adaptor.
    SonyProduct0ba0 = 0x054c_0ba0,
    /// DualSense.
    SonyProduct0ce6 = 0x054c_0ce6,
    /// SCUF Vantage.
    ScufProduct7725 = 0x2e95_7725,
}

impl GamepadId {
    /// Every recognised gamepad, excluding [`GamepadId::UnknownGamepad`].
    pub const KNOWN: [GamepadId; 6] = [
        GamepadId::SonyProduct0268,
        GamepadId::SonyProduct05c4,
        GamepadId::SonyProduct09cc,
        GamepadId::SonyProduct0ba0,
        GamepadId::SonyProduct0ce6,
        GamepadId::ScufProduct7725,
    ];

    pub const fn from_vid_pid(vendor_id: u16, product_id: u16) -> Self {
        match ((vendor_id as u32) << 16) | product_id as u32 {
            0x054c_0268 => Self::SonyProduct0268,
            0x054c_05c4 => Self::SonyProduct05c4,
            0x054c_09cc => Self::SonyProduct09cc,
            0x054c_0ba0 => Self::SonyProduct0ba0,
            0x054c_0ce6 => Self::SonyProduct0ce6,
            0x2e95_7725 => Self::ScufProduct7725,
            _ => Self::UnknownGamepad,
        }
    }

    pub const fn vendor_id(self) -> u16 {
        ((self as u32) >> 16) as u16
    }

    pub const fn product_id(self) -> u16 {
        (self as u32 & 0xFFFF) as u16
    }

    pub const fn is_known(self) -> bool {
        !matches!(self, Self::UnknownGamepad)
    }

    /// Human-readable product name, or `None` for unknown devices.
    pub const fn product_name(self) -> Option<&'static str> {
        match self {
            Self::UnknownGamepad => None,
            Self::SonyProduct0268 => Some("Sony DualShock 3"),
            Self::SonyProduct05c4 => Some("Sony DualShock 4"),
            Self::SonyProduct09cc => Some("Sony DualShock 4 (v2)"),
            Self::SonyProduct0ba0 => Some("Sony DualShock 4 USB Wireless Adaptor"),
            Self::SonyProduct0ce6 => Some("Sony DualSense"),
            Self::ScufProduct7725 => Some("SCUF Vantage"),
        }
    }
}

impl From<GamepadId> for u32 {
    fn from(id: GamepadId) -> Self {
        id as u32
    }
}

/// Transport the gamepad is attached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamepadBusType {
    #[default]
    Unknown,
    Usb,
    Bluetooth,
}

#[cfg(feature = "hidapi")]
impl From<hidapi::BusType> for GamepadBusType {
    fn from(bus: hidapi::BusType) -> Self {
        match bus {
            hidapi::BusType::Usb => Self::Usb,
            hidapi::BusType::Bluetooth => Self::Bluetooth,
            _ => Self::Unknown,
        }
    }
}
