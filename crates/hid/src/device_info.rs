//! Description of an attached gamepad.

use serde::{Deserialize, Serialize};

use crate::ids::{GamepadBusType, GamepadId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub product_name: Option<String>,
    /// Platform device path; the key the observer tracks devices by.
    pub path: String,
    pub bus_type: GamepadBusType,
}

impl GamepadInfo {
    pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            serial_number: None,
            manufacturer: None,
            product_name: None,
            path: path.into(),
            bus_type: GamepadBusType::Unknown,
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn with_bus_type(mut self, bus_type: GamepadBusType) -> Self {
        self.bus_type = bus_type;
        self
    }

    pub fn gamepad_id(&self) -> GamepadId {
        GamepadId::from_vid_pid(self.vendor_id, self.product_id)
    }

    /// Name reported by the device, falling back to the built-in product
    /// name and finally to `vvvv:pppp`.
    pub fn display_name(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.gamepad_id().product_name().map(str::to_string))
            .unwrap_or_else(|| format!("{:04x}:{:04x}", self.vendor_id, self.product_id))
    }
}

#[cfg(feature = "hidapi")]
impl From<&hidapi::DeviceInfo> for GamepadInfo {
    fn from(info: &hidapi::DeviceInfo) -> Self {
        Self {
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            serial_number: info.serial_number().map(str::to_string),
            manufacturer: info.manufacturer_string().map(str::to_string),
            product_name: info.product_string().map(str::to_string),
            path: info.path().to_string_lossy().into_owned(),
            bus_type: info.bus_type().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamepad_info_creation() {
        let info = GamepadInfo::new(0x054C, 0x05C4, "/dev/hidraw0");
        assert_eq!(info.vendor_id, 0x054C);
        assert_eq!(info.product_id, 0x05C4);
        assert_eq!(info.gamepad_id(), GamepadId::SonyProduct05c4);
        assert_eq!(info.bus_type, GamepadBusType::Unknown);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let info = GamepadInfo::new(0x054C, 0x0CE6, "/dev/hidraw0")
            .with_product_name("Wireless Controller");
        assert_eq!(info.display_name(), "Wireless Controller");

        let info = GamepadInfo::new(0x054C, 0x0CE6, "/dev/hidraw0");
        assert_eq!(info.display_name(), "Sony DualSense");

        let info = GamepadInfo::new(0x1234, 0x5678, "/dev/hidraw0");
        assert_eq!(info.display_name(), "1234:5678");
    }

    #[test]
    fn test_builder_fields() {
        let info = GamepadInfo::new(0x2E95, 0x7725, "usb-1")
            .with_serial("SN1")
            .with_manufacturer("SCUF")
            .with_bus_type(GamepadBusType::Bluetooth);
        assert_eq!(info.serial_number.as_deref(), Some("SN1"));
        assert_eq!(info.manufacturer.as_deref(), Some("SCUF"));
        assert_eq!(info.bus_type, GamepadBusType::Bluetooth);
    }
}
