// src/common/types.rs

/// One reading from the sensor, decoded from the 18-byte measurement reply.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// CO2 concentration, ppm.
    pub co2: f32,
    /// Temperature, °C.
    pub temperature: f32,
    /// Relative humidity, %.
    pub humidity: f32,
}

/// Firmware version as reported by `ReadFirmwareVersion`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl From<u16> for FirmwareVersion {
    fn from(word: u16) -> Self {
        let [major, minor] = word.to_be_bytes();
        FirmwareVersion { major, minor }
    }
}

impl core::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firmware_version_from_word() {
        let v = FirmwareVersion::from(0x0342);
        assert_eq!(v, FirmwareVersion { major: 3, minor: 0x42 });
        assert_eq!(FirmwareVersion::from(0x0302).to_string(), "3.2");
    }
}
