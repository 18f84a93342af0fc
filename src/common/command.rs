//! SCD30 command definitions.
//!
//! See the Sensirion "Interface Description SCD30", section 1.4 "Command set".

use arrayvec::ArrayVec;
use core::ops::RangeInclusive;

use super::{crc::calculate_crc8, word::encode_word};

/// Longest frame the driver ever writes: opcode + argument word + CRC.
pub const MAX_FRAME_LEN: usize = 5;

/// Bytes written for one command transaction.
pub type Frame = ArrayVec<u8, MAX_FRAME_LEN>;

/// SCD30 command opcodes.
///
/// Several opcodes are shared between a "get" (bare command, then a reply
/// read) and a "set" (command with a checksummed argument word).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Command {
    /// Start continuous measurement. Argument: ambient pressure in mbar, 0 to disable compensation.
    StartContinuousMeasurement = 0x0010,
    /// Stop continuous measurement.
    StopContinuousMeasurement = 0x0104,
    /// Get / set the measurement interval in seconds.
    MeasurementInterval = 0x4600,
    /// Get data-ready status.
    GetDataReady = 0x0202,
    /// Read the latest CO2, temperature and humidity values.
    ReadMeasurement = 0x0300,
    /// Get / set automatic self-calibration (0 = off, 1 = on).
    AutomaticSelfCalibration = 0x5306,
    /// Get / set the forced recalibration reference in ppm.
    ForcedRecalibration = 0x5204,
    /// Get / set the temperature offset in units of 0.01 °C.
    TemperatureOffset = 0x5403,
    /// Get / set the altitude compensation in metres above sea level.
    AltitudeCompensation = 0x5102,
    /// Read firmware version.
    ReadFirmwareVersion = 0xD100,
    /// Soft reset.
    SoftReset = 0xD304,
}

impl Command {
    /// The 16-bit opcode sent on the wire.
    #[inline]
    pub const fn opcode(self) -> u16 {
        self as u16
    }

    /// Frame for a bare command: `[op_hi, op_lo]`.
    pub fn frame(self) -> Frame {
        let mut frame = Frame::new();
        frame.extend(encode_word(self.opcode()));
        frame
    }

    /// Frame for a command carrying one argument word:
    /// `[op_hi, op_lo, arg_hi, arg_lo, crc(arg_hi, arg_lo)]`.
    ///
    /// The checksum covers the argument only, never the opcode.
    pub fn frame_with_arg(self, arg: u16) -> Frame {
        let mut frame = self.frame();
        let arg_bytes = encode_word(arg);
        frame.extend(arg_bytes);
        frame.push(calculate_crc8(&arg_bytes));
        frame
    }
}

// --- Argument ranges from the datasheet ---

/// Continuous measurement interval, seconds.
pub const MEASUREMENT_INTERVAL_RANGE: RangeInclusive<u16> = 2..=1800;

/// Ambient pressure for compensation, mbar. 0 disables compensation and is
/// accepted separately.
pub const AMBIENT_PRESSURE_RANGE: RangeInclusive<u16> = 700..=1400;

/// Forced recalibration reference, ppm.
pub const FORCED_RECALIBRATION_RANGE: RangeInclusive<u16> = 400..=2000;
