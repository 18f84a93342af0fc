// src/device/mod.rs

mod protocol_helpers;
mod transaction;

pub use protocol_helpers::MEASUREMENT_REPLY_LEN;

use crate::common::{
    command::{Command, AMBIENT_PRESSURE_RANGE},
    error::Scd30Error,
    hal_traits::BusLock,
    types::{FirmwareVersion, Measurement},
};
use embedded_hal::{
    delay::DelayNs,
    i2c::{ErrorType, I2c},
};
use transaction::Exchange;

/// Fixed 7-bit I2C address of the SCD30.
pub const SCD30_ADDRESS: u8 = 0x61;

/// Result of a session operation over bus handle `B`.
pub type Scd30Result<T, B> = Result<T, Scd30Error<<<B as BusLock>::Bus as ErrorType>::Error>>;

/// A session with one SCD30 on a shared I2C bus.
///
/// `bus` is any [`BusLock`] around the I2C peripheral: a `&Mutex<I2C>`, an
/// `Arc<Mutex<I2C>>`, or a `&critical_section::Mutex<RefCell<I2C>>`. Every
/// operation holds that lock from its first write to its last read, so
/// sessions built over the same lock never interleave on the wire.
///
/// Operations block for their whole duration (each command is followed by a
/// 4 ms settle delay) and never retry. Errors are returned as they occur.
#[derive(Debug)]
pub struct Scd30<B, D> {
    bus: B,
    delay: D,
    address: u8,
}

impl<B, D> Scd30<B, D>
where
    B: BusLock,
    B::Bus: I2c,
    D: DelayNs,
{
    /// Binds a session to the sensor at [`SCD30_ADDRESS`]. No bus traffic.
    pub fn new(bus: B, delay: D) -> Self {
        Scd30 { bus, delay, address: SCD30_ADDRESS }
    }

    /// I2C address this session talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives back the bus handle and delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    // --- Measurement control ---

    /// Sets the measurement interval, then starts continuous measurement
    /// without pressure compensation. The interval is sent as given; see
    /// [`crate::common::command::MEASUREMENT_INTERVAL_RANGE`] for what the sensor accepts.
    ///
    /// Two separate commands. If the second one fails the interval stays
    /// set but the sensor is not measuring; call again to start it.
    pub fn start_measurements(&mut self, interval_secs: u16) -> Scd30Result<(), B> {
        self.start(interval_secs, 0)
    }

    /// Like [`Self::start_measurements`] but compensates CO2 readings for
    /// ambient pressure in mbar. 0 disables compensation; any other value
    /// outside [`AMBIENT_PRESSURE_RANGE`] is rejected before the bus is touched.
    pub fn start_measurements_with_pressure(
        &mut self,
        interval_secs: u16,
        pressure_mbar: u16,
    ) -> Scd30Result<(), B> {
        if pressure_mbar != 0 && !AMBIENT_PRESSURE_RANGE.contains(&pressure_mbar) {
            return Err(Scd30Error::InvalidArgument);
        }
        self.start(interval_secs, pressure_mbar)
    }

    pub fn stop_measurements(&mut self) -> Scd30Result<(), B> {
        self.exchange(|x| x.send_command(Command::StopContinuousMeasurement))
    }

    /// Measurement interval currently configured, in seconds.
    pub fn get_measurement_interval(&mut self) -> Scd30Result<u16, B> {
        self.exchange(|x| x.read_word_reply(Command::MeasurementInterval))
    }

    /// True if a new measurement can be read with [`Self::get_measurement`].
    pub fn has_measurement(&mut self) -> Scd30Result<bool, B> {
        self.exchange(|x| x.read_ready_flag())
    }

    /// Reads the latest measurement. Check [`Self::has_measurement`] first.
    pub fn get_measurement(&mut self) -> Scd30Result<Measurement, B> {
        self.exchange(|x| x.read_measurement_reply())
    }

    // --- Calibration and compensation ---

    /// Temperature offset in units of 0.01 °C.
    pub fn get_temperature_offset(&mut self) -> Scd30Result<u16, B> {
        self.exchange(|x| x.read_word_reply(Command::TemperatureOffset))
    }

    /// Sets the temperature offset, in units of 0.01 °C, that compensates self-heating.
    pub fn set_temperature_offset(&mut self, offset: u16) -> Scd30Result<(), B> {
        self.exchange(|x| x.send_command_with_arg(Command::TemperatureOffset, offset))
    }

    /// 1 enables automatic self-calibration, 0 disables it. Sent as given.
    pub fn set_automatic_self_calibration(&mut self, enable: u16) -> Scd30Result<(), B> {
        self.exchange(|x| x.send_command_with_arg(Command::AutomaticSelfCalibration, enable))
    }

    pub fn get_automatic_self_calibration(&mut self) -> Scd30Result<bool, B> {
        self.exchange(|x| x.read_word_reply(Command::AutomaticSelfCalibration))
            .map(|word| word == 1)
    }

    /// Forces recalibration against a known CO2 concentration in ppm.
    ///
    /// The datasheet range is [`crate::common::command::FORCED_RECALIBRATION_RANGE`];
    /// values outside it are sent as given.
    pub fn set_forced_calibration(&mut self, ppm: u16) -> Scd30Result<(), B> {
        self.exchange(|x| x.send_command_with_arg(Command::ForcedRecalibration, ppm))
    }

    /// Reference value last used for forced recalibration, ppm.
    pub fn get_forced_calibration(&mut self) -> Scd30Result<u16, B> {
        self.exchange(|x| x.read_word_reply(Command::ForcedRecalibration))
    }

    /// Altitude above sea level in metres. Ignored by the sensor while
    /// pressure compensation is active.
    pub fn set_altitude_compensation(&mut self, metres: u16) -> Scd30Result<(), B> {
        self.exchange(|x| x.send_command_with_arg(Command::AltitudeCompensation, metres))
    }

    pub fn get_altitude_compensation(&mut self) -> Scd30Result<u16, B> {
        self.exchange(|x| x.read_word_reply(Command::AltitudeCompensation))
    }

    // --- Device ---

    pub fn read_firmware_version(&mut self) -> Scd30Result<FirmwareVersion, B> {
        self.exchange(|x| x.read_word_reply(Command::ReadFirmwareVersion))
            .map(FirmwareVersion::from)
    }

    /// Restarts the sensor. Settings stored in its non-volatile memory survive.
    pub fn soft_reset(&mut self) -> Scd30Result<(), B> {
        self.exchange(|x| x.send_command(Command::SoftReset))
    }

    // --- Core Exchange Logic (Private Helpers) ---

    fn start(&mut self, interval_secs: u16, pressure_mbar: u16) -> Scd30Result<(), B> {
        debug!("scd30 start: interval={}s pressure={}mbar", interval_secs, pressure_mbar);
        self.exchange(|x| {
            x.send_command_with_arg(Command::MeasurementInterval, interval_secs)?;
            x.send_command_with_arg(Command::StartContinuousMeasurement, pressure_mbar)
        })
    }

    fn exchange<R>(
        &mut self,
        f: impl FnOnce(&mut Exchange<'_, B::Bus, D>) -> Scd30Result<R, B>,
    ) -> Scd30Result<R, B> {
        let Scd30 { bus, delay, address } = self;
        let address = *address;
        bus.lock(|i2c| f(&mut Exchange::new(i2c, delay, address)))
    }
}
