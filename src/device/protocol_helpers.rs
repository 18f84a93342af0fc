// src/device/protocol_helpers.rs

use super::transaction::Exchange;
use crate::common::{
    command::Command,
    crc::verify_word_crc,
    error::Scd30Error,
    types::Measurement,
    word::{WordCursor, WORD_FRAME_LEN},
};
use embedded_hal::{delay::DelayNs, i2c::I2c};

/// Reply length of `ReadMeasurement`: three floats, two framed words each.
pub const MEASUREMENT_REPLY_LEN: usize = 3 * 2 * WORD_FRAME_LEN;

impl<I2C, D> Exchange<'_, I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Bare `command`, then one checksum-validated word.
    pub(super) fn read_word_reply(&mut self, command: Command) -> Result<u16, Scd30Error<I2C::Error>> {
        self.send_command(command)?;
        let reply: [u8; WORD_FRAME_LEN] = self.read_reply()?;
        WordCursor::new(&reply).read_word()
    }

    /// Data-ready status. The first byte is reserved; ready iff the second is 1.
    pub(super) fn read_ready_flag(&mut self) -> Result<bool, Scd30Error<I2C::Error>> {
        self.send_command(Command::GetDataReady)?;
        let [reserved, flag, crc]: [u8; WORD_FRAME_LEN] = self.read_reply()?;
        verify_word_crc::<I2C::Error>([reserved, flag], crc)?;
        Ok(flag == 1)
    }

    /// Reads and decodes CO2, temperature and humidity, in that order.
    /// Any bad word discards the whole reading.
    pub(super) fn read_measurement_reply(&mut self) -> Result<Measurement, Scd30Error<I2C::Error>> {
        self.send_command(Command::ReadMeasurement)?;
        let reply: [u8; MEASUREMENT_REPLY_LEN] = self.read_reply()?;

        let mut cursor = WordCursor::new(&reply);
        let co2 = cursor.read_f32::<I2C::Error>()?;
        let temperature = cursor.read_f32::<I2C::Error>()?;
        let humidity = cursor.read_f32::<I2C::Error>()?;

        debug!("scd30 measurement: co2={} t={} rh={}", co2, temperature, humidity);
        Ok(Measurement { co2, temperature, humidity })
    }
}
