// src/device/transaction.rs

use crate::common::{
    command::Command,
    error::Scd30Error,
    timing::COMMAND_SETTLE_MS,
};
use embedded_hal::{delay::DelayNs, i2c::I2c};

/// One locked exchange with the sensor.
///
/// Only constructed by [`super::Scd30`] while it holds the bus lock, so
/// everything done through it is serialised against other sessions. Writes
/// and reads are always separate bus transactions.
pub(super) struct Exchange<'a, I2C, D> {
    i2c: &'a mut I2C,
    delay: &'a mut D,
    address: u8,
}

impl<'a, I2C, D> Exchange<'a, I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub(super) fn new(i2c: &'a mut I2C, delay: &'a mut D, address: u8) -> Self {
        Exchange { i2c, delay, address }
    }

    /// Writes a bare command `[op_hi, op_lo]` and waits for the sensor to settle.
    pub(super) fn send_command(&mut self, command: Command) -> Result<(), Scd30Error<I2C::Error>> {
        self.write_and_wait(&command.frame())
    }

    /// Writes `[op_hi, op_lo, arg_hi, arg_lo, crc]` and waits for the sensor to settle.
    pub(super) fn send_command_with_arg(
        &mut self,
        command: Command,
        arg: u16,
    ) -> Result<(), Scd30Error<I2C::Error>> {
        self.write_and_wait(&command.frame_with_arg(arg))
    }

    /// Read-only transaction of exactly `N` bytes. Contents are not interpreted.
    pub(super) fn read_reply<const N: usize>(&mut self) -> Result<[u8; N], Scd30Error<I2C::Error>> {
        let mut reply = [0u8; N];
        self.i2c
            .read(self.address, &mut reply)
            .map_err(Scd30Error::I2c)?;
        trace!("scd30 <- {:?}", &reply[..]);
        Ok(reply)
    }

    fn write_and_wait(&mut self, frame: &[u8]) -> Result<(), Scd30Error<I2C::Error>> {
        trace!("scd30 -> {:?}", frame);
        self.i2c
            .write(self.address, frame)
            .map_err(Scd30Error::I2c)?;

        self.delay.delay_ms(COMMAND_SETTLE_MS);
        Ok(())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SCD30_ADDRESS;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };

    /// Counts delay requests so tests can check the settle time.
    #[derive(Default)]
    struct CountingDelay {
        ms_calls: Vec<u32>,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, _ns: u32) {}
        fn delay_ms(&mut self, ms: u32) {
            self.ms_calls.push(ms);
        }
    }

    #[test]
    fn test_bare_command_writes_opcode_then_settles() {
        let mut i2c = I2cMock::new(&[I2cTransaction::write(SCD30_ADDRESS, vec![0x01, 0x04])]);
        let mut delay = CountingDelay::default();

        let mut exchange = Exchange::new(&mut i2c, &mut delay, SCD30_ADDRESS);
        exchange.send_command(Command::StopContinuousMeasurement).unwrap();

        assert_eq!(delay.ms_calls, [4]);
        i2c.done();
    }

    #[test]
    fn test_arg_command_writes_five_bytes() {
        let mut i2c = I2cMock::new(&[I2cTransaction::write(
            SCD30_ADDRESS,
            vec![0x54, 0x03, 0x01, 0x23, 0xA0],
        )]);
        let mut delay = CountingDelay::default();

        let mut exchange = Exchange::new(&mut i2c, &mut delay, SCD30_ADDRESS);
        exchange.send_command_with_arg(Command::TemperatureOffset, 0x0123).unwrap();

        assert_eq!(delay.ms_calls, [4]);
        i2c.done();
    }

    #[test]
    fn test_read_reply_returns_raw_bytes() {
        // Deliberately invalid CRC: read_reply must not look at it.
        let mut i2c = I2cMock::new(&[I2cTransaction::read(SCD30_ADDRESS, vec![0xDE, 0xAD, 0x00])]);
        let mut delay = NoopDelay::new();

        let mut exchange = Exchange::new(&mut i2c, &mut delay, SCD30_ADDRESS);
        let reply: [u8; 3] = exchange.read_reply().unwrap();

        assert_eq!(reply, [0xDE, 0xAD, 0x00]);
        i2c.done();
    }

    #[test]
    fn test_write_error_skips_settle_delay() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(SCD30_ADDRESS, vec![0x03, 0x00]).with_error(ErrorKind::Other),
        ]);
        let mut delay = CountingDelay::default();

        let mut exchange = Exchange::new(&mut i2c, &mut delay, SCD30_ADDRESS);
        let result = exchange.send_command(Command::ReadMeasurement);

        assert_eq!(result, Err(Scd30Error::I2c(ErrorKind::Other)));
        assert!(delay.ms_calls.is_empty());
        i2c.done();
    }

    #[test]
    fn test_read_error_is_passed_through() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::read(SCD30_ADDRESS, vec![0, 0, 0]).with_error(ErrorKind::Bus),
        ]);
        let mut delay = NoopDelay::new();

        let mut exchange = Exchange::new(&mut i2c, &mut delay, SCD30_ADDRESS);
        let result = exchange.read_reply::<3>();

        assert_eq!(result, Err(Scd30Error::I2c(ErrorKind::Bus)));
        i2c.done();
    }
}
