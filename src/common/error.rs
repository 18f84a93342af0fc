// src/common/error.rs

/// Errors returned by the SCD30 driver.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scd30Error<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I2C bus error, passed through untouched.
    #[error("I2C error: {0:?}")]
    I2c(E),

    /// Received checksum does not match the one recomputed over the data word.
    #[error("CRC mismatch: expected {expected:#04x}, got {actual:#04x}")]
    CrcMismatch { expected: u8, actual: u8 },

    /// Reply buffer ended before a complete word frame could be read.
    #[error("Truncated reply: needed {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    /// Ambient pressure outside the compensation range. Nothing was sent.
    #[error("Argument out of range for this command")]
    InvalidArgument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let crc: Scd30Error<()> = Scd30Error::CrcMismatch { expected: 0xA0, actual: 0x20 };
        assert_eq!(crc.to_string(), "CRC mismatch: expected 0xa0, got 0x20");

        let short: Scd30Error<()> = Scd30Error::Truncated { needed: 3, got: 1 };
        assert_eq!(short.to_string(), "Truncated reply: needed 3 bytes, got 1");

        let io: Scd30Error<&str> = Scd30Error::I2c("nack");
        assert_eq!(io.to_string(), "I2C error: \"nack\"");
    }
}
