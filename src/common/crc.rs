// src/common/crc.rs

use super::error::Scd30Error;
use crc::{Algorithm, Crc};

/// CRC-8 used by Sensirion sensors to protect every 16-bit data word.
/// Polynomial: 0x31 (x^8 + x^5 + x^4 + 1)
/// Initial Value: 0xFF
/// Input Reflected: false
/// Output Reflected: false
/// Final XOR: 0x00
/// Check Value: 0xF7 (for "123456789")
///
/// This is the same parameter set the `crc` catalogue lists as CRC-8/NRSC-5.
pub const SENSIRION_CRC8: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

// Lookup table is built at compile time; no runtime initialisation.
const CRC_COMPUTER: Crc<u8> = Crc::<u8>::new(&SENSIRION_CRC8);

/// Calculates the Sensirion CRC-8 over `data`.
///
/// On the wire the checksum always covers exactly one big-endian 16-bit word,
/// but the function accepts any length.
#[inline]
pub fn calculate_crc8(data: &[u8]) -> u8 {
    CRC_COMPUTER.checksum(data)
}

/// Verifies the checksum byte that followed a 2-byte data word.
///
/// # Returns
///
/// * `Ok(())` if the CRC is valid.
/// * `Err(Scd30Error::CrcMismatch)` carrying the recomputed (`expected`) and
///   received (`actual`) values otherwise.
pub fn verify_word_crc<E>(word: [u8; 2], received: u8) -> Result<(), Scd30Error<E>>
where
    E: core::fmt::Debug,
{
    let calculated = calculate_crc8(&word);
    if calculated == received {
        Ok(())
    } else {
        warn!(
            "CRC mismatch on word {:#x}: expected {:#x}, got {:#x}",
            u16::from_be_bytes(word),
            calculated,
            received
        );
        Err(Scd30Error::CrcMismatch { expected: calculated, actual: received })
    }
}
