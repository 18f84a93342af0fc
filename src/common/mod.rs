// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod crc;
pub mod error;
pub mod hal_traits;
pub mod timing;
pub mod types;
pub mod word;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{Command, Frame};

// From crc.rs
pub use crc::{calculate_crc8, verify_word_crc, SENSIRION_CRC8};

// From error.rs
pub use error::Scd30Error;

// From hal_traits.rs
pub use hal_traits::BusLock;

// From types.rs
pub use types::{FirmwareVersion, Measurement};

// From word.rs
pub use word::{encode_word, frame_word, WordCursor, WORD_FRAME_LEN};
