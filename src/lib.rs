// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// Must come first so the logging macros are visible to every other module.
#[macro_use]
mod fmt;

pub mod common;
pub mod device;

// Re-export key types for convenience
pub use common::{BusLock, Command, FirmwareVersion, Measurement, Scd30Error};
pub use device::Scd30;
