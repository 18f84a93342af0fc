// src/common/timing.rs

use core::time::Duration;

/// Time the sensor needs after every command write before it accepts the
/// next transaction or has a reply ready. The interface description asks for
/// at least 3 ms; 4 ms is used everywhere.
pub const COMMAND_SETTLE: Duration = Duration::from_millis(4);

/// `COMMAND_SETTLE` in the unit `DelayNs::delay_ms` takes.
pub const COMMAND_SETTLE_MS: u32 = COMMAND_SETTLE.as_millis() as u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_is_four_ms() {
        assert_eq!(COMMAND_SETTLE_MS, 4);
    }
}
