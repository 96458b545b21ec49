use anchor_lang::prelude::*;

/// Timestamp source queried once by every mutating operation
pub trait ClockSource {
    fn now(&self) -> Result<i64>;
}

/// Reads the cluster clock sysvar
pub struct SysvarClock;

impl ClockSource for SysvarClock {
    fn now(&self) -> Result<i64> {
        Ok(Clock::get()?.unix_timestamp)
    }
}
