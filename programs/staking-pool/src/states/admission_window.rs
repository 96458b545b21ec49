use anchor_lang::prelude::*;

/// Bounded interval after pool creation during which deposits are accepted.
/// Withdrawals are never gated by the window.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct AdmissionWindow {
    pub opened_at: i64, // Unix timestamp the pool was opened
    pub duration: i64,  // Window length in seconds
}

impl AdmissionWindow {
    pub fn new(opened_at: i64, duration: i64) -> Self {
        Self { opened_at, duration }
    }

    /// First timestamp at which deposits are refused
    pub fn closes_at(&self) -> i64 {
        self.opened_at.saturating_add(self.duration)
    }

    /// The boundary is exclusive: a deposit at exactly `closes_at()` is refused
    pub fn can_deposit(&self, now: i64) -> bool {
        now < self.closes_at()
    }
}
