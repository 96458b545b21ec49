use crate::errors::ErrorCode;
use crate::states::{AdmissionWindow, PoolConfig, Stake};
use anchor_lang::prelude::*;

/// Shared stake pool with a reward-per-share accumulator
///
/// - acc_reward_per_share: cumulative reward per unit of stake (scaled by PRECISION)
/// - each Stake tracks reward_debt = amount * acc_reward_per_share at its last settlement
/// - pending = (amount * acc_reward_per_share - reward_debt) / PRECISION
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct StakePool {
    pub creator: Pubkey,                // Account that opened the pool
    pub vault: Pubkey,                  // PDA holding principal and reward lamports
    pub window: AdmissionWindow,        // Deposit admission window

    // Accrual schedule
    pub time_unit: i64,                 // Accrual period in seconds
    pub reward_rate_per_unit: u64,      // Reward emitted per time unit
    pub emission_ends_at: i64,          // No accrual past this timestamp

    // Accumulator
    pub total_staked: u64,              // Sum of all open stake amounts
    pub acc_reward_per_share: u128,     // Scaled by PRECISION, non-decreasing
    pub last_accrual_time: i64,         // Timestamp of the last refresh

    // Reward bookkeeping
    pub reward_funded: u64,             // Rewards deposited into the vault
    pub reward_accrued_scaled: u128,    // Rewards attributed to stakers (scaled)
    pub reward_dust_scaled: u128,       // Truncation residue, never claimable (scaled)
    pub total_reward_paid: u64,         // Rewards credited to stakers

    // Principal bookkeeping
    pub total_principal_deposited: u64,
    pub total_principal_withdrawn: u64,
    pub staker_count: u64,              // Number of open stakes

    pub in_progress: bool,              // Reentrancy guard
    pub vault_bump: u8,
    pub bump: u8,
}

impl StakePool {
    /// Apply a validated config and open the admission window at `now`
    pub fn configure(&mut self, creator: Pubkey, vault: Pubkey, config: &PoolConfig, now: i64) -> Result<u64> {
        let schedule = config.resolve(now)?;

        self.creator = creator;
        self.vault = vault;
        self.window = AdmissionWindow::new(now, schedule.window_duration);
        self.time_unit = schedule.time_unit;
        self.reward_rate_per_unit = schedule.reward_rate_per_unit;
        self.emission_ends_at = schedule.emission_ends_at;
        self.total_staked = 0;
        self.acc_reward_per_share = 0;
        self.last_accrual_time = now;
        self.reward_funded = 0;
        self.reward_accrued_scaled = 0;
        self.reward_dust_scaled = 0;
        self.total_reward_paid = 0;
        self.total_principal_deposited = 0;
        self.total_principal_withdrawn = 0;
        self.staker_count = 0;
        self.in_progress = false;

        Ok(schedule.initial_funding)
    }

    pub fn enter(&mut self) -> Result<()> {
        require!(!self.in_progress, ErrorCode::ReentrancyRejected);
        self.in_progress = true;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.in_progress = false;
    }

    pub fn can_deposit(&self, now: i64) -> bool {
        self.window.can_deposit(now)
    }

    /// Reward owed to `stake`, computed as if the accumulator had been refreshed at `now`
    pub fn pending_reward(&self, stake: &Stake, now: i64) -> Result<u64> {
        if !stake.is_open() {
            return Ok(0);
        }
        let acc_reward_per_share = self.preview_reward_per_share(now)?;
        stake.calculate_pending_reward(acc_reward_per_share)
    }

    /// Funded reward not yet attributed to stakers or lost to rounding (scaled)
    pub fn unallocated_reward_scaled(&self) -> Result<u128> {
        let funded = (self.reward_funded as u128)
            .checked_mul(crate::constants::PRECISION)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        Ok(funded
            .saturating_sub(self.reward_accrued_scaled)
            .saturating_sub(self.reward_dust_scaled))
    }

    pub fn add_funding(&mut self, amount: u64) -> Result<()> {
        self.reward_funded = self
            .reward_funded
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        Ok(())
    }
}
