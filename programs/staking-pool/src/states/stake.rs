use crate::constants::PRECISION;
use crate::errors::ErrorCode;
use anchor_lang::prelude::*;

/// A participant's position in a pool
///
/// - amount: principal currently staked
/// - reward_debt: amount * acc_reward_per_share at the last settlement (scaled)
/// - claimed_total: rewards paid out to this stake so far
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct Stake {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub reward_debt: u128,
    pub claimed_total: u64,
    pub opened_at: i64,
    pub bump: u8,
}

impl Stake {
    pub fn is_open(&self) -> bool {
        self.amount > 0
    }

    /// (amount * acc_reward_per_share - reward_debt) / PRECISION
    pub fn calculate_pending_reward(&self, acc_reward_per_share: u128) -> Result<u64> {
        let accumulated = (self.amount as u128)
            .checked_mul(acc_reward_per_share)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        let pending = accumulated
            .checked_sub(self.reward_debt)
            .ok_or(ErrorCode::ArithmeticOverflow)?
            / PRECISION;

        u64::try_from(pending).map_err(|_| error!(ErrorCode::ArithmeticOverflow))
    }

    /// Sets reward_debt = amount * acc_reward_per_share
    pub fn update_reward_debt(&mut self, acc_reward_per_share: u128) -> Result<()> {
        self.reward_debt = (self.amount as u128)
            .checked_mul(acc_reward_per_share)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn record_claim(&mut self, reward: u64) -> Result<()> {
        self.claimed_total = self
            .claimed_total
            .checked_add(reward)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        Ok(())
    }
}
