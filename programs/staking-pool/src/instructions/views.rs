use crate::constants::{STAKE_POOL_SEED, STAKE_SEED};
use crate::engine::{ClockSource, SysvarClock};
use crate::states::{Stake, StakePool};
use anchor_lang::prelude::*;

/// Read-only access to an owner's stake. The stake account is optional so
/// owners without a stake read as zero.
#[derive(Accounts)]
pub struct StakeView<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, pool.creator.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, StakePool>,

    /// CHECK: only used to derive the stake address
    pub owner: UncheckedAccount<'info>,

    #[account(
        seeds = [STAKE_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub stake: Option<Account<'info, Stake>>,
}

/// Principal currently staked, excluding unsettled reward
pub fn stake_of(ctx: Context<StakeView>) -> Result<u64> {
    Ok(ctx
        .accounts
        .stake
        .as_ref()
        .map(|stake| stake.amount)
        .unwrap_or(0))
}

/// Reward owed if the accumulator were refreshed now. Does not mutate state.
pub fn pending_reward(ctx: Context<StakeView>) -> Result<u64> {
    match ctx.accounts.stake.as_ref() {
        Some(stake) => ctx.accounts.pool.pending_reward(stake, SysvarClock.now()?),
        None => Ok(0),
    }
}
