//! Stake registry: the owner -> stake mapping and the pool's `total_staked`.
//!
//! Every function here validates first, refreshes the accumulator, then mutates
//! the stake and pool totals. None of them move value; the settlement engine
//! performs ledger transfers after these return.

use crate::errors::ErrorCode;
use crate::states::{Stake, StakePool};
use anchor_lang::prelude::*;

/// Result of adding principal to a stake
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opening {
    pub settled_reward: u64, // Pending reward of the merged stake, owed to the owner
    pub created: bool,       // True when this deposit created the stake
}

/// Result of removing principal from a stake
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Closing {
    pub principal: u64,
    pub reward: u64,
    pub remaining: u64,
    pub closed: bool, // True when the stake reached zero and must be removed
}

/// Add `amount` to `owner`'s stake, creating it when absent.
/// An existing stake has its pending reward settled before the merge.
pub fn open(pool: &mut StakePool, stake: &mut Stake, owner: Pubkey, amount: u64, now: i64) -> Result<Opening> {
    require!(amount > 0, ErrorCode::ZeroAmount);
    require!(pool.can_deposit(now), ErrorCode::WindowClosed);
    let created = !stake.is_open();
    if !created {
        require_keys_eq!(stake.owner, owner, ErrorCode::StakeOwnerMismatch);
    }

    pool.refresh(now)?;

    let settled_reward = if created {
        0
    } else {
        stake.calculate_pending_reward(pool.acc_reward_per_share)?
    };

    let amount_after = stake
        .amount
        .checked_add(amount)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    let total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    let total_principal_deposited = pool
        .total_principal_deposited
        .checked_add(amount)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    if created {
        stake.owner = owner;
        stake.opened_at = now;
        pool.staker_count = pool
            .staker_count
            .checked_add(1)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
    }

    stake.amount = amount_after;
    stake.update_reward_debt(pool.acc_reward_per_share)?;
    stake.record_claim(settled_reward)?;

    pool.total_staked = total_staked;
    pool.total_principal_deposited = total_principal_deposited;
    record_payout(pool, settled_reward)?;

    Ok(Opening {
        settled_reward,
        created,
    })
}

/// Remove principal from `stake`. `None` withdraws the full stake.
/// Pending reward is computed over the amount held before the reduction.
pub fn close(pool: &mut StakePool, stake: &mut Stake, amount: Option<u64>, now: i64) -> Result<Closing> {
    require!(stake.is_open(), ErrorCode::NoSuchStake);
    let principal = amount.unwrap_or(stake.amount);
    require!(principal > 0, ErrorCode::ZeroAmount);
    require!(principal <= stake.amount, ErrorCode::InsufficientStake);

    pool.refresh(now)?;

    let reward = stake.calculate_pending_reward(pool.acc_reward_per_share)?;

    let remaining = stake.amount - principal;
    let total_staked = pool
        .total_staked
        .checked_sub(principal)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    let total_principal_withdrawn = pool
        .total_principal_withdrawn
        .checked_add(principal)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    stake.amount = remaining;
    stake.record_claim(reward)?;
    let closed = remaining == 0;
    if closed {
        stake.reward_debt = 0;
        pool.staker_count = pool.staker_count.saturating_sub(1);
    } else {
        stake.update_reward_debt(pool.acc_reward_per_share)?;
    }

    pool.total_staked = total_staked;
    pool.total_principal_withdrawn = total_principal_withdrawn;
    record_payout(pool, reward)?;

    Ok(Closing {
        principal,
        reward,
        remaining,
        closed,
    })
}

/// Pay out pending reward without touching principal
pub fn settle(pool: &mut StakePool, stake: &mut Stake, now: i64) -> Result<u64> {
    require!(stake.is_open(), ErrorCode::NoSuchStake);

    pool.refresh(now)?;

    let reward = stake.calculate_pending_reward(pool.acc_reward_per_share)?;
    require!(reward > 0, ErrorCode::NoRewardsToClaim);

    stake.update_reward_debt(pool.acc_reward_per_share)?;
    stake.record_claim(reward)?;
    record_payout(pool, reward)?;

    Ok(reward)
}

fn record_payout(pool: &mut StakePool, reward: u64) -> Result<()> {
    pool.total_reward_paid = pool
        .total_reward_paid
        .checked_add(reward)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    Ok(())
}
