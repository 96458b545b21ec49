use crate::constants::{POOL_VAULT_SEED, STAKE_POOL_SEED, STAKE_SEED};
use crate::engine::{ClockSource, SettlementEngine, SysvarClock, VaultLedger};
use crate::errors::ErrorCode;
use crate::events::RewardsClaimed;
use crate::states::{PoolVault, Stake, StakePool};
use anchor_lang::prelude::*;

/// Claim pending reward, leaving principal staked
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, pool.creator.as_ref()],
        bump = pool.bump,
        has_one = vault
    )]
    pub pool: Account<'info, StakePool>,

    #[account(
        mut,
        seeds = [POOL_VAULT_SEED, pool.key().as_ref()],
        bump = pool.vault_bump
    )]
    pub vault: Account<'info, PoolVault>,

    #[account(
        mut,
        seeds = [STAKE_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump = stake.bump,
        has_one = owner @ ErrorCode::StakeOwnerMismatch
    )]
    pub stake: Account<'info, Stake>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<u64> {
    let pool_key = ctx.accounts.pool.key();
    let owner = ctx.accounts.owner.key();
    msg!("[CLAIM] Owner: {}", owner);

    let accounts = ctx.accounts;
    let clock = SysvarClock;
    let mut ledger = VaultLedger::new(
        accounts.owner.to_account_info(),
        accounts.vault.to_account_info(),
        accounts.system_program.to_account_info(),
    );
    let amount = SettlementEngine::new(&mut accounts.pool, &clock, &mut ledger).claim(&mut accounts.stake)?;

    msg!(
        "[CLAIM] Paid {} lamports, claimed total {}",
        amount,
        accounts.stake.claimed_total
    );

    emit!(RewardsClaimed {
        pool: pool_key,
        owner,
        amount,
        claimed_total: accounts.stake.claimed_total,
        acc_reward_per_share: accounts.pool.acc_reward_per_share,
        claimed_at: clock.now()?,
    });

    Ok(amount)
}
