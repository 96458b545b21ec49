use crate::constants::{POOL_VAULT_SEED, STAKE_POOL_SEED, STAKE_SEED};
use crate::engine::{SettlementEngine, SysvarClock, VaultLedger};
use crate::events::StakeDeposited;
use crate::states::{PoolVault, Stake, StakePool};
use anchor_lang::prelude::*;

/// Deposit principal into the pool
///
/// Flow:
/// 1. Reject zero amounts and deposits outside the admission window
/// 2. Refresh reward_per_share
/// 3. Settle pending reward of an existing stake, then merge the new principal
/// 4. Net principal against settled reward in a single transfer
#[derive(Accounts)]
pub struct Deposit<'info> {
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
        init_if_needed,
        payer = owner,
        space = 8 + Stake::INIT_SPACE,
        seeds = [STAKE_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub stake: Account<'info, Stake>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let owner = ctx.accounts.owner.key();
    let stake_bump = ctx.bumps.stake;

    msg!("[DEPOSIT] Owner: {}, amount: {} lamports", owner, amount);

    let accounts = ctx.accounts;
    if !accounts.stake.is_open() {
        msg!("[DEPOSIT] Opening new stake");
        accounts.stake.pool = pool_key;
        accounts.stake.bump = stake_bump;
    }

    let clock = SysvarClock;
    let mut ledger = VaultLedger::new(
        accounts.owner.to_account_info(),
        accounts.vault.to_account_info(),
        accounts.system_program.to_account_info(),
    );
    let receipt = SettlementEngine::new(&mut accounts.pool, &clock, &mut ledger).deposit(
        &mut accounts.stake,
        owner,
        amount,
    )?;

    msg!(
        "[DEPOSIT] Stake now {} (pool total {}), settled reward {}",
        receipt.stake_amount,
        receipt.total_staked,
        receipt.reward_paid
    );

    emit!(StakeDeposited {
        pool: pool_key,
        owner,
        amount,
        reward_paid: receipt.reward_paid,
        stake_amount: receipt.stake_amount,
        total_staked: receipt.total_staked,
        acc_reward_per_share: accounts.pool.acc_reward_per_share,
        deposited_at: receipt.timestamp,
    });

    Ok(())
}
