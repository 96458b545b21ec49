use crate::constants::{POOL_VAULT_SEED, STAKE_POOL_SEED, STAKE_SEED};
use crate::engine::{SettlementEngine, SysvarClock, VaultLedger};
use crate::errors::ErrorCode;
use crate::events::StakeWithdrawn;
use crate::states::{PoolVault, Stake, StakePool};
use anchor_lang::prelude::*;

/// Withdraw principal together with all pending reward
///
/// Withdrawals are never gated by the admission window. A stake that reaches
/// zero is closed and its rent returned to the owner.
#[derive(Accounts)]
pub struct Withdraw<'info> {
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

/// Returns the lamports paid out (principal + reward)
pub fn withdraw(ctx: Context<Withdraw>, amount: Option<u64>) -> Result<u64> {
    let pool_key = ctx.accounts.pool.key();
    let owner = ctx.accounts.owner.key();

    match amount {
        Some(amount) => msg!("[WITHDRAW] Owner: {}, amount: {} lamports", owner, amount),
        None => msg!("[WITHDRAW] Owner: {}, full stake", owner),
    }

    let accounts = ctx.accounts;
    let clock = SysvarClock;
    let mut ledger = VaultLedger::new(
        accounts.owner.to_account_info(),
        accounts.vault.to_account_info(),
        accounts.system_program.to_account_info(),
    );
    let receipt = SettlementEngine::new(&mut accounts.pool, &clock, &mut ledger)
        .withdraw(&mut accounts.stake, amount)?;
    let paid_out = receipt.paid_out()?;

    msg!(
        "[WITHDRAW] Principal {} + reward {} = {} lamports, remaining {}",
        receipt.principal,
        receipt.reward,
        paid_out,
        receipt.remaining
    );

    if receipt.closed {
        msg!("[WITHDRAW] Stake fully withdrawn, closing account");
        accounts.stake.close(accounts.owner.to_account_info())?;
    }

    emit!(StakeWithdrawn {
        pool: pool_key,
        owner,
        principal: receipt.principal,
        reward: receipt.reward,
        remaining_staked: receipt.remaining,
        total_staked: receipt.total_staked,
        closed: receipt.closed,
        withdrawn_at: receipt.timestamp,
    });

    Ok(paid_out)
}
