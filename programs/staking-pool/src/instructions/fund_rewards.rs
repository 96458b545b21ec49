use crate::constants::{POOL_VAULT_SEED, STAKE_POOL_SEED};
use crate::engine::{ClockSource, SettlementEngine, SysvarClock, VaultLedger};
use crate::events::RewardsFunded;
use crate::states::{PoolVault, StakePool};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct FundRewards<'info> {
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

    #[account(mut)]
    pub funder: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Top up the reward reserve. Elapsed time is accrued against the old reserve first.
pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let funder = ctx.accounts.funder.key();
    msg!("[FUND] Funder: {}, amount: {} lamports", funder, amount);

    let accounts = ctx.accounts;
    let clock = SysvarClock;
    let mut ledger = VaultLedger::new(
        accounts.funder.to_account_info(),
        accounts.vault.to_account_info(),
        accounts.system_program.to_account_info(),
    );
    let mut engine = SettlementEngine::new(&mut accounts.pool, &clock, &mut ledger);
    let reward_funded = engine.fund(funder, amount)?;
    let funded_at = clock.now()?;

    msg!("[FUND] Reward reserve now {} lamports", reward_funded);

    emit!(RewardsFunded {
        pool: pool_key,
        funder,
        amount,
        reward_funded,
        funded_at,
    });

    Ok(())
}
