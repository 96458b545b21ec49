use crate::constants::{POOL_VAULT_SEED, STAKE_POOL_SEED};
use crate::engine::{ClockSource, SettlementEngine, SysvarClock, VaultLedger};
use crate::events::PoolInitialized;
use crate::states::{PoolConfig, PoolVault, StakePool};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = creator,
        space = 8 + StakePool::INIT_SPACE,
        seeds = [STAKE_POOL_SEED, creator.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, StakePool>,

    #[account(
        init,
        payer = creator,
        space = 8 + PoolVault::INIT_SPACE,
        seeds = [POOL_VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, PoolVault>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Open a pool: the admission window starts now. A budget policy pulls the
/// whole budget from the creator into the vault.
pub fn initialize_pool(ctx: Context<InitializePool>, config: PoolConfig) -> Result<()> {
    let clock = SysvarClock;
    let now = clock.now()?;
    let pool_key = ctx.accounts.pool.key();
    let vault_key = ctx.accounts.vault.key();
    let creator = ctx.accounts.creator.key();
    let pool_bump = ctx.bumps.pool;
    let vault_bump = ctx.bumps.vault;

    msg!("[INIT] Creator: {}", creator);
    msg!("[INIT] Config: {:?}", config);

    let accounts = ctx.accounts;
    accounts.vault.pool = pool_key;
    accounts.vault.bump = vault_bump;

    let initial_funding = accounts.pool.configure(creator, vault_key, &config, now)?;
    accounts.pool.bump = pool_bump;
    accounts.pool.vault_bump = vault_bump;

    if initial_funding > 0 {
        msg!("[INIT] Funding reward budget: {} lamports", initial_funding);
        let mut ledger = VaultLedger::new(
            accounts.creator.to_account_info(),
            accounts.vault.to_account_info(),
            accounts.system_program.to_account_info(),
        );
        SettlementEngine::new(&mut accounts.pool, &clock, &mut ledger).fund(creator, initial_funding)?;
    }

    let pool = &accounts.pool;
    msg!(
        "[INIT] Window closes at {}, rate {} per {}s, emission ends at {}",
        pool.window.closes_at(),
        pool.reward_rate_per_unit,
        pool.time_unit,
        pool.emission_ends_at
    );

    emit!(PoolInitialized {
        pool: pool_key,
        creator,
        time_unit: pool.time_unit,
        window_closes_at: pool.window.closes_at(),
        reward_rate_per_unit: pool.reward_rate_per_unit,
        emission_ends_at: pool.emission_ends_at,
        initialized_at: now,
    });

    Ok(())
}
