use anchor_lang::prelude::*;

/// Program-owned PDA that holds staked principal and funded rewards as lamports
#[account]
#[derive(InitSpace)]
pub struct PoolVault {
    pub pool: Pubkey,
    pub bump: u8,
}
