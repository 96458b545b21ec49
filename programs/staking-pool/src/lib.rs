use anchor_lang::prelude::*;

// Module declarations
pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod states;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use constants::*;
pub use events::*;
pub use instructions::*;
pub use states::*;

declare_id!("vkydCsGsKLif7MtMAvZC3Kj7zyFHk4y89qdUbQAuEoM");

#[program]
pub mod staking_pool {
    use super::*;

    /// Create a pool and open its admission window
    pub fn initialize_pool(ctx: Context<InitializePool>, config: PoolConfig) -> Result<()> {
        instructions::initialize_pool(ctx, config)
    }

    /// Add lamports to the reward reserve
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund_rewards(ctx, amount)
    }

    /// Stake lamports while the admission window is open
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    /// Withdraw principal and pending reward; `None` withdraws the full stake
    pub fn withdraw(ctx: Context<Withdraw>, amount: Option<u64>) -> Result<u64> {
        instructions::withdraw(ctx, amount)
    }

    /// Claim pending reward without touching principal
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<u64> {
        instructions::claim_rewards(ctx)
    }

    /// Principal staked by the owner
    pub fn stake_of(ctx: Context<StakeView>) -> Result<u64> {
        instructions::stake_of(ctx)
    }

    /// Reward the owner would receive if they withdrew now
    pub fn pending_reward(ctx: Context<StakeView>) -> Result<u64> {
        instructions::pending_reward(ctx)
    }
}
