use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub creator: Pubkey,
    pub time_unit: i64,
    pub window_closes_at: i64,
    pub reward_rate_per_unit: u64,
    pub emission_ends_at: i64,
    pub initialized_at: i64,
}

#[event]
pub struct RewardsFunded {
    pub pool: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub reward_funded: u64,
    pub funded_at: i64,
}

#[event]
pub struct StakeDeposited {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub reward_paid: u64,
    pub stake_amount: u64,
    pub total_staked: u64,
    pub acc_reward_per_share: u128,
    pub deposited_at: i64,
}

#[event]
pub struct StakeWithdrawn {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub principal: u64,
    pub reward: u64,
    pub remaining_staked: u64,
    pub total_staked: u64,
    pub closed: bool,
    pub withdrawn_at: i64,
}

#[event]
pub struct RewardsClaimed {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub claimed_total: u64,
    pub acc_reward_per_share: u128,
    pub claimed_at: i64,
}
