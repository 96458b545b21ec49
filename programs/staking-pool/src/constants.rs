/// Fixed-point scale applied to `acc_reward_per_share` and `reward_debt` (1e12)
///
/// `reward_debt` holds `amount * acc_reward_per_share` in a u128, so a stake of
/// 1e15 lamports overflows once the accumulator passes ~3.4e23. Such deposits
/// fail with `ArithmeticOverflow` and leave state untouched.
pub const PRECISION: u128 = 1_000_000_000_000;

pub const STAKE_POOL_SEED: &[u8] = b"stake_pool";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const STAKE_SEED: &[u8] = b"stake";

/// Longest accepted accrual period: one year in seconds
pub const MAX_TIME_UNIT: i64 = 365 * 24 * 60 * 60;

/// Upper bound on the admission window and budget schedule, in time units
pub const MAX_SCHEDULE_UNITS: u32 = 100_000;
