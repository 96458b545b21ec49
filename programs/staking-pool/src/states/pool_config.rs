use crate::constants::{MAX_SCHEDULE_UNITS, MAX_TIME_UNIT};
use crate::errors::ErrorCode;
use anchor_lang::prelude::*;

/// How the pool emits rewards over time
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardPolicy {
    /// Constant emission per time unit with no end date. Emission is still
    /// bounded by the rewards funded into the vault.
    FixedRate { reward_per_unit: u64 },
    /// A total budget spread evenly over `emission_units` time units starting
    /// when the pool opens. The budget is pulled from the creator at initialization.
    Budget { total_reward: u64, emission_units: u32 },
}

/// Construction parameters for a stake pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    pub time_unit: i64,        // Accrual period in seconds
    pub admission_units: u32,  // Admission window length in time units
    pub reward_policy: RewardPolicy,
}

/// Validated schedule derived from a [`PoolConfig`] at a given opening time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedSchedule {
    pub time_unit: i64,
    pub window_duration: i64,
    pub reward_rate_per_unit: u64,
    pub emission_ends_at: i64,
    pub initial_funding: u64,
}

impl PoolConfig {
    pub fn resolve(&self, opened_at: i64) -> Result<ResolvedSchedule> {
        require!(
            self.time_unit > 0 && self.time_unit <= MAX_TIME_UNIT,
            ErrorCode::InvalidTimeUnit
        );
        require!(
            self.admission_units > 0 && self.admission_units <= MAX_SCHEDULE_UNITS,
            ErrorCode::InvalidAdmissionWindow
        );

        let window_duration = self
            .time_unit
            .checked_mul(self.admission_units as i64)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        let (reward_rate_per_unit, emission_ends_at, initial_funding) = match self.reward_policy {
            RewardPolicy::FixedRate { reward_per_unit } => {
                require!(reward_per_unit > 0, ErrorCode::InvalidRewardPolicy);
                (reward_per_unit, i64::MAX, 0)
            }
            RewardPolicy::Budget {
                total_reward,
                emission_units,
            } => {
                require!(
                    emission_units > 0 && emission_units <= MAX_SCHEDULE_UNITS,
                    ErrorCode::InvalidRewardPolicy
                );
                // Remainder of an uneven split stays in the vault unemitted
                let rate = total_reward / emission_units as u64;
                require!(rate > 0, ErrorCode::InvalidRewardPolicy);

                let emission_length = self
                    .time_unit
                    .checked_mul(emission_units as i64)
                    .ok_or(ErrorCode::ArithmeticOverflow)?;
                let ends_at = opened_at
                    .checked_add(emission_length)
                    .ok_or(ErrorCode::ArithmeticOverflow)?;
                (rate, ends_at, total_reward)
            }
        };

        Ok(ResolvedSchedule {
            time_unit: self.time_unit,
            window_duration,
            reward_rate_per_unit,
            emission_ends_at,
            initial_funding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(time_unit: i64, admission_units: u32, reward_per_unit: u64) -> PoolConfig {
        PoolConfig {
            time_unit,
            admission_units,
            reward_policy: RewardPolicy::FixedRate { reward_per_unit },
        }
    }

    #[test]
    fn fixed_rate_is_open_ended() {
        let schedule = fixed(4, 1, 100).resolve(10).unwrap();
        assert_eq!(schedule.window_duration, 4);
        assert_eq!(schedule.reward_rate_per_unit, 100);
        assert_eq!(schedule.emission_ends_at, i64::MAX);
        assert_eq!(schedule.initial_funding, 0);
    }

    #[test]
    fn budget_derives_rate_and_end() {
        let config = PoolConfig {
            time_unit: 4,
            admission_units: 1,
            reward_policy: RewardPolicy::Budget {
                total_reward: 1_000,
                emission_units: 3,
            },
        };
        let schedule = config.resolve(100).unwrap();
        assert_eq!(schedule.reward_rate_per_unit, 333);
        assert_eq!(schedule.emission_ends_at, 112);
        assert_eq!(schedule.initial_funding, 1_000);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            fixed(0, 1, 100).resolve(0).unwrap_err(),
            ErrorCode::InvalidTimeUnit.into()
        );
        assert_eq!(
            fixed(MAX_TIME_UNIT + 1, 1, 100).resolve(0).unwrap_err(),
            ErrorCode::InvalidTimeUnit.into()
        );
        assert_eq!(
            fixed(4, 0, 100).resolve(0).unwrap_err(),
            ErrorCode::InvalidAdmissionWindow.into()
        );
        assert_eq!(
            fixed(4, 1, 0).resolve(0).unwrap_err(),
            ErrorCode::InvalidRewardPolicy.into()
        );

        let starved = PoolConfig {
            time_unit: 4,
            admission_units: 1,
            reward_policy: RewardPolicy::Budget {
                total_reward: 2,
                emission_units: 3,
            },
        };
        assert_eq!(
            starved.resolve(0).unwrap_err(),
            ErrorCode::InvalidRewardPolicy.into()
        );
    }
}
