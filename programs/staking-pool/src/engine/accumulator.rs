use crate::constants::PRECISION;
use crate::errors::ErrorCode;
use crate::states::StakePool;
use anchor_lang::prelude::*;

/// Outcome of a single accumulator refresh, all reward quantities scaled by PRECISION
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accrual {
    pub elapsed: i64,
    pub emitted_scaled: u128,
    pub distributed_scaled: u128,
    pub dust_scaled: u128,
}

impl StakePool {
    /// Advance the reward-per-share accumulator to `now`.
    ///
    /// Intervals with an empty pool are forfeited: the clock moves forward but
    /// nothing is banked for later stakers. Emission is capped by the funded reward
    /// and stops at `emission_ends_at`. State is only written once every checked
    /// step has succeeded.
    pub fn refresh(&mut self, now: i64) -> Result<Accrual> {
        let accrue_until = now.min(self.emission_ends_at);
        let elapsed = accrue_until.saturating_sub(self.last_accrual_time);
        if elapsed <= 0 {
            return Ok(Accrual::default());
        }

        if self.total_staked == 0 {
            self.last_accrual_time = accrue_until;
            return Ok(Accrual {
                elapsed,
                ..Default::default()
            });
        }

        // emitted = elapsed * rate * PRECISION / time_unit
        let scheduled_scaled = (elapsed as u128)
            .checked_mul(self.reward_rate_per_unit as u128)
            .ok_or(ErrorCode::ArithmeticOverflow)?
            .checked_mul(PRECISION)
            .ok_or(ErrorCode::ArithmeticOverflow)?
            .checked_div(self.time_unit as u128)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        let emitted_scaled = scheduled_scaled.min(self.unallocated_reward_scaled()?);

        let total_staked = self.total_staked as u128;
        let delta = emitted_scaled / total_staked;
        let distributed_scaled = delta
            .checked_mul(total_staked)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        let dust_scaled = emitted_scaled - distributed_scaled;

        let acc_reward_per_share = self
            .acc_reward_per_share
            .checked_add(delta)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        let reward_accrued_scaled = self
            .reward_accrued_scaled
            .checked_add(distributed_scaled)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        let reward_dust_scaled = self
            .reward_dust_scaled
            .checked_add(dust_scaled)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        self.acc_reward_per_share = acc_reward_per_share;
        self.reward_accrued_scaled = reward_accrued_scaled;
        self.reward_dust_scaled = reward_dust_scaled;
        self.last_accrual_time = accrue_until;

        #[cfg(feature = "verbose")]
        msg!(
            "[ACCRUE] elapsed={} emitted={} delta={} dust={} acc={}",
            elapsed,
            emitted_scaled,
            delta,
            dust_scaled,
            self.acc_reward_per_share
        );

        Ok(Accrual {
            elapsed,
            emitted_scaled,
            distributed_scaled,
            dust_scaled,
        })
    }

    /// Accumulator value a refresh at `now` would produce, without mutating the pool
    pub fn preview_reward_per_share(&self, now: i64) -> Result<u128> {
        let mut preview = self.clone();
        preview.refresh(now)?;
        Ok(preview.acc_reward_per_share)
    }

    /// Total reward attributed to stakers so far, in whole units
    pub fn reward_accrued(&self) -> u64 {
        (self.reward_accrued_scaled / PRECISION).min(u64::MAX as u128) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{PoolConfig, RewardPolicy};

    fn pool(rate: u64, funded: u64, total_staked: u64) -> StakePool {
        let mut pool = StakePool::default();
        let config = PoolConfig {
            time_unit: 4,
            admission_units: 1,
            reward_policy: RewardPolicy::FixedRate {
                reward_per_unit: rate,
            },
        };
        pool.configure(Pubkey::default(), Pubkey::default(), &config, 0)
            .unwrap();
        pool.reward_funded = funded;
        pool.total_staked = total_staked;
        pool
    }

    #[test]
    fn accrues_per_share() {
        let mut pool = pool(100, 10_000, 1_000);
        let accrual = pool.refresh(8).unwrap();

        assert_eq!(accrual.elapsed, 8);
        assert_eq!(accrual.emitted_scaled, 200 * PRECISION);
        assert_eq!(accrual.dust_scaled, 0);
        assert_eq!(pool.acc_reward_per_share, PRECISION / 5);
        assert_eq!(pool.last_accrual_time, 8);
        assert_eq!(pool.reward_accrued(), 200);
    }

    #[test]
    fn refresh_is_idempotent_at_same_timestamp() {
        let mut pool = pool(100, 10_000, 1_000);
        pool.refresh(5).unwrap();
        let snapshot = pool.acc_reward_per_share;

        let second = pool.refresh(5).unwrap();
        assert_eq!(second, Accrual::default());
        assert_eq!(pool.acc_reward_per_share, snapshot);
    }

    #[test]
    fn backwards_clock_is_a_noop() {
        let mut pool = pool(100, 10_000, 1_000);
        pool.refresh(10).unwrap();
        let before = pool.clone();

        assert_eq!(pool.refresh(7).unwrap(), Accrual::default());
        assert_eq!(pool.acc_reward_per_share, before.acc_reward_per_share);
        assert_eq!(pool.last_accrual_time, 10);
    }

    #[test]
    fn empty_pool_forfeits_interval() {
        let mut pool = pool(100, 10_000, 0);
        let accrual = pool.refresh(40).unwrap();

        assert_eq!(accrual.elapsed, 40);
        assert_eq!(accrual.emitted_scaled, 0);
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.last_accrual_time, 40);

        // the forfeited interval is not paid to a later joiner
        pool.total_staked = 1_000;
        pool.refresh(44).unwrap();
        assert_eq!(pool.reward_accrued(), 100);
    }

    #[test]
    fn dust_is_bounded_by_total_staked() {
        let mut pool = pool(100, 10_000, 3);
        let accrual = pool.refresh(1).unwrap();

        // 25 reward over 3 units of stake
        assert_eq!(accrual.emitted_scaled, 25 * PRECISION);
        assert!(accrual.dust_scaled < 3);
        assert_eq!(
            accrual.distributed_scaled + accrual.dust_scaled,
            accrual.emitted_scaled
        );
    }

    #[test]
    fn emission_capped_by_funding() {
        let mut pool = pool(100, 150, 1_000);
        let accrual = pool.refresh(8).unwrap();

        assert_eq!(accrual.emitted_scaled, 150 * PRECISION);
        assert_eq!(pool.reward_accrued(), 150);

        // nothing left to emit
        let dry = pool.refresh(12).unwrap();
        assert_eq!(dry.emitted_scaled, 0);
        assert_eq!(pool.last_accrual_time, 12);
    }

    #[test]
    fn emission_stops_at_schedule_end() {
        let mut pool = pool(100, 10_000, 1_000);
        pool.emission_ends_at = 8;

        pool.refresh(20).unwrap();
        assert_eq!(pool.last_accrual_time, 8);
        assert_eq!(pool.reward_accrued(), 200);

        assert_eq!(pool.refresh(30).unwrap(), Accrual::default());
    }

    #[test]
    fn overflow_leaves_pool_untouched() {
        let mut pool = pool(u64::MAX, u64::MAX, 1);
        pool.time_unit = 1;
        let before = pool.clone();

        let err = pool.refresh(i64::MAX).unwrap_err();
        assert_eq!(err, ErrorCode::ArithmeticOverflow.into());
        assert_eq!(pool.acc_reward_per_share, before.acc_reward_per_share);
        assert_eq!(pool.last_accrual_time, before.last_accrual_time);
    }

    #[test]
    fn preview_does_not_mutate() {
        let pool = pool(100, 10_000, 1_000);
        let preview = pool.preview_reward_per_share(8).unwrap();

        assert_eq!(preview, PRECISION / 5);
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.last_accrual_time, 0);
    }
}
