use crate::engine::registry::{self, Closing, Opening};
use crate::engine::{ClockSource, Ledger};
use crate::errors::ErrorCode;
use crate::states::{Stake, StakePool};
use anchor_lang::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositReceipt {
    pub owner: Pubkey,
    pub amount: u64,
    pub reward_paid: u64,
    pub stake_amount: u64,
    pub total_staked: u64,
    pub created: bool,
    pub timestamp: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawReceipt {
    pub owner: Pubkey,
    pub principal: u64,
    pub reward: u64,
    pub remaining: u64,
    pub total_staked: u64,
    pub closed: bool,
    pub timestamp: i64,
}

impl WithdrawReceipt {
    /// Principal returned plus reward settled
    pub fn paid_out(&self) -> Result<u64> {
        self.principal
            .checked_add(self.reward)
            .ok_or_else(|| error!(ErrorCode::ArithmeticOverflow))
    }
}

/// Runs deposit, withdraw, claim and funding as atomic operations.
///
/// Ordering per call:
/// 1. Guard against reentry
/// 2. Validate and refresh the accumulator
/// 3. Finish every pool and stake mutation
/// 4. Move value through the ledger
///
/// If any step fails the pool and stake are restored to their state before the call.
pub struct SettlementEngine<'a, C: ClockSource, L: Ledger> {
    pool: &'a mut StakePool,
    clock: &'a C,
    ledger: &'a mut L,
}

impl<'a, C: ClockSource, L: Ledger> SettlementEngine<'a, C, L> {
    pub fn new(pool: &'a mut StakePool, clock: &'a C, ledger: &'a mut L) -> Self {
        Self {
            pool,
            clock,
            ledger,
        }
    }

    pub fn deposit(&mut self, stake: &mut Stake, owner: Pubkey, amount: u64) -> Result<DepositReceipt> {
        let now = self.clock.now()?;
        let pool_snapshot = self.pool.clone();
        let stake_snapshot = stake.clone();
        self.pool.enter()?;

        match self.apply_deposit(stake, owner, amount, now) {
            Ok(receipt) => {
                self.pool.exit();
                Ok(receipt)
            }
            Err(err) => {
                *self.pool = pool_snapshot;
                *stake = stake_snapshot;
                Err(err)
            }
        }
    }

    /// Withdraw `amount` of principal, or the whole stake when `None`,
    /// together with all reward pending on the stake
    pub fn withdraw(&mut self, stake: &mut Stake, amount: Option<u64>) -> Result<WithdrawReceipt> {
        let now = self.clock.now()?;
        let pool_snapshot = self.pool.clone();
        let stake_snapshot = stake.clone();
        self.pool.enter()?;

        match self.apply_withdraw(stake, amount, now) {
            Ok(receipt) => {
                self.pool.exit();
                Ok(receipt)
            }
            Err(err) => {
                *self.pool = pool_snapshot;
                *stake = stake_snapshot;
                Err(err)
            }
        }
    }

    pub fn claim(&mut self, stake: &mut Stake) -> Result<u64> {
        let now = self.clock.now()?;
        let pool_snapshot = self.pool.clone();
        let stake_snapshot = stake.clone();
        self.pool.enter()?;

        match self.apply_claim(stake, now) {
            Ok(reward) => {
                self.pool.exit();
                Ok(reward)
            }
            Err(err) => {
                *self.pool = pool_snapshot;
                *stake = stake_snapshot;
                Err(err)
            }
        }
    }

    /// Add `amount` to the pool's reward reserve
    pub fn fund(&mut self, funder: Pubkey, amount: u64) -> Result<u64> {
        let now = self.clock.now()?;
        let pool_snapshot = self.pool.clone();
        self.pool.enter()?;

        match self.apply_fund(funder, amount, now) {
            Ok(reward_funded) => {
                self.pool.exit();
                Ok(reward_funded)
            }
            Err(err) => {
                *self.pool = pool_snapshot;
                Err(err)
            }
        }
    }

    fn apply_deposit(&mut self, stake: &mut Stake, owner: Pubkey, amount: u64, now: i64) -> Result<DepositReceipt> {
        let Opening {
            settled_reward,
            created,
        } = registry::open(self.pool, stake, owner, amount, now)?;

        // Net principal against settled reward so at most one transfer can fail
        if amount >= settled_reward {
            self.ledger.debit(&owner, amount - settled_reward)?;
        } else {
            self.ledger.credit(&owner, settled_reward - amount)?;
        }

        Ok(DepositReceipt {
            owner,
            amount,
            reward_paid: settled_reward,
            stake_amount: stake.amount,
            total_staked: self.pool.total_staked,
            created,
            timestamp: now,
        })
    }

    fn apply_withdraw(&mut self, stake: &mut Stake, amount: Option<u64>, now: i64) -> Result<WithdrawReceipt> {
        let Closing {
            principal,
            reward,
            remaining,
            closed,
        } = registry::close(self.pool, stake, amount, now)?;

        let receipt = WithdrawReceipt {
            owner: stake.owner,
            principal,
            reward,
            remaining,
            total_staked: self.pool.total_staked,
            closed,
            timestamp: now,
        };
        self.ledger.credit(&stake.owner, receipt.paid_out()?)?;

        Ok(receipt)
    }

    fn apply_claim(&mut self, stake: &mut Stake, now: i64) -> Result<u64> {
        let reward = registry::settle(self.pool, stake, now)?;
        self.ledger.credit(&stake.owner, reward)?;
        Ok(reward)
    }

    fn apply_fund(&mut self, funder: Pubkey, amount: u64, now: i64) -> Result<u64> {
        require!(amount > 0, ErrorCode::ZeroAmount);

        // Settle elapsed time against the old reserve before raising it
        self.pool.refresh(now)?;
        self.pool.add_funding(amount)?;

        self.ledger.debit(&funder, amount)?;
        Ok(self.pool.reward_funded)
    }
}
