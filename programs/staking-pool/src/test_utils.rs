//! Shared fixtures for unit tests: a manually driven clock, an in-memory
//! ledger and a multi-staker harness around the settlement engine.

use crate::engine::{ClockSource, DepositReceipt, Ledger, SettlementEngine, WithdrawReceipt};
use crate::errors::ErrorCode;
use crate::states::{PoolConfig, RewardPolicy, Stake, StakePool};
use anchor_lang::prelude::*;
use std::cell::Cell;
use std::collections::BTreeMap;

pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> Result<i64> {
        Ok(self.now.get())
    }
}

/// Account balances plus the pool vault, with running transfer totals
#[derive(Default, Debug)]
pub struct MemoryLedger {
    pub balances: BTreeMap<Pubkey, u64>,
    pub vault: u64,
    pub total_debited: u128,
    pub total_credited: u128,
}

impl MemoryLedger {
    pub fn balance_of(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }
}

impl Ledger for MemoryLedger {
    fn debit(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.balance_of(account);
        require!(balance >= amount, ErrorCode::InsufficientFunds);
        let vault = self
            .vault
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        self.balances.insert(*account, balance - amount);
        self.vault = vault;
        self.total_debited += amount as u128;
        Ok(())
    }

    fn credit(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        require!(self.vault >= amount, ErrorCode::InsufficientFunds);
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        self.vault -= amount;
        self.balances.insert(*account, balance);
        self.total_credited += amount as u128;
        Ok(())
    }
}

/// A pool with its stakes keyed by owner, driven through the settlement engine
pub struct PoolHarness {
    pub pool: StakePool,
    pub stakes: BTreeMap<Pubkey, Stake>,
    pub clock: ManualClock,
    pub ledger: MemoryLedger,
    pub creator: Pubkey,
}

impl PoolHarness {
    /// Pool opened at t=0. A budget policy is funded by the creator up front.
    pub fn new(config: PoolConfig) -> Self {
        let creator = Pubkey::new_unique();
        let mut pool = StakePool::default();
        let initial_funding = pool
            .configure(creator, Pubkey::new_unique(), &config, 0)
            .unwrap();

        let mut harness = Self {
            pool,
            stakes: BTreeMap::new(),
            clock: ManualClock::new(0),
            ledger: MemoryLedger::default(),
            creator,
        };
        if initial_funding > 0 {
            harness.mint(creator, initial_funding);
            harness.fund(creator, initial_funding).unwrap();
        }
        harness
    }

    /// Fixed-rate pool with `funding` already in the reward reserve
    pub fn fixed_rate(time_unit: i64, admission_units: u32, reward_per_unit: u64, funding: u64) -> Self {
        let mut harness = Self::new(PoolConfig {
            time_unit,
            admission_units,
            reward_policy: RewardPolicy::FixedRate { reward_per_unit },
        });
        if funding > 0 {
            let creator = harness.creator;
            harness.mint(creator, funding);
            harness.fund(creator, funding).unwrap();
        }
        harness
    }

    pub fn mint(&mut self, account: Pubkey, amount: u64) {
        *self.ledger.balances.entry(account).or_insert(0) += amount;
    }

    /// Fresh account holding `amount`
    pub fn staker(&mut self, amount: u64) -> Pubkey {
        let account = Pubkey::new_unique();
        self.mint(account, amount);
        account
    }

    pub fn at(&mut self, now: i64) -> &mut Self {
        self.clock.set(now);
        self
    }

    pub fn fund(&mut self, funder: Pubkey, amount: u64) -> Result<u64> {
        SettlementEngine::new(&mut self.pool, &self.clock, &mut self.ledger).fund(funder, amount)
    }

    pub fn deposit(&mut self, owner: Pubkey, amount: u64) -> Result<DepositReceipt> {
        let mut stake = self.stakes.get(&owner).cloned().unwrap_or_default();
        let receipt = SettlementEngine::new(&mut self.pool, &self.clock, &mut self.ledger)
            .deposit(&mut stake, owner, amount)?;
        self.stakes.insert(owner, stake);
        Ok(receipt)
    }

    pub fn withdraw(&mut self, owner: Pubkey, amount: Option<u64>) -> Result<WithdrawReceipt> {
        let mut stake = self.stakes.get(&owner).cloned().unwrap_or_default();
        let receipt = SettlementEngine::new(&mut self.pool, &self.clock, &mut self.ledger)
            .withdraw(&mut stake, amount)?;
        if receipt.closed {
            self.stakes.remove(&owner);
        } else {
            self.stakes.insert(owner, stake);
        }
        Ok(receipt)
    }

    pub fn claim(&mut self, owner: Pubkey) -> Result<u64> {
        let mut stake = self.stakes.get(&owner).cloned().unwrap_or_default();
        let reward = SettlementEngine::new(&mut self.pool, &self.clock, &mut self.ledger)
            .claim(&mut stake)?;
        self.stakes.insert(owner, stake);
        Ok(reward)
    }

    pub fn stake_of(&self, owner: Pubkey) -> u64 {
        self.stakes.get(&owner).map(|stake| stake.amount).unwrap_or(0)
    }

    pub fn pending_reward(&self, owner: Pubkey) -> Result<u64> {
        match self.stakes.get(&owner) {
            Some(stake) => self.pool.pending_reward(stake, self.clock.now()?),
            None => Ok(0),
        }
    }

    pub fn balance_of(&self, owner: Pubkey) -> u64 {
        self.ledger.balance_of(&owner)
    }

    pub fn sum_of_stakes(&self) -> u64 {
        self.stakes.values().map(|stake| stake.amount).sum()
    }
}
