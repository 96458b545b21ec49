use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Admission window is closed - deposits are no longer accepted")]
    WindowClosed,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Owner has no open stake")]
    NoSuchStake,
    #[msg("Withdrawal exceeds staked amount")]
    InsufficientStake,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Another operation on this pool is in progress")]
    ReentrancyRejected,
    #[msg("Insufficient funds for transfer")]
    InsufficientFunds,
    #[msg("Time unit must be positive and at most one year")]
    InvalidTimeUnit,
    #[msg("Admission window length is out of range")]
    InvalidAdmissionWindow,
    #[msg("Reward policy must emit a positive reward")]
    InvalidRewardPolicy,
    #[msg("Stake belongs to a different owner")]
    StakeOwnerMismatch,
    #[msg("Ledger transfer requested for an unexpected account")]
    LedgerAccountMismatch,
    #[msg("No rewards to claim")]
    NoRewardsToClaim,
}
