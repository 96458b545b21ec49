use crate::errors::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::system_program;

/// Moves value between participant accounts and the pool.
///
/// `debit` pulls `amount` from `account` into the pool, `credit` pays `amount`
/// from the pool to `account`. Each call is atomic and fails on insufficient funds.
pub trait Ledger {
    fn debit(&mut self, account: &Pubkey, amount: u64) -> Result<()>;
    fn credit(&mut self, account: &Pubkey, amount: u64) -> Result<()>;
}

/// Lamport ledger between a signing participant and the pool vault PDA
pub struct VaultLedger<'info> {
    participant: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
}

impl<'info> VaultLedger<'info> {
    pub fn new(
        participant: AccountInfo<'info>,
        vault: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
    ) -> Self {
        Self {
            participant,
            vault,
            system_program,
        }
    }
}

impl<'info> Ledger for VaultLedger<'info> {
    fn debit(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*account, self.participant.key(), ErrorCode::LedgerAccountMismatch);
        require!(
            self.participant.lamports() >= amount,
            ErrorCode::InsufficientFunds
        );

        // participant is a system-owned signer, so a System transfer is required
        let cpi_context = CpiContext::new(
            self.system_program.clone(),
            system_program::Transfer {
                from: self.participant.clone(),
                to: self.vault.clone(),
            },
        );
        system_program::transfer(cpi_context, amount)
    }

    fn credit(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*account, self.participant.key(), ErrorCode::LedgerAccountMismatch);

        // Vault must stay rent exempt
        let rent_floor = Rent::get()?.minimum_balance(self.vault.data_len());
        let available = self.vault.lamports().saturating_sub(rent_floor);
        require!(available >= amount, ErrorCode::InsufficientFunds);

        // Vault is program-owned and carries data: mutate lamports directly
        let mut vault_lamports = self.vault.try_borrow_mut_lamports()?;
        let mut participant_lamports = self.participant.try_borrow_mut_lamports()?;

        **vault_lamports = (**vault_lamports)
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientFunds)?;
        **participant_lamports = (**participant_lamports)
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        Ok(())
    }
}
