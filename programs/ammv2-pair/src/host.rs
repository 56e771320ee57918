//! Collaborators the pair engine drives but does not own.
//!
//! On chain these are backed by SPL token CPIs (see `instructions::spl`);
//! the engine itself only sees the traits, so every operation can be run
//! against any ledger that honors the same contracts.

use anchor_lang::prelude::*;

/// Transfer primitive for the pair's two assets.
///
/// Every call either completes or fails the whole operation. Balances are
/// always re-read through [`AssetVault::balance`] after a transfer; the
/// engine never assumes the requested amount arrived.
pub trait AssetVault {
    /// Amount of `asset` currently held by the pair
    fn balance(&self, asset: &Pubkey) -> Result<u128>;

    /// Pull `amount` of `asset` from `from` into the pair
    fn transfer_in(&mut self, asset: &Pubkey, from: &Pubkey, amount: u128) -> Result<()>;

    /// Send `amount` of `asset` from the pair to `to`
    fn transfer_out(&mut self, asset: &Pubkey, to: &Pubkey, amount: u128) -> Result<()>;
}

/// Claim-token ledger. Holders are identified by owner address.
pub trait ClaimLedger {
    fn total_supply(&self) -> Result<u128>;

    fn balance_of(&self, owner: &Pubkey) -> Result<u128>;

    fn mint(&mut self, to: &Pubkey, amount: u128) -> Result<()>;

    fn burn(&mut self, from: &Pubkey, amount: u128) -> Result<()>;

    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u128) -> Result<()>;
}

/// Receiver of a flash loan.
///
/// Called synchronously while the pair is locked. It must repay `amount + fee`
/// to the pair before returning and answer with
/// [`flash_loan_callback_success`](crate::constants::flash_loan_callback_success).
pub trait FlashBorrower {
    fn on_flash_loan(
        &mut self,
        initiator: &Pubkey,
        asset: &Pubkey,
        amount: u128,
        fee: u128,
        data: &[u8],
    ) -> Result<[u8; 32]>;
}

/// Everything one engine call needs besides the pair state itself
pub struct PairEnv<'h> {
    pub vault: &'h mut dyn AssetVault,
    pub ledger: &'h mut dyn ClaimLedger,

    /// Signer of the current operation
    pub caller: Pubkey,

    /// Owner of the claim tokens held in the pair's own custody
    pub custody: Pubkey,

    /// Protocol-fee recipient, read from the global fee configuration
    pub fee_to: Option<Pubkey>,

    /// Seconds modulo 2^32
    pub now: u32,
}
