//! SPL token backing for the engine's collaborator traits.
//!
//! Holders are resolved by (mint, owner) among the token accounts passed to
//! the instruction, and balances are always decoded fresh from account data so
//! they reflect every CPI made earlier in the same instruction.

use crate::constants::POOL_AUTHORITY_SEED;
use crate::errors::AmmError;
use crate::host::{AssetVault, ClaimLedger, FlashBorrower};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke};
use anchor_spl::token_interface::{self, Burn, Mint, MintTo, TokenAccount, TransferChecked};

/// Accounts needed to sign token CPIs, either as the user or as the pool
#[derive(Clone)]
pub struct PoolSigner<'info> {
    pub token_program: AccountInfo<'info>,
    pub pool_authority: AccountInfo<'info>,
    pub pair: Pubkey,
    pub authority_bump: u8,
    /// Signer of the instruction
    pub user: AccountInfo<'info>,
}

impl<'info> PoolSigner<'info> {
    fn with_pool_seeds<R>(&self, f: impl FnOnce(&[&[&[u8]]]) -> R) -> R {
        let bump = [self.authority_bump];
        let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, self.pair.as_ref(), &bump];
        f(&[seeds])
    }

    fn transfer(
        &self,
        from: AccountInfo<'info>,
        mint: &AccountInfo<'info>,
        to: AccountInfo<'info>,
        amount: u128,
        as_pool: bool,
    ) -> Result<()> {
        let decimals = read_mint(mint)?.decimals;
        let amount = to_amount(amount)?;
        let authority = if as_pool {
            self.pool_authority.clone()
        } else {
            self.user.clone()
        };
        let accounts = TransferChecked {
            from,
            mint: mint.clone(),
            to,
            authority,
        };

        if as_pool {
            self.with_pool_seeds(|signer_seeds| {
                token_interface::transfer_checked(
                    CpiContext::new_with_signer(
                        self.token_program.clone(),
                        accounts,
                        signer_seeds,
                    ),
                    amount,
                    decimals,
                )
            })
        } else {
            token_interface::transfer_checked(
                CpiContext::new(self.token_program.clone(), accounts),
                amount,
                decimals,
            )
        }
    }
}

pub(crate) fn to_amount(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(AmmError::Overflow))
}

fn read_token_account(info: &AccountInfo) -> Result<TokenAccount> {
    let data = info.try_borrow_data()?;
    TokenAccount::try_deserialize(&mut &data[..])
}

fn read_mint(info: &AccountInfo) -> Result<Mint> {
    let data = info.try_borrow_data()?;
    Mint::try_deserialize(&mut &data[..])
}

/// Token account for `mint` owned by `owner` among `candidates`
fn find_holder<'info>(
    candidates: &[AccountInfo<'info>],
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<AccountInfo<'info>> {
    for info in candidates {
        let account = read_token_account(info)?;
        if account.mint == *mint && account.owner == *owner {
            return Ok(info.clone());
        }
    }
    err!(AmmError::Forbidden)
}

/// The pair's asset vaults plus the user-side token accounts of one instruction
pub struct SplVault<'info> {
    pub signer: PoolSigner<'info>,
    /// Asset mints, index-aligned with `vaults`
    pub mints: Vec<AccountInfo<'info>>,
    pub vaults: Vec<AccountInfo<'info>>,
    pub participants: Vec<AccountInfo<'info>>,
}

impl<'info> SplVault<'info> {
    fn index_of(&self, asset: &Pubkey) -> Result<usize> {
        self.mints
            .iter()
            .position(|mint| mint.key == asset)
            .ok_or_else(|| error!(AmmError::Forbidden))
    }
}

impl<'info> AssetVault for SplVault<'info> {
    fn balance(&self, asset: &Pubkey) -> Result<u128> {
        let index = self.index_of(asset)?;
        Ok(read_token_account(&self.vaults[index])?.amount as u128)
    }

    fn transfer_in(&mut self, asset: &Pubkey, from: &Pubkey, amount: u128) -> Result<()> {
        require_keys_eq!(*from, self.signer.user.key(), AmmError::Forbidden);
        let index = self.index_of(asset)?;
        let source = find_holder(&self.participants, asset, from)?;
        self.signer.transfer(
            source,
            &self.mints[index],
            self.vaults[index].clone(),
            amount,
            false,
        )
    }

    fn transfer_out(&mut self, asset: &Pubkey, to: &Pubkey, amount: u128) -> Result<()> {
        let index = self.index_of(asset)?;
        let destination = find_holder(&self.participants, asset, to)?;
        self.signer.transfer(
            self.vaults[index].clone(),
            &self.mints[index],
            destination,
            amount,
            true,
        )
    }
}

/// Claim-token mint plus every claim account an instruction may touch
pub struct SplLedger<'info> {
    pub signer: PoolSigner<'info>,
    pub lp_mint: AccountInfo<'info>,
    pub holders: Vec<AccountInfo<'info>>,
}

impl<'info> ClaimLedger for SplLedger<'info> {
    fn total_supply(&self) -> Result<u128> {
        Ok(read_mint(&self.lp_mint)?.supply as u128)
    }

    fn balance_of(&self, owner: &Pubkey) -> Result<u128> {
        let holder = find_holder(&self.holders, self.lp_mint.key, owner)?;
        Ok(read_token_account(&holder)?.amount as u128)
    }

    fn mint(&mut self, to: &Pubkey, amount: u128) -> Result<()> {
        let destination = find_holder(&self.holders, self.lp_mint.key, to)?;
        let amount = to_amount(amount)?;
        self.signer.with_pool_seeds(|signer_seeds| {
            token_interface::mint_to(
                CpiContext::new_with_signer(
                    self.signer.token_program.clone(),
                    MintTo {
                        mint: self.lp_mint.clone(),
                        to: destination,
                        authority: self.signer.pool_authority.clone(),
                    },
                    signer_seeds,
                ),
                amount,
            )
        })
    }

    fn burn(&mut self, from: &Pubkey, amount: u128) -> Result<()> {
        require_keys_eq!(
            *from,
            self.signer.pool_authority.key(),
            AmmError::Forbidden
        );
        let source = find_holder(&self.holders, self.lp_mint.key, from)?;
        let amount = to_amount(amount)?;
        self.signer.with_pool_seeds(|signer_seeds| {
            token_interface::burn(
                CpiContext::new_with_signer(
                    self.signer.token_program.clone(),
                    Burn {
                        mint: self.lp_mint.clone(),
                        from: source,
                        authority: self.signer.pool_authority.clone(),
                    },
                    signer_seeds,
                ),
                amount,
            )
        })
    }

    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u128) -> Result<()> {
        require_keys_eq!(*from, self.signer.user.key(), AmmError::Forbidden);
        let source = find_holder(&self.holders, self.lp_mint.key, from)?;
        let destination = find_holder(&self.holders, self.lp_mint.key, to)?;
        self.signer
            .transfer(source, &self.lp_mint, destination, amount, false)
    }
}

/// Arguments of the `on_flash_loan` instruction a borrower program exposes
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct OnFlashLoanArgs {
    pub initiator: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub data: Vec<u8>,
}

/// Anchor discriminator of the borrower's `on_flash_loan` instruction
pub fn on_flash_loan_discriminator() -> [u8; 8] {
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(b"global:on_flash_loan").to_bytes()[..8]);
    discriminator
}

/// Borrower program reached through CPI. It answers via return data.
pub struct CpiBorrower<'a, 'info> {
    pub program: AccountInfo<'info>,
    /// Forwarded untouched to the borrower
    pub accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> FlashBorrower for CpiBorrower<'a, 'info> {
    fn on_flash_loan(
        &mut self,
        initiator: &Pubkey,
        asset: &Pubkey,
        amount: u128,
        fee: u128,
        data: &[u8],
    ) -> Result<[u8; 32]> {
        let args = OnFlashLoanArgs {
            initiator: *initiator,
            asset: *asset,
            amount: to_amount(amount)?,
            fee: to_amount(fee)?,
            data: data.to_vec(),
        };
        let mut ix_data = on_flash_loan_discriminator().to_vec();
        args.serialize(&mut ix_data)
            .map_err(|_| ProgramError::InvalidInstructionData)?;

        let metas = self
            .accounts
            .iter()
            .map(|info| AccountMeta {
                pubkey: *info.key,
                is_signer: info.is_signer,
                is_writable: info.is_writable,
            })
            .collect();
        let ix = Instruction {
            program_id: *self.program.key,
            accounts: metas,
            data: ix_data,
        };

        let mut infos = self.accounts.to_vec();
        infos.push(self.program.clone());
        invoke(&ix, &infos)?;

        let (program_id, ack) = get_return_data().ok_or(AmmError::CallbackFailed)?;
        require_keys_eq!(program_id, *self.program.key, AmmError::CallbackFailed);
        <[u8; 32]>::try_from(ack.as_slice()).map_err(|_| error!(AmmError::CallbackFailed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_discriminator_is_stable() {
        assert_eq!(
            on_flash_loan_discriminator().to_vec(),
            hash(b"global:on_flash_loan").to_bytes()[..8].to_vec()
        );
    }

    #[test]
    fn amounts_beyond_u64_are_rejected() {
        assert_eq!(to_amount(u64::MAX as u128).unwrap(), u64::MAX);
        assert!(to_amount(u64::MAX as u128 + 1).is_err());
    }
}
