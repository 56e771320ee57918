use super::spl::{CpiBorrower, PoolSigner, SplLedger, SplVault};
use crate::constants::{LP_MINT_SEED, POOL_AUTHORITY_SEED, TOKEN_A_VAULT_SEED, TOKEN_B_VAULT_SEED};
use crate::host::PairEnv;
use crate::state::{block_timestamp, Pair};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Lend `amount` of the receiver's mint for the duration of one borrower CPI.
///
/// `remaining_accounts` are forwarded to the borrower program unchanged and
/// must include whatever it needs to repay the vault.
pub fn lend<'info>(
    mut ctx: Context<'_, '_, 'info, 'info, FlashLoan<'info>>,
    amount: u64,
    data: Vec<u8>,
) -> Result<()> {
    let accounts = &mut ctx.accounts;
    let signer = PoolSigner {
        token_program: accounts.token_program.to_account_info(),
        pool_authority: accounts.pool_authority.to_account_info(),
        pair: accounts.pair.key(),
        authority_bump: accounts.pair.authority_bump,
        user: accounts.user.to_account_info(),
    };
    let mut vault = SplVault {
        signer: signer.clone(),
        mints: vec![
            accounts.token_a_mint.to_account_info(),
            accounts.token_b_mint.to_account_info(),
        ],
        vaults: vec![
            accounts.token_a_vault.to_account_info(),
            accounts.token_b_vault.to_account_info(),
        ],
        participants: vec![accounts.receiver_token_account.to_account_info()],
    };
    let mut ledger = SplLedger {
        signer,
        lp_mint: accounts.lp_token_mint.to_account_info(),
        holders: Vec::new(),
    };
    let mut borrower = CpiBorrower {
        program: accounts.borrower_program.to_account_info(),
        accounts: ctx.remaining_accounts,
    };

    let mut env = PairEnv {
        vault: &mut vault,
        ledger: &mut ledger,
        caller: accounts.user.key(),
        custody: accounts.pool_authority.key(),
        fee_to: None,
        now: block_timestamp(Clock::get()?.unix_timestamp),
    };
    let receiver = accounts.receiver_token_account.owner;
    let asset = accounts.receiver_token_account.mint;
    accounts
        .pair
        .flash_loan(&mut env, &mut borrower, &receiver, &asset, amount as u128, &data)?;
    Ok(())
}

#[derive(Accounts)]
pub struct FlashLoan<'info> {
    #[account(mut, has_one = token_a_mint, has_one = token_b_mint)]
    pub pair: Box<Account<'info, Pair>>,

    #[account(
        seeds = [POOL_AUTHORITY_SEED, pair.key().as_ref()],
        bump = pair.authority_bump
    )]
    pub pool_authority: SystemAccount<'info>,

    pub token_a_mint: Box<InterfaceAccount<'info, Mint>>,
    pub token_b_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [TOKEN_A_VAULT_SEED, pair.key().as_ref()],
        bump
    )]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [TOKEN_B_VAULT_SEED, pair.key().as_ref()],
        bump
    )]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(seeds = [LP_MINT_SEED, pair.key().as_ref()], bump)]
    pub lp_token_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Receives the loan; its mint selects the borrowed asset
    #[account(mut)]
    pub receiver_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: any program exposing `on_flash_loan`; its answer is verified
    #[account(executable)]
    pub borrower_program: UncheckedAccount<'info>,

    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
