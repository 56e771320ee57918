use super::spl::{PoolSigner, SplLedger, SplVault};
use crate::constants::{LP_MINT_SEED, POOL_AUTHORITY_SEED, TOKEN_A_VAULT_SEED, TOKEN_B_VAULT_SEED};
use crate::errors::AmmError;
use crate::host::PairEnv;
use crate::state::{block_timestamp, Pair};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Swap an exact input amount using the constant product formula (x * y = k)
pub fn exchange(
    mut ctx: Context<SwapTokens>,
    amount_in: u64,
    minimum_amount_out: u64,
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
        participants: vec![
            accounts.user_input_token_account.to_account_info(),
            accounts.recipient_output_token_account.to_account_info(),
        ],
    };
    // Swaps never move claim tokens
    let mut ledger = SplLedger {
        signer,
        lp_mint: accounts.lp_token_mint.to_account_info(),
        holders: Vec::new(),
    };

    let mut env = PairEnv {
        vault: &mut vault,
        ledger: &mut ledger,
        caller: accounts.user.key(),
        custody: accounts.pool_authority.key(),
        fee_to: None,
        now: block_timestamp(Clock::get()?.unix_timestamp),
    };
    let asset_in = accounts.user_input_token_account.mint;
    let to = accounts.recipient_output_token_account.owner;
    let outcome = accounts.pair.swap(
        &mut env,
        &asset_in,
        amount_in as u128,
        minimum_amount_out as u128,
        &to,
    )?;

    msg!(
        "Swap completed - Input: {}, Output: {}",
        outcome.amount_in,
        outcome.amount_out
    );
    Ok(())
}

#[derive(Accounts)]
pub struct SwapTokens<'info> {
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

    /// User's input token account (source)
    #[account(mut)]
    pub user_input_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Destination for the output token
    #[account(
        mut,
        constraint = recipient_output_token_account.mint != user_input_token_account.mint
            @ AmmError::IdenticalAssets
    )]
    pub recipient_output_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
