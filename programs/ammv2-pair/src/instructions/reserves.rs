use super::spl::{PoolSigner, SplLedger, SplVault};
use crate::constants::{LP_MINT_SEED, POOL_AUTHORITY_SEED, TOKEN_A_VAULT_SEED, TOKEN_B_VAULT_SEED};
use crate::host::PairEnv;
use crate::state::{block_timestamp, Pair};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Send vault balances above the recorded reserves to the recipient
pub fn skim(mut ctx: Context<SkimReserves>) -> Result<()> {
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
            accounts.recipient_token_a_account.to_account_info(),
            accounts.recipient_token_b_account.to_account_info(),
        ],
    };
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
    let to = accounts.recipient_token_a_account.owner;
    accounts.pair.skim(&mut env, &to)
}

/// Force the recorded reserves to match the vault balances
pub fn sync(mut ctx: Context<SyncReserves>) -> Result<()> {
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
        participants: Vec::new(),
    };
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
    accounts.pair.sync(&mut env)
}

#[derive(Accounts)]
pub struct SkimReserves<'info> {
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

    #[account(mut, constraint = recipient_token_a_account.mint == token_a_mint.key())]
    pub recipient_token_a_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = recipient_token_b_account.mint == token_b_mint.key(),
        constraint = recipient_token_b_account.owner == recipient_token_a_account.owner
    )]
    pub recipient_token_b_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct SyncReserves<'info> {
    #[account(mut, has_one = token_a_mint, has_one = token_b_mint)]
    pub pair: Box<Account<'info, Pair>>,

    #[account(
        seeds = [POOL_AUTHORITY_SEED, pair.key().as_ref()],
        bump = pair.authority_bump
    )]
    pub pool_authority: SystemAccount<'info>,

    pub token_a_mint: Box<InterfaceAccount<'info, Mint>>,
    pub token_b_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(seeds = [TOKEN_A_VAULT_SEED, pair.key().as_ref()], bump)]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(seeds = [TOKEN_B_VAULT_SEED, pair.key().as_ref()], bump)]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(seeds = [LP_MINT_SEED, pair.key().as_ref()], bump)]
    pub lp_token_mint: Box<InterfaceAccount<'info, Mint>>,

    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
