use super::spl::{PoolSigner, SplLedger, SplVault};
use crate::constants::{
    FEE_CONFIG_SEED, LOCKED_LIQUIDITY_SEED, LP_CUSTODY_SEED, LP_MINT_SEED, POOL_AUTHORITY_SEED,
    TOKEN_A_VAULT_SEED, TOKEN_B_VAULT_SEED,
};
use crate::engine::{AddLiquidityArgs, RemoveLiquidityArgs};
use crate::host::PairEnv;
use crate::state::{block_timestamp, FeeConfig, Pair};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Add liquidity to the pair at the current ratio
pub fn deposit(
    mut ctx: Context<AddLiquidity>,
    amount_a_desired: u64,
    amount_b_desired: u64,
    amount_a_min: u64,
    amount_b_min: u64,
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
            accounts.user_token_a_account.to_account_info(),
            accounts.user_token_b_account.to_account_info(),
        ],
    };
    let mut holders = vec![
        accounts.recipient_lp_token_account.to_account_info(),
        accounts.locked_liquidity.to_account_info(),
        accounts.lp_custody.to_account_info(),
    ];
    if let Some(fee_account) = &accounts.fee_to_lp_token_account {
        holders.push(fee_account.to_account_info());
    }
    let mut ledger = SplLedger {
        signer,
        lp_mint: accounts.lp_token_mint.to_account_info(),
        holders,
    };

    let mut env = PairEnv {
        vault: &mut vault,
        ledger: &mut ledger,
        caller: accounts.user.key(),
        custody: accounts.pool_authority.key(),
        fee_to: accounts.fee_config.fee_to,
        now: block_timestamp(Clock::get()?.unix_timestamp),
    };
    let to = accounts.recipient_lp_token_account.owner;
    let args = AddLiquidityArgs {
        amount_a_desired: amount_a_desired as u128,
        amount_b_desired: amount_b_desired as u128,
        amount_a_min: amount_a_min as u128,
        amount_b_min: amount_b_min as u128,
    };
    accounts.pair.add_liquidity(&mut env, args, &to)?;
    Ok(())
}

/// Redeem claim tokens for a pro-rata share of both reserves
pub fn withdraw(
    mut ctx: Context<RemoveLiquidity>,
    liquidity: u64,
    amount_a_min: u64,
    amount_b_min: u64,
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
            accounts.recipient_token_a_account.to_account_info(),
            accounts.recipient_token_b_account.to_account_info(),
        ],
    };
    let mut holders = vec![
        accounts.user_lp_token_account.to_account_info(),
        accounts.lp_custody.to_account_info(),
    ];
    if let Some(fee_account) = &accounts.fee_to_lp_token_account {
        holders.push(fee_account.to_account_info());
    }
    let mut ledger = SplLedger {
        signer,
        lp_mint: accounts.lp_token_mint.to_account_info(),
        holders,
    };

    let mut env = PairEnv {
        vault: &mut vault,
        ledger: &mut ledger,
        caller: accounts.user.key(),
        custody: accounts.pool_authority.key(),
        fee_to: accounts.fee_config.fee_to,
        now: block_timestamp(Clock::get()?.unix_timestamp),
    };
    let to = accounts.recipient_token_a_account.owner;
    let args = RemoveLiquidityArgs {
        liquidity: liquidity as u128,
        amount_a_min: amount_a_min as u128,
        amount_b_min: amount_b_min as u128,
    };
    accounts.pair.remove_liquidity(&mut env, args, &to)?;
    Ok(())
}

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    #[account(mut, has_one = token_a_mint, has_one = token_b_mint)]
    pub pair: Box<Account<'info, Pair>>,

    #[account(seeds = [FEE_CONFIG_SEED], bump = fee_config.bump)]
    pub fee_config: Box<Account<'info, FeeConfig>>,

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

    #[account(
        mut,
        seeds = [LP_MINT_SEED, pair.key().as_ref()],
        bump
    )]
    pub lp_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [LP_CUSTODY_SEED, pair.key().as_ref()],
        bump
    )]
    pub lp_custody: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [LOCKED_LIQUIDITY_SEED, pair.key().as_ref()],
        bump
    )]
    pub locked_liquidity: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's token A account (source)
    #[account(mut)]
    pub user_token_a_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's token B account (source)
    #[account(mut)]
    pub user_token_b_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the minted claim tokens
    #[account(mut, constraint = recipient_lp_token_account.mint == lp_token_mint.key())]
    pub recipient_lp_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Claim account of the protocol-fee recipient, needed while collection is on
    #[account(mut)]
    pub fee_to_lp_token_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    #[account(mut, has_one = token_a_mint, has_one = token_b_mint)]
    pub pair: Box<Account<'info, Pair>>,

    #[account(seeds = [FEE_CONFIG_SEED], bump = fee_config.bump)]
    pub fee_config: Box<Account<'info, FeeConfig>>,

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

    #[account(
        mut,
        seeds = [LP_MINT_SEED, pair.key().as_ref()],
        bump
    )]
    pub lp_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [LP_CUSTODY_SEED, pair.key().as_ref()],
        bump
    )]
    pub lp_custody: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's claim account (source of the redeemed claim tokens)
    #[account(mut, constraint = user_lp_token_account.mint == lp_token_mint.key())]
    pub user_lp_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives token A
    #[account(mut)]
    pub recipient_token_a_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives token B, must share an owner with the token A recipient
    #[account(
        mut,
        constraint = recipient_token_b_account.owner == recipient_token_a_account.owner
    )]
    pub recipient_token_b_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub fee_to_lp_token_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
