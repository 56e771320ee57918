use crate::constants::{
    LOCKED_LIQUIDITY_SEED, LP_CUSTODY_SEED, LP_DECIMALS, LP_MINT_SEED, PAIR_SEED,
    POOL_AUTHORITY_SEED, TOKEN_A_VAULT_SEED, TOKEN_B_VAULT_SEED,
};
use crate::state::Pair;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Create a pair for two sorted mints together with its vaults and claim token
pub fn process(ctx: Context<InitializePool>) -> Result<()> {
    let token_a_mint = ctx.accounts.token_a_mint.key();
    let token_b_mint = ctx.accounts.token_b_mint.key();
    let lp_mint = ctx.accounts.lp_token_mint.key();

    let pair = &mut ctx.accounts.pair;
    pair.initialize(
        token_a_mint,
        token_b_mint,
        lp_mint,
        ctx.bumps.pair,
        ctx.bumps.pool_authority,
    )?;

    msg!(
        "Pair initialized - Token A: {}, Token B: {}, LP mint: {}",
        token_a_mint,
        token_b_mint,
        lp_mint
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Lower of the two mints
    pub token_a_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Higher of the two mints
    pub token_b_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        space = 8 + Pair::INIT_SPACE,
        payer = payer,
        seeds = [
            PAIR_SEED,
            token_a_mint.key().as_ref(),
            token_b_mint.key().as_ref()
        ],
        bump,
    )]
    pub pair: Box<Account<'info, Pair>>,

    /// PDA authority that owns the vaults, the claim mint and the claim custody
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pair.key().as_ref()],
        bump
    )]
    pub pool_authority: SystemAccount<'info>,

    #[account(
        init,
        payer = payer,
        seeds = [TOKEN_A_VAULT_SEED, pair.key().as_ref()],
        bump,
        token::mint = token_a_mint,
        token::authority = pool_authority,
        token::token_program = token_program,
    )]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = payer,
        seeds = [TOKEN_B_VAULT_SEED, pair.key().as_ref()],
        bump,
        token::mint = token_b_mint,
        token::authority = pool_authority,
        token::token_program = token_program,
    )]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = payer,
        seeds = [LP_MINT_SEED, pair.key().as_ref()],
        bump,
        mint::decimals = LP_DECIMALS,
        mint::authority = pool_authority,
        mint::token_program = token_program,
    )]
    pub lp_token_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Claim tokens handed back for redemption land here before being burned
    #[account(
        init,
        payer = payer,
        seeds = [LP_CUSTODY_SEED, pair.key().as_ref()],
        bump,
        token::mint = lp_token_mint,
        token::authority = pool_authority,
        token::token_program = token_program,
    )]
    pub lp_custody: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Holds the permanently locked minimum liquidity
    #[account(
        init,
        payer = payer,
        seeds = [LOCKED_LIQUIDITY_SEED, pair.key().as_ref()],
        bump,
        token::mint = lp_token_mint,
        token::authority = system_program,
        token::token_program = token_program,
    )]
    pub locked_liquidity: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}
