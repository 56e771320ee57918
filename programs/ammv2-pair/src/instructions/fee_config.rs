use crate::constants::FEE_CONFIG_SEED;
use crate::errors::AmmError;
use crate::program::Ammv2Pair;
use crate::state::FeeConfig;
use anchor_lang::prelude::*;

/// Only the program's upgrade authority may create the fee configuration.
/// Immutable programs (no upgrade authority) cannot create one at all.
pub fn check_upgrade_authority(upgrade_authority: Option<Pubkey>, signer: &Pubkey) -> Result<()> {
    match upgrade_authority {
        Some(authority) if authority == *signer => Ok(()),
        _ => err!(AmmError::Forbidden),
    }
}

/// Create the global fee configuration with collection switched off
pub fn initialize(ctx: Context<InitializeFeeConfig>, authority: Pubkey) -> Result<()> {
    check_upgrade_authority(
        ctx.accounts.program_data.upgrade_authority_address,
        &ctx.accounts.payer.key(),
    )?;

    let fee_config = &mut ctx.accounts.fee_config;
    fee_config.authority = authority;
    fee_config.fee_to = None;
    fee_config.bump = ctx.bumps.fee_config;

    msg!("Fee config initialized - Authority: {}", authority);
    Ok(())
}

/// Point protocol-fee collection at `fee_to`, or switch it off with `None`
pub fn set_fee_to(ctx: Context<SetFeeTo>, fee_to: Option<Pubkey>) -> Result<()> {
    ctx.accounts.fee_config.fee_to = fee_to;

    match fee_to {
        Some(recipient) => msg!("Protocol fee on - Recipient: {}", recipient),
        None => msg!("Protocol fee off"),
    }
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeFeeConfig<'info> {
    #[account(
        init,
        space = 8 + FeeConfig::INIT_SPACE,
        payer = payer,
        seeds = [FEE_CONFIG_SEED],
        bump,
    )]
    pub fee_config: Account<'info, FeeConfig>,

    #[account(
        constraint = program.programdata_address()? == Some(program_data.key())
            @ AmmError::Forbidden
    )]
    pub program: Program<'info, Ammv2Pair>,

    pub program_data: Account<'info, ProgramData>,

    /// Must be the upgrade authority recorded in `program_data`
    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetFeeTo<'info> {
    #[account(
        mut,
        seeds = [FEE_CONFIG_SEED],
        bump = fee_config.bump,
        has_one = authority @ AmmError::Forbidden,
    )]
    pub fee_config: Account<'info, FeeConfig>,

    pub authority: Signer<'info>,
}
