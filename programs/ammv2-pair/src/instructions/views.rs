use super::spl::to_amount;
use crate::errors::AmmError;
use crate::math;
use crate::state::Pair;
use anchor_lang::prelude::*;

/// Largest flash loan currently available for `mint`
pub fn max_flash_loan(ctx: Context<PairView>, mint: Pubkey) -> Result<u64> {
    to_amount(ctx.accounts.pair.max_loanable(&mint))
}

/// Fee owed on a flash loan of `amount` of `mint`
pub fn flash_fee(ctx: Context<PairView>, mint: Pubkey, amount: u64) -> Result<u64> {
    to_amount(ctx.accounts.pair.loan_fee(&mint, amount as u128)?)
}

/// Output of an exact-input swap of `amount_in` of `mint_in` at current reserves
pub fn quote_amount_out(ctx: Context<PairView>, mint_in: Pubkey, amount_in: u64) -> Result<u64> {
    let pair = &ctx.accounts.pair;
    let side_in = pair.side_of(&mint_in).ok_or(AmmError::Forbidden)?;
    let amount_out = math::get_amount_out(
        amount_in as u128,
        pair.reserve_of(side_in),
        pair.reserve_of(side_in.opposite()),
    )?;
    to_amount(amount_out)
}

#[derive(Accounts)]
pub struct PairView<'info> {
    pub pair: Box<Account<'info, Pair>>,
}
