use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod host;
pub mod instructions;
pub mod math;
pub mod state;

#[cfg(test)]
mod testing;

use instructions::*;

declare_id!("FNanxB39Z263jxminWv9fdGwvqqnLBnTHMkgDiQNiAxd");

#[program]
pub mod ammv2_pair {
    use super::*;

    /// Create the global protocol-fee configuration
    pub fn initialize_fee_config(
        ctx: Context<InitializeFeeConfig>,
        authority: Pubkey,
    ) -> Result<()> {
        instructions::fee_config::initialize(ctx, authority)
    }

    /// Turn protocol-fee collection on for `fee_to`, or off with `None`
    pub fn set_fee_to(ctx: Context<SetFeeTo>, fee_to: Option<Pubkey>) -> Result<()> {
        instructions::fee_config::set_fee_to(ctx, fee_to)
    }

    /// Initialize a new pair for two sorted mints
    pub fn initialize_pool(ctx: Context<InitializePool>) -> Result<()> {
        instructions::initialize_pool::process(ctx)
    }

    /// Add liquidity to the pair and receive LP tokens
    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        amount_a_desired: u64,
        amount_b_desired: u64,
        amount_a_min: u64,
        amount_b_min: u64,
    ) -> Result<()> {
        instructions::manage_liquidity::deposit(
            ctx,
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
        )
    }

    /// Remove liquidity from the pair by redeeming LP tokens
    pub fn remove_liquidity(
        ctx: Context<RemoveLiquidity>,
        liquidity: u64,
        amount_a_min: u64,
        amount_b_min: u64,
    ) -> Result<()> {
        instructions::manage_liquidity::withdraw(ctx, liquidity, amount_a_min, amount_b_min)
    }

    /// Swap tokens using the constant product formula
    pub fn swap_tokens(
        ctx: Context<SwapTokens>,
        amount_in: u64,
        minimum_amount_out: u64,
    ) -> Result<()> {
        instructions::swap::exchange(ctx, amount_in, minimum_amount_out)
    }

    /// Send balances above the reserves to a recipient
    pub fn skim(ctx: Context<SkimReserves>) -> Result<()> {
        instructions::reserves::skim(ctx)
    }

    /// Force reserves to match balances
    pub fn sync(ctx: Context<SyncReserves>) -> Result<()> {
        instructions::reserves::sync(ctx)
    }

    /// Borrow from a vault within a single borrower callback
    pub fn flash_loan<'info>(
        ctx: Context<'_, '_, 'info, 'info, FlashLoan<'info>>,
        amount: u64,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::flash_loan::lend(ctx, amount, data)
    }

    /// Largest flash loan currently available for `mint`
    pub fn max_flash_loan(ctx: Context<PairView>, mint: Pubkey) -> Result<u64> {
        instructions::views::max_flash_loan(ctx, mint)
    }

    /// Fee owed on a flash loan of `amount` of `mint`
    pub fn flash_fee(ctx: Context<PairView>, mint: Pubkey, amount: u64) -> Result<u64> {
        instructions::views::flash_fee(ctx, mint, amount)
    }

    /// Output of an exact-input swap at current reserves
    pub fn quote_amount_out(
        ctx: Context<PairView>,
        mint_in: Pubkey,
        amount_in: u64,
    ) -> Result<u64> {
        instructions::views::quote_amount_out(ctx, mint_in, amount_in)
    }
}
