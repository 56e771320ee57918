use crate::constants::{LOCKED_LIQUIDITY_OWNER, MINIMUM_LIQUIDITY, PROTOCOL_FEE_DIVISOR};
use crate::errors::AmmError;
use crate::events::{BurnEvent, MintEvent};
use crate::host::PairEnv;
use crate::math::{self, U256};
use crate::state::Pair;
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddLiquidityArgs {
    pub amount_a_desired: u128,
    pub amount_b_desired: u128,
    pub amount_a_min: u128,
    pub amount_b_min: u128,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoveLiquidityArgs {
    pub liquidity: u128,
    pub amount_a_min: u128,
    pub amount_b_min: u128,
}

/// Amounts actually contributed and claim tokens minted for them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintOutcome {
    pub amount_a: u128,
    pub amount_b: u128,
    pub liquidity: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurnOutcome {
    pub amount_a: u128,
    pub amount_b: u128,
}

impl Pair {
    /// Deposit both assets at the current ratio and mint claim tokens to `to`.
    pub fn add_liquidity(
        &mut self,
        env: &mut PairEnv,
        args: AddLiquidityArgs,
        to: &Pubkey,
    ) -> Result<MintOutcome> {
        self.locked(|pair| pair.mint_locked(env, args, to))
    }

    /// Redeem `args.liquidity` claim tokens for a pro-rata share of both reserves.
    pub fn remove_liquidity(
        &mut self,
        env: &mut PairEnv,
        args: RemoveLiquidityArgs,
        to: &Pubkey,
    ) -> Result<BurnOutcome> {
        self.locked(|pair| pair.burn_locked(env, args, to))
    }

    /// Amounts to pull for a deposit, matched to the reserve ratio
    fn deposit_amounts(&self, args: &AddLiquidityArgs) -> Result<(u128, u128)> {
        if self.reserve_a == 0 && self.reserve_b == 0 {
            return Ok((args.amount_a_desired, args.amount_b_desired));
        }

        let amount_b_optimal = math::quote(args.amount_a_desired, self.reserve_a, self.reserve_b)?;
        if amount_b_optimal <= args.amount_b_desired {
            require!(
                amount_b_optimal >= args.amount_b_min,
                AmmError::InsufficientInputAmount
            );
            return Ok((args.amount_a_desired, amount_b_optimal));
        }

        let amount_a_optimal = math::quote(args.amount_b_desired, self.reserve_b, self.reserve_a)?;
        require!(
            amount_a_optimal <= args.amount_a_desired && amount_a_optimal >= args.amount_a_min,
            AmmError::InsufficientInputAmount
        );
        Ok((amount_a_optimal, args.amount_b_desired))
    }

    fn mint_locked(
        &mut self,
        env: &mut PairEnv,
        args: AddLiquidityArgs,
        to: &Pubkey,
    ) -> Result<MintOutcome> {
        let (deposit_a, deposit_b) = self.deposit_amounts(&args)?;
        let (token_a, token_b) = (self.token_a_mint, self.token_b_mint);
        env.vault.transfer_in(&token_a, &env.caller, deposit_a)?;
        env.vault.transfer_in(&token_b, &env.caller, deposit_b)?;

        let (reserve_a, reserve_b) = (self.reserve_a, self.reserve_b);
        let balance_a = env.vault.balance(&token_a)?;
        let balance_b = env.vault.balance(&token_b)?;
        let amount_a = balance_a.checked_sub(reserve_a).ok_or(AmmError::Overflow)?;
        let amount_b = balance_b.checked_sub(reserve_b).ok_or(AmmError::Overflow)?;

        let fee_on = self.mint_fee(env, reserve_a, reserve_b)?;
        let total_supply = env.ledger.total_supply()?;
        let liquidity = if total_supply == 0 {
            let root = math::to_u128(math::sqrt(math::product(amount_a, amount_b)))?;
            let liquidity = root
                .checked_sub(MINIMUM_LIQUIDITY)
                .ok_or(AmmError::InsufficientLiquidityMinted)?;
            env.ledger.mint(&LOCKED_LIQUIDITY_OWNER, MINIMUM_LIQUIDITY)?;
            liquidity
        } else {
            std::cmp::min(
                math::mul_div(amount_a, total_supply, reserve_a)?,
                math::mul_div(amount_b, total_supply, reserve_b)?,
            )
        };
        require!(liquidity > 0, AmmError::InsufficientLiquidityMinted);

        env.ledger.mint(to, liquidity)?;
        self.update(balance_a, balance_b, env.now)?;
        if fee_on {
            self.set_k_last(math::product(self.reserve_a, self.reserve_b));
        }

        msg!(
            "Liquidity added - Token A: {}, Token B: {}, LP tokens: {}",
            amount_a,
            amount_b,
            liquidity
        );
        emit!(MintEvent {
            sender: env.caller,
            amount_a,
            amount_b,
        });

        Ok(MintOutcome {
            amount_a,
            amount_b,
            liquidity,
        })
    }

    fn burn_locked(
        &mut self,
        env: &mut PairEnv,
        args: RemoveLiquidityArgs,
        to: &Pubkey,
    ) -> Result<BurnOutcome> {
        env.ledger
            .transfer_from(&env.caller, &env.custody, args.liquidity)?;

        let (token_a, token_b) = (self.token_a_mint, self.token_b_mint);
        let (reserve_a, reserve_b) = (self.reserve_a, self.reserve_b);
        let balance_a = env.vault.balance(&token_a)?;
        let balance_b = env.vault.balance(&token_b)?;

        let fee_on = self.mint_fee(env, reserve_a, reserve_b)?;
        let held = env.ledger.balance_of(&env.custody)?;
        let total_supply = env.ledger.total_supply()?;
        let amount_a = math::mul_div(held, balance_a, total_supply)?;
        let amount_b = math::mul_div(held, balance_b, total_supply)?;
        require!(
            amount_a > 0 && amount_b > 0,
            AmmError::InsufficientLiquidityBurned
        );
        require!(
            amount_a >= args.amount_a_min && amount_b >= args.amount_b_min,
            AmmError::InsufficientOutputAmount
        );

        env.ledger.burn(&env.custody, held)?;
        env.vault.transfer_out(&token_a, to, amount_a)?;
        env.vault.transfer_out(&token_b, to, amount_b)?;

        let balance_a = env.vault.balance(&token_a)?;
        let balance_b = env.vault.balance(&token_b)?;
        self.update(balance_a, balance_b, env.now)?;
        if fee_on {
            self.set_k_last(math::product(self.reserve_a, self.reserve_b));
        }

        msg!(
            "Liquidity removed - Token A: {}, Token B: {}, LP tokens burned: {}",
            amount_a,
            amount_b,
            held
        );
        emit!(BurnEvent {
            sender: env.caller,
            amount_a,
            amount_b,
            to: *to,
        });

        Ok(BurnOutcome { amount_a, amount_b })
    }

    /// Protocol-fee checkpoint, run before liquidity math in mint and burn.
    ///
    /// Mints the fee recipient one sixth of the growth in `sqrt(k)` since
    /// `k_last`, diluting existing holders. Returns whether collection is on.
    fn mint_fee(&mut self, env: &mut PairEnv, reserve_a: u128, reserve_b: u128) -> Result<bool> {
        let k_last = self.k_last();
        let Some(fee_to) = env.fee_to else {
            if !k_last.is_zero() {
                self.set_k_last(U256::zero());
            }
            return Ok(false);
        };

        if !k_last.is_zero() {
            let root_k = math::sqrt(math::product(reserve_a, reserve_b));
            let root_k_last = math::sqrt(k_last);
            if root_k > root_k_last {
                let total_supply = U256::from(env.ledger.total_supply()?);
                let numerator = total_supply
                    .checked_mul(root_k - root_k_last)
                    .ok_or(AmmError::Overflow)?;
                let denominator = root_k
                    .checked_mul(U256::from(PROTOCOL_FEE_DIVISOR))
                    .and_then(|v| v.checked_add(root_k_last))
                    .ok_or(AmmError::Overflow)?;
                let liquidity = math::to_u128(numerator / denominator)?;
                if liquidity > 0 {
                    env.ledger.mint(&fee_to, liquidity)?;
                    msg!("Protocol fee minted: {}", liquidity);
                }
            }
        }
        Ok(true)
    }
}
