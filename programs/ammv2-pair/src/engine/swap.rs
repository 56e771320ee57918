use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR};
use crate::errors::AmmError;
use crate::events::SwapEvent;
use crate::host::PairEnv;
use crate::math::{self, U256};
use crate::state::{Pair, Side};
use anchor_lang::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapOutcome {
    /// Input actually received by the pair
    pub amount_in: u128,
    pub amount_out: u128,
}

impl Pair {
    /// Swap an exact amount of `asset_in` for as much of the other asset as
    /// the fee-adjusted constant product allows, sending it to `to`.
    pub fn swap(
        &mut self,
        env: &mut PairEnv,
        asset_in: &Pubkey,
        amount_in: u128,
        minimum_amount_out: u128,
        to: &Pubkey,
    ) -> Result<SwapOutcome> {
        self.locked(|pair| pair.swap_locked(env, asset_in, amount_in, minimum_amount_out, to))
    }

    fn swap_locked(
        &mut self,
        env: &mut PairEnv,
        asset_in: &Pubkey,
        amount_in: u128,
        minimum_amount_out: u128,
        to: &Pubkey,
    ) -> Result<SwapOutcome> {
        require!(minimum_amount_out > 0, AmmError::InsufficientOutputAmount);
        require!(amount_in > 0, AmmError::InsufficientInputAmount);
        let side_in = self.side_of(asset_in).ok_or(AmmError::Forbidden)?;
        let side_out = side_in.opposite();

        let (reserve_a, reserve_b) = (self.reserve_a, self.reserve_b);
        let reserve_in = self.reserve_of(side_in);
        let reserve_out = self.reserve_of(side_out);
        require!(
            minimum_amount_out <= reserve_out,
            AmmError::InsufficientLiquidity
        );

        env.vault.transfer_in(asset_in, &env.caller, amount_in)?;
        // Fee-on-transfer and short transfers only count what arrived
        let received = env
            .vault
            .balance(asset_in)?
            .checked_sub(reserve_in)
            .ok_or(AmmError::Overflow)?;
        let amount_out = math::get_amount_out(received, reserve_in, reserve_out)?;

        msg!(
            "Swap details - Input: {}, Received: {}, Output: {}",
            amount_in,
            received,
            amount_out
        );
        require!(
            amount_out >= minimum_amount_out,
            AmmError::InsufficientOutputAmount
        );

        let asset_out = self.mint_of(side_out);
        env.vault.transfer_out(&asset_out, to, amount_out)?;

        let (token_a, token_b) = (self.token_a_mint, self.token_b_mint);
        let balance_a = env.vault.balance(&token_a)?;
        let balance_b = env.vault.balance(&token_b)?;
        let (amount_a_out, amount_b_out) = match side_out {
            Side::A => (amount_out, 0),
            Side::B => (0, amount_out),
        };
        let amount_a_in = amount_in_from_balances(balance_a, reserve_a, amount_a_out)?;
        let amount_b_in = amount_in_from_balances(balance_b, reserve_b, amount_b_out)?;

        check_invariant(
            (balance_a, balance_b),
            (amount_a_in, amount_b_in),
            (reserve_a, reserve_b),
        )?;
        self.update(balance_a, balance_b, env.now)?;

        emit!(SwapEvent {
            sender: env.caller,
            amount_a_in,
            amount_b_in,
            amount_a_out,
            amount_b_out,
            to: *to,
        });

        Ok(SwapOutcome {
            amount_in: received,
            amount_out,
        })
    }
}

/// Input on one side, derived from where its balance ended up
fn amount_in_from_balances(balance: u128, reserve: u128, amount_out: u128) -> Result<u128> {
    let floor = reserve
        .checked_sub(amount_out)
        .ok_or(AmmError::InsufficientLiquidity)?;
    Ok(balance.saturating_sub(floor))
}

/// Post-trade balances, with the fee removed from whichever side received
/// input, must keep the product at or above the pre-trade reserves' product.
pub(crate) fn check_invariant(
    (balance_a, balance_b): (u128, u128),
    (amount_a_in, amount_b_in): (u128, u128),
    (reserve_a, reserve_b): (u128, u128),
) -> Result<()> {
    let adjusted_a = fee_adjusted(balance_a, amount_a_in)?;
    let adjusted_b = fee_adjusted(balance_b, amount_b_in)?;

    let k_after = adjusted_a
        .checked_mul(adjusted_b)
        .ok_or(AmmError::Overflow)?;
    let k_before = math::product(reserve_a, reserve_b)
        .checked_mul(U256::from(FEE_DENOMINATOR * FEE_DENOMINATOR))
        .ok_or(AmmError::Overflow)?;

    require!(k_after >= k_before, AmmError::KInvariant);
    Ok(())
}

fn fee_adjusted(balance: u128, amount_in: u128) -> Result<U256> {
    U256::from(balance)
        .checked_mul(U256::from(FEE_DENOMINATOR))
        .and_then(|scaled| scaled.checked_sub(U256::from(amount_in) * U256::from(FEE_NUMERATOR)))
        .ok_or_else(|| error!(AmmError::KInvariant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{expect_err, Fixture};
    use proptest::prelude::*;

    fn seeded(reserve_a: u128, reserve_b: u128) -> (Fixture, Pubkey) {
        let mut fx = Fixture::new();
        let lp = fx.user(reserve_a, reserve_b);
        fx.add_liquidity(lp, reserve_a, reserve_b).unwrap();
        (fx, lp)
    }

    #[test]
    fn exact_input_matches_formula() {
        let (mut fx, _) = seeded(1_000_000, 2_000_000);
        let trader = fx.user(1_000, 0);
        let expected = 1000 * 997 * 2_000_000 / (1_000_000 * 1000 + 1000 * 997);

        let outcome = fx.swap(trader, fx.token_a, 1_000, expected).unwrap();

        assert_eq!(outcome.amount_out, expected);
        assert_eq!(fx.asset_balance(&fx.token_b, &trader), expected);
        assert_eq!(fx.pair.reserves().0, 1_001_000);
        assert_eq!(fx.pair.reserves().1, 2_000_000 - expected);
    }

    #[test]
    fn minimum_one_above_quote_reverts() {
        let (mut fx, _) = seeded(1_000_000, 2_000_000);
        let trader = fx.user(1_000, 0);
        let expected = 1000 * 997 * 2_000_000 / (1_000_000 * 1000 + 1000 * 997);

        expect_err(
            fx.swap(trader, fx.token_a, 1_000, expected + 1),
            AmmError::InsufficientOutputAmount,
        );
        assert_eq!(fx.asset_balance(&fx.token_a, &trader), 1_000);
        assert_eq!(fx.pair.reserves().0, 1_000_000);
    }

    #[test]
    fn swap_b_for_a_uses_matching_reserve() {
        let (mut fx, _) = seeded(1_000_000, 2_000_000);
        let trader = fx.user(0, 2_000);
        let expected = math::get_amount_out(2_000, 2_000_000, 1_000_000).unwrap();

        let outcome = fx.swap(trader, fx.token_b, 2_000, 1).unwrap();

        assert_eq!(outcome.amount_in, 2_000);
        assert_eq!(outcome.amount_out, expected);
        assert_eq!(fx.asset_balance(&fx.token_a, &trader), expected);
    }

    #[test]
    fn rejects_degenerate_requests() {
        let (mut fx, _) = seeded(1_000_000, 2_000_000);
        let trader = fx.user(5_000, 5_000);

        expect_err(
            fx.swap(trader, fx.token_a, 1_000, 0),
            AmmError::InsufficientOutputAmount,
        );
        expect_err(
            fx.swap(trader, fx.token_a, 0, 1),
            AmmError::InsufficientInputAmount,
        );
        expect_err(
            fx.swap(trader, fx.token_a, 1_000, 2_000_001),
            AmmError::InsufficientLiquidity,
        );
        expect_err(
            fx.swap(trader, Pubkey::new_unique(), 1_000, 1),
            AmmError::Forbidden,
        );
    }

    #[test]
    fn fee_on_transfer_input_prices_only_what_arrived() {
        let (mut fx, _) = seeded(1_000_000, 2_000_000);
        fx.set_transfer_tax(fx.token_a, 100);
        let trader = fx.user(1_000, 0);

        let outcome = fx.swap(trader, fx.token_a, 1_000, 1).unwrap();

        assert_eq!(outcome.amount_in, 990);
        assert_eq!(
            outcome.amount_out,
            math::get_amount_out(990, 1_000_000, 2_000_000).unwrap()
        );
        assert_eq!(fx.pair.reserves().0, 1_000_990);
    }

    #[test]
    fn swap_on_empty_pair_fails() {
        let mut fx = Fixture::new();
        let trader = fx.user(1_000, 0);
        expect_err(
            fx.swap(trader, fx.token_a, 1_000, 1),
            AmmError::InsufficientLiquidity,
        );
    }

    #[test]
    fn invariant_rejects_value_extraction() {
        // 1000 in on A, 2 more out on B than the formula allows
        let reserves = (1_000_000, 2_000_000);
        let fair_out = math::get_amount_out(1_000, 1_000_000, 2_000_000).unwrap();

        check_invariant(
            (1_001_000, 2_000_000 - fair_out),
            (1_000, 0),
            reserves,
        )
        .unwrap();
        expect_err(
            check_invariant((1_001_000, 2_000_000 - fair_out - 2), (1_000, 0), reserves),
            AmmError::KInvariant,
        );
        expect_err(
            check_invariant((1_000_000, 1_999_999), (0, 0), reserves),
            AmmError::KInvariant,
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn swaps_never_shrink_the_reserve_product(
            reserve_a in 10_000u128..1_000_000_000_000_000u128,
            reserve_b in 10_000u128..1_000_000_000_000_000u128,
            amount_in in 1u128..1_000_000_000_000_000u128,
            sell_a in any::<bool>(),
        ) {
            let (reserve_in, reserve_out) = if sell_a {
                (reserve_a, reserve_b)
            } else {
                (reserve_b, reserve_a)
            };
            let quoted = math::get_amount_out(amount_in, reserve_in, reserve_out).unwrap();
            prop_assume!(quoted > 0);

            let (mut fx, _) = seeded(reserve_a, reserve_b);
            let trader = if sell_a { fx.user(amount_in, 0) } else { fx.user(0, amount_in) };
            let asset = if sell_a { fx.token_a } else { fx.token_b };
            let k_before = math::product(reserve_a, reserve_b);

            let outcome = fx.swap(trader, asset, amount_in, quoted).unwrap();

            prop_assert_eq!(outcome.amount_out, quoted);
            let (after_a, after_b, _) = fx.pair.reserves();
            prop_assert!(math::product(after_a, after_b) >= k_before);
        }
    }
}
