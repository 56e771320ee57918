use crate::constants::flash_loan_callback_success;
use crate::errors::AmmError;
use crate::events::FlashLoanEvent;
use crate::host::{FlashBorrower, PairEnv};
use crate::state::Pair;
use anchor_lang::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashLoanOutcome {
    pub fee: u128,
}

impl Pair {
    /// Largest flash loan available for `asset`, zero for foreign assets
    pub fn max_loanable(&self, asset: &Pubkey) -> u128 {
        self.side_of(asset)
            .map(|side| self.reserve_of(side))
            .unwrap_or(0)
    }

    /// Fee charged for borrowing `amount` of `asset`
    pub fn loan_fee(&self, asset: &Pubkey, amount: u128) -> Result<u128> {
        require!(self.side_of(asset).is_some(), AmmError::Forbidden);
        self.calculate_fee(amount)
    }

    /// Lend `amount` of `asset` to `receiver` for the duration of the
    /// borrower callback.
    ///
    /// The pair stays locked while the borrower runs, so it cannot re-enter.
    /// Reserves are re-synchronized once repayment is verified.
    pub fn flash_loan(
        &mut self,
        env: &mut PairEnv,
        borrower: &mut dyn FlashBorrower,
        receiver: &Pubkey,
        asset: &Pubkey,
        amount: u128,
        data: &[u8],
    ) -> Result<FlashLoanOutcome> {
        self.locked(|pair| pair.flash_loan_locked(env, borrower, receiver, asset, amount, data))
    }

    fn flash_loan_locked(
        &mut self,
        env: &mut PairEnv,
        borrower: &mut dyn FlashBorrower,
        receiver: &Pubkey,
        asset: &Pubkey,
        amount: u128,
        data: &[u8],
    ) -> Result<FlashLoanOutcome> {
        let side = self.side_of(asset).ok_or(AmmError::Forbidden)?;
        require!(amount > 0, AmmError::InsufficientInputAmount);
        require!(
            amount <= self.reserve_of(side),
            AmmError::InsufficientLiquidity
        );

        let fee = self.calculate_fee(amount)?;
        let balance_before = env.vault.balance(asset)?;
        env.vault.transfer_out(asset, receiver, amount)?;

        let ack = borrower.on_flash_loan(&env.caller, asset, amount, fee, data)?;
        require!(
            ack == flash_loan_callback_success(),
            AmmError::CallbackFailed
        );

        let required = balance_before
            .checked_add(fee)
            .ok_or(AmmError::Overflow)?;
        require!(
            env.vault.balance(asset)? >= required,
            AmmError::RepaymentFailed
        );

        let balance_a = env.vault.balance(&self.token_a_mint)?;
        let balance_b = env.vault.balance(&self.token_b_mint)?;
        self.update(balance_a, balance_b, env.now)?;

        msg!("Flash loan repaid - Amount: {}, Fee: {}", amount, fee);
        emit!(FlashLoanEvent {
            receiver: *receiver,
            asset: *asset,
            amount,
            fee,
        });

        Ok(FlashLoanOutcome { fee })
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::AmmError;
    use crate::testing::{expect_err, Borrower, Fixture};
    use anchor_lang::prelude::Pubkey;

    fn seeded() -> (Fixture, Pubkey) {
        let mut fx = Fixture::new();
        let lp = fx.user(1_000_000, 2_000_000);
        fx.add_liquidity(lp, 1_000_000, 2_000_000).unwrap();
        (fx, lp)
    }

    #[test]
    fn loan_views() {
        let (fx, _) = seeded();
        assert_eq!(fx.pair.max_loanable(&fx.token_a), 1_000_000);
        assert_eq!(fx.pair.max_loanable(&fx.token_b), 2_000_000);
        assert_eq!(fx.pair.max_loanable(&Pubkey::new_unique()), 0);

        assert_eq!(fx.pair.loan_fee(&fx.token_a, 10_000).unwrap(), 30);
        expect_err(
            fx.pair.loan_fee(&Pubkey::new_unique(), 10_000),
            AmmError::Forbidden,
        );
    }

    #[test]
    fn exact_repayment_succeeds_and_accrues_fee() {
        let (mut fx, _) = seeded();
        let receiver = fx.user(30, 0);
        let mut borrower = Borrower::repaying(&fx, receiver, 0);

        let outcome = fx.flash_loan(&mut borrower, receiver, fx.token_a, 10_000).unwrap();

        assert_eq!(outcome.fee, 30);
        assert_eq!(borrower.calls, vec![(fx.token_a, 10_000, 30)]);
        assert_eq!(fx.asset_balance(&fx.token_a, &receiver), 0);
        assert_eq!(fx.pair.reserves().0, 1_000_030);
        assert!(fx.pair.unlocked);
    }

    #[test]
    fn repayment_one_short_fails() {
        let (mut fx, _) = seeded();
        let receiver = fx.user(30, 0);
        let mut borrower = Borrower::repaying(&fx, receiver, 1);

        expect_err(
            fx.flash_loan(&mut borrower, receiver, fx.token_a, 10_000),
            AmmError::RepaymentFailed,
        );
        assert_eq!(fx.pair.reserves().0, 1_000_000);
        assert_eq!(fx.asset_balance(&fx.token_a, &fx.address), 1_000_000);
        assert!(fx.pair.unlocked);
    }

    #[test]
    fn wrong_acknowledgment_fails_despite_repayment() {
        let (mut fx, _) = seeded();
        let receiver = fx.user(30, 0);
        let mut borrower = Borrower::repaying(&fx, receiver, 0);
        borrower.ack = [7; 32];

        expect_err(
            fx.flash_loan(&mut borrower, receiver, fx.token_a, 10_000),
            AmmError::CallbackFailed,
        );
    }

    #[test]
    fn rejects_foreign_asset_zero_and_oversized_loans() {
        let (mut fx, _) = seeded();
        let receiver = fx.user(0, 0);
        let mut borrower = Borrower::repaying(&fx, receiver, 0);

        expect_err(
            fx.flash_loan(&mut borrower, receiver, Pubkey::new_unique(), 10),
            AmmError::Forbidden,
        );
        expect_err(
            fx.flash_loan(&mut borrower, receiver, fx.token_a, 0),
            AmmError::InsufficientInputAmount,
        );
        expect_err(
            fx.flash_loan(&mut borrower, receiver, fx.token_b, 2_000_001),
            AmmError::InsufficientLiquidity,
        );
        assert!(borrower.calls.is_empty());
    }
}
