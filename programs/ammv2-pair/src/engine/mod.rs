//! Pair engine: every mutating operation on a [`Pair`].
//!
//! Each public entry point runs under [`Pair::locked`], touches assets only
//! through the [`PairEnv`](crate::host::PairEnv) collaborators and ends with
//! [`Pair::update`].

mod flash;
mod liquidity;
mod reserves;
mod swap;

pub use flash::FlashLoanOutcome;
pub use liquidity::{AddLiquidityArgs, BurnOutcome, MintOutcome, RemoveLiquidityArgs};
pub use swap::SwapOutcome;

use crate::errors::AmmError;
use crate::state::Pair;
use anchor_lang::prelude::*;

impl Pair {
    /// Run `op` with the pair locked.
    ///
    /// The lock is released on every exit path. On failure the pair state is
    /// restored to what it was before the call, so operations are all-or-nothing.
    pub(crate) fn locked<T>(&mut self, op: impl FnOnce(&mut Pair) -> Result<T>) -> Result<T> {
        require!(self.unlocked, AmmError::Locked);
        let snapshot = self.clone();
        self.unlocked = false;

        match op(self) {
            Ok(value) => {
                self.unlocked = true;
                Ok(value)
            }
            Err(err) => {
                *self = snapshot;
                Err(err)
            }
        }
    }
}
