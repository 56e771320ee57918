use crate::errors::AmmError;
use crate::events::SkimEvent;
use crate::host::PairEnv;
use crate::state::Pair;
use anchor_lang::prelude::*;

impl Pair {
    /// Send any balance held above the recorded reserves to `to`.
    pub fn skim(&mut self, env: &mut PairEnv, to: &Pubkey) -> Result<()> {
        self.locked(|pair| {
            for (asset, reserve) in [
                (pair.token_a_mint, pair.reserve_a),
                (pair.token_b_mint, pair.reserve_b),
            ] {
                let excess = env
                    .vault
                    .balance(&asset)?
                    .checked_sub(reserve)
                    .ok_or(AmmError::Overflow)?;
                if excess > 0 {
                    env.vault.transfer_out(&asset, to, excess)?;
                }
            }
            emit!(SkimEvent { to: *to });

            let balance_a = env.vault.balance(&pair.token_a_mint)?;
            let balance_b = env.vault.balance(&pair.token_b_mint)?;
            pair.update(balance_a, balance_b, env.now)
        })
    }

    /// Force the recorded reserves to match the held balances.
    pub fn sync(&mut self, env: &mut PairEnv) -> Result<()> {
        self.locked(|pair| {
            let balance_a = env.vault.balance(&pair.token_a_mint)?;
            let balance_b = env.vault.balance(&pair.token_b_mint)?;
            pair.update(balance_a, balance_b, env.now)
        })
    }
}
