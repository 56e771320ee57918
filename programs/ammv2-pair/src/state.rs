use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR, MAX_RESERVE};
use crate::errors::AmmError;
use crate::events::SyncEvent;
use crate::math::{self, U256};
use anchor_lang::prelude::*;

/// One of the pair's two assets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Stores the state of a two-asset constant-product pair
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct Pair {
    /// Asset A mint, always ordered below `token_b_mint`
    pub token_a_mint: Pubkey,

    /// Asset B mint
    pub token_b_mint: Pubkey,

    /// Claim-token mint representing shares of the reserves
    pub lp_mint: Pubkey,

    /// Recorded holding of asset A, bounded to 112 bits
    pub reserve_a: u128,

    /// Recorded holding of asset B, bounded to 112 bits
    pub reserve_b: u128,

    /// Seconds modulo 2^32 at the last reserve update
    pub block_timestamp_last: u32,

    /// Little-endian limbs of the wrapping UQ112x112 * seconds accumulators
    pub price_a_cumulative_last: [u64; 4],
    pub price_b_cumulative_last: [u64; 4],

    /// reserve_a * reserve_b right after the last protocol-fee checkpoint,
    /// zero while fee collection is off
    pub k_last: [u64; 4],

    /// Cleared while a mutating operation is in progress
    pub unlocked: bool,

    pub bump: u8,
    pub authority_bump: u8,
}

impl Pair {
    pub fn initialize(
        &mut self,
        token_a_mint: Pubkey,
        token_b_mint: Pubkey,
        lp_mint: Pubkey,
        bump: u8,
        authority_bump: u8,
    ) -> Result<()> {
        require_keys_neq!(token_a_mint, token_b_mint, AmmError::IdenticalAssets);
        require!(token_a_mint < token_b_mint, AmmError::UnsortedAssets);

        self.token_a_mint = token_a_mint;
        self.token_b_mint = token_b_mint;
        self.lp_mint = lp_mint;
        self.bump = bump;
        self.authority_bump = authority_bump;
        self.unlocked = true;
        Ok(())
    }

    pub fn side_of(&self, asset: &Pubkey) -> Option<Side> {
        if *asset == self.token_a_mint {
            Some(Side::A)
        } else if *asset == self.token_b_mint {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn mint_of(&self, side: Side) -> Pubkey {
        match side {
            Side::A => self.token_a_mint,
            Side::B => self.token_b_mint,
        }
    }

    pub fn reserve_of(&self, side: Side) -> u128 {
        match side {
            Side::A => self.reserve_a,
            Side::B => self.reserve_b,
        }
    }

    /// `(reserve_a, reserve_b, block_timestamp_last)`
    pub fn reserves(&self) -> (u128, u128, u32) {
        (self.reserve_a, self.reserve_b, self.block_timestamp_last)
    }

    pub fn price_a_cumulative(&self) -> U256 {
        U256(self.price_a_cumulative_last)
    }

    pub fn price_b_cumulative(&self) -> U256 {
        U256(self.price_b_cumulative_last)
    }

    pub fn k_last(&self) -> U256 {
        U256(self.k_last)
    }

    pub(crate) fn set_k_last(&mut self, k: U256) {
        self.k_last = k.0;
    }

    /// Calculate the 0.3% fee on an amount
    pub fn calculate_fee(&self, amount: u128) -> Result<u128> {
        math::mul_div(amount, FEE_NUMERATOR, FEE_DENOMINATOR)
    }

    /// Record new reserves and fold the previous spot prices into the
    /// accumulators for the time elapsed since the last update.
    pub fn update(&mut self, balance_a: u128, balance_b: u128, now: u32) -> Result<()> {
        require!(
            balance_a <= MAX_RESERVE && balance_b <= MAX_RESERVE,
            AmmError::Overflow
        );

        let elapsed = now.wrapping_sub(self.block_timestamp_last);
        if elapsed > 0 && self.reserve_a != 0 && self.reserve_b != 0 {
            let elapsed = U256::from(elapsed);
            let price_a =
                math::uq112x112_div(math::encode_uq112x112(self.reserve_b), self.reserve_a);
            let price_b =
                math::uq112x112_div(math::encode_uq112x112(self.reserve_a), self.reserve_b);
            self.price_a_cumulative_last =
                accumulate(self.price_a_cumulative(), price_a, elapsed).0;
            self.price_b_cumulative_last =
                accumulate(self.price_b_cumulative(), price_b, elapsed).0;
        }

        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
        self.block_timestamp_last = now;

        emit!(SyncEvent {
            reserve_a: balance_a,
            reserve_b: balance_b,
        });
        Ok(())
    }
}

/// Accumulators wrap modulo 2^256; readers difference two samples.
fn accumulate(total: U256, price: U256, elapsed: U256) -> U256 {
    let (increment, _) = price.overflowing_mul(elapsed);
    total.overflowing_add(increment).0
}

/// Unix time folded into the 32-bit wrapping timestamp the pair records
pub fn block_timestamp(unix_timestamp: i64) -> u32 {
    unix_timestamp.rem_euclid(1i64 << 32) as u32
}

/// Global protocol-fee configuration read by every pair
#[account]
#[derive(InitSpace)]
pub struct FeeConfig {
    /// May change `fee_to`
    pub authority: Pubkey,

    /// Owner of the claim account receiving protocol fees; `None` disables them
    pub fee_to: Option<Pubkey>,

    pub bump: u8,
}
