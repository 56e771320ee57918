//! Fixed-width arithmetic for reserve, price and invariant calculations.
//!
//! Reserves are 112-bit values carried in `u128`. Products of two reserves,
//! fee-scaled balances and UQ112x112 prices need up to 256 bits, so those
//! intermediates go through [`U256`].

use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR};
use crate::errors::AmmError;
use anchor_lang::prelude::*;

pub use wide::U256;

// Outside the Anchor prelude: the macro expands against the two-parameter `Result`.
mod wide {
    #![allow(clippy::assign_op_pattern, clippy::manual_range_contains)]

    use uint::construct_uint;

    construct_uint! {
        pub struct U256(4);
    }
}

/// Number of fractional bits in a UQ112x112 price
pub const RESOLUTION: usize = 112;

/// Narrow a 256-bit intermediate back to `u128`
pub fn to_u128(value: U256) -> Result<u128> {
    require!(value.bits() <= 128, AmmError::Overflow);
    Ok(value.low_u128())
}

/// `a * b / denominator` with a 256-bit intermediate, rounded down
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator > 0, AmmError::Overflow);
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(AmmError::Overflow)?;
    to_u128(product / U256::from(denominator))
}

/// Integer square root, rounded down (Babylonian method)
pub fn sqrt(y: U256) -> U256 {
    if y > U256::from(3u8) {
        let mut z = y;
        let two = U256::from(2u8);
        let mut x = y / two + U256::one();
        while x < z {
            z = x;
            x = (y / x + x) / two;
        }
        z
    } else if !y.is_zero() {
        U256::one()
    } else {
        U256::zero()
    }
}

/// Product of two reserves, exact
pub fn product(a: u128, b: u128) -> U256 {
    // 112-bit operands cannot overflow 256 bits
    U256::from(a) * U256::from(b)
}

/// Amount of the second asset equal in value to `amount_a` at the current
/// reserve ratio.
pub fn quote(amount_a: u128, reserve_a: u128, reserve_b: u128) -> Result<u128> {
    require!(amount_a > 0, AmmError::InsufficientInputAmount);
    require!(
        reserve_a > 0 && reserve_b > 0,
        AmmError::InsufficientLiquidity
    );
    mul_div(amount_a, reserve_b, reserve_a)
}

/// Maximum output for an exact input under the fee-adjusted constant product.
pub fn get_amount_out(amount_in: u128, reserve_in: u128, reserve_out: u128) -> Result<u128> {
    require!(amount_in > 0, AmmError::InsufficientInputAmount);
    require!(
        reserve_in > 0 && reserve_out > 0,
        AmmError::InsufficientLiquidity
    );

    let amount_in_with_fee = U256::from(amount_in)
        .checked_mul(U256::from(FEE_DENOMINATOR - FEE_NUMERATOR))
        .ok_or(AmmError::Overflow)?;
    let numerator = amount_in_with_fee
        .checked_mul(U256::from(reserve_out))
        .ok_or(AmmError::Overflow)?;
    let denominator = U256::from(reserve_in)
        .checked_mul(U256::from(FEE_DENOMINATOR))
        .and_then(|v| v.checked_add(amount_in_with_fee))
        .ok_or(AmmError::Overflow)?;

    to_u128(numerator / denominator)
}

/// Encode a reserve as a UQ112x112 fixed-point value
pub fn encode_uq112x112(value: u128) -> U256 {
    U256::from(value) << RESOLUTION
}

/// Divide a UQ112x112 by an integer, keeping the fixed-point scale
pub fn uq112x112_div(value: U256, divisor: u128) -> U256 {
    value / U256::from(divisor)
}
