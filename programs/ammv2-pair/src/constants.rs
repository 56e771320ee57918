use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

/// Claim-token units locked forever on the first deposit
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Swap and flash-loan fee: 3/1000 (0.3%) taken from the input side
pub const FEE_NUMERATOR: u128 = 3;
pub const FEE_DENOMINATOR: u128 = 1_000;

/// Reserves are bounded to 112 bits so prices fit a UQ112x112
pub const MAX_RESERVE: u128 = (1u128 << 112) - 1;

/// Fee recipient receives 1/(PROTOCOL_FEE_DIVISOR + 1) of invariant growth
pub const PROTOCOL_FEE_DIVISOR: u128 = 5;

pub const LP_DECIMALS: u8 = 9;

/// Owner of the locked-liquidity claim account. Nobody can sign for the
/// system program, so tokens minted there never move again.
pub const LOCKED_LIQUIDITY_OWNER: Pubkey = anchor_lang::system_program::ID;

pub const PAIR_SEED: &[u8] = b"liquidity_pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const TOKEN_A_VAULT_SEED: &[u8] = b"token_a_vault";
pub const TOKEN_B_VAULT_SEED: &[u8] = b"token_b_vault";
pub const LP_MINT_SEED: &[u8] = b"lp_token_mint";
pub const LP_CUSTODY_SEED: &[u8] = b"lp_custody";
pub const LOCKED_LIQUIDITY_SEED: &[u8] = b"locked_liquidity";
pub const FEE_CONFIG_SEED: &[u8] = b"fee_config";

const FLASH_LOAN_CALLBACK_LABEL: &[u8] = b"FlashBorrower.onFlashLoan";

/// Value a borrower must return from its callback to acknowledge the loan.
pub fn flash_loan_callback_success() -> [u8; 32] {
    hash(FLASH_LOAN_CALLBACK_LABEL).to_bytes()
}
