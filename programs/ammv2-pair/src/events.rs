use anchor_lang::prelude::*;

/// Reserves were written by `update`
#[event]
pub struct SyncEvent {
    pub reserve_a: u128,
    pub reserve_b: u128,
}

/// Liquidity added
#[event]
pub struct MintEvent {
    pub sender: Pubkey,
    pub amount_a: u128,
    pub amount_b: u128,
}

/// Liquidity removed
#[event]
pub struct BurnEvent {
    pub sender: Pubkey,
    pub amount_a: u128,
    pub amount_b: u128,
    pub to: Pubkey,
}

#[event]
pub struct SwapEvent {
    pub sender: Pubkey,
    pub amount_a_in: u128,
    pub amount_b_in: u128,
    pub amount_a_out: u128,
    pub amount_b_out: u128,
    pub to: Pubkey,
}

/// Balance excess above reserves was sent out
#[event]
pub struct SkimEvent {
    pub to: Pubkey,
}

#[event]
pub struct FlashLoanEvent {
    pub receiver: Pubkey,
    pub asset: Pubkey,
    pub amount: u128,
    pub fee: u128,
}
