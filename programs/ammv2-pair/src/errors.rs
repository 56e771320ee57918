use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    #[msg("Caller is not authorized or asset is not part of this pair")]
    Forbidden,

    #[msg("Pair is locked by an operation in progress")]
    Locked,

    #[msg("Deposit is too small to mint any liquidity")]
    InsufficientLiquidityMinted,

    #[msg("Redeemed liquidity is too small to withdraw any assets")]
    InsufficientLiquidityBurned,

    #[msg("Output amount is zero or below the specified minimum")]
    InsufficientOutputAmount,

    #[msg("Pair reserves cannot cover the requested amount")]
    InsufficientLiquidity,

    #[msg("Input amount is zero or below the specified minimum")]
    InsufficientInputAmount,

    #[msg("Balance exceeds the representable reserve width")]
    Overflow,

    #[msg("Fee-adjusted reserve product decreased")]
    KInvariant,

    #[msg("Flash loan borrower did not acknowledge the callback")]
    CallbackFailed,

    #[msg("Flash loan was not repaid with its fee")]
    RepaymentFailed,

    #[msg("Asset transfer was rejected")]
    TransferFailed,

    #[msg("Pair assets must be distinct")]
    IdenticalAssets,

    #[msg("Pair assets must be ordered by address")]
    UnsortedAssets,
}
