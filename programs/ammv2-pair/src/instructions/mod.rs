pub mod fee_config;
pub mod flash_loan;
pub mod initialize_pool;
pub mod manage_liquidity;
pub mod reserves;
pub mod spl;
pub mod swap;
pub mod views;

pub use fee_config::*;
pub use flash_loan::*;
pub use initialize_pool::*;
pub use manage_liquidity::*;
pub use reserves::*;
pub use swap::*;
pub use views::*;
