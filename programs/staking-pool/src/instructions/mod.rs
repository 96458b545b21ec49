pub mod claim_rewards;
pub mod deposit;
pub mod fund_rewards;
pub mod initialize_pool;
pub mod views;
pub mod withdraw;

pub use claim_rewards::*;
pub use deposit::*;
pub use fund_rewards::*;
pub use initialize_pool::*;
pub use views::*;
pub use withdraw::*;
