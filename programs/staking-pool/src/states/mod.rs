pub mod admission_window;
pub mod pool_config;
pub mod pool_vault;
pub mod stake;
pub mod stake_pool;

pub use admission_window::*;
pub use pool_config::*;
pub use pool_vault::*;
pub use stake::*;
pub use stake_pool::*;
