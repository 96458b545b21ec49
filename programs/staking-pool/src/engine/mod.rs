pub mod accumulator;
pub mod clock;
pub mod ledger;
pub mod registry;
pub mod settlement;

pub use accumulator::*;
pub use clock::*;
pub use ledger::*;
pub use settlement::*;
