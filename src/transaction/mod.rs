pub mod model;

pub use model::{MINING_SENDER, Transaction};
