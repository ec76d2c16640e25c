//! On-chain state for the swap program

pub mod pool;

pub use pool::*;
