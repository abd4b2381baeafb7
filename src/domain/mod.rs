//! Domain layer: instruments, prices, synthetic samples and the page state.

pub mod errors;
pub mod feed;
pub mod logging;
pub mod market_data;
