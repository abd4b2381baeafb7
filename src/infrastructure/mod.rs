pub mod config;
pub mod mock_feed;
pub mod rendering;
pub mod services;

pub use config::{FeedConfig, PairQuote};
pub use mock_feed::MockOracleFeed;
pub use services::{BrowserTimeProvider, BrowserTimer, ConsoleLogger, MAX_TIMER_DELAY, MathRandomJitter};
