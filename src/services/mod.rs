//! External data collaborators.

pub mod market_data;
pub mod upbit;

pub use market_data::{FetchError, MarketDataProvider, StaticMarketData};
pub use upbit::UpbitProvider;
