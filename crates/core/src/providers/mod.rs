pub mod aliases;
pub mod traits;

// API provider implementations
pub mod coingecko;
