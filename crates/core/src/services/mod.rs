pub mod chart_service;
pub mod refresh_service;
pub mod reorder_service;
pub mod search_service;
pub mod watchlist_store;
