pub mod asset;
pub mod chart;
pub mod notice;
pub mod price;
pub mod search;
pub mod settings;
