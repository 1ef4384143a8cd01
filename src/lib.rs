pub mod api;
pub mod auction;
pub mod config;
pub mod error;
pub mod handlers;
pub mod manager;
pub mod overlay;
pub mod push;
