pub mod actions;
pub mod api;
pub mod config;
pub mod desktop;
pub mod error;
