pub mod app;
pub mod config;
pub mod http_client;
pub mod loader;
pub mod player;
pub mod state;
pub mod streak;
pub mod view;
