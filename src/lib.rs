pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod models;
pub mod terminal;
pub mod ui;
