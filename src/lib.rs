pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod favorites;
pub mod handler;
pub mod logging;
pub mod theme;
pub mod tui;
pub mod ui;
