mod app;
mod cli;
mod commands;
mod config;
mod effects;
mod logging;

pub use app::run_app;
