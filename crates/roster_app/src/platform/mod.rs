//! Process-level wiring: config, logging, the dispatch loop and its IO edges.
mod app;
mod commands;
mod config;
mod effects;
mod logging;
mod render;

pub use app::run_app;
