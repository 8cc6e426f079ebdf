pub mod checker;
pub mod config;
pub mod engine;
pub mod models;
pub mod notify;
pub mod state;
