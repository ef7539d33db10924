pub mod ai;
pub mod chat;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod services;
