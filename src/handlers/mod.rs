pub mod assistant;
pub mod chat;
pub mod login;
pub mod monitoring;
pub mod preferences;
