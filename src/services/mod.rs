pub mod assistant;
pub mod auth;
pub mod monitoring;
pub mod preferences;
