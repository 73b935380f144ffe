pub mod config;
pub mod directory;
pub mod models;
pub mod search;
