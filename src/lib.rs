pub mod config;
pub mod env;
pub mod search;
pub mod tasks;
