pub mod categories;
pub mod config;
pub mod session;
