pub mod config;
pub mod list;
pub mod search;
pub mod version;
