//! # Shelfmark Infrastructure
//!
//! Concrete implementations of the core repository interfaces:
//! - MySQL-backed token blacklist and user directory (SQLx)
//! - Redis-backed token blacklist with native TTL eviction

pub mod cache;
pub mod database;

pub use cache::RedisTokenBlacklist;
pub use database::connection::create_pool;
pub use database::mysql::{MySqlTokenBlacklist, MySqlUserDirectory};
