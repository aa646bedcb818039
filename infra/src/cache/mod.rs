//! Redis-backed cache layer

mod blacklist;

pub use blacklist::RedisTokenBlacklist;
