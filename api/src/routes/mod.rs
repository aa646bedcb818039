//! HTTP route handlers

pub mod session;
