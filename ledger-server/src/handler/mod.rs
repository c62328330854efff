//! HTTP Handlers

pub mod points;
pub mod rewards;
