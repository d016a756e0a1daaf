// src/core/mod.rs

pub mod client;
pub mod config;
pub mod paths;
pub mod session;
