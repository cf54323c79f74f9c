//! Core library components.
//!
//! Everything here is free of terminal I/O: the CLI layer turns results
//! and errors into output.

pub mod app;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod export;
pub mod generator;
pub mod quick;
pub mod store;
pub mod validation;
