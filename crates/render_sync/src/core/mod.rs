//! Core engine systems
//!
//! Currently hosts the unified configuration system.

pub mod config;
