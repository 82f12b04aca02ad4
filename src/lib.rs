// src/lib.rs

#[macro_use]
pub mod macros;

pub mod attributes;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod csv;
pub mod file;
pub mod log;
pub mod progress;
pub mod property;
pub mod scrape;
pub mod store;
pub mod updater;

pub use error::{Error, Result};
