//! ascii-poster library crate.
//!
//! Renders series artwork fetched by URL as fixed-size blocks of terminal
//! text and memoizes the results in an on-disk cache.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod models;
pub mod render;
