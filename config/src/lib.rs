//! # Config Crate
//!
//! Centralized language tables and parse configuration for the C++ source
//! parser. Keyword lists, operator characters and recursion limits live here
//! so the parser phases stay declarative and agree on one vocabulary.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{is_keyword, ParseConfig, Standard};
//!
//! assert!(is_keyword("constexpr", Standard::Cpp11));
//! assert!(!is_keyword("constexpr", Standard::Cpp98));
//!
//! let config = ParseConfig::default().with_macro("VERSION", "3").unwrap();
//! assert_eq!(config.predefined_macros["VERSION"], "3");
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every table is defined once
//! - **No Dependencies**: plain constants and a validated config struct
//! - **Read-Only Sharing**: a `ParseConfig` is never mutated by a parse, so
//!   concurrent sessions can share one instance

pub mod constants;

#[cfg(test)]
mod tests;
