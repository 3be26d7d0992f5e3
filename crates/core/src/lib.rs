//! Core library for redditools
//!
//! This crate is the **Functional Core** of redditools, following the
//! Functional Core - Imperative Shell pattern:
//!
//! - **`redditools_core`** (this crate): pure transformation functions, no I/O
//! - **`redditools`**: HTTP, MCP transports and the CLI (the Imperative Shell)
//!
//! Every function here is deterministic and is tested with fixture JSON
//! instead of live HTTP.
//!
//! # Module Organization
//!
//! - [`config`]: the immutable configuration value built once at startup
//! - [`reddit`]: argument extraction, request building, response decoding
//!   and text formatting for the Reddit tools
//!
//! # Example Usage
//!
//! ```rust
//! use redditools_core::reddit::{format_search_results, Payload};
//!
//! let body = br#"{"data":{"children":[
//!     {"kind":"t3","data":{"title":"A","author":"alice","score":5,"id":"x1"}}
//! ]}}"#;
//!
//! let payload = Payload::from_slice(body).unwrap();
//! let text = format_search_results(&payload).unwrap();
//!
//! assert!(text.starts_with("Found 1 results:\n\n1. Title: A\n"));
//! ```

pub mod config;
pub mod reddit;
