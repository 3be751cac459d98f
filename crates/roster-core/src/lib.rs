//! Core types and trait definitions for the roster service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod area;
pub mod association;
pub mod competence;
pub mod error;
pub mod member;
pub mod project;
pub mod store;

mod validate;

pub use error::{Error, ErrorKind, Result};
