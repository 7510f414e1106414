//! Tourmap Core - Domain models, layered configuration, and precedence rules
//!
//! This crate contains the shared data model for the tourmap system. It holds no
//! validation or merge logic of its own; see `tourmap-geo` and `tourmap-engine`.

pub mod config;
pub mod error;
pub mod layering;
pub mod models;

pub use error::{Result, TourmapError};
