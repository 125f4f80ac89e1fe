//! Integration test utilities for the marketplace
//!
//! This crate provides helpers for running end-to-end scenarios against the
//! service layer over the in-memory and file-backed record stores.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
