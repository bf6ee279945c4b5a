//! Shared test utilities for the replica-sync workspace.
//!
//! This crate provides standardised fixtures so each crate's test suite
//! does not rebuild its own source/replica directories. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TreePair`] builder for a source and a replica directory

pub mod tree;

pub use tree::TreePair;
