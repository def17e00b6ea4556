//! Clover Core - Shared types library.
//!
//! This crate provides common types used across all Clover Market components:
//! - `shop` - Public-facing storefront and admin routes
//! - `cli` - Command-line tools for migrations and seed data
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and user names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
