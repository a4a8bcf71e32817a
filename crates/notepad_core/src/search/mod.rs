//! Search entry points.
//!
//! # Responsibility
//! - Derive filtered views of the note list without touching storage.

pub mod filter;
