//! Herald: asynchronous notification dispatch
//!
//! This crate re-exports [`herald_core`]. See its documentation for the
//! pipeline overview.

pub use herald_core::*;
