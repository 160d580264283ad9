//! Domain layer for the outline generator
//!
//! This module contains the symbol and outline models, the ports the
//! pipeline depends on, and the error taxonomy.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{OutlineError, OutlineResult};
