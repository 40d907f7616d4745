//! Censo Store - Storage port and adapters
//!
//! This crate defines the `CensusStore` port the marker provider reads from
//! and provides an in-memory adapter and a PostgreSQL adapter over the
//! tracker's own schema.

pub mod memory;
pub mod ports;
pub mod postgres;
