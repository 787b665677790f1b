//! Infrastructure layer: configuration storage.

pub mod config;
