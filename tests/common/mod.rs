//! Common test utilities and infrastructure
//!
//! - Cucumber world implementation
//! - Helpers for describing model state in feature files

pub mod world;

pub use world::EditorWorld;
