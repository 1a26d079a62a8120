//! Common test utilities shared across test types
//!
//! - `fixtures.rs` - Test data builders
//! - `mocks.rs` - In-memory gateway and scripted completion service

pub mod fixtures;
pub mod mocks;
