//! Common test utilities for envtypes CLI tests.
//!
//! - `TestEnv`: isolated project directory plus binary runner
//! - Fixtures: reusable env file content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
