//! Process-wide logging setup for RigOps binaries.

pub mod tracing;

pub use crate::tracing::{LogFormat, init, init_with};
