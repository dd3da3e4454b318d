//! Command types for IPC messages.

mod paint;

pub use paint::*;
