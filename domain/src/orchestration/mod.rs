//! Group chat orchestration domain
//!
//! Round bookkeeping, the run phase machine and run configuration.

pub mod entities;
pub mod value_objects;
