//! Live progress output

pub mod observer;
