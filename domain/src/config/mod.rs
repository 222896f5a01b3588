//! Configuration concepts shared by the outer layers.

pub mod validation;
