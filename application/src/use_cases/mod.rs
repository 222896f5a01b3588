//! Use cases (application services)

pub mod run_group_chat;
mod shared;
