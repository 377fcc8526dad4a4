//! Application services layer.

pub mod command;
pub mod error;
