//! Build Blender batch-render command lines from render targets and a
//! shared output configuration, and hand them to a detached terminal.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
