//! CLI commands

pub mod archive;
pub mod setup;
pub mod utils;
