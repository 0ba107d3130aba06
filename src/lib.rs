//! course-sync library
//!
//! Keeps semester course folders on a cloud-synced drive in line with a
//! published schedule, and archives finished semesters.

pub mod archive;
pub mod config;
pub mod courses;
pub mod error;
pub mod prompt;
pub mod remote;

pub use error::{Error, Result};
