//! Utility modules: build info and persistence helpers.

pub mod build_info;
pub mod persistence;
