//! Infrastructure layer for filesystem and environment interactions.
//!
//! Zellij mounts the host filesystem under `/host` inside the plugin sandbox;
//! the helpers here translate user-facing paths into that layout.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, resolve_config_path};
