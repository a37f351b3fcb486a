//! Episodic memory for terminal commands, scoped per project.
//!
//! Ghostly keeps short snippets (commands, fixes) in a single JSON file and lets
//! you find them again later by substring, limited to the project you are in.
//! Each snippet is an [`Episode`](memory::types::Episode) tagged with a scope
//! derived from the project root path, so one project's history never shows up
//! in another's results.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`memory`]: The store itself: record types, project scoping, append, and recall

pub mod config;
pub mod memory;
