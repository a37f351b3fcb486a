//! Project scoping: a short, deterministic partition key per project root.

use md5::{Digest, Md5};
use std::path::Path;

use crate::memory::types::ScopeId;

/// Scope shared by every episode captured with no project open.
pub const NO_PROJECT: &str = "unknown";

/// Number of hex characters kept from the digest.
const SCOPE_WIDTH: usize = 8;

/// Derive the scope for the active project root, or the [`NO_PROJECT`] sentinel.
///
/// The digest is taken over the path exactly as given. No case folding, trailing
/// separator stripping, or symlink resolution happens, so scopes written by
/// earlier versions of the store keep matching.
pub fn current(root: Option<&Path>) -> ScopeId {
    match root {
        None => ScopeId::new(NO_PROJECT),
        Some(path) => ScopeId::new(digest(&path.to_string_lossy())),
    }
}

fn digest(raw: &str) -> String {
    let hash = Md5::digest(raw.as_bytes());
    let mut hex = format!("{hash:x}");
    hex.truncate(SCOPE_WIDTH);
    hex
}
