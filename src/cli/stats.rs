use anyhow::Result;
use std::path::Path;

use crate::config::GhostlyConfig;
use crate::memory::scope;

/// Display memory statistics in the terminal.
pub fn stats(config: &GhostlyConfig, root: Option<&Path>) -> Result<()> {
    let store = super::open_store(config);
    let response = crate::memory::stats::memory_stats(&store, &scope::current(root))?;

    println!("Memory Statistics");
    println!("{}", "=".repeat(40));
    println!("  Store file:          {}", store.path().display());
    println!("  File size:           {} bytes", response.file_size_bytes);
    println!("  Total episodes:      {}", response.total_episodes);
    println!("  Reserved events:     {}", response.reserved_events);
    println!();

    println!("Current project ({}):", response.scope);
    println!("  Episodes:            {}", response.scope_episodes);
    println!();

    println!("By Scope:");
    for (s, count) in &response.by_scope {
        println!("  {:<12} {}", s, count);
    }
    println!();

    if let Some(ref oldest) = response.oldest_episode {
        println!("Oldest episode:        {oldest}");
    }
    if let Some(ref newest) = response.newest_episode {
        println!("Newest episode:        {newest}");
    }

    Ok(())
}
