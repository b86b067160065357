//! JSON state files under `.gitlet`
//!
//! Reads take a shared lock on the file. Writes take an exclusive lock, write the new
//! content next to the file and rename it into place, so a reader never observes a
//! half-written document.

use anyhow::Context;
use fake::rand;
use file_guard::Lock;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

/// Read the whole state file, or `None` if it was never written
pub fn read_state(path: &Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let mut state_file = std::fs::OpenOptions::new()
        .read(true)
        .open(path)
        .with_context(|| format!("Unable to open state file {}", path.display()))?;
    let mut lock = file_guard::lock(&mut state_file, Lock::Shared, 0, 1)?;

    let mut content = String::new();
    lock.deref_mut()
        .read_to_string(&mut content)
        .with_context(|| format!("Unable to read state file {}", path.display()))?;

    Ok(Some(content))
}

/// Replace the state file with `content`
pub fn write_state(path: &Path, content: &str) -> anyhow::Result<()> {
    let state_dir = path
        .parent()
        .with_context(|| format!("Invalid state file path {}", path.display()))?;

    // lock the live file so concurrent readers wait for the swap
    let mut state_file = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Unable to open state file {}", path.display()))?;
    let _lock = file_guard::lock(&mut state_file, Lock::Exclusive, 0, 1)?;

    let temp_path = state_dir.join(generate_temp_name());
    let mut temp_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Unable to open state file {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| format!("Unable to write state file {}", temp_path.display()))?;
    temp_file
        .sync_all()
        .with_context(|| format!("Unable to flush state file {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Unable to rename state file to {}", path.display()))?;

    Ok(())
}

fn generate_temp_name() -> String {
    format!("tmp-state-{}", rand::random::<u32>())
}
