//! Scoped working-directory changes.
//!
//! Each build step runs from inside its build context directory. The guard
//! restores the previous directory when dropped, so the process never stays
//! stranded in a context directory after a failed step.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Guard that enters a directory and restores the previous one on drop.
#[derive(Debug)]
pub struct Workdir {
    previous: PathBuf,
}

impl Workdir {
    /// Enter `dir`. The returned guard restores the current directory when
    /// it goes out of scope, on success and error paths alike.
    pub fn push(dir: &Path) -> Result<Self> {
        let previous = env::current_dir().context("Failed to read current directory")?;
        env::set_current_dir(dir)
            .with_context(|| format!("Failed to enter directory {}", dir.display()))?;
        Ok(Self { previous })
    }
}

impl Drop for Workdir {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.previous) {
            eprintln!(
                "warning: failed to restore working directory to {}: {}",
                self.previous.display(),
                err
            );
        }
    }
}
