//! Configuration management for fnimg.
//!
//! Reads configuration from environment variables, with `.env` support via
//! dotenvy (loaded in `main`). Environment variables take precedence over
//! the `.env` file.

use std::env;
use std::path::{Path, PathBuf};

/// Default docker namespace for produced images.
pub const DEFAULT_NAMESPACE: &str = "fnimg";

/// Default builder binary.
pub const DEFAULT_DOCKER: &str = "docker";

/// fnimg configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace of the produced image tags (FNIMG_NAMESPACE).
    pub namespace: String,
    /// Builder binary to invoke (FNIMG_DOCKER).
    pub docker: String,
    /// Root of the build context tree (FNIMG_IMAGES_DIR, default `images/`).
    pub images_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment, with defaults relative to
    /// `base_dir` (the directory the tool was invoked from).
    pub fn load(base_dir: &Path) -> Self {
        let namespace = non_empty_var("FNIMG_NAMESPACE")
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let docker = non_empty_var("FNIMG_DOCKER").unwrap_or_else(|| DEFAULT_DOCKER.to_string());

        let images_dir = non_empty_var("FNIMG_IMAGES_DIR")
            .map(|s| {
                let path = PathBuf::from(s);
                if path.is_absolute() {
                    path
                } else {
                    base_dir.join(path)
                }
            })
            .unwrap_or_else(|| base_dir.join("images"));

        Self {
            namespace,
            docker,
            images_dir,
        }
    }

    /// Print configuration for the `show config` command.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  FNIMG_NAMESPACE: {}", self.namespace);
        println!("  FNIMG_DOCKER: {}", self.docker);
        println!("  FNIMG_IMAGES_DIR: {}", self.images_dir.display());
        if self.images_dir.is_dir() {
            println!("  Images layout: FOUND");
        } else {
            println!("  Images layout: NOT FOUND (run fnimg from the repository root)");
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
