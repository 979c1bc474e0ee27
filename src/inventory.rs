//! Discovery of versioned build contexts under the images directory.
//!
//! The layout this tool drives is:
//!
//! ```text
//! images/
//!   build/<version>/    context for the build image
//!   runtime/<version>/  context for the runtime image
//!   init/               context for the init image (unversioned)
//! ```
//!
//! The inventory backs `fnimg show versions` and the available-versions hint
//! printed when `fnimg build` is given a version with no context.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// One toolchain version discovered under `images/`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionEntry {
    pub version: String,
    pub has_build: bool,
    pub has_runtime: bool,
}

impl VersionEntry {
    /// A version is buildable only when both contexts exist.
    pub fn is_complete(&self) -> bool {
        self.has_build && self.has_runtime
    }
}

/// All versions discovered under an images directory.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInventory {
    pub versions: Vec<VersionEntry>,
    pub has_init: bool,
}

impl VersionInventory {
    /// Scan `images_dir` one level deep under `build/` and `runtime/`.
    ///
    /// Missing or unreadable directories contribute no entries; the scan
    /// itself never fails.
    pub fn scan(images_dir: &Path) -> Self {
        let mut found: BTreeMap<String, (bool, bool)> = BTreeMap::new();

        for (subdir, is_build) in [("build", true), ("runtime", false)] {
            let root = images_dir.join(subdir);
            for entry in WalkDir::new(&root)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if !entry.file_type().is_dir() {
                    continue;
                }
                let version = entry.file_name().to_string_lossy().into_owned();
                let slot = found.entry(version).or_insert((false, false));
                if is_build {
                    slot.0 = true;
                } else {
                    slot.1 = true;
                }
            }
        }

        let versions = found
            .into_iter()
            .map(|(version, (has_build, has_runtime))| VersionEntry {
                version,
                has_build,
                has_runtime,
            })
            .collect();

        Self {
            versions,
            has_init: images_dir.join("init").is_dir(),
        }
    }

    /// Versions with both build and runtime contexts, in sorted order.
    pub fn complete_versions(&self) -> Vec<&str> {
        self.versions
            .iter()
            .filter(|v| v.is_complete())
            .map(|v| v.version.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Render as pretty JSON for `show versions --json`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Print the text listing for `show versions`.
    pub fn print(&self) {
        if self.versions.is_empty() {
            println!("No toolchain versions found.");
        } else {
            println!("Toolchain versions:");
            for entry in &self.versions {
                let contexts = match (entry.has_build, entry.has_runtime) {
                    (true, true) => "build + runtime",
                    (true, false) => "build only",
                    (false, true) => "runtime only",
                    // Entries exist only because one side was found
                    (false, false) => unreachable!(),
                };
                println!("  {:<12} {}", entry.version, contexts);
            }
        }
        if self.has_init {
            println!("Init context: present");
        } else {
            println!("Init context: MISSING");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout(dirs: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for dir in dirs {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        temp
    }

    #[test]
    fn scan_finds_complete_and_partial_versions() {
        let temp = layout(&[
            "build/1.45.0",
            "runtime/1.45.0",
            "build/1.46.0",
            "init",
        ]);

        let inventory = VersionInventory::scan(temp.path());

        assert_eq!(inventory.versions.len(), 2);
        assert!(inventory.has_init);
        assert_eq!(inventory.complete_versions(), vec!["1.45.0"]);

        let partial = inventory
            .versions
            .iter()
            .find(|v| v.version == "1.46.0")
            .unwrap();
        assert!(partial.has_build);
        assert!(!partial.has_runtime);
    }

    #[test]
    fn scan_of_missing_layout_is_empty() {
        let temp = TempDir::new().unwrap();
        let inventory = VersionInventory::scan(&temp.path().join("no-such-dir"));

        assert!(inventory.is_empty());
        assert!(!inventory.has_init);
    }

    #[test]
    fn scan_ignores_files_at_version_level() {
        let temp = layout(&["build"]);
        fs::write(temp.path().join("build/README.md"), "not a version").unwrap();

        let inventory = VersionInventory::scan(temp.path());
        assert!(inventory.is_empty());
    }

    #[test]
    fn json_view_carries_the_fields() {
        let temp = layout(&["build/1.45.0", "runtime/1.45.0", "init"]);
        let inventory = VersionInventory::scan(temp.path());

        let json = inventory.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["has_init"], true);
        assert_eq!(value["versions"][0]["version"], "1.45.0");
        assert_eq!(value["versions"][0]["has_build"], true);
        assert_eq!(value["versions"][0]["has_runtime"], true);
    }
}
