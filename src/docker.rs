//! Builder-tool invocation helpers.
//!
//! Everything that shells out to docker (or a compatible OCI builder) lives
//! here, on top of the `process` layer. The binary name comes from
//! configuration so operators can substitute podman or a recording stub.

use anyhow::Result;
use std::fmt;

use crate::process::Cmd;

/// Repository component of every image this tool produces.
pub const IMAGE_REPO: &str = "rust";

/// A `namespace/repository:tag` image name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub namespace: String,
    pub repo: String,
    pub tag: String,
}

impl ImageRef {
    /// An image reference in the fixed repository for this tool.
    pub fn new(namespace: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            repo: IMAGE_REPO.to_string(),
            tag: tag.into(),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.namespace, self.repo, self.tag)
    }
}

/// Handle to the configured builder binary.
pub struct Docker {
    bin: String,
}

impl Docker {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// Build `image` from the build context in the current directory.
    ///
    /// The command line is echoed before execution and output is inherited,
    /// so the operator sees the builder's progress live.
    pub fn build_current_dir(&self, image: &ImageRef) -> Result<()> {
        Cmd::new(&self.bin)
            .args(["build", "-t"])
            .arg(image.to_string())
            .arg(".")
            .trace()
            .error_msg(format!("Build of {} failed", image))
            .run_interactive()?;
        Ok(())
    }

    /// Probe the builder daemon quietly. False when unreachable.
    pub fn version_probe(&self) -> bool {
        Cmd::new(&self.bin)
            .arg("version")
            .allow_fail()
            .run()
            .map(|r| r.success())
            .unwrap_or(false)
    }

    /// List locally built images for `namespace`, streamed to the terminal.
    pub fn list_images(&self, namespace: &str) -> Result<()> {
        Cmd::new(&self.bin)
            .arg("images")
            .arg(format!("{}/{}", namespace, IMAGE_REPO))
            .error_msg("Failed to list images")
            .run_interactive()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_ref_renders_canonical_form() {
        let image = ImageRef::new("fnimg", "1.45.0-build");
        assert_eq!(image.to_string(), "fnimg/rust:1.45.0-build");
    }

    #[test]
    fn image_ref_uses_fixed_repo() {
        let image = ImageRef::new("ns", "init");
        assert_eq!(image.repo, IMAGE_REPO);
        assert_eq!(image.to_string(), "ns/rust:init");
    }

    #[test]
    fn version_probe_false_for_missing_binary() {
        let docker = Docker::new("nonexistent_builder_12345");
        assert!(!docker.version_probe());
    }

    #[test]
    fn version_probe_true_for_working_binary() {
        // `true` accepts the `version` argument and exits 0
        let docker = Docker::new("true");
        assert!(docker.version_probe());
    }
}
