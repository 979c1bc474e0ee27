//! Shared test utilities for fnimg tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use fnimg::config::Config;

/// Test environment with a synthetic images/ layout and a builder log.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Base directory (repository root simulation)
    pub base_dir: PathBuf,
    /// The images/ tree with build/runtime/init contexts
    pub images_dir: PathBuf,
    /// File every fake builder appends its cwd and argv to
    pub log_path: PathBuf,
}

impl TestEnv {
    /// Create a layout with build, runtime, and init contexts for `version`.
    pub fn new(version: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let images_dir = base_dir.join("images");

        for dir in [
            images_dir.join("build").join(version),
            images_dir.join("runtime").join(version),
            images_dir.join("init"),
        ] {
            fs::create_dir_all(&dir).expect("Failed to create context dir");
            fs::write(dir.join("Dockerfile"), "FROM scratch\n").expect("Failed to write Dockerfile");
        }

        let log_path = base_dir.join("builder.log");

        Self {
            _temp_dir: temp_dir,
            base_dir,
            images_dir,
            log_path,
        }
    }

    /// Config pointing at this layout, with `builder` as the docker binary.
    pub fn config(&self, builder: &Path) -> Config {
        Config {
            namespace: "fnimg".to_string(),
            docker: builder.to_string_lossy().into_owned(),
            images_dir: self.images_dir.clone(),
        }
    }

    /// Builder invocations recorded so far: (working directory, argv line).
    pub fn invocations(&self) -> Vec<(String, String)> {
        let content = fs::read_to_string(&self.log_path).unwrap_or_default();
        let lines: Vec<&str> = content.lines().collect();
        lines
            .chunks(2)
            .filter(|c| c.len() == 2)
            .map(|c| (c[0].to_string(), c[1].to_string()))
            .collect()
    }

    fn install_builder(&self, body: &str) -> PathBuf {
        let path = self.base_dir.join("fake-docker");
        let script = format!(
            "#!/bin/sh\npwd >> \"{log}\"\necho \"$@\" >> \"{log}\"\n{body}\n",
            log = self.log_path.display(),
            body = body
        );
        fs::write(&path, script).expect("Failed to write fake builder");

        let mut perms = fs::metadata(&path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to set permissions");

        path
    }

    /// Fake builder that records its invocation and succeeds.
    pub fn builder_ok(&self) -> PathBuf {
        self.install_builder("exit 0")
    }

    /// Fake builder that records its invocation and fails with `code`.
    pub fn builder_failing(&self, code: i32) -> PathBuf {
        self.install_builder(&format!("exit {}", code))
    }

    /// Fake builder that fails with `code` only when the argv contains
    /// `needle`, succeeding otherwise.
    pub fn builder_failing_on(&self, needle: &str, code: i32) -> PathBuf {
        self.install_builder(&format!(
            "case \"$*\" in\n  *{}*) exit {} ;;\nesac\nexit 0",
            needle, code
        ))
    }
}

/// Canonicalized form of a path, for comparing against `pwd` output.
pub fn canonical(path: &Path) -> PathBuf {
    path.canonicalize()
        .unwrap_or_else(|_| panic!("Failed to canonicalize {}", path.display()))
}
