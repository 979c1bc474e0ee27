//! Preflight checks for the image build environment.
//!
//! Validates the builder tool and the images layout before a build.
//! Run with `fnimg preflight` to check everything is ready.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::docker::Docker;
use crate::inventory::VersionInventory;

/// Result of a single preflight check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed.
    Pass,
    /// Check failed - build will fail.
    Fail,
    /// Check passed but with a warning.
    Warn,
}

impl CheckResult {
    pub fn pass(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            details: None,
        }
    }

    pub fn pass_with(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            details: Some(details.to_string()),
        }
    }

    pub fn fail(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            details: Some(details.to_string()),
        }
    }

    pub fn warn(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warn,
            details: Some(details.to_string()),
        }
    }
}

/// Results of all preflight checks.
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// Returns true if all checks passed (no failures).
    pub fn all_passed(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    /// Count of failed checks.
    pub fn fail_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .count()
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        println!("=== Preflight Check Results ===\n");

        for check in &self.checks {
            let (icon, status_str) = match check.status {
                CheckStatus::Pass => ("✓", "PASS"),
                CheckStatus::Fail => ("✗", "FAIL"),
                CheckStatus::Warn => ("⚠", "WARN"),
            };

            print!("  {} [{}] {}", icon, status_str, check.name);
            match &check.details {
                Some(details) => println!(": {}", details),
                None => println!(),
            }
        }

        println!();
        let total = self.checks.len();
        let passed = self
            .checks
            .iter()
            .filter(|c| c.status == CheckStatus::Pass)
            .count();
        let failed = self.fail_count();

        println!("Summary: {}/{} passed", passed, total);
        if failed > 0 {
            println!("         {} FAILED - build will not succeed", failed);
        }
    }
}

/// Run all preflight checks.
pub fn run_preflight(config: &Config) -> PreflightReport {
    let mut checks = Vec::new();

    println!("Running preflight checks...\n");

    // Builder tool
    match which::which(&config.docker) {
        Ok(path) => {
            checks.push(CheckResult::pass_with(
                &config.docker,
                &path.display().to_string(),
            ));
            // Only probe the daemon once the binary resolves
            if Docker::new(&config.docker).version_probe() {
                checks.push(CheckResult::pass("builder daemon"));
            } else {
                checks.push(CheckResult::warn(
                    "builder daemon",
                    "Not reachable. Is the docker daemon running?",
                ));
            }
        }
        Err(_) => {
            checks.push(CheckResult::fail(
                &config.docker,
                "Not found in PATH. Install docker or set FNIMG_DOCKER.",
            ));
        }
    }

    // Images layout
    for subdir in ["build", "runtime", "init"] {
        let dir = config.images_dir.join(subdir);
        let name = format!("images/{}", subdir);
        if dir.is_dir() {
            checks.push(CheckResult::pass_with(&name, &dir.display().to_string()));
        } else {
            checks.push(CheckResult::fail(
                &name,
                "Missing build context directory.",
            ));
        }
    }

    // Version coverage
    let inventory = VersionInventory::scan(&config.images_dir);
    let complete = inventory.complete_versions().len();
    if complete > 0 {
        checks.push(CheckResult::pass_with(
            "versions",
            &format!("{} with both build and runtime contexts", complete),
        ));
    } else {
        checks.push(CheckResult::warn(
            "versions",
            "No version has both build and runtime contexts.",
        ));
    }

    println!();
    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail(config: &Config) -> Result<()> {
    let report = run_preflight(config);
    report.print();

    if !report.all_passed() {
        bail!(
            "Preflight failed: {} check(s) failed. Fix the issues above before building.",
            report.fail_count()
        );
    }

    println!("All preflight checks passed!\n");
    Ok(())
}
