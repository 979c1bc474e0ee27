//! Build command - drives the three image builds for a toolchain version.
//!
//! The plan is fixed: build image, runtime image, init image, in that order.
//! Each step enters its build context directory, invokes the builder with
//! the computed tag, and restores the previous directory. Any failure aborts
//! the remaining steps immediately; nothing is retried or cleaned up.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::docker::{Docker, ImageRef};
use crate::inventory::VersionInventory;
use crate::workdir::Workdir;

/// One unit of the build plan.
#[derive(Debug, Clone)]
pub struct BuildStep {
    pub name: &'static str,
    pub context: PathBuf,
    pub image: ImageRef,
}

/// The fixed three-step plan for `version`.
///
/// The init image is version-independent: same context, same tag, whatever
/// version is being built.
pub fn plan(images_dir: &Path, namespace: &str, version: &str) -> Vec<BuildStep> {
    vec![
        BuildStep {
            name: "build image",
            context: images_dir.join("build").join(version),
            image: ImageRef::new(namespace, format!("{}-build", version)),
        },
        BuildStep {
            name: "runtime image",
            context: images_dir.join("runtime").join(version),
            image: ImageRef::new(namespace, format!("{}-rt", version)),
        },
        BuildStep {
            name: "init image",
            context: images_dir.join("init"),
            image: ImageRef::new(namespace, "init"),
        },
    ]
}

/// Execute the build command.
pub fn cmd_build(config: &Config, version: &str) -> Result<()> {
    let steps = plan(&config.images_dir, &config.namespace, version);

    // Resolve every context up front so a typo'd version fails before the
    // first (long) build, with a hint at what exists.
    for step in &steps {
        if !step.context.is_dir() {
            let inventory = VersionInventory::scan(&config.images_dir);
            let available = inventory.complete_versions();
            if available.is_empty() {
                bail!("Build context {} not found", step.context.display());
            }
            bail!(
                "Build context {} not found. Available versions: {}",
                step.context.display(),
                available.join(", ")
            );
        }
    }

    let docker = Docker::new(&config.docker);

    println!("=== Building function runtime images for Rust {} ===\n", version);
    let total = Instant::now();

    for step in &steps {
        println!("Building {} ({})...", step.name, step.image);
        let start = Instant::now();

        let cwd = Workdir::push(&step.context)?;
        docker.build_current_dir(&step.image)?;
        drop(cwd);

        println!("  [{:.1}s] {}\n", start.elapsed().as_secs_f64(), step.image);
    }

    println!(
        "Built {} images in {:.1}s",
        steps.len(),
        total.elapsed().as_secs_f64()
    );
    Ok(())
}
