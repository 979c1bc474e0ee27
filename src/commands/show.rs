//! Show command - displays information.

use anyhow::Result;

use crate::config::Config;
use crate::docker::Docker;
use crate::inventory::VersionInventory;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// List toolchain versions with build contexts
    Versions { json: bool },
    /// List locally built images
    Images,
}

/// Execute the show command.
pub fn cmd_show(config: &Config, target: ShowTarget) -> Result<()> {
    match target {
        ShowTarget::Config => {
            config.print();
        }
        ShowTarget::Versions { json } => {
            let inventory = VersionInventory::scan(&config.images_dir);
            if json {
                println!("{}", inventory.to_json()?);
            } else {
                inventory.print();
            }
        }
        ShowTarget::Images => {
            // Delegate to the builder's own listing, streamed live
            Docker::new(&config.docker).list_images(&config.namespace)?;
        }
    }
    Ok(())
}
