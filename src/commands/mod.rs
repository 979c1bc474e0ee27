//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `build` - Build the three function runtime images for a version
//! - `preflight` - Run preflight checks
//! - `show` - Display information

pub mod build;
mod preflight;
pub mod show;

pub use build::cmd_build;
pub use preflight::cmd_preflight;
pub use show::cmd_show;
