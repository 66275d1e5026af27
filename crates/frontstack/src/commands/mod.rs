pub mod prefix;
pub mod synth;
pub mod validate;

use colored::Colorize;
use frontstack_config::{Overrides, StackConfig};
use std::path::{Path, PathBuf};

/// Resolve file, environment and flags into one config, exiting on a
/// config error
pub fn resolve_config(
    path: Option<&Path>,
    overrides: Overrides,
) -> (StackConfig, Option<PathBuf>) {
    match StackConfig::resolve(path) {
        Ok((mut config, source)) => {
            config.apply_overrides(overrides);
            (config, source)
        }
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ Config error".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
