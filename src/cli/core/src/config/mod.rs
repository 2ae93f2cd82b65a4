/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::resolve_config;
#[cfg(test)]
pub use loader::{CONFIG_FILE, find_config, parse_config};
pub use types::{BatchMode, TranspileConfig};
