//! Configuration for the prober client generator.
//!
//! Everything the generator needs to know about its surroundings (where the
//! repository root is, where templates and generator plugins live, which
//! executables to call) is read from an optional `prober.toml` and carried
//! explicitly in a [`Config`] value. Nothing is taken from the environment.

mod config;
mod file;
mod rebuild;

pub use config::{Config, PathsConfig, ToolsConfig};
pub use file::{CONFIG_FILE_NAME, ProberToml};
pub use rebuild::{RebuildConfig, RebuildPolicy};
