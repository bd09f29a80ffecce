use std::path::Path;

use prober_core::{Error, Result};

use crate::Config;

/// File name looked up in the current directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "prober.toml";

/// Represents a prober.toml file with both raw content and parsed config.
pub struct ProberToml {
    content: String,
    config: Config,
}

impl ProberToml {
    /// Open and parse a prober.toml file.
    ///
    /// A relative `paths.root` resolves against the directory holding the file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = std::path::absolute(path.as_ref()).map_err(|e| {
            Box::new(Error::ConfigRead {
                path: path.as_ref().to_path_buf(),
                source: e,
            })
        })?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::ConfigRead {
                path: path.clone(),
                source: e,
            })
        })?;
        let base = path.parent().unwrap_or(Path::new("/")).to_path_buf();
        let config = parse_config(&content, &path.display().to_string(), &base)?;

        Ok(Self { content, config })
    }

    /// Load the configuration for a run.
    ///
    /// Uses `explicit` if given, otherwise `prober.toml` in `cwd` if present,
    /// otherwise defaults rooted at `cwd`.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
        if let Some(path) = explicit {
            return Ok(Self::open(path)?.into_config());
        }

        let candidate = cwd.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using discovered config");
            return Ok(Self::open(candidate)?.into_config());
        }

        tracing::debug!(root = %cwd.display(), "no prober.toml found, using defaults");
        Ok(Config::for_root(cwd))
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Parse prober.toml content; `base` anchors a relative `paths.root`.
pub(crate) fn parse_config(content: &str, filename: &str, base: &Path) -> Result<Config> {
    let mut config: Config =
        toml::from_str(content).map_err(|e| Error::config_parse(e, content, filename))?;
    if config.paths.root == Path::new(".") {
        config.paths.root = base.to_path_buf();
    } else if config.paths.root.is_relative() {
        config.paths.root = base.join(&config.paths.root);
    }
    Ok(config)
}
