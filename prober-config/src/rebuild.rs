use std::{fmt, str::FromStr};

use serde::Deserialize;

/// What to do when rebuilding the generator plugins fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RebuildPolicy {
    /// Log a warning and carry on with whatever plugins are already built.
    #[default]
    BestEffort,
    /// Abort the run.
    Strict,
}

impl RebuildPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RebuildPolicy::BestEffort => "best-effort",
            RebuildPolicy::Strict => "strict",
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, RebuildPolicy::Strict)
    }
}

impl fmt::Display for RebuildPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RebuildPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best-effort" | "best_effort" => Ok(RebuildPolicy::BestEffort),
            "strict" => Ok(RebuildPolicy::Strict),
            _ => Err(format!(
                "unknown rebuild policy '{}', expected 'strict' or 'best-effort'",
                s
            )),
        }
    }
}

/// `[rebuild]` section of prober.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RebuildConfig {
    #[serde(default)]
    pub policy: RebuildPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("strict".parse::<RebuildPolicy>().unwrap(), RebuildPolicy::Strict);
        assert_eq!(
            "best-effort".parse::<RebuildPolicy>().unwrap(),
            RebuildPolicy::BestEffort
        );
        assert!("sometimes".parse::<RebuildPolicy>().is_err());
    }

    #[test]
    fn test_default_is_best_effort() {
        assert_eq!(RebuildPolicy::default(), RebuildPolicy::BestEffort);
        assert!(!RebuildPolicy::default().is_strict());
    }
}
