//! Language targets for client generation.

use std::{fmt, str::FromStr};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Supported target languages for prober clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C++, built with a generated BUILD descriptor
    Cpp,
    /// Go, with bindings relocated into the shared bindings tree
    Go,
    /// Python
    Python,
}

impl Language {
    /// Every known target, in declaration order.
    pub const ALL: [Language; 3] = [Language::Cpp, Language::Go, Language::Python];

    /// Returns the language identifier as a static string.
    ///
    /// This is also the suffix of every output directory (`echo_cpp`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Python => "python",
        }
    }

    /// Name of the build target that produces this language's client plugin.
    pub fn generator_target(&self) -> String {
        format!(":{}_generator", self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            "go" | "golang" => Ok(Language::Go),
            "python" | "py" => Ok(Language::Python),
            _ => Err(format!(
                "unknown language '{}', expected 'all', 'cpp', 'go' or 'python'",
                s
            )),
        }
    }
}

/// A single `--language` value: either `all` or one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageChoice {
    All,
    One(Language),
}

impl FromStr for LanguageChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(LanguageChoice::All)
        } else {
            s.parse().map(LanguageChoice::One)
        }
    }
}

/// The deduplicated, non-empty set of languages requested for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelection {
    languages: IndexSet<Language>,
}

impl LanguageSelection {
    /// Every known target.
    pub fn all() -> Self {
        Self {
            languages: Language::ALL.into_iter().collect(),
        }
    }

    /// Expand `all` and drop duplicates. An empty list means `all`.
    pub fn from_choices(choices: &[LanguageChoice]) -> Self {
        if choices.is_empty() {
            return Self::all();
        }

        let languages = choices
            .iter()
            .flat_map(|choice| match choice {
                LanguageChoice::All => Language::ALL.to_vec(),
                LanguageChoice::One(lang) => vec![*lang],
            })
            .collect();
        Self { languages }
    }

    /// Whether every known target was requested.
    pub fn covers_all(&self) -> bool {
        Language::ALL.iter().all(|lang| self.languages.contains(lang))
    }

    pub fn contains(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }

    pub fn iter(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages.iter().copied()
    }
}

impl From<Language> for LanguageSelection {
    fn from(language: Language) -> Self {
        Self {
            languages: IndexSet::from([language]),
        }
    }
}

impl fmt::Display for LanguageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.languages.iter().map(Language::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}
