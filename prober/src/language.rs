//! Language plugin registry.

use prober_codegen::LanguagePlugin;
use prober_core::{Language, LanguageSelection};

/// Maps a target language to its generator crate.
#[derive(Debug, Clone, Copy)]
pub struct LanguageSupport {
    language: Language,
}

impl LanguageSupport {
    pub fn get(language: Language) -> Self {
        Self { language }
    }

    /// A fresh plugin instance for this language.
    pub fn plugin(&self) -> Box<dyn LanguagePlugin> {
        match self.language {
            Language::Cpp => Box::new(prober_codegen_cpp::Generator),
            Language::Go => Box::new(prober_codegen_go::Generator),
            Language::Python => Box::new(prober_codegen_python::Generator),
        }
    }

    /// Plugins for every selected language, in selection order.
    pub fn plugins(languages: &LanguageSelection) -> Vec<Box<dyn LanguagePlugin>> {
        languages
            .iter()
            .map(|language| Self::get(language).plugin())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_plugin() {
        let plugins = LanguageSupport::plugins(&LanguageSelection::all());
        let languages: Vec<_> = plugins.iter().map(|p| p.language()).collect();
        assert_eq!(languages, Language::ALL);
    }
}
