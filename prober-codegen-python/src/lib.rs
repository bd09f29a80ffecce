//! Python client generation for prober.

mod generator;

pub use generator::{BUILD_TEMPLATE, Generator};
pub use prober_codegen::LanguagePlugin;
