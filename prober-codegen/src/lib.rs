//! Client generation pipeline for the prober generator.
//!
//! This crate provides the language-agnostic machinery used by the
//! language-specific plugins (e.g., `prober-codegen-go`).
//!
//! # Module Organization
//!
//! - [`language`] - The [`LanguagePlugin`] trait and the [`GenerationContext`] it runs in
//! - [`toolchain`] - Locating and running external tools ([`Toolchain`], [`Protoc`])
//! - [`template`] - Build descriptor templates ([`TemplateRenderer`])
//! - [`layout`] - Output directories and the shared bindings tree
//! - [`pipeline`] - The orchestrator ([`Pipeline`]) and the [`TestDriver`]
//! - [`testing`] - Test utilities (feature-gated)

pub mod language;
pub mod layout;
pub mod pipeline;
pub mod template;
pub mod toolchain;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use language::{GenerationContext, LanguagePlugin};
pub use layout::{OutputLayout, SharedBindings};
pub use pipeline::{
    GenerateReport, LanguageOutcome, Pipeline, RebuildOutcome, TestDriver, TestReport,
};
pub use template::{TemplateRenderer, UNIQUE_NAME_PLACEHOLDER};
pub use toolchain::{Protoc, ToolCommand, Toolchain};
