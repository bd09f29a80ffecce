//! Core types and utilities for the prober client generator.
//!
//! This crate provides the error taxonomy, language targets, schema naming
//! and file helpers shared by every other prober crate.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod language;
mod naming;

pub use error::{Error, Result};
// File operations
pub use file::{File, copy_file, move_file, recreate_dir, remove_dir_if_exists};
pub use language::{Language, LanguageChoice, LanguageSelection};
pub use naming::{SCHEMA_EXTENSION, UniqueName};
