//! C++ client generation for prober.
//!
//! Produces a Bazel package with the protobuf and gRPC bindings compiled by
//! `protoc` and a `generated_<name>_prober` binary built from the client
//! generator's output.

mod generator;

pub use generator::{BUILD_TEMPLATE, Generator};
pub use prober_codegen::LanguagePlugin;
