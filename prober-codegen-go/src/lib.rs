//! Go client generation for prober.
//!
//! The protobuf bindings for a schema do not stay in the output directory:
//! they move into the shared bindings tree (`generated_go_pb_files/<name>`)
//! together with their own `BUILD`, where every Go client imports them from.

mod generator;
mod patch;

pub use generator::{BUILD_CLIENT_TEMPLATE, BUILD_PB_TEMPLATE, Generator};
pub use patch::{VERSION_MARKER, strip_version_marker, strip_version_marker_in_file};
pub use prober_codegen::LanguagePlugin;
