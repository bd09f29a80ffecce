//! Schema file naming.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{Error, Language, Result};

/// Extension every schema file must carry.
pub const SCHEMA_EXTENSION: &str = ".proto";

/// Basename of a schema file without its extension (`protos/echo.proto` -> `echo`).
///
/// This is the key for every output directory and generated artifact of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueName(String);

impl UniqueName {
    /// Derive the unique name from a schema path.
    ///
    /// Only inspects the path string; never touches the filesystem.
    pub fn from_schema_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::invalid_input(path, "path has no UTF-8 file name"))?;

        let stem = file_name.strip_suffix(SCHEMA_EXTENSION).ok_or_else(|| {
            Error::invalid_input(path, format!("schema file needs to end in {}", SCHEMA_EXTENSION))
        })?;

        if stem.is_empty() {
            return Err(Error::invalid_input(path, "schema file name is empty"));
        }

        Ok(Self(stem.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the schema copied into every output directory.
    pub fn schema_file_name(&self) -> String {
        format!("{}{}", self.0, SCHEMA_EXTENSION)
    }

    /// Directory name for one language target (`echo_go`).
    pub fn output_dir_name(&self, language: Language) -> String {
        format!("{}_{}", self.0, language.as_str())
    }

    /// A generated artifact named after the schema (`echo` + `.pb.go`).
    pub fn artifact(&self, suffix: &str) -> PathBuf {
        PathBuf::from(format!("{}{}", self.0, suffix))
    }
}

impl fmt::Display for UniqueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_schema_path() {
        let name = UniqueName::from_schema_path(Path::new("protos/echo.proto")).unwrap();
        assert_eq!(name.as_str(), "echo");
        assert_eq!(name.schema_file_name(), "echo.proto");
        assert_eq!(name.output_dir_name(Language::Cpp), "echo_cpp");
        assert_eq!(name.artifact(".pb.go"), PathBuf::from("echo.pb.go"));
    }

    #[test]
    fn test_dotted_stem_is_kept() {
        let name = UniqueName::from_schema_path(Path::new("/abs/route.guide.proto")).unwrap();
        assert_eq!(name.to_string(), "route.guide");
    }

    #[test]
    fn test_rejects_other_extensions() {
        for path in ["echo.txt", "echo.proto.bak", "echo.PROTO", "echo"] {
            let err = UniqueName::from_schema_path(Path::new(path)).unwrap_err();
            assert!(
                matches!(*err, Error::InvalidInput { .. }),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_empty_stem() {
        let err = UniqueName::from_schema_path(Path::new("protos/.proto")).unwrap_err();
        assert!(matches!(*err, Error::InvalidInput { .. }));
    }
}
