//! Post-processing of `protoc-gen-go` output.

use std::{fs, path::Path};

use prober_core::{Error, Result};

/// Start of the compile-time version assertion `protoc-gen-go` emits.
///
/// Bindings in the shared tree are built against whatever proto runtime the
/// workspace pins, so the assertion is dropped.
pub const VERSION_MARKER: &str = "const _ = proto.ProtoPackageIsVersion";

/// Remove every line starting with [`VERSION_MARKER`].
///
/// Returns the patched source and whether anything was removed. Applying it
/// to its own output changes nothing.
pub fn strip_version_marker(source: &str) -> (String, bool) {
    let mut removed = false;
    let mut out = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        if line.trim_start().starts_with(VERSION_MARKER) {
            removed = true;
            continue;
        }
        out.push_str(line);
    }
    (out, removed)
}

/// Strip the version assertion from a file in place.
///
/// The file is only rewritten when it contained the marker.
pub fn strip_version_marker_in_file(path: &Path) -> Result<bool> {
    let source = fs::read_to_string(path).map_err(|e| Error::filesystem(path, e))?;
    let (patched, removed) = strip_version_marker(&source);
    if removed {
        fs::write(path, patched).map_err(|e| Error::filesystem(path, e))?;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const GENERATED: &str = "package echo\n\n// This is a compile-time assertion.\nconst _ = proto.ProtoPackageIsVersion2 // please upgrade the proto package\n\ntype EchoRequest struct{}\n";

    #[test]
    fn test_strips_marker() {
        let (patched, removed) = strip_version_marker(GENERATED);
        assert!(removed);
        insta::assert_snapshot!(patched, @r"
        package echo

        // This is a compile-time assertion.

        type EchoRequest struct{}
        ");
    }

    #[test]
    fn test_idempotent() {
        let (once, _) = strip_version_marker(GENERATED);
        let (twice, removed) = strip_version_marker(&once);
        assert!(!removed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_without_marker_is_unchanged() {
        let source = "package echo\n\ntype EchoRequest struct{}";
        assert_eq!(strip_version_marker(source), (source.to_string(), false));
    }

    #[test]
    fn test_marker_on_last_line_without_newline() {
        let (patched, removed) =
            strip_version_marker("package echo\nconst _ = proto.ProtoPackageIsVersion3");
        assert!(removed);
        assert_eq!(patched, "package echo\n");
    }

    #[test]
    fn test_in_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("echo.pb.go");
        fs::write(&path, GENERATED).unwrap();

        assert!(strip_version_marker_in_file(&path).unwrap());
        assert!(!strip_version_marker_in_file(&path).unwrap());
        assert!(!fs::read_to_string(&path).unwrap().contains(VERSION_MARKER));
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = strip_version_marker_in_file(&temp.path().join("echo.pb.go")).unwrap_err();
        assert!(matches!(*err, Error::Filesystem { .. }));
    }
}
