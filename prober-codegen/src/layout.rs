//! Output directories and the shared bindings tree.

use std::path::{Path, PathBuf};

use prober_core::{
    Error, File, Language, Result, UniqueName, move_file, recreate_dir, remove_dir_if_exists,
};
use tracing::debug;

/// Per-language output directories under one output root.
///
/// Each (schema, language) pair owns `<root>/<name>_<lang>`. Runs for other
/// schemas never touch it.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<name>_<lang>`
    pub fn dir_for(&self, unique_name: &UniqueName, language: Language) -> PathBuf {
        self.root.join(unique_name.output_dir_name(language))
    }

    /// Empty the output directory for a language and write the schema
    /// source into it as `<name>.proto`.
    ///
    /// The source is passed in already read, so a schema that lives inside
    /// the directory being recreated survives. A failure midway leaves
    /// whatever state it reached.
    pub fn prepare(
        &self,
        unique_name: &UniqueName,
        language: Language,
        schema_source: &str,
    ) -> Result<PathBuf> {
        let dir = self.dir_for(unique_name, language);
        debug!(dir = %dir.display(), "preparing output directory");

        recreate_dir(&dir)?;
        File::new(dir.join(unique_name.schema_file_name()), schema_source).write()?;
        Ok(dir)
    }

    /// Remove the output directories of a schema. Returns the ones that existed.
    pub fn clean(
        &self,
        unique_name: &UniqueName,
        languages: impl IntoIterator<Item = Language>,
    ) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for language in languages {
            let dir = self.dir_for(unique_name, language);
            if remove_dir_if_exists(&dir)? {
                removed.push(dir);
            }
        }
        Ok(removed)
    }
}

/// Directory tree holding Go bindings shared between generated clients,
/// keyed by unique name.
#[derive(Debug, Clone)]
pub struct SharedBindings {
    root: PathBuf,
}

impl SharedBindings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<name>`
    pub fn dir_for(&self, unique_name: &UniqueName) -> PathBuf {
        self.root.join(unique_name.as_str())
    }

    /// Replace the bindings of a schema with `files`.
    ///
    /// Each entry is `(source, file name)`; sources are moved, not copied.
    pub fn replace(&self, unique_name: &UniqueName, files: &[(PathBuf, &str)]) -> Result<PathBuf> {
        let dir = self.dir_for(unique_name);
        debug!(dir = %dir.display(), files = files.len(), "replacing shared bindings");

        recreate_dir(&dir)?;
        for (source, name) in files {
            if !source.is_file() {
                return Err(Error::filesystem(
                    source,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "expected generated file"),
                ));
            }
            move_file(source, &dir.join(name))?;
        }
        Ok(dir)
    }

    /// Remove the bindings of a schema. Returns whether they existed.
    pub fn remove(&self, unique_name: &UniqueName) -> Result<bool> {
        remove_dir_if_exists(&self.dir_for(unique_name))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn name(s: &str) -> UniqueName {
        UniqueName::from_schema_path(Path::new(s)).unwrap()
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_prepare_leaves_only_the_schema() {
        let temp = TempDir::new().unwrap();
        let schema = "syntax = \"proto3\";";

        let layout = OutputLayout::new(temp.path().join("generated"));
        let echo = name("echo.proto");

        let dir = layout.prepare(&echo, Language::Go, schema).unwrap();
        fs::write(dir.join("stale.pb.go"), "old").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();

        let again = layout.prepare(&echo, Language::Go, schema).unwrap();
        assert_eq!(dir, again);
        assert!(dir.ends_with("generated/echo_go"));
        assert_eq!(entries(&dir), ["echo.proto"]);
        assert_eq!(
            fs::read_to_string(dir.join("echo.proto")).unwrap(),
            "syntax = \"proto3\";"
        );
    }

    #[test]
    fn test_prepare_leaves_other_schemas_alone() {
        let temp = TempDir::new().unwrap();
        let layout = OutputLayout::new(temp.path().join("out"));
        let echo_dir = layout
            .prepare(&name("echo.proto"), Language::Go, "echo")
            .unwrap();
        fs::write(echo_dir.join("echo.pb.go"), "generated").unwrap();

        layout
            .prepare(&name("ping.proto"), Language::Go, "ping")
            .unwrap();

        assert_eq!(entries(&echo_dir), ["echo.pb.go", "echo.proto"]);
    }

    #[test]
    fn test_prepare_blocked_by_a_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("out"), "not a directory").unwrap();
        let layout = OutputLayout::new(temp.path().join("out"));
        let err = layout
            .prepare(&name("echo.proto"), Language::Cpp, "")
            .unwrap_err();
        assert!(matches!(*err, Error::Filesystem { .. }));
    }

    #[test]
    fn test_clean() {
        let temp = TempDir::new().unwrap();
        let layout = OutputLayout::new(temp.path().join("out"));
        let echo = name("echo.proto");
        layout.prepare(&echo, Language::Cpp, "").unwrap();

        let removed = layout.clean(&echo, Language::ALL).unwrap();
        assert_eq!(removed, [temp.path().join("out/echo_cpp")]);
        assert!(layout.clean(&echo, Language::ALL).unwrap().is_empty());
    }

    #[test]
    fn test_replace_bindings_drops_previous_contents() {
        let temp = TempDir::new().unwrap();
        let bindings = SharedBindings::new(temp.path().join("generated_go_pb_files"));
        let echo = name("echo.proto");

        let old = bindings.dir_for(&echo);
        fs::create_dir_all(&old).unwrap();
        fs::write(old.join("leftover.go"), "old").unwrap();

        let work = temp.path().join("echo_go");
        fs::create_dir_all(&work).unwrap();
        fs::write(work.join("echo.pb.go"), "package echo").unwrap();
        fs::write(work.join("BUILD.pb"), "go_library()").unwrap();

        let dir = bindings
            .replace(
                &echo,
                &[
                    (work.join("echo.pb.go"), "echo.pb.go"),
                    (work.join("BUILD.pb"), "BUILD"),
                ],
            )
            .unwrap();

        assert_eq!(entries(&dir), ["BUILD", "echo.pb.go"]);
        assert_eq!(fs::read_to_string(dir.join("BUILD")).unwrap(), "go_library()");
        assert!(!work.join("echo.pb.go").exists());
        assert!(!work.join("BUILD.pb").exists());

        assert!(bindings.remove(&echo).unwrap());
        assert!(!bindings.remove(&echo).unwrap());
    }

    #[test]
    fn test_replace_missing_source() {
        let temp = TempDir::new().unwrap();
        let bindings = SharedBindings::new(temp.path());
        let err = bindings
            .replace(&name("echo.proto"), &[(temp.path().join("echo.pb.go"), "echo.pb.go")])
            .unwrap_err();
        assert!(matches!(*err, Error::Filesystem { .. }));
    }
}
