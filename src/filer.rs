//! Persistence of generated files.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::codegen::JavaFile;

/// Writes generated compilation units.
pub trait Filer {
    /// Persists `file`, returning where it was written.
    fn write(&mut self, file: &JavaFile) -> io::Result<PathBuf>;
}

/// Writes files below a root directory, one directory per package segment.
#[derive(Debug, Clone)]
pub struct DirectoryFiler {
    root: PathBuf,
}

impl DirectoryFiler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Filer for DirectoryFiler {
    fn write(&mut self, file: &JavaFile) -> io::Result<PathBuf> {
        let path = self.root.join(file.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, file.render())?;
        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Keeps rendered files in memory, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiler {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered source at a relative path such as `com/example/Foo.java`.
    pub fn get(&self, relative_path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(relative_path.as_ref()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Filer for MemoryFiler {
    fn write(&mut self, file: &JavaFile) -> io::Result<PathBuf> {
        let path = file.relative_path();
        self.files.insert(path.clone(), file.render());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::TypeSpec;

    #[test]
    fn test_directory_filer_creates_package_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut filer = DirectoryFiler::new(dir.path());
        let file = JavaFile::new("com.example", TypeSpec::interface("SharpFooComponent"));

        let path = filer.write(&file).unwrap();

        assert_eq!(path, dir.path().join("com/example/SharpFooComponent.java"));
        assert_eq!(fs::read_to_string(&path).unwrap(), file.render());
    }

    #[test]
    fn test_directory_filer_reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a package directory should go
        fs::write(dir.path().join("com"), "").unwrap();
        let mut filer = DirectoryFiler::new(dir.path());
        let file = JavaFile::new("com.example", TypeSpec::interface("SharpFooComponent"));

        assert!(filer.write(&file).is_err());
    }

    #[test]
    fn test_memory_filer_overwrites_same_path() {
        let mut filer = MemoryFiler::new();
        let first = JavaFile::new("p", TypeSpec::interface("A")).with_file_comment("one");
        let second = JavaFile::new("p", TypeSpec::interface("A")).with_file_comment("two");

        filer.write(&first).unwrap();
        filer.write(&second).unwrap();

        assert_eq!(filer.len(), 1);
        assert!(filer.get("p/A.java").unwrap().starts_with("// two"));
    }
}
