use crate::error::{CatalogError, Result};
use ignore::WalkBuilder;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Kind of schema file a candidate was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaKind {
    Xsd,
    Dtd,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Xsd => write!(f, "XSD"),
            SchemaKind::Dtd => write!(f, "DTD"),
        }
    }
}

/// A discovered candidate file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemaFile {
    pub absolute_path: PathBuf,
    pub kind: SchemaKind,
}

/// Candidates found under a scan root, each list sorted by path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveredFiles {
    pub xsd: Vec<SchemaFile>,
    pub dtd: Vec<SchemaFile>,
}

impl DiscoveredFiles {
    pub fn len(&self) -> usize {
        self.xsd.len() + self.dtd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Recursive schema file discovery
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    /// File name suffix marking XSD candidates
    xsd_extension: String,
    /// File name suffix marking DTD candidates
    dtd_extension: String,
    /// Whether DTD candidates are collected at all
    include_dtd: bool,
}

impl FileDiscovery {
    /// Create a new FileDiscovery instance
    pub fn new() -> Self {
        Self {
            xsd_extension: ".xsd".to_string(),
            dtd_extension: ".dtd".to_string(),
            include_dtd: true,
        }
    }

    /// Set the XSD and DTD file name suffixes
    pub fn with_extensions(
        mut self,
        xsd_extension: impl Into<String>,
        dtd_extension: impl Into<String>,
    ) -> Self {
        self.xsd_extension = xsd_extension.into();
        self.dtd_extension = dtd_extension.into();
        self
    }

    /// Set whether DTD files are collected
    pub fn with_include_dtd(mut self, include_dtd: bool) -> Self {
        self.include_dtd = include_dtd;
        self
    }

    /// Walk `root` recursively and collect every XSD and DTD candidate.
    ///
    /// No ignore files, hidden-file rules or depth limits apply. Paths are made
    /// absolute with `.` and `..` folded away (without resolving symlinks) and sorted, so the result does not
    /// depend on the order the filesystem returns directory entries in.
    pub fn discover_files(&self, root: &Path) -> Result<DiscoveredFiles> {
        if !root.is_dir() {
            return Err(CatalogError::InvalidDirectory {
                path: root.to_path_buf(),
            });
        }
        let root = normalized_absolute(root)?;

        let walker = WalkBuilder::new(&root).standard_filters(false).build();

        let mut discovered = DiscoveredFiles::default();
        for entry in walker {
            let entry = entry.map_err(|e| CatalogError::FileSystemTraversal {
                path: root.clone(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            if let Some(kind) = self.classify(path) {
                debug!(path = %path.display(), %kind, "discovered candidate");
                let file = SchemaFile {
                    absolute_path: path.to_path_buf(),
                    kind,
                };
                match kind {
                    SchemaKind::Xsd => discovered.xsd.push(file),
                    SchemaKind::Dtd => discovered.dtd.push(file),
                }
            }
        }

        discovered.xsd.sort();
        discovered.dtd.sort();
        Ok(discovered)
    }

    /// Classify a path by its file name suffix
    pub fn classify(&self, path: &Path) -> Option<SchemaKind> {
        let file_name = path.file_name()?;
        let Some(name) = file_name.to_str() else {
            warn!("Skipping file with non-UTF-8 name: {}", path.display());
            return None;
        };
        if name.ends_with(&self.xsd_extension) {
            Some(SchemaKind::Xsd)
        } else if self.include_dtd && name.ends_with(&self.dtd_extension) {
            Some(SchemaKind::Dtd)
        } else {
            None
        }
    }
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute form of `path` with `.` and `..` components resolved lexically.
///
/// Symlinks are not consulted, so `link/..` folds to the directory holding
/// `link` rather than to the link target's parent.
pub fn normalized_absolute(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();

        fs::write(root.join("root.xsd"), "<schema/>").unwrap();
        fs::write(root.join("b/nested/deep.xsd"), "<schema/>").unwrap();
        fs::write(root.join("a/first.xsd"), "<schema/>").unwrap();
        fs::write(root.join("a/doc.dtd"), "<!ELEMENT doc ANY>").unwrap();
        fs::write(root.join(".hidden/secret.dtd"), "<!ELEMENT x ANY>").unwrap();
        fs::write(root.join("notes.txt"), "text file").unwrap();
        fs::write(root.join("upper.XSD"), "<schema/>").unwrap();
        // A .gitignore must not hide anything from the scan
        fs::write(root.join(".gitignore"), "*.xsd\n").unwrap();

        temp_dir
    }

    fn names(files: &[SchemaFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.absolute_path.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_discover_classifies_by_extension() {
        let temp_dir = create_test_directory();
        let discovery = FileDiscovery::new();

        let files = discovery.discover_files(temp_dir.path()).unwrap();

        assert_eq!(names(&files.xsd), vec!["first.xsd", "deep.xsd", "root.xsd"]);
        assert_eq!(names(&files.dtd), vec!["secret.dtd", "doc.dtd"]);
        assert!(files.xsd.iter().all(|f| f.kind == SchemaKind::Xsd));
        assert!(files.dtd.iter().all(|f| f.kind == SchemaKind::Dtd));
        assert_eq!(files.len(), 5);
    }

    #[test]
    fn test_discovered_paths_are_absolute_and_sorted() {
        let temp_dir = create_test_directory();
        let files = FileDiscovery::new()
            .discover_files(temp_dir.path())
            .unwrap();

        for file in files.xsd.iter().chain(files.dtd.iter()) {
            assert!(file.absolute_path.is_absolute());
        }

        let mut sorted = files.xsd.clone();
        sorted.sort();
        assert_eq!(sorted, files.xsd);
    }

    #[test]
    fn test_xsd_only_skips_dtd() {
        let temp_dir = create_test_directory();
        let files = FileDiscovery::new()
            .with_include_dtd(false)
            .discover_files(temp_dir.path())
            .unwrap();

        assert_eq!(files.xsd.len(), 3);
        assert!(files.dtd.is_empty());
    }

    #[test]
    fn test_custom_extensions() {
        let temp_dir = create_test_directory();
        let files = FileDiscovery::new()
            .with_extensions(".XSD", ".txt")
            .discover_files(temp_dir.path())
            .unwrap();

        assert_eq!(names(&files.xsd), vec!["upper.XSD"]);
        assert_eq!(names(&files.dtd), vec!["notes.txt"]);
    }

    #[test]
    fn test_classify() {
        let discovery = FileDiscovery::new();

        assert_eq!(discovery.classify(Path::new("a.xsd")), Some(SchemaKind::Xsd));
        assert_eq!(discovery.classify(Path::new("a.dtd")), Some(SchemaKind::Dtd));
        assert_eq!(discovery.classify(Path::new("a.xml")), None);
        assert_eq!(discovery.classify(Path::new("xsd")), None);
    }

    #[test]
    fn test_nonexistent_directory() {
        let result = FileDiscovery::new().discover_files(Path::new("/nonexistent/path"));

        match result.unwrap_err() {
            CatalogError::InvalidDirectory { .. } => {}
            other => panic!("Expected InvalidDirectory, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let files = FileDiscovery::new()
            .discover_files(temp_dir.path())
            .unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_normalized_absolute_folds_dot_segments() {
        let temp_dir = TempDir::new().unwrap();
        let root = normalized_absolute(temp_dir.path()).unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();

        let dotted = root.join("sub").join("..").join(".").join("sub");
        assert_eq!(normalized_absolute(&dotted).unwrap(), root.join("sub"));
        assert_eq!(normalized_absolute(Path::new("/..")).unwrap(), PathBuf::from("/"));
    }

    #[test]
    fn test_discovered_paths_have_no_parent_segments() {
        let temp_dir = create_test_directory();
        let dotted = temp_dir.path().join("a").join("..");

        let files = FileDiscovery::new().discover_files(&dotted).unwrap();

        for file in files.xsd.iter().chain(&files.dtd) {
            assert!(
                !file
                    .absolute_path
                    .components()
                    .any(|c| matches!(c, Component::ParentDir | Component::CurDir)),
                "{} keeps a dot segment",
                file.absolute_path.display()
            );
        }
        assert_eq!(names(&files.xsd), vec!["first.xsd", "deep.xsd", "root.xsd"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name_is_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("/schemas").join(OsStr::from_bytes(b"caf\xE9.xsd"));
        assert_eq!(FileDiscovery::new().classify(&path), None);
        assert_eq!(
            FileDiscovery::new().classify(Path::new("/schemas/cafe.xsd")),
            Some(SchemaKind::Xsd)
        );
    }
}
