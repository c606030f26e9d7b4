//! Project type detection.
//!
//! Looks for manifest files (Cargo.toml, package.json, etc.) at the project
//! root. The detected type supplies default core files and the display name
//! shown in the document header.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Detected project type based on manifest files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectType {
    /// Rust project (Cargo.toml)
    Rust,
    /// Node.js project (package.json)
    Node,
    /// Python project (pyproject.toml, setup.py, requirements.txt)
    Python,
    /// Go project (go.mod)
    Go,
    /// Java project (pom.xml, build.gradle)
    Java,
    /// C/C++ project (CMakeLists.txt, Makefile)
    Native,
    /// Multiple project types detected
    Mixed,
    /// No markers found
    Unknown,
}

impl ProjectType {
    /// Name shown in the document header
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Rust => "Rust",
            ProjectType::Node => "Node.js",
            ProjectType::Python => "Python",
            ProjectType::Go => "Go",
            ProjectType::Java => "Java",
            ProjectType::Native => "C/C++",
            ProjectType::Mixed => "Mixed",
            ProjectType::Unknown => "Unknown",
        }
    }

    /// Files treated as core when the configuration names none
    pub fn default_core_files(&self) -> &'static [&'static str] {
        match self {
            ProjectType::Rust => &["Cargo.toml", "src/main.rs", "src/lib.rs"],
            ProjectType::Node => &["package.json", "index.js", "src/index.js", "src/index.ts"],
            ProjectType::Python => &["pyproject.toml", "setup.py", "main.py", "__main__.py"],
            ProjectType::Go => &["go.mod", "main.go"],
            ProjectType::Java => &["pom.xml", "build.gradle"],
            ProjectType::Native => &["CMakeLists.txt", "Makefile", "main.c", "main.cpp"],
            ProjectType::Mixed | ProjectType::Unknown => &[],
        }
    }
}

/// Project classification.
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    /// Directory that was inspected.
    pub root: PathBuf,

    /// Type of project based on manifest files.
    pub project_type: ProjectType,

    /// Manifest files found (Cargo.toml, package.json, etc.).
    pub manifest_files: Vec<PathBuf>,
}

impl ProjectManifest {
    /// Marker files that indicate a project type.
    const MARKERS: &'static [(&'static str, ProjectType)] = &[
        ("Cargo.toml", ProjectType::Rust),
        ("package.json", ProjectType::Node),
        ("pyproject.toml", ProjectType::Python),
        ("setup.py", ProjectType::Python),
        ("requirements.txt", ProjectType::Python),
        ("go.mod", ProjectType::Go),
        ("pom.xml", ProjectType::Java),
        ("build.gradle", ProjectType::Java),
        ("CMakeLists.txt", ProjectType::Native),
        ("Makefile", ProjectType::Native),
    ];

    /// Classify the project rooted at `root`.
    pub fn detect(root: &Path) -> Self {
        let found: Vec<(PathBuf, ProjectType)> = Self::MARKERS
            .iter()
            .map(|(marker, project_type)| (root.join(marker), *project_type))
            .filter(|(path, _)| path.is_file())
            .collect();

        let project_type = Self::determine_type(&found);

        Self {
            root: root.to_path_buf(),
            project_type,
            manifest_files: found.into_iter().map(|(p, _)| p).collect(),
        }
    }

    /// Determine project type from found markers.
    fn determine_type(markers: &[(PathBuf, ProjectType)]) -> ProjectType {
        let types: BTreeSet<ProjectType> = markers.iter().map(|(_, t)| *t).collect();

        let mut iter = types.into_iter();
        match (iter.next(), iter.next()) {
            (None, _) => ProjectType::Unknown,
            (Some(only), None) => only,
            _ => ProjectType::Mixed,
        }
    }

    /// Get the project type.
    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_rust_project() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Cargo.toml"), "[package]\nname = \"test\"").unwrap();

        let manifest = ProjectManifest::detect(tmp.path());

        assert_eq!(manifest.project_type, ProjectType::Rust);
        assert_eq!(manifest.manifest_files, vec![tmp.path().join("Cargo.toml")]);
        assert!(manifest.project_type.default_core_files().contains(&"src/main.rs"));
    }

    #[test]
    fn test_detect_python_project() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("requirements.txt"), "requests").unwrap();
        fs::write(tmp.path().join("setup.py"), "").unwrap();

        let manifest = ProjectManifest::detect(tmp.path());

        assert_eq!(manifest.project_type(), ProjectType::Python);
        assert_eq!(manifest.manifest_files.len(), 2);
    }

    #[test]
    fn test_detect_native_project() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "project(x)").unwrap();

        let manifest = ProjectManifest::detect(tmp.path());

        assert_eq!(manifest.project_type.display_name(), "C/C++");
    }

    #[test]
    fn test_detect_mixed_project() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Cargo.toml"), "[package]").unwrap();
        fs::write(tmp.path().join("package.json"), "{}").unwrap();

        let manifest = ProjectManifest::detect(tmp.path());

        assert_eq!(manifest.project_type, ProjectType::Mixed);
        assert!(manifest.project_type.default_core_files().is_empty());
    }

    #[test]
    fn test_detect_unknown_project() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("Cargo.toml")).unwrap();

        let manifest = ProjectManifest::detect(tmp.path());

        assert_eq!(manifest.project_type, ProjectType::Unknown);
    }
}
