use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;

/// A discovered class file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredClass {
    pub path: PathBuf,
}

/// Configuration for class file discovery.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Glob patterns to include (empty means include all).
    pub include: Vec<String>,
    /// Glob patterns to exclude.
    pub exclude: Vec<String>,
}

const CLASS_EXTENSION: &str = "class";

/// Discover class files under `root`.
///
/// Build output is usually gitignored, so VCS ignore files are not consulted;
/// only the include/exclude globs filter the walk. A `root` that is itself a
/// class file yields exactly that file.
pub fn discover_class_files(root: &Path, config: &DiscoveryConfig) -> Result<Vec<DiscoveredClass>> {
    if !root.exists() {
        bail!("path does not exist: {}", root.display());
    }

    if root.is_file() {
        if !is_class_file(root) {
            bail!("not a class file: {}", root.display());
        }
        return Ok(vec![DiscoveredClass {
            path: root.to_path_buf(),
        }]);
    }

    let mut files = Vec::new();

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false);

    if !config.exclude.is_empty() || !config.include.is_empty() {
        let mut overrides = ignore::overrides::OverrideBuilder::new(root);
        for pattern in &config.exclude {
            overrides
                .add(&format!("!{}", pattern))
                .context("invalid exclude pattern")?;
        }
        for pattern in &config.include {
            overrides.add(pattern).context("invalid include pattern")?;
        }
        builder.overrides(overrides.build().context("failed to build overrides")?);
    }

    for entry in builder.build() {
        let entry = entry.context("error reading directory entry")?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !is_class_file(path) {
            continue;
        }

        files.push(DiscoveredClass {
            path: path.to_path_buf(),
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!("discovered {} class files under {}", files.len(), root.display());
    Ok(files)
}

fn is_class_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(CLASS_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_output() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("com/example/util")).unwrap();
        fs::write(root.join("com/example/App.class"), b"\xCA\xFE\xBA\xBE").unwrap();
        fs::write(root.join("com/example/App$1.class"), b"\xCA\xFE\xBA\xBE").unwrap();
        fs::write(root.join("com/example/util/Strings.class"), b"\xCA\xFE\xBA\xBE").unwrap();
        fs::write(root.join("com/example/messages.properties"), "a=b").unwrap();
        fs::write(root.join("com/example/App.java"), "class App {}").unwrap();

        // Build output is typically gitignored; it must still be walked.
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".gitignore"), "com/\n").unwrap();

        dir
    }

    #[test]
    fn test_discovers_class_files_only() {
        let dir = setup_test_output();
        let files = discover_class_files(dir.path(), &DiscoveryConfig::default()).unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().any(|p| p.ends_with("com/example/App.class")));
        assert!(paths.iter().any(|p| p.ends_with("com/example/App$1.class")));
        assert!(paths.iter().any(|p| p.ends_with("com/example/util/Strings.class")));
    }

    #[test]
    fn test_exclude_pattern_filters_files() {
        let dir = setup_test_output();
        let config = DiscoveryConfig {
            exclude: vec!["*$*.class".to_string()],
            ..Default::default()
        };
        let files = discover_class_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 2);
        assert!(!files
            .iter()
            .any(|f| f.path.to_string_lossy().contains('$')));
    }

    #[test]
    fn test_include_pattern_limits_files() {
        let dir = setup_test_output();
        let config = DiscoveryConfig {
            include: vec!["**/util/**".to_string()],
            ..Default::default()
        };
        let files = discover_class_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("util/Strings.class"));
    }

    #[test]
    fn test_single_class_file_root() {
        let dir = setup_test_output();
        let path = dir.path().join("com/example/App.class");
        let files = discover_class_files(&path, &DiscoveryConfig::default()).unwrap();
        assert_eq!(files, vec![DiscoveredClass { path }]);
    }

    #[test]
    fn test_single_non_class_file_is_error() {
        let dir = setup_test_output();
        let path = dir.path().join("com/example/App.java");
        assert!(discover_class_files(&path, &DiscoveryConfig::default()).is_err());
    }

    #[test]
    fn test_results_are_sorted_by_path() {
        let dir = setup_test_output();
        let files = discover_class_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| &f.path).collect();
        for window in paths.windows(2) {
            assert!(window[0] <= window[1], "files should be sorted by path");
        }
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = discover_class_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_nonexistent_directory_returns_error() {
        let result = discover_class_files(
            Path::new("/nonexistent/path/that/surely/doesnt/exist"),
            &DiscoveryConfig::default(),
        );
        assert!(result.is_err(), "should error on nonexistent directory");
    }
}
