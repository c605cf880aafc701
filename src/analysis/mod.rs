pub mod classes;
pub mod summary;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Drops import names matching any of a set of glob patterns.
///
/// Patterns are matched against dotted names, so `java.*` covers every
/// name under `java`.
#[derive(Debug, Clone)]
pub struct ImportFilter {
    ignore: GlobSet,
}

impl ImportFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(
                Glob::new(pattern)
                    .with_context(|| format!("invalid ignore pattern: {}", pattern))?,
            );
        }
        Ok(Self {
            ignore: builder.build()?,
        })
    }

    /// A filter that keeps everything.
    pub fn keep_all() -> Self {
        Self {
            ignore: GlobSet::empty(),
        }
    }

    pub fn retains(&self, name: &str) -> bool {
        !self.ignore.is_match(name)
    }
}

impl Default for ImportFilter {
    fn default() -> Self {
        Self::keep_all()
    }
}

/// Package part of a dotted class name; empty for the default package.
pub fn package_of(class_name: &str) -> &str {
    class_name.rfind('.').map_or("", |i| &class_name[..i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_drops_matching_names() {
        let filter = ImportFilter::new(&["java.*".to_string(), "javax.swing.*".to_string()])
            .unwrap();
        assert!(!filter.retains("java.lang.String"));
        assert!(!filter.retains("javax.swing.JPanel"));
        assert!(filter.retains("javax.inject.Inject"));
        assert!(filter.retains("com.example.Foo"));
    }

    #[test]
    fn test_keep_all() {
        let filter = ImportFilter::keep_all();
        assert!(filter.retains("java.lang.String"));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(ImportFilter::new(&["java.[".to_string()]).is_err());
    }

    #[test]
    fn test_package_of() {
        assert_eq!(package_of("com.example.Foo"), "com.example");
        assert_eq!(package_of("Foo"), "");
    }
}
