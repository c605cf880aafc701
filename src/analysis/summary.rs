use std::collections::BTreeSet;

use serde::Serialize;

use crate::classfile::ClassVersion;
use crate::extract::ImportSet;

use super::classes::ClassReport;
use super::package_of;

/// Aggregate view over a set of analyzed classes.
#[derive(Debug, Clone, Serialize)]
pub struct ClassesSummary {
    pub class_count: usize,
    /// Names of the scanned classes, in report order.
    pub class_names: Vec<String>,
    /// Packages the scanned classes belong to, sorted.
    pub packages: Vec<String>,
    /// Union of all imports, in order of first discovery.
    pub imports: ImportSet,
    /// Packages of all imports, sorted.
    pub imported_packages: Vec<String>,
    /// Highest class file version seen.
    pub highest_version: Option<ClassVersion>,
    /// Java release required by the highest version.
    pub jdk_revision: Option<String>,
}

impl ClassesSummary {
    pub fn from_reports(reports: &[ClassReport]) -> Self {
        let class_names: Vec<String> = reports
            .iter()
            .filter_map(|r| r.class_name.clone())
            .collect();

        let packages: BTreeSet<String> = class_names
            .iter()
            .map(|n| package_of(n))
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        let imports: ImportSet = reports
            .iter()
            .flat_map(|r| r.imports.iter().cloned())
            .collect();

        let imported_packages: BTreeSet<String> = imports
            .iter()
            .map(package_of)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        let highest_version = reports.iter().map(|r| r.version).max();

        Self {
            class_count: reports.len(),
            class_names,
            packages: packages.into_iter().collect(),
            imports,
            imported_packages: imported_packages.into_iter().collect(),
            highest_version,
            jdk_revision: highest_version.map(|v| v.jdk_revision()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(name: &str, major: u16, imports: &[&str]) -> ClassReport {
        let version = ClassVersion { major, minor: 0 };
        ClassReport {
            path: PathBuf::from(format!("{}.class", name.replace('.', "/"))),
            class_name: Some(name.to_string()),
            super_class: None,
            version,
            jdk_revision: version.jdk_revision(),
            imports: imports.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_summary_merges_imports_in_discovery_order() {
        let reports = vec![
            report("com.example.App", 52, &["java.util.List", "com.example.util.Strings"]),
            report("com.example.util.Strings", 50, &["java.lang.StringBuilder", "java.util.List"]),
        ];
        let summary = ClassesSummary::from_reports(&reports);

        assert_eq!(summary.class_count, 2);
        assert_eq!(
            summary.imports.to_vec(),
            vec![
                "java.util.List",
                "com.example.util.Strings",
                "java.lang.StringBuilder"
            ]
        );
        assert_eq!(summary.packages, vec!["com.example", "com.example.util"]);
        assert_eq!(
            summary.imported_packages,
            vec!["com.example.util", "java.lang", "java.util"]
        );
    }

    #[test]
    fn test_summary_picks_highest_version() {
        let reports = vec![
            report("a.A", 49, &[]),
            report("a.B", 61, &[]),
            report("a.C", 52, &[]),
        ];
        let summary = ClassesSummary::from_reports(&reports);
        assert_eq!(summary.highest_version.map(|v| v.major), Some(61));
        assert_eq!(summary.jdk_revision.as_deref(), Some("17"));
    }

    #[test]
    fn test_summary_skips_default_package() {
        let reports = vec![report("Main", 52, &["Helper"])];
        let summary = ClassesSummary::from_reports(&reports);
        assert!(summary.packages.is_empty());
        assert!(summary.imported_packages.is_empty());
    }

    #[test]
    fn test_empty_summary() {
        let summary = ClassesSummary::from_reports(&[]);
        assert_eq!(summary.class_count, 0);
        assert!(summary.imports.is_empty());
        assert!(summary.highest_version.is_none());
        assert!(summary.jdk_revision.is_none());
    }
}
