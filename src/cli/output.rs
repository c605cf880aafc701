use serde::Serialize;

use super::commands::PoolRow;
use super::OutputFormat;
use crate::analysis::classes::ClassReport;
use crate::analysis::summary::ClassesSummary;

/// Format per-class import reports.
pub fn format_reports(reports: &[ClassReport], format: &OutputFormat) -> String {
    match format {
        OutputFormat::Json | OutputFormat::Compact => format_json(&reports, format),
        OutputFormat::Text => {
            let mut output = String::new();
            for r in reports {
                let name = r.class_name.as_deref().unwrap_or("<unnamed>");
                output.push_str(&format!(
                    "{} ({}, Java {})\n",
                    name,
                    r.path.display(),
                    r.jdk_revision
                ));
                for import in &r.imports {
                    output.push_str(&format!("  {}\n", import));
                }
            }
            output
        }
    }
}

/// Format an aggregate summary.
pub fn format_summary(summary: &ClassesSummary, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Json | OutputFormat::Compact => format_json(summary, format),
        OutputFormat::Text => {
            let mut output = format!(
                "{} classes in {} packages, {} imports from {} packages",
                summary.class_count,
                summary.packages.len(),
                summary.imports.len(),
                summary.imported_packages.len(),
            );
            if let (Some(version), Some(jdk)) = (&summary.highest_version, &summary.jdk_revision)
            {
                output.push_str(&format!(" (requires Java {}, class version {})", jdk, version));
            }
            output.push('\n');

            if !summary.packages.is_empty() {
                output.push_str("\nPackages:\n");
                for p in &summary.packages {
                    output.push_str(&format!("  {}\n", p));
                }
            }
            if !summary.imports.is_empty() {
                output.push_str("\nImports:\n");
                for i in summary.imports.iter() {
                    output.push_str(&format!("  {}\n", i));
                }
            }
            output
        }
    }
}

/// Format a constant pool dump.
pub fn format_pool(rows: &[PoolRow], format: &OutputFormat) -> String {
    match format {
        OutputFormat::Json | OutputFormat::Compact => format_json(&rows, format),
        OutputFormat::Text => {
            let mut output = String::new();
            for row in rows {
                output.push_str(&format!(
                    "{:>5} {:<20} {}",
                    row.index,
                    row.tag.as_str(),
                    row.value
                ));
                if !row.imports.is_empty() {
                    output.push_str(&format!("  -> {}", row.imports.join(", ")));
                }
                output.push('\n');
            }
            output
        }
    }
}

/// Format any serializable value as JSON.
pub fn format_json<T: Serialize + ?Sized>(value: &T, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Compact => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Json | OutputFormat::Text => {
            serde_json::to_string_pretty(value).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classfile::ClassVersion;
    use crate::extract::ImportSet;
    use crate::model::EntryTag;
    use std::path::PathBuf;

    fn report() -> ClassReport {
        ClassReport {
            path: PathBuf::from("com/example/App.class"),
            class_name: Some("com.example.App".to_string()),
            super_class: Some("java.lang.Object".to_string()),
            version: ClassVersion {
                major: 52,
                minor: 0,
            },
            jdk_revision: "1.8".to_string(),
            imports: vec!["java.lang.Object".to_string(), "com.example.Dep".to_string()],
        }
    }

    #[test]
    fn test_text_reports() {
        let out = format_reports(&[report()], &OutputFormat::Text);
        assert_eq!(
            out,
            "com.example.App (com/example/App.class, Java 1.8)\n  java.lang.Object\n  com.example.Dep\n"
        );
    }

    #[test]
    fn test_compact_reports_single_line() {
        let out = format_reports(&[report()], &OutputFormat::Compact);
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["class_name"], "com.example.App");
        assert_eq!(parsed[0]["version"]["major"], 52);
    }

    #[test]
    fn test_text_summary() {
        let imports: ImportSet = vec!["java.util.List".to_string()].into_iter().collect();
        let summary = ClassesSummary {
            class_count: 1,
            class_names: vec!["com.example.App".to_string()],
            packages: vec!["com.example".to_string()],
            imports,
            imported_packages: vec!["java.util".to_string()],
            highest_version: Some(ClassVersion {
                major: 52,
                minor: 0,
            }),
            jdk_revision: Some("1.8".to_string()),
        };
        let out = format_summary(&summary, &OutputFormat::Text);
        assert!(out.starts_with(
            "1 classes in 1 packages, 1 imports from 1 packages (requires Java 1.8, class version 52.0)\n"
        ));
        assert!(out.contains("\nImports:\n  java.util.List\n"));
    }

    #[test]
    fn test_text_pool() {
        let rows = vec![PoolRow {
            index: 2,
            tag: EntryTag::Class,
            value: "#1".to_string(),
            imports: vec!["com.example.A".to_string()],
        }];
        let out = format_pool(&rows, &OutputFormat::Text);
        assert_eq!(
            out,
            format!("    2 {:<20} #1  -> com.example.A\n", "class")
        );
    }
}
