use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::classfile::{read_class_file, ClassFile, ClassVersion};
use crate::discovery::DiscoveredClass;
use crate::extract::extract_imports;

use super::ImportFilter;

/// Post-processing applied to every class's imports.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub filter: ImportFilter,
    /// Leave the class's own name out of its imports.
    pub drop_self: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            filter: ImportFilter::keep_all(),
            drop_self: true,
        }
    }
}

/// Imports and metadata of one class file.
#[derive(Debug, Clone, Serialize)]
pub struct ClassReport {
    pub path: PathBuf,
    pub class_name: Option<String>,
    pub super_class: Option<String>,
    pub version: ClassVersion,
    pub jdk_revision: String,
    pub imports: Vec<String>,
}

/// Result of analyzing a set of class files.
#[derive(Debug, Clone, Serialize)]
pub struct ClassesAnalysis {
    /// Reports for readable classes, sorted by path.
    pub classes: Vec<ClassReport>,
    /// One message per class file that could not be read.
    pub errors: Vec<String>,
}

/// Build the report for an already parsed class.
pub fn analyze_class(path: &Path, class: &ClassFile, options: &AnalysisOptions) -> ClassReport {
    let class_name = class.class_name();
    let imports = extract_imports(&class.constant_pool)
        .into_vec()
        .into_iter()
        .filter(|name| !(options.drop_self && class_name.as_deref() == Some(name.as_str())))
        .filter(|name| options.filter.retains(name))
        .collect();

    ClassReport {
        path: path.to_path_buf(),
        class_name,
        super_class: class.super_class_name(),
        version: class.version,
        jdk_revision: class.version.jdk_revision(),
        imports,
    }
}

/// Read and analyze every discovered class file in parallel.
///
/// A file that cannot be read or parsed is recorded in `errors` and does not
/// affect the others.
pub fn analyze_classes(files: &[DiscoveredClass], options: &AnalysisOptions) -> ClassesAnalysis {
    let results: Vec<Result<ClassReport, String>> = files
        .par_iter()
        .map(|file| match read_class_file(&file.path) {
            Ok(class) => {
                let report = analyze_class(&file.path, &class, options);
                log::debug!(
                    "{}: {} imports",
                    file.path.display(),
                    report.imports.len()
                );
                Ok(report)
            }
            Err(e) => {
                log::warn!("skipping {}: {:#}", file.path.display(), e);
                Err(format!("{:#}", e))
            }
        })
        .collect();

    let mut classes = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(report) => classes.push(report),
            Err(e) => errors.push(e),
        }
    }
    classes.sort_by(|a, b| a.path.cmp(&b.path));

    ClassesAnalysis { classes, errors }
}
