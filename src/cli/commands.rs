use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::analysis::classes::{analyze_classes, AnalysisOptions, ClassesAnalysis};
use crate::analysis::summary::ClassesSummary;
use crate::analysis::ImportFilter;
use crate::classfile::read_class_file;
use crate::config::resolve_config;
use crate::discovery::{discover_class_files, DiscoveryConfig};
use crate::extract::{extract_class_ref, extract_utf8};
use crate::model::{ConstantPoolEntry, EntryTag};

use super::output::{format_pool, format_reports, format_summary};
use super::OutputFormat;

/// Effective discovery and analysis settings for a run.
#[derive(Debug, Clone, Default)]
pub struct ScanSettings {
    pub discovery: DiscoveryConfig,
    pub options: AnalysisOptions,
}

/// Command-line overrides layered on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingOverrides<'a> {
    pub config: Option<&'a Path>,
    pub include: &'a [String],
    pub exclude: &'a [String],
    pub ignore: &'a [String],
    pub keep_self: bool,
}

/// Text output plus per-file problems to report separately.
#[derive(Debug)]
pub struct CommandOutput {
    pub output: String,
    pub errors: Vec<String>,
}

/// Merge the project config with command-line overrides.
///
/// Patterns given on the command line are added to those from the config.
pub fn load_settings(project_root: &Path, overrides: &SettingOverrides<'_>) -> Result<ScanSettings> {
    let config = resolve_config(project_root, overrides.config)?;

    let mut include = config.discovery.include;
    include.extend_from_slice(overrides.include);
    let mut exclude = config.discovery.exclude;
    exclude.extend_from_slice(overrides.exclude);
    let mut ignore = config.imports.ignore;
    ignore.extend_from_slice(overrides.ignore);

    Ok(ScanSettings {
        discovery: DiscoveryConfig { include, exclude },
        options: AnalysisOptions {
            filter: ImportFilter::new(&ignore)?,
            drop_self: config.imports.drop_self && !overrides.keep_self,
        },
    })
}

/// Discover and analyze the class files under `target`.
///
/// Fails only when discovery fails or when every class file is unreadable.
pub fn scan(target: &Path, settings: &ScanSettings) -> Result<ClassesAnalysis> {
    let files = discover_class_files(target, &settings.discovery)?;
    let analysis = analyze_classes(&files, &settings.options);

    if analysis.classes.is_empty() {
        if let Some(first) = analysis.errors.first() {
            return Err(anyhow!(
                "no readable class files under {} ({} failed, first: {})",
                target.display(),
                analysis.errors.len(),
                first
            ));
        }
    }
    Ok(analysis)
}

/// Run the `imports` command.
pub fn run_imports(
    target: &Path,
    settings: &ScanSettings,
    format: &OutputFormat,
) -> Result<CommandOutput> {
    let analysis = scan(target, settings)?;
    Ok(CommandOutput {
        output: format_reports(&analysis.classes, format),
        errors: analysis.errors,
    })
}

/// Run the `summary` command.
pub fn run_summary(
    target: &Path,
    settings: &ScanSettings,
    format: &OutputFormat,
) -> Result<CommandOutput> {
    let analysis = scan(target, settings)?;
    let summary = ClassesSummary::from_reports(&analysis.classes);
    Ok(CommandOutput {
        output: format_summary(&summary, format),
        errors: analysis.errors,
    })
}

/// One constant pool slot in the `pool` dump.
#[derive(Debug, Clone, Serialize)]
pub struct PoolRow {
    pub index: u16,
    pub tag: EntryTag,
    pub value: String,
    pub imports: Vec<String>,
}

/// Run the `pool` command: list every slot with the imports it yields.
///
/// The per-entry imports are not deduplicated across slots.
pub fn run_pool(path: &Path, format: &OutputFormat) -> Result<String> {
    let class = read_class_file(path)?;
    let pool = &class.constant_pool;

    let rows: Vec<PoolRow> = pool
        .iter()
        .filter(|(_, entry)| !matches!(entry, ConstantPoolEntry::Unusable))
        .map(|(index, entry)| {
            let imports = match entry {
                ConstantPoolEntry::Class { name_index } => {
                    extract_class_ref(pool, *name_index).into_iter().collect()
                }
                ConstantPoolEntry::Utf8(raw) => extract_utf8(raw),
                _ => Vec::new(),
            };
            PoolRow {
                index,
                tag: entry.tag(),
                value: describe_entry(entry),
                imports,
            }
        })
        .collect();

    Ok(format_pool(&rows, format))
}

fn describe_entry(entry: &ConstantPoolEntry) -> String {
    match entry {
        ConstantPoolEntry::Unusable => String::new(),
        ConstantPoolEntry::Utf8(s) => format!("{:?}", s),
        ConstantPoolEntry::Integer(v) => v.to_string(),
        ConstantPoolEntry::Float(v) => format!("{}f", v),
        ConstantPoolEntry::Long(v) => format!("{}L", v),
        ConstantPoolEntry::Double(v) => format!("{}d", v),
        ConstantPoolEntry::Class { name_index }
        | ConstantPoolEntry::Module { name_index }
        | ConstantPoolEntry::Package { name_index } => format!("#{}", name_index),
        ConstantPoolEntry::String { string_index } => format!("#{}", string_index),
        ConstantPoolEntry::Fieldref {
            class_index,
            name_and_type_index,
        }
        | ConstantPoolEntry::Methodref {
            class_index,
            name_and_type_index,
        }
        | ConstantPoolEntry::InterfaceMethodref {
            class_index,
            name_and_type_index,
        } => format!("#{}.#{}", class_index, name_and_type_index),
        ConstantPoolEntry::NameAndType {
            name_index,
            descriptor_index,
        } => format!("#{}:#{}", name_index, descriptor_index),
        ConstantPoolEntry::MethodHandle {
            reference_kind,
            reference_index,
        } => format!("{}:#{}", reference_kind, reference_index),
        ConstantPoolEntry::MethodType { descriptor_index } => format!("#{}", descriptor_index),
        ConstantPoolEntry::Dynamic {
            bootstrap_method_attr_index,
            name_and_type_index,
        }
        | ConstantPoolEntry::InvokeDynamic {
            bootstrap_method_attr_index,
            name_and_type_index,
        } => format!("#{}:#{}", bootstrap_method_attr_index, name_and_type_index),
    }
}
