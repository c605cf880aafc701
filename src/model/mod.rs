use serde::Serialize;
use std::fmt;

/// A single constant pool slot.
///
/// The variant set is closed: every tag defined by the class file format has a
/// variant, and slots that carry no entry (index 0, the shadow slot after a
/// `Long` or `Double`) are `Unusable`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantPoolEntry {
    Unusable,
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class { name_index: u16 },
    String { string_index: u16 },
    Fieldref { class_index: u16, name_and_type_index: u16 },
    Methodref { class_index: u16, name_and_type_index: u16 },
    InterfaceMethodref { class_index: u16, name_and_type_index: u16 },
    NameAndType { name_index: u16, descriptor_index: u16 },
    MethodHandle { reference_kind: u8, reference_index: u16 },
    MethodType { descriptor_index: u16 },
    Dynamic { bootstrap_method_attr_index: u16, name_and_type_index: u16 },
    InvokeDynamic { bootstrap_method_attr_index: u16, name_and_type_index: u16 },
    Module { name_index: u16 },
    Package { name_index: u16 },
}

impl ConstantPoolEntry {
    pub fn tag(&self) -> EntryTag {
        match self {
            ConstantPoolEntry::Unusable => EntryTag::Unusable,
            ConstantPoolEntry::Utf8(_) => EntryTag::Utf8,
            ConstantPoolEntry::Integer(_) => EntryTag::Integer,
            ConstantPoolEntry::Float(_) => EntryTag::Float,
            ConstantPoolEntry::Long(_) => EntryTag::Long,
            ConstantPoolEntry::Double(_) => EntryTag::Double,
            ConstantPoolEntry::Class { .. } => EntryTag::Class,
            ConstantPoolEntry::String { .. } => EntryTag::String,
            ConstantPoolEntry::Fieldref { .. } => EntryTag::Fieldref,
            ConstantPoolEntry::Methodref { .. } => EntryTag::Methodref,
            ConstantPoolEntry::InterfaceMethodref { .. } => EntryTag::InterfaceMethodref,
            ConstantPoolEntry::NameAndType { .. } => EntryTag::NameAndType,
            ConstantPoolEntry::MethodHandle { .. } => EntryTag::MethodHandle,
            ConstantPoolEntry::MethodType { .. } => EntryTag::MethodType,
            ConstantPoolEntry::Dynamic { .. } => EntryTag::Dynamic,
            ConstantPoolEntry::InvokeDynamic { .. } => EntryTag::InvokeDynamic,
            ConstantPoolEntry::Module { .. } => EntryTag::Module,
            ConstantPoolEntry::Package { .. } => EntryTag::Package,
        }
    }

    /// Number of pool slots this entry occupies.
    pub fn width(&self) -> usize {
        match self {
            ConstantPoolEntry::Long(_) | ConstantPoolEntry::Double(_) => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryTag {
    Unusable,
    Utf8,
    Integer,
    Float,
    Long,
    Double,
    Class,
    String,
    Fieldref,
    Methodref,
    InterfaceMethodref,
    NameAndType,
    MethodHandle,
    MethodType,
    Dynamic,
    InvokeDynamic,
    Module,
    Package,
}

impl EntryTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryTag::Unusable => "unusable",
            EntryTag::Utf8 => "utf8",
            EntryTag::Integer => "integer",
            EntryTag::Float => "float",
            EntryTag::Long => "long",
            EntryTag::Double => "double",
            EntryTag::Class => "class",
            EntryTag::String => "string",
            EntryTag::Fieldref => "fieldref",
            EntryTag::Methodref => "methodref",
            EntryTag::InterfaceMethodref => "interface_methodref",
            EntryTag::NameAndType => "name_and_type",
            EntryTag::MethodHandle => "method_handle",
            EntryTag::MethodType => "method_type",
            EntryTag::Dynamic => "dynamic",
            EntryTag::InvokeDynamic => "invoke_dynamic",
            EntryTag::Module => "module",
            EntryTag::Package => "package",
        }
    }
}

impl fmt::Display for EntryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The constant pool of one compiled class.
///
/// Indexing is 1-based, as in the class file format: slot 0 always holds
/// `Unusable`, and wide constants are followed by an `Unusable` shadow slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantPool {
    entries: Vec<ConstantPoolEntry>,
}

impl ConstantPool {
    /// Build a pool from its real entries, inserting slot 0 and the shadow
    /// slots after wide constants.
    pub fn from_entries(entries: impl IntoIterator<Item = ConstantPoolEntry>) -> Self {
        let mut slots = vec![ConstantPoolEntry::Unusable];
        for entry in entries {
            let width = entry.width();
            slots.push(entry);
            if width == 2 {
                slots.push(ConstantPoolEntry::Unusable);
            }
        }
        Self { entries: slots }
    }

    /// Build a pool from already laid-out slots. Slot 0 is forced to `Unusable`.
    pub fn from_slots(mut slots: Vec<ConstantPoolEntry>) -> Self {
        match slots.first_mut() {
            Some(first) => *first = ConstantPoolEntry::Unusable,
            None => slots.push(ConstantPoolEntry::Unusable),
        }
        Self { entries: slots }
    }

    pub fn get(&self, index: u16) -> Option<&ConstantPoolEntry> {
        if index == 0 {
            return None;
        }
        self.entries.get(index as usize)
    }

    /// Resolve `index` to the payload of a `Utf8` entry.
    pub fn utf8(&self, index: u16) -> Option<&str> {
        match self.get(index) {
            Some(ConstantPoolEntry::Utf8(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Resolve a `Class` entry at `index` to its internal (slash-separated) name.
    pub fn class_name(&self, index: u16) -> Option<&str> {
        match self.get(index) {
            Some(ConstantPoolEntry::Class { name_index }) => self.utf8(*name_index),
            _ => None,
        }
    }

    /// The value of `constant_pool_count`: number of slots including slot 0.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate slots 1..N together with their indices.
    ///
    /// Only slots a `u16` index can address are yielded; a hand-built pool
    /// longer than that is cut off at index 65535.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &ConstantPoolEntry)> {
        (1..=u16::MAX).zip(self.entries.iter().skip(1))
    }
}
