use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use crate::model::{ConstantPool, ConstantPoolEntry};

pub mod mutf8;
mod reader;

use reader::ByteReader;

pub const MAGIC: u32 = 0xCAFE_BABE;

/// Errors raised while reading a class file's header and constant pool.
#[derive(Debug, Error)]
pub enum ClassFileError {
    #[error("unexpected end of class file at byte {offset} (needed {needed} more)")]
    Truncated { offset: usize, needed: usize },
    #[error("bad magic number {0:#010x}")]
    BadMagic(u32),
    #[error("unknown constant pool tag {tag} at index {index}")]
    UnknownTag { tag: u8, index: u16 },
    #[error("constant pool count must be at least 1")]
    BadConstantPoolCount,
    #[error("{what} of {len} does not fit in a u16 field")]
    TooLarge { what: &'static str, len: usize },
}

/// Class file format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ClassVersion {
    pub major: u16,
    pub minor: u16,
}

impl ClassVersion {
    /// The Java release that produces this class file version.
    pub fn jdk_revision(&self) -> String {
        match self.major {
            0..=44 => "1.0".to_string(),
            45 if self.minor < 3 => "1.0".to_string(),
            45 => "1.1".to_string(),
            46..=52 => format!("1.{}", self.major - 44),
            _ => (self.major - 44).to_string(),
        }
    }
}

impl fmt::Display for ClassVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The parts of a class file needed for import analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassFile {
    pub version: ClassVersion,
    pub constant_pool: ConstantPool,
    pub access_flags: u16,
    pub this_class: u16,
    pub super_class: u16,
}

impl ClassFile {
    /// Dotted name of the class itself.
    pub fn class_name(&self) -> Option<String> {
        self.constant_pool
            .class_name(self.this_class)
            .map(|n| n.replace('/', "."))
    }

    /// Dotted name of the superclass; `None` for `java.lang.Object` and
    /// module descriptors.
    pub fn super_class_name(&self) -> Option<String> {
        self.constant_pool
            .class_name(self.super_class)
            .map(|n| n.replace('/', "."))
    }

    /// Encode a minimal class file: header, constant pool, access flags,
    /// this/super class, and empty interface, field, method and attribute
    /// tables.
    ///
    /// Fails with [`ClassFileError::TooLarge`] when the pool has more than
    /// 65535 slots or a string encodes to more than 65535 bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ClassFileError> {
        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC.to_be_bytes());
        out.extend_from_slice(&self.version.minor.to_be_bytes());
        out.extend_from_slice(&self.version.major.to_be_bytes());
        let pool_count = u16_len("constant pool count", self.constant_pool.count())?;
        out.extend_from_slice(&pool_count.to_be_bytes());
        for (_, entry) in self.constant_pool.iter() {
            write_entry(&mut out, entry)?;
        }
        out.extend_from_slice(&self.access_flags.to_be_bytes());
        out.extend_from_slice(&self.this_class.to_be_bytes());
        out.extend_from_slice(&self.super_class.to_be_bytes());
        // interfaces, fields, methods, attributes
        out.extend_from_slice(&[0; 8]);
        Ok(out)
    }
}

/// Read and parse a class file from disk.
pub fn read_class_file(path: &Path) -> Result<ClassFile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let class = parse_class_file(&bytes)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(class)
}

/// Parse the header and constant pool of a class file.
///
/// Only the fields up to `super_class` are read; the interface, field, method
/// and attribute tables are ignored.
pub fn parse_class_file(bytes: &[u8]) -> Result<ClassFile, ClassFileError> {
    let mut r = ByteReader::new(bytes);

    let magic = r.u32()?;
    if magic != MAGIC {
        return Err(ClassFileError::BadMagic(magic));
    }
    let minor = r.u16()?;
    let major = r.u16()?;

    let constant_pool = parse_constant_pool(&mut r)?;

    let access_flags = r.u16()?;
    let this_class = r.u16()?;
    let super_class = r.u16()?;

    Ok(ClassFile {
        version: ClassVersion { major, minor },
        constant_pool,
        access_flags,
        this_class,
        super_class,
    })
}

fn parse_constant_pool(r: &mut ByteReader<'_>) -> Result<ConstantPool, ClassFileError> {
    let count = r.u16()?;
    if count == 0 {
        return Err(ClassFileError::BadConstantPoolCount);
    }

    let mut slots = Vec::with_capacity(count as usize);
    slots.push(ConstantPoolEntry::Unusable);

    let mut index: u16 = 1;
    while index < count {
        let entry = parse_entry(r, index)?;
        let width = entry.width();
        slots.push(entry);
        // A wide constant in the last slot leaves its shadow slot past the
        // end; the format allows it and nothing can reference it.
        if width == 2 && index + 1 < count {
            slots.push(ConstantPoolEntry::Unusable);
        }
        index = index.saturating_add(width as u16);
    }

    Ok(ConstantPool::from_slots(slots))
}

fn parse_entry(r: &mut ByteReader<'_>, index: u16) -> Result<ConstantPoolEntry, ClassFileError> {
    let tag = r.u8()?;
    let entry = match tag {
        1 => {
            let len = r.u16()? as usize;
            ConstantPoolEntry::Utf8(mutf8::decode(r.take(len)?))
        }
        3 => ConstantPoolEntry::Integer(r.i32()?),
        4 => ConstantPoolEntry::Float(r.f32()?),
        5 => ConstantPoolEntry::Long(r.i64()?),
        6 => ConstantPoolEntry::Double(r.f64()?),
        7 => ConstantPoolEntry::Class {
            name_index: r.u16()?,
        },
        8 => ConstantPoolEntry::String {
            string_index: r.u16()?,
        },
        9 => ConstantPoolEntry::Fieldref {
            class_index: r.u16()?,
            name_and_type_index: r.u16()?,
        },
        10 => ConstantPoolEntry::Methodref {
            class_index: r.u16()?,
            name_and_type_index: r.u16()?,
        },
        11 => ConstantPoolEntry::InterfaceMethodref {
            class_index: r.u16()?,
            name_and_type_index: r.u16()?,
        },
        12 => ConstantPoolEntry::NameAndType {
            name_index: r.u16()?,
            descriptor_index: r.u16()?,
        },
        15 => ConstantPoolEntry::MethodHandle {
            reference_kind: r.u8()?,
            reference_index: r.u16()?,
        },
        16 => ConstantPoolEntry::MethodType {
            descriptor_index: r.u16()?,
        },
        17 => ConstantPoolEntry::Dynamic {
            bootstrap_method_attr_index: r.u16()?,
            name_and_type_index: r.u16()?,
        },
        18 => ConstantPoolEntry::InvokeDynamic {
            bootstrap_method_attr_index: r.u16()?,
            name_and_type_index: r.u16()?,
        },
        19 => ConstantPoolEntry::Module {
            name_index: r.u16()?,
        },
        20 => ConstantPoolEntry::Package {
            name_index: r.u16()?,
        },
        tag => return Err(ClassFileError::UnknownTag { tag, index }),
    };
    Ok(entry)
}

fn u16_len(what: &'static str, len: usize) -> Result<u16, ClassFileError> {
    u16::try_from(len).map_err(|_| ClassFileError::TooLarge { what, len })
}

fn write_entry(out: &mut Vec<u8>, entry: &ConstantPoolEntry) -> Result<(), ClassFileError> {
    fn u16s(out: &mut Vec<u8>, tag: u8, values: &[u16]) {
        out.push(tag);
        for v in values {
            out.extend_from_slice(&v.to_be_bytes());
        }
    }

    match entry {
        ConstantPoolEntry::Unusable => {}
        ConstantPoolEntry::Utf8(s) => {
            let bytes = mutf8::encode(s);
            out.push(1);
            out.extend_from_slice(&u16_len("utf8 length", bytes.len())?.to_be_bytes());
            out.extend_from_slice(&bytes);
        }
        ConstantPoolEntry::Integer(v) => {
            out.push(3);
            out.extend_from_slice(&v.to_be_bytes());
        }
        ConstantPoolEntry::Float(v) => {
            out.push(4);
            out.extend_from_slice(&v.to_be_bytes());
        }
        ConstantPoolEntry::Long(v) => {
            out.push(5);
            out.extend_from_slice(&v.to_be_bytes());
        }
        ConstantPoolEntry::Double(v) => {
            out.push(6);
            out.extend_from_slice(&v.to_be_bytes());
        }
        ConstantPoolEntry::Class { name_index } => u16s(out, 7, &[*name_index]),
        ConstantPoolEntry::String { string_index } => u16s(out, 8, &[*string_index]),
        ConstantPoolEntry::Fieldref {
            class_index,
            name_and_type_index,
        } => u16s(out, 9, &[*class_index, *name_and_type_index]),
        ConstantPoolEntry::Methodref {
            class_index,
            name_and_type_index,
        } => u16s(out, 10, &[*class_index, *name_and_type_index]),
        ConstantPoolEntry::InterfaceMethodref {
            class_index,
            name_and_type_index,
        } => u16s(out, 11, &[*class_index, *name_and_type_index]),
        ConstantPoolEntry::NameAndType {
            name_index,
            descriptor_index,
        } => u16s(out, 12, &[*name_index, *descriptor_index]),
        ConstantPoolEntry::MethodHandle {
            reference_kind,
            reference_index,
        } => {
            out.push(15);
            out.push(*reference_kind);
            out.extend_from_slice(&reference_index.to_be_bytes());
        }
        ConstantPoolEntry::MethodType { descriptor_index } => {
            u16s(out, 16, &[*descriptor_index])
        }
        ConstantPoolEntry::Dynamic {
            bootstrap_method_attr_index,
            name_and_type_index,
        } => u16s(out, 17, &[*bootstrap_method_attr_index, *name_and_type_index]),
        ConstantPoolEntry::InvokeDynamic {
            bootstrap_method_attr_index,
            name_and_type_index,
        } => u16s(out, 18, &[*bootstrap_method_attr_index, *name_and_type_index]),
        ConstantPoolEntry::Module { name_index } => u16s(out, 19, &[*name_index]),
        ConstantPoolEntry::Package { name_index } => u16s(out, 20, &[*name_index]),
    }
    Ok(())
}
