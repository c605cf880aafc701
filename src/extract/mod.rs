//! Import extraction from a class's constant pool.
//!
//! Two independent scans feed one [`ImportSet`]: formal `Class` entries, and
//! every raw `Utf8` entry. The second scan picks up types that only appear
//! inside descriptors or path-shaped string literals. Both are heuristic; the
//! result may contain names that merely look like types and may miss unusual
//! encodings.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ConstantPool, ConstantPoolEntry};

pub mod class_ref;
pub mod import_set;
pub mod utf8;

pub use class_ref::extract_class_ref;
pub use import_set::ImportSet;
pub use utf8::extract_utf8;

/// `L<qualified-name>;` in its dotted form.
static OBJECT_TYPE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"L([a-zA-Z][a-zA-Z0-9.]+);").unwrap());

/// Characters a raw string may contain to be considered a type reference.
static TYPE_REF_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[()\[A-Za-z0-9;/]+$").unwrap());

/// Qualified names of all object-type tokens in `s`, left to right.
fn object_type_names(s: &str) -> impl Iterator<Item = &str> {
    OBJECT_TYPE_TOKEN
        .captures_iter(s)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Walk every slot of `pool` once and collect the imports it references.
///
/// Slot 0 and tags other than `Class` and `Utf8` contribute nothing. No
/// entry can abort the walk.
pub fn extract_imports(pool: &ConstantPool) -> ImportSet {
    let mut imports = ImportSet::new();
    for (index, entry) in pool.iter() {
        match entry {
            ConstantPoolEntry::Class { name_index } => {
                if let Some(name) = extract_class_ref(pool, *name_index) {
                    imports.add(name);
                }
            }
            ConstantPoolEntry::Utf8(raw) => imports.extend(extract_utf8(raw)),
            _ => log::trace!("slot {}: skipping {}", index, entry.tag()),
        }
    }
    log::trace!(
        "walked {} constant pool slots, {} imports",
        pool.count(),
        imports.len()
    );
    imports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8(s: &str) -> ConstantPoolEntry {
        ConstantPoolEntry::Utf8(s.to_string())
    }

    fn class(name_index: u16) -> ConstantPoolEntry {
        ConstantPoolEntry::Class { name_index }
    }

    #[test]
    fn test_object_type_names_in_order() {
        let names: Vec<_> =
            object_type_names("(Lcom.example.Name;I)Lcom.example.Holder;").collect();
        assert_eq!(names, vec!["com.example.Name", "com.example.Holder"]);
    }

    #[test]
    fn test_object_type_token_needs_two_chars() {
        assert_eq!(object_type_names("LA;").count(), 0);
        assert_eq!(object_type_names("LAb;").count(), 1);
    }

    #[test]
    fn test_type_ref_chars() {
        assert!(TYPE_REF_CHARS.is_match("(Lcom/example/Foo;[I)V"));
        assert!(!TYPE_REF_CHARS.is_match("com/example/Foo$Inner"));
        assert!(!TYPE_REF_CHARS.is_match("com/example/foo.properties"));
        assert!(!TYPE_REF_CHARS.is_match(""));
    }

    #[test]
    fn test_walk_collects_from_both_scans() {
        let pool = ConstantPool::from_entries([
            utf8("com/example/Foo"),
            class(1),
            utf8("(Ljava/lang/String;)V"),
            ConstantPoolEntry::Integer(42),
        ]);
        let imports = extract_imports(&pool);
        assert_eq!(imports.to_vec(), vec!["com.example.Foo", "java.lang.String"]);
    }

    #[test]
    fn test_cross_extractor_dedup() {
        let pool = ConstantPool::from_entries([
            class(2),
            utf8("com/example/Foo"),
            utf8("com/example/Foo"),
        ]);
        let imports = extract_imports(&pool);
        assert_eq!(imports.to_vec(), vec!["com.example.Foo"]);
    }

    #[test]
    fn test_order_is_first_discovery() {
        let pool = ConstantPool::from_entries([
            utf8("b/B"),
            utf8("a/A"),
            utf8("(La/A;Lb/B;Lc/C;)V"),
        ]);
        let imports = extract_imports(&pool);
        assert_eq!(imports.to_vec(), vec!["b.B", "a.A", "c.C"]);
    }

    #[test]
    fn test_idempotent() {
        let pool = ConstantPool::from_entries([
            utf8("org/acme/Widget"),
            class(1),
            utf8("(Lorg/acme/Gadget;)Lorg/acme/Widget;"),
            utf8("Count"),
        ]);
        let first = extract_imports(&pool);
        let second = extract_imports(&pool);
        assert_eq!(first, second);
        assert_eq!(first.to_vec(), vec!["org.acme.Widget", "org.acme.Gadget"]);
    }

    #[test]
    fn test_anomalies_do_not_abort_walk() {
        let pool = ConstantPool::from_entries([
            class(40),
            class(3),
            ConstantPoolEntry::Long(1),
            utf8("a/../b"),
            utf8("/a/b"),
            utf8("com/example/Last"),
        ]);
        let imports = extract_imports(&pool);
        assert_eq!(imports.to_vec(), vec!["com.example.Last"]);
    }

    #[test]
    fn test_empty_pool() {
        let pool = ConstantPool::from_entries(Vec::<ConstantPoolEntry>::new());
        assert!(extract_imports(&pool).is_empty());
    }
}
