use crate::model::ConstantPool;

use super::object_type_names;

/// Turn a `Class` entry into an import name.
///
/// `name_index` is the entry's reference into `pool`. Returns `None` when the
/// index does not resolve to a `Utf8` entry or the name has no package
/// separator (primitive arrays, default-package classes).
pub fn extract_class_ref(pool: &ConstantPool, name_index: u16) -> Option<String> {
    let raw = pool.utf8(name_index)?;
    normalize_class_name(raw)
}

/// Normalize an internal class name such as `com/example/Foo` or
/// `[Lcom/example/Foo;` to its dotted form.
pub fn normalize_class_name(raw: &str) -> Option<String> {
    if !raw.contains('/') {
        return None;
    }

    let dotted = raw.replace('/', ".");
    let dotted = dotted.strip_suffix(".class").unwrap_or(&dotted);

    let name = match object_type_names(dotted).next() {
        Some(inner) => inner.to_string(),
        None => dotted.to_string(),
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstantPoolEntry;

    fn pool_with(name: &str) -> ConstantPool {
        ConstantPool::from_entries([
            ConstantPoolEntry::Utf8(name.to_string()),
            ConstantPoolEntry::Class { name_index: 1 },
        ])
    }

    #[test]
    fn test_plain_internal_name() {
        let pool = pool_with("com/example/Foo");
        assert_eq!(
            extract_class_ref(&pool, 1).as_deref(),
            Some("com.example.Foo")
        );
    }

    #[test]
    fn test_strips_class_suffix() {
        let pool = pool_with("com/example/Foo.class");
        assert_eq!(
            extract_class_ref(&pool, 1).as_deref(),
            Some("com.example.Foo")
        );
    }

    #[test]
    fn test_array_of_objects_unwraps_token() {
        assert_eq!(
            normalize_class_name("[[Ljava/lang/String;").as_deref(),
            Some("java.lang.String")
        );
    }

    #[test]
    fn test_array_class_file_name_unwraps_token() {
        let pool = pool_with("[Lcom/example/Foo;.class");
        assert_eq!(
            extract_class_ref(&pool, 1).as_deref(),
            Some("com.example.Foo")
        );
    }

    #[test]
    fn test_no_separator_contributes_nothing() {
        assert!(normalize_class_name("[I").is_none());
        assert!(normalize_class_name("Toplevel").is_none());
    }

    #[test]
    fn test_unresolved_index_contributes_nothing() {
        let pool = pool_with("com/example/Foo");
        assert!(extract_class_ref(&pool, 0).is_none());
        assert!(extract_class_ref(&pool, 2).is_none());
        assert!(extract_class_ref(&pool, 99).is_none());
    }

    #[test]
    fn test_inner_class_names_kept_verbatim() {
        // Class names skip the character filter applied to raw strings.
        assert_eq!(
            normalize_class_name("com/example/Outer$Inner").as_deref(),
            Some("com.example.Outer$Inner")
        );
    }
}
