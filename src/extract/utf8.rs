use super::{object_type_names, TYPE_REF_CHARS};

/// Classify a raw `Utf8` constant and return the import names it denotes.
///
/// Method descriptors (`(...)...`) yield every object-type token they hold.
/// Any other accepted string yields its single token if it has exactly one,
/// or else the whole dotted string.
pub fn extract_utf8(raw: &str) -> Vec<String> {
    let Some(dotted) = accept(raw) else {
        return Vec::new();
    };

    if dotted.starts_with('(') {
        return object_type_names(&dotted).map(str::to_string).collect();
    }

    let single = {
        let mut tokens = object_type_names(&dotted);
        match (tokens.next(), tokens.next()) {
            (Some(only), None) => Some(only.to_string()),
            _ => None,
        }
    };
    match single {
        Some(name) => vec![name],
        None => vec![dotted],
    }
}

/// Apply the rejection filters, returning the dotted form of a string that
/// could be a type reference.
fn accept(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| c <= ' ');
    if trimmed.is_empty() {
        return None;
    }
    if !TYPE_REF_CHARS.is_match(trimmed) {
        return None;
    }
    if !trimmed.contains('/') || trimmed.starts_with('/') {
        return None;
    }

    // A ".." shows up when the pool holds regex or URL fragments.
    let dotted = trimmed.replace('/', ".");
    if dotted.contains("..") {
        return None;
    }
    Some(dotted)
}
