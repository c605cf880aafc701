use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// Ordered, deduplicated collection of import names.
///
/// The first insertion of a name fixes its position; later insertions of the
/// same name are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name` if absent. Returns true when the name was new.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.order.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

impl Extend<String> for ImportSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for name in iter {
            self.add(name);
        }
    }
}

impl FromIterator<String> for ImportSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = ImportSet::new();
        set.extend(iter);
        set
    }
}

impl Serialize for ImportSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}
