//! Seams to the collaborators around the codec.
//!
//! The codec never stores anything itself. It asks a [`SourceLookup`] whether
//! a key exists in the source file of a resource, and hands its results to an
//! [`EntrySink`].

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::TranslationEntry;

/// Answers "does a source string with this exact key exist for the resource".
///
/// Queried once per assignment line when parsing a translated file.
///
/// # Example
///
/// ```rust
/// use std::collections::HashSet;
/// use joomla_ini::traits::SourceLookup;
///
/// let keys: HashSet<String> = ["FOO".to_string()].into_iter().collect();
/// assert!(keys.exists("com_content", "FOO"));
/// assert!(!keys.exists("com_content", "BAR"));
///
/// let only_foo = |_resource: &str, key: &str| key == "FOO";
/// assert!(only_foo.exists("com_content", "FOO"));
/// ```
pub trait SourceLookup {
    fn exists(&self, resource: &str, key: &str) -> bool;
}

impl<F> SourceLookup for F
where
    F: Fn(&str, &str) -> bool,
{
    fn exists(&self, resource: &str, key: &str) -> bool {
        self(resource, key)
    }
}

/// A flat key set, shared by every resource.
impl SourceLookup for HashSet<String> {
    fn exists(&self, _resource: &str, key: &str) -> bool {
        self.contains(key)
    }
}

impl SourceLookup for BTreeSet<String> {
    fn exists(&self, _resource: &str, key: &str) -> bool {
        self.contains(key)
    }
}

/// Resource name → keys of its source file.
impl SourceLookup for HashMap<String, HashSet<String>> {
    fn exists(&self, resource: &str, key: &str) -> bool {
        self.get(resource).is_some_and(|keys| keys.contains(key))
    }
}

/// Receives parsed entries, typically to persist them.
pub trait EntrySink {
    fn register(&mut self, entry: TranslationEntry);
}

impl EntrySink for Vec<TranslationEntry> {
    fn register(&mut self, entry: TranslationEntry) {
        self.push(entry);
    }
}
