//! Accumulation of parsed entries.
//!
//! [`KeyVariantMap`] remembers the current record for every `(key, rule)`
//! pair, and [`EntrySet`] keeps the ordered output. Registering a pair that
//! was already seen replaces the earlier record and moves the entry to the
//! end of the output, exactly as if the earlier line had never been there.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::types::{PluralRule, TranslationEntry};

/// The record kept for one `(key, rule)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantRecord {
    pub translation: String,
    pub context: String,
    pub comment: String,
}

/// Why an entry could not be registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("entry has an empty key")]
    EmptyKey,
    #[error("entry `{key}` has an empty translation")]
    EmptyTranslation { key: String },
}

/// Key → plural rule → record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyVariantMap {
    variants: HashMap<String, BTreeMap<PluralRule, VariantRecord>>,
}

impl KeyVariantMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str, rule: PluralRule) -> Option<&VariantRecord> {
        self.variants.get(key).and_then(|rules| rules.get(&rule))
    }

    /// All rules recorded for `key`.
    pub fn variants(&self, key: &str) -> Option<&BTreeMap<PluralRule, VariantRecord>> {
        self.variants.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.variants.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Stores `record`, returning the record it replaced.
    fn insert(
        &mut self,
        key: &str,
        rule: PluralRule,
        record: VariantRecord,
    ) -> Option<VariantRecord> {
        self.variants
            .entry(key.to_string())
            .or_default()
            .insert(rule, record)
    }
}

/// Ordered output collection, indexed by `(key, rule)`.
///
/// Replaced entries leave a tombstone behind, which keeps replacement O(1)
/// while preserving insertion order for the survivors.
#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    slots: Vec<Option<TranslationEntry>>,
    index: HashMap<(String, PluralRule), usize>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry`, dropping any earlier entry with the same key and rule.
    /// Returns the dropped entry.
    pub fn upsert(&mut self, entry: TranslationEntry) -> Option<TranslationEntry> {
        let id = (entry.key.clone(), entry.rule);
        let previous = self
            .index
            .insert(id, self.slots.len())
            .and_then(|slot| self.slots[slot].take());
        self.slots.push(Some(entry));
        previous
    }

    pub fn get(&self, key: &str, rule: PluralRule) -> Option<&TranslationEntry> {
        self.index
            .get(&(key.to_string(), rule))
            .and_then(|slot| self.slots[*slot].as_ref())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.slots.iter().flatten()
    }

    /// Snapshot of the live entries in insertion order.
    pub fn to_vec(&self) -> Vec<TranslationEntry> {
        self.iter().cloned().collect()
    }

    pub fn into_vec(self) -> Vec<TranslationEntry> {
        self.slots.into_iter().flatten().collect()
    }
}

/// Owns both structures for the duration of one parse.
#[derive(Debug, Clone, Default)]
pub struct EntryAccumulator {
    variants: KeyVariantMap,
    entries: EntrySet,
}

impl EntryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an unescaped translation for `key` under `rule`.
    ///
    /// On failure neither structure is touched. On success the returned entry
    /// is the one that was replaced, if any.
    pub fn register(
        &mut self,
        key: &str,
        translation: String,
        rule: PluralRule,
        comment: &str,
    ) -> Result<Option<TranslationEntry>, RegisterError> {
        if key.is_empty() {
            return Err(RegisterError::EmptyKey);
        }
        if translation.trim().is_empty() {
            return Err(RegisterError::EmptyTranslation {
                key: key.to_string(),
            });
        }

        let record = VariantRecord {
            translation: translation.clone(),
            context: String::new(),
            comment: comment.to_string(),
        };
        self.variants.insert(key, rule, record);

        let entry = TranslationEntry {
            key: key.to_string(),
            translation,
            context: String::new(),
            comment: comment.to_string(),
            rule,
        };
        Ok(self.entries.upsert(entry))
    }

    pub fn variants(&self) -> &KeyVariantMap {
        &self.variants
    }

    pub fn entries(&self) -> &EntrySet {
        &self.entries
    }

    pub fn into_parts(self) -> (KeyVariantMap, EntrySet) {
        (self.variants, self.entries)
    }
}
