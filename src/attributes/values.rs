// src/attributes/values.rs
use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// One populated field of a record.
///
/// Only [`Registry::value`](super::Registry::value) builds these, so the name
/// always resolves in the registry that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeValue {
    name: Cow<'static, str>,
    value: String,
}

impl AttributeValue {
    pub(crate) fn new(name: Cow<'static, str>, value: String) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn value(&self) -> &str { &self.value }
}

/// All populated fields of one listing, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeValueSet {
    values: BTreeMap<Cow<'static, str>, AttributeValue>,
}

impl AttributeValueSet {
    pub fn new() -> Self { Self::default() }

    /// Insert or replace by name.
    pub fn insert(&mut self, attr: AttributeValue) {
        self.values.insert(attr.name.clone(), attr);
    }

    /// Overwrite with everything present in `other`. Fields only in `self`
    /// are left alone.
    pub fn merge(&mut self, other: AttributeValueSet) {
        for (name, attr) in other.values {
            self.values.insert(name, attr);
        }
    }

    /// Value of a field that must have been populated.
    pub fn get_value(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| Error::MissingAttribute(s!(name)))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|a| a.value())
    }

    pub fn contains(&self, name: &str) -> bool { self.values.contains_key(name) }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeValue> {
        self.values.values()
    }

    /// Rewrite one field's value in place, if present.
    pub(crate) fn map_value(&mut self, name: &str, f: impl FnOnce(&str) -> String) {
        if let Some(attr) = self.values.get_mut(name) {
            attr.value = f(&attr.value);
        }
    }
}

impl Extend<AttributeValue> for AttributeValueSet {
    fn extend<I: IntoIterator<Item = AttributeValue>>(&mut self, iter: I) {
        for attr in iter {
            self.insert(attr);
        }
    }
}

impl FromIterator<AttributeValue> for AttributeValueSet {
    fn from_iter<I: IntoIterator<Item = AttributeValue>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
