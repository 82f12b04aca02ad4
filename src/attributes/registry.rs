// src/attributes/registry.rs
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use super::catalog;
use super::values::AttributeValue;

/// Pure computation of one derived field from its declared inputs.
/// `compute` receives the inputs' current values in `inputs` order; an absent
/// input arrives as `""`.
#[derive(Clone, Copy)]
pub struct Derivation {
    pub inputs: &'static [&'static str],
    pub compute: fn(&[&str]) -> String,
}

impl fmt::Debug for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derivation").field("inputs", &self.inputs).finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    /// Value always comes from input data (sheet cell or listing page).
    Static,
    Derived(Derivation),
}

/// A named, ranked column.
#[derive(Clone, Debug)]
pub struct FieldDef {
    name: Cow<'static, str>,
    rank: f64,
    kind: FieldKind,
}

impl FieldDef {
    pub fn new_static(name: impl Into<Cow<'static, str>>, rank: f64) -> Self {
        Self { name: name.into(), rank, kind: FieldKind::Static }
    }

    pub fn new_derived(name: impl Into<Cow<'static, str>>, rank: f64, derivation: Derivation) -> Self {
        Self { name: name.into(), rank, kind: FieldKind::Derived(derivation) }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn rank(&self) -> f64 { self.rank }
    pub fn kind(&self) -> &FieldKind { &self.kind }

    pub fn derivation(&self) -> Option<&Derivation> {
        match &self.kind {
            FieldKind::Derived(d) => Some(d),
            FieldKind::Static => None,
        }
    }
}

/// Every known column, in declaration order plus a rank-sorted index.
///
/// Built once at startup and shared read-only. Ties in rank keep declaration
/// order.
#[derive(Debug)]
pub struct Registry {
    defs: Vec<FieldDef>,
    by_name: HashMap<Cow<'static, str>, usize>,
    ranked: Vec<usize>,
}

impl Registry {
    /// Fails on duplicate names or on a derived field reading an unknown input.
    pub fn new(defs: Vec<FieldDef>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            if by_name.insert(def.name.clone(), i).is_some() {
                return Err(Error::DuplicateField(def.name.to_string()));
            }
        }

        for def in &defs {
            if let Some(d) = def.derivation() {
                if let Some(missing) = d.inputs.iter().find(|i| !by_name.contains_key(**i)) {
                    return Err(Error::UnknownDerivedInput {
                        field: def.name.to_string(),
                        input: s!(*missing),
                    });
                }
            }
        }

        let mut ranked: Vec<usize> = (0..defs.len()).collect();
        // Stable: equal ranks stay in declaration order.
        ranked.sort_by(|&a, &b| defs[a].rank.total_cmp(&defs[b].rank));

        Ok(Self { defs, by_name, ranked })
    }

    /// The registry for the listing spreadsheet.
    pub fn standard() -> Result<Self> {
        Self::new(catalog::field_defs())
    }

    pub fn lookup(&self, name: &str) -> Option<&FieldDef> {
        self.by_name.get(name).map(|&i| &self.defs[i])
    }

    pub fn contains(&self, name: &str) -> bool { self.by_name.contains_key(name) }

    /// Position of a field in rendered rows.
    pub fn column_of(&self, name: &str) -> Option<usize> {
        let ix = *self.by_name.get(name)?;
        self.ranked.iter().position(|&i| i == ix)
    }

    /// All fields, lowest rank first.
    pub fn ranked(&self) -> impl Iterator<Item = &FieldDef> {
        self.ranked.iter().map(|&i| &self.defs[i])
    }

    pub fn names_ranked(&self) -> Vec<String> {
        self.ranked().map(|d| s!(d.name())).collect()
    }

    /// All fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> { self.defs.iter() }

    pub fn derived(&self) -> impl Iterator<Item = &FieldDef> {
        self.defs.iter().filter(|d| d.derivation().is_some())
    }

    pub fn len(&self) -> usize { self.defs.len() }
    pub fn is_empty(&self) -> bool { self.defs.is_empty() }

    /// Pair `value` with the field called `name`; `None` if the name is unknown.
    pub fn value(&self, name: &str, value: impl Into<String>) -> Option<AttributeValue> {
        let def = self.lookup(name)?;
        Some(AttributeValue::new(def.name.clone(), value.into()))
    }
}
