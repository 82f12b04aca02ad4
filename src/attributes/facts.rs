// src/attributes/facts.rs
use regex::Regex;

use crate::error::{Error, Result};
use super::catalog;
use super::registry::Registry;

/// Pulls one field's value out of a single fact line, e.g.
/// `"Built in 1995"` → `built_year = "1995"`.
#[derive(Clone, Debug)]
pub struct FactParser {
    name: &'static str,
    regex: Regex,
}

impl FactParser {
    /// The pattern is anchored at the start of the line; anything may follow.
    pub fn new(name: &'static str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})"))
            .map_err(|source| Error::Pattern { name: s!(name), source })?;
        Ok(Self { name, regex })
    }

    pub fn name(&self) -> &'static str { self.name }

    /// First capture group, if the line starts with a match and the capture
    /// is non-empty.
    pub fn parse<'a>(&self, line: &'a str) -> Option<&'a str> {
        let caps = self.regex.captures(line)?;
        caps.get(1).map(|m| m.as_str()).filter(|v| !v.is_empty())
    }
}

/// The fact parsers, in catalog order.
#[derive(Clone, Debug)]
pub struct FactParserSet {
    parsers: Vec<FactParser>,
}

impl FactParserSet {
    /// Every parser's field must exist in `registry`.
    pub fn new(registry: &Registry, parsers: Vec<FactParser>) -> Result<Self> {
        if let Some(p) = parsers.iter().find(|p| !registry.contains(p.name)) {
            return Err(Error::UnknownFactField(s!(p.name)));
        }
        Ok(Self { parsers })
    }

    pub fn standard(registry: &Registry) -> Result<Self> {
        let parsers = catalog::FACT_PARSERS
            .iter()
            .map(|&(name, pattern, _)| FactParser::new(name, pattern))
            .collect::<Result<Vec<_>>>()?;
        Self::new(registry, parsers)
    }


    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parsers.iter().map(FactParser::name)
    }

    /// Run every parser over every line. The first line that yields a value
    /// for a field wins; later matches for the same field are ignored.
    /// Output is in the order fields were first found.
    pub fn scan<'a, I>(&self, lines: I) -> Vec<(&'static str, &'a str)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found: Vec<(&'static str, &'a str)> = Vec::new();
        for line in lines {
            for parser in &self.parsers {
                if found.iter().any(|(n, _)| *n == parser.name) {
                    continue;
                }
                if let Some(v) = parser.parse(line) {
                    found.push((parser.name, v));
                }
            }
        }
        found
    }
}
