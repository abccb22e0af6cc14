//! Location names and the deduplicating set they are collected into.
use std::borrow::Borrow;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;

/// Prefix of DBpedia resource IRIs, stripped from country values.
pub const DBPEDIA_RESOURCE: &str = "http://dbpedia.org/resource/";

/// The name of a place, as displayed to the user.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationName(String);

impl LocationName {
    /// Normalize a DBpedia country value.
    ///
    /// Returns `None` for an empty value. Otherwise the resource prefix is
    /// removed and underscores become spaces, so that
    /// `http://dbpedia.org/resource/United_Kingdom` gives `United Kingdom`.
    pub fn from_dbpedia(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let local = raw.strip_prefix(DBPEDIA_RESOURCE).unwrap_or(raw);
        Some(LocationName(local.replace('_', " ")))
    }

    /// Keep `raw` unchanged (Wikidata labels are already human readable).
    pub fn verbatim<T: Into<String>>(raw: T) -> Self {
        LocationName(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The locations gathered for one search, without duplicates.
///
/// Iteration is in lexicographic order; the order in which sources
/// contributed is not kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    names: BTreeSet<LocationName>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns `false` if it was already present.
    pub fn insert(&mut self, name: LocationName) -> bool {
        self.names.insert(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, LocationName> {
        self.names.iter()
    }
}

impl Extend<LocationName> for ResultSet {
    fn extend<I: IntoIterator<Item = LocationName>>(&mut self, iter: I) {
        self.names.extend(iter)
    }
}

impl FromIterator<LocationName> for ResultSet {
    fn from_iter<I: IntoIterator<Item = LocationName>>(iter: I) -> Self {
        ResultSet {
            names: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a LocationName;
    type IntoIter = btree_set::Iter<'a, LocationName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
