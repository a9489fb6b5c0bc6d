use std::fmt;

use indexmap::IndexMap;

/// A single pragma argument: an integer or unquoted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PragmaValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for PragmaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PragmaValue::Int(value) => write!(f, "{value}"),
            PragmaValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for PragmaValue {
    fn from(value: i64) -> Self {
        PragmaValue::Int(value)
    }
}

impl From<i32> for PragmaValue {
    fn from(value: i32) -> Self {
        PragmaValue::Int(value.into())
    }
}

impl From<u32> for PragmaValue {
    fn from(value: u32) -> Self {
        PragmaValue::Int(value.into())
    }
}

impl From<&str> for PragmaValue {
    fn from(value: &str) -> Self {
        PragmaValue::Text(value.into())
    }
}

impl From<String> for PragmaValue {
    fn from(value: String) -> Self {
        PragmaValue::Text(value)
    }
}

/// An ordered collection of extra pragma directives.
///
/// Iteration follows insertion order. Inserting a name that is already
/// present replaces its value but keeps the original position.
#[derive(Debug, Default, Clone)]
pub struct Pragmas(IndexMap<String, PragmaValue>);

impl Pragmas {
    /// Creates a new, empty `Pragmas` collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a directive into the collection.
    /// The key should be the pragma name, without the `PRAGMA` keyword.
    pub fn insert<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<PragmaValue>,
    {
        self.0.insert(name.into(), value.into());
    }

    /// Consumes `self`, inserts a directive, and returns `Self` for chaining.
    pub fn set<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<PragmaValue>,
    {
        self.insert(name, value);
        self
    }

    /// Returns the value for a directive name, if present.
    pub fn get(&self, name: &str) -> Option<&PragmaValue> {
        self.0.get(name)
    }

    /// Returns `true` if the collection contains no directives.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of directives in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over name-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PragmaValue)> {
        self.0.iter()
    }

    /// Iterate over the directive names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}
