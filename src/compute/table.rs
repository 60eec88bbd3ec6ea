//! The substitution environment: identifier -> constant or operator.

use super::error::TableError;
use serde::{Serialize, Serializer};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::fs;
use std::path::Path;

/// An operator symbol. Text that is not one of the supported operators is kept as
/// `Unsupported` and only rejected if an expression actually applies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Sum,
    Product,
    Exp,
    Unsupported(String),
}

impl Symbol {
    pub fn parse(text: &str) -> Self {
        match text {
            "+" => Symbol::Sum,
            "*" => Symbol::Product,
            "exp" => Symbol::Exp,
            other => Symbol::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Symbol::Sum => "+",
            Symbol::Product => "*",
            Symbol::Exp => "exp",
            Symbol::Unsupported(s) => s,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OperationValue {
    Constant(f64),
    Operator(Symbol),
}

impl OperationValue {
    /// An integer becomes a constant; any other text is kept as an operator symbol,
    /// including decimal forms such as `2.5`.
    pub fn parse(text: &str) -> Self {
        match text.parse::<i64>() {
            Ok(n) => OperationValue::Constant(n as f64),
            Err(_) => OperationValue::Operator(Symbol::parse(text)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OperationTable {
    entries: BTreeMap<String, OperationValue>,
}

impl OperationTable {
    pub fn new() -> Self { Self::default() }

    /// Parses `identifier:value` lines. Blank lines are skipped; anything else that
    /// does not split into exactly one non-empty key and value is rejected.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut table = Self::new();
        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            if raw.trim().is_empty() {
                continue;
            }
            let mut parts = raw.split(':');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(TableError::MalformedLine { line, text: raw.to_string() });
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return Err(TableError::EmptyField { line });
            }
            if table.entries.contains_key(key) {
                return Err(TableError::DuplicateKey { key: key.to_string(), line });
            }
            table.insert(key, OperationValue::parse(value));
        }
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, value: OperationValue) -> Option<OperationValue> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&OperationValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> btree_map::Iter<'_, String, OperationValue> {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, OperationValue)> for OperationTable {
    fn from_iter<I: IntoIterator<Item = (K, OperationValue)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}
