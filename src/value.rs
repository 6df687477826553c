//! Render data: a dynamically typed value tree
//!
//! Values are strings, booleans, ordered lists, or name-keyed objects.
//! They can be assembled in code or loaded from TOML.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use thiserror::Error;

/// Errors that can occur when loading render data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse data TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The five shapes a value can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    String,
    List,
    True,
    False,
}

/// Name-keyed fields of an object value
///
/// The first value inserted under a name wins; later inserts are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    fields: BTreeMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field unless one with this name already exists
    ///
    /// Returns `false` when the insert was ignored.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        match self.fields.entry(name.into()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (name, value) in iter {
            object.insert(name, value);
        }
        object
    }
}

/// Render-time data
///
/// Cloning is a deep copy; nothing is shared between clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Object(Object),
    String(String),
    List(Vec<Value>),
    Bool(bool),
}

impl Default for Value {
    fn default() -> Self {
        Value::Object(Object::new())
    }
}

impl Value {
    /// An empty object
    pub fn object() -> Self {
        Self::default()
    }

    /// An empty list
    pub fn list() -> Self {
        Value::List(Vec::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Object(_) => ValueKind::Object,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Bool(true) => ValueKind::True,
            Value::Bool(false) => ValueKind::False,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::List(items) if items.is_empty())
    }

    pub fn is_non_empty_list(&self) -> bool {
        matches!(self, Value::List(items) if !items.is_empty())
    }

    /// Whether a section guarded by this value renders
    ///
    /// Only `false` and the empty list are falsy. Strings count as truthy
    /// here: a string-valued section renders once.
    pub fn is_truthy(&self) -> bool {
        !(self.is_false() || self.is_empty_list())
    }

    /// Set a field on an object; ignored for other kinds and for names
    /// that are already set
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        if let Value::Object(object) = self {
            object.insert(name, value);
        }
    }

    /// Builder form of [`Value::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Append to a list; ignored for other kinds
    pub fn push(&mut self, value: impl Into<Value>) {
        if let Value::List(items) = self {
            items.push(value.into());
        }
    }

    /// Look up an object field; `None` for other kinds
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.get(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Load render data from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load render data from a TOML document
    ///
    /// Tables become objects, arrays become lists. Numbers and datetimes
    /// become strings of their TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, DataError> {
        let table: toml::Table = content.parse()?;
        Ok(table.into())
    }
}

impl From<toml::Table> for Value {
    fn from(table: toml::Table) -> Self {
        table.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(n) => Value::String(n.to_string()),
            toml::Value::Float(n) => Value::String(n.to_string()),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(d) => Value::String(d.to_string()),
            toml::Value::Array(items) => items.into_iter().map(Value::from).collect(),
            toml::Value::Table(table) => table.into(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, boolean, number, list, or table")
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
                Ok(Value::Bool(b))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
                Ok(Value::String(n.to_string()))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
                Ok(Value::String(n.to_string()))
            }

            fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
                Ok(Value::String(n.to_string()))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
                Ok(Value::String(s.to_string()))
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
                Ok(Value::String(s))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::List(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut object = Object::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    object.insert(key, value);
                }
                Ok(Value::Object(object))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
