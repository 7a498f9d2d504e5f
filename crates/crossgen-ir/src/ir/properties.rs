//! The language-property bag attached to every IR node.
//!
//! Source languages disagree on their modifier vocabularies, so instead of
//! a boolean per keyword every node carries an open map from well-known
//! string keys to small dynamic values. A missing key means "not
//! applicable", never "false".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known property keys.
///
/// Front ends write these, back ends look them up through their modifier
/// tables. Keys not listed here are still carried through untouched.
pub mod keys {
    pub const ABSTRACT: &str = "abstract";
    pub const OPEN: &str = "open";
    pub const FINAL: &str = "final";
    pub const SEALED: &str = "sealed";
    pub const DATA: &str = "data";
    pub const INNER: &str = "inner";
    pub const COMPANION: &str = "companion";
    pub const STATIC: &str = "static";
    pub const INLINE: &str = "inline";
    pub const SUSPEND: &str = "suspend";
    pub const TAILREC: &str = "tailrec";
    pub const OVERRIDE: &str = "override";
    pub const CONST: &str = "const";
    pub const LATEINIT: &str = "lateinit";
    pub const CONVENIENCE: &str = "convenience";
    pub const DEFAULT: &str = "default";
    pub const SYNCHRONIZED: &str = "synchronized";
    pub const TRANSIENT: &str = "transient";
    pub const VOLATILE: &str = "volatile";
    pub const NATIVE: &str = "native";

    /// Package of a file, for JVM languages.
    pub const JVM_PACKAGE: &str = "jvmPackage";
    /// Module of a file, for Swift.
    pub const SWIFT_MODULE: &str = "swiftModule";
    /// Set on an expression that was written inside redundant parentheses.
    pub const PARENTHESIZED: &str = "parenthesized";
    /// Set on a Kotlin/Swift class whose super-type is an extension target.
    pub const EXTENSION: &str = "extension";
    /// Set on the constructor a class declares in its header.
    pub const PRIMARY: &str = "primary";
    /// Set on a field that is a constant of its enclosing enum.
    pub const ENUM_ENTRY: &str = "enumEntry";
    /// Set by writers on a type use that must stay fully qualified because
    /// its simple name is taken in the file.
    pub const FULLY_QUALIFIED: &str = "fullyQualified";

    /// Modifier keywords, in the order back ends emit them.
    pub const MODIFIER_KEYS: &[&str] = &[
        ABSTRACT,
        STATIC,
        FINAL,
        OPEN,
        SEALED,
        DATA,
        INNER,
        COMPANION,
        OVERRIDE,
        INLINE,
        SUSPEND,
        TAILREC,
        CONST,
        LATEINIT,
        CONVENIENCE,
        DEFAULT,
        SYNCHRONIZED,
        TRANSIENT,
        VOLATILE,
        NATIVE,
    ];
}

/// A dynamically-shaped property value.
///
/// Mirrors the JSON data model so arbitrary values round-trip through the
/// wire codec without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// True for `Bool(true)`; every other value is not a set flag.
    pub fn is_true(&self) -> bool {
        matches!(self, PropertyValue::Bool(true))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => PropertyValue::Int(value),
            Err(_) => PropertyValue::UInt(value),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(value: Vec<PropertyValue>) -> Self {
        PropertyValue::List(value)
    }
}

/// Ordered map of language properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag(BTreeMap<String, PropertyValue>);

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.0.remove(key)
    }

    /// True when `key` is present and set to `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(PropertyValue::is_true)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys set to `true`, in the canonical modifier order.
    pub fn set_modifiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        keys::MODIFIER_KEYS
            .iter()
            .copied()
            .filter(|key| self.flag(key))
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
