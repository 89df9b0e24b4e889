//! The shared shape of every record kind, and boundary coercion
//!
//! Incomes, expenses and goals all carry a category, an amount and a date.
//! The [`Record`] trait exposes those three fields so the aggregation
//! functions can work over any of them. It is also implemented for
//! references, which lets callers pass `&Vec<T>`, `Vec<&T>`, slices, or an
//! `Option<&T>` standing in for "a single record or nothing".
//!
//! [`Records`] is the tolerant wire type for list payloads: a bare object,
//! `null`, `{}` or an empty body all decode to a list of zero or one
//! elements instead of failing.

use std::fmt;
use std::marker::PhantomData;

use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::money::Money;

/// A dated, categorized, amount-bearing record
pub trait Record {
    fn category(&self) -> &str;
    fn amount(&self) -> Money;
    fn date(&self) -> NaiveDate;

    /// Free-text note, if the record carries one
    fn description(&self) -> Option<&str> {
        None
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn category(&self) -> &str {
        (**self).category()
    }

    fn amount(&self) -> Money {
        (**self).amount()
    }

    fn date(&self) -> NaiveDate {
        (**self).date()
    }

    fn description(&self) -> Option<&str> {
        (**self).description()
    }
}

/// A list payload that tolerates malformed shapes
///
/// | payload                | result            |
/// |------------------------|-------------------|
/// | `[a, b]`               | `[a, b]`          |
/// | `a` (bare object)      | `[a]`             |
/// | `null`, `{}`, no body  | `[]`              |
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Records<T>(Vec<T>);

impl<T> Records<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for Records<T> {
    fn from(records: Vec<T>) -> Self {
        Self(records)
    }
}

impl<T> IntoIterator for Records<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: DeserializeOwned> Records<T> {
    /// Coerce an already-parsed JSON value into a record list
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(ref map) if map.is_empty() => Ok(Self::default()),
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<T>, _>>()
                .map(Self),
            single => Ok(Self(vec![serde_json::from_value(single)?])),
        }
    }

    /// Parse a raw response body; an empty or whitespace-only body is an empty list
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_value(serde_json::from_str(body)?)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Records<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordsVisitor<T>(PhantomData<T>);

        impl<'de, T: DeserializeOwned> de::Visitor<'de> for RecordsVisitor<T> {
            type Value = Records<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a list of records, a single record, or null")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Records::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Records::default())
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
                d.deserialize_any(self)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut records = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(record) = seq.next_element()? {
                    records.push(record);
                }
                Ok(Records(records))
            }

            fn visit_map<A: de::MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                let value = Value::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Records::from_value(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(RecordsVisitor(PhantomData))
    }
}
