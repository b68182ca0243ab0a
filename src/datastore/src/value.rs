// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Property values.

use crate::Result;
use crate::float::F64;
use gax::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

/// The maximum size, in bytes, of an indexed string property.
pub const MAX_INDEXED_STRING_BYTES: usize = 1500;

/// The payload types that can be stored in a [Value].
pub trait PropertyValue:
    Clone + PartialEq + std::fmt::Debug + Serialize + serde::de::DeserializeOwned
{
    /// Checks the payload can be indexed.
    fn check_indexed(&self) -> Result<()> {
        Ok(())
    }

    /// Compares two payloads.
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }

    fn serialize_payload<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        self.serialize(serializer)
    }

    fn deserialize_payload<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        Self::deserialize(deserializer)
    }
}

impl PropertyValue for String {
    fn check_indexed(&self) -> Result<()> {
        if self.len() > MAX_INDEXED_STRING_BYTES {
            return Err(Error::invalid_argument(format!(
                "indexed string values are limited to {MAX_INDEXED_STRING_BYTES} bytes, got {}",
                self.len()
            )));
        }
        Ok(())
    }
}

impl PropertyValue for i64 {}

impl PropertyValue for f64 {
    // NaN payloads are equal to each other.
    fn same_as(&self, other: &Self) -> bool {
        (self.is_nan() && other.is_nan()) || self == other
    }

    fn serialize_payload<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        F64::serialize_as(self, serializer)
    }

    fn deserialize_payload<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        F64::deserialize_as(deserializer)
    }
}

impl PropertyValue for bool {}
impl PropertyValue for () {}

/// A property value with its attributes.
///
/// Values created with [Value::of] have no `meaning` and no `indexed` flag.
/// The service treats a missing `indexed` flag as `true`.
///
/// # Example
/// ```
/// # use gcloud_datastore::StringValue;
/// let value = StringValue::of("hello world")?;
/// assert_eq!(value.get(), "hello world");
/// assert!(!value.has_indexed());
///
/// let value = StringValue::builder("hello world").with_indexed(false).build()?;
/// assert_eq!(value.indexed(), Some(false));
/// # gcloud_datastore::Result::<()>::Ok(())
/// ```
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(
    rename_all = "camelCase",
    bound(serialize = "V: PropertyValue", deserialize = "V: PropertyValue")
)]
pub struct Value<V> {
    #[serde(
        serialize_with = "serialize_payload",
        deserialize_with = "deserialize_payload"
    )]
    value: V,
    meaning: Option<i32>,
    indexed: Option<bool>,
}

fn serialize_payload<V, S>(value: &V, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    V: PropertyValue,
    S: Serializer,
{
    value.serialize_payload(serializer)
}

fn deserialize_payload<'de, V, D>(deserializer: D) -> std::result::Result<V, D::Error>
where
    V: PropertyValue,
    D: Deserializer<'de>,
{
    V::deserialize_payload(deserializer)
}

impl<V: PropertyValue> PartialEq for Value<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value.same_as(&other.value)
            && self.meaning == other.meaning
            && self.indexed == other.indexed
    }
}

pub type StringValue = Value<String>;
pub type LongValue = Value<i64>;
pub type DoubleValue = Value<f64>;
pub type BooleanValue = Value<bool>;
pub type NullValue = Value<()>;

impl<V: PropertyValue> Value<V> {
    /// Creates a value with no attributes.
    ///
    /// Fails if the payload cannot be indexed, unindexed values must use the
    /// [builder][Value::builder].
    pub fn of<T: Into<V>>(value: T) -> Result<Self> {
        Self::builder(value).build()
    }

    pub fn builder<T: Into<V>>(value: T) -> ValueBuilder<V> {
        ValueBuilder {
            inner: Self {
                value: value.into(),
                meaning: None,
                indexed: None,
            },
        }
    }

    pub fn to_builder(&self) -> ValueBuilder<V> {
        ValueBuilder {
            inner: self.clone(),
        }
    }

    /// The payload.
    pub fn get(&self) -> &V {
        &self.value
    }

    pub fn into_inner(self) -> V {
        self.value
    }

    #[deprecated(note = "the meaning field is only kept for compatibility")]
    pub fn has_meaning(&self) -> bool {
        self.meaning.is_some()
    }

    #[deprecated(note = "the meaning field is only kept for compatibility")]
    pub fn meaning(&self) -> Option<i32> {
        self.meaning
    }

    pub fn has_indexed(&self) -> bool {
        self.indexed.is_some()
    }

    /// The explicit `indexed` flag, if any.
    pub fn indexed(&self) -> Option<bool> {
        self.indexed
    }
}

impl NullValue {
    pub fn null() -> Self {
        Self {
            value: (),
            meaning: None,
            indexed: None,
        }
    }
}

/// A builder for [Value].
#[derive(Clone, Debug)]
pub struct ValueBuilder<V> {
    inner: Value<V>,
}

impl<V: PropertyValue> ValueBuilder<V> {
    pub fn with_value<T: Into<V>>(mut self, v: T) -> Self {
        self.inner.value = v.into();
        self
    }

    #[deprecated(note = "the meaning field is only kept for compatibility")]
    pub fn with_meaning(mut self, v: i32) -> Self {
        self.inner.meaning = Some(v);
        self
    }

    pub fn with_indexed(mut self, v: bool) -> Self {
        self.inner.indexed = Some(v);
        self
    }

    /// Creates the value, validating indexed payloads.
    pub fn build(self) -> Result<Value<V>> {
        if self.inner.indexed.unwrap_or(true) {
            self.inner.value.check_indexed()?;
        }
        Ok(self.inner)
    }
}
