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

//! Wire-level representation of the call options.
//!
//! Each option type in [crate::options] resolves to one [RpcOption] (the
//! query parameter name) and an [OptionValue]. The resolved options for a
//! call are collected in [RequestParameters], which rejects two options of
//! the same kind and renders them in a stable order.
//!
//! These types are public because applications that send the requests with
//! their own transport need them. Most applications do not use them
//! directly.

use crate::Result;
use gax::error::Error;
use std::collections::BTreeMap;

/// The query parameters understood by the service.
///
/// The declaration order is the order used when rendering a request.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RpcOption {
    Prefix,
    Delimiter,
    MaxResults,
    PageToken,
    PredefinedAcl,
    IfGenerationMatch,
    IfGenerationNotMatch,
    IfMetagenerationMatch,
    IfMetagenerationNotMatch,
}

impl RpcOption {
    /// The query parameter name.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Delimiter => "delimiter",
            Self::MaxResults => "maxResults",
            Self::PageToken => "pageToken",
            Self::PredefinedAcl => "predefinedAcl",
            Self::IfGenerationMatch => "ifGenerationMatch",
            Self::IfGenerationNotMatch => "ifGenerationNotMatch",
            Self::IfMetagenerationMatch => "ifMetagenerationMatch",
            Self::IfMetagenerationNotMatch => "ifMetagenerationNotMatch",
        }
    }
}

impl std::fmt::Display for RpcOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// The value of a resolved option.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    String(String),
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// The resolved options for a single request.
///
/// # Example
/// ```
/// # use gcloud_storage::rpc::{RequestParameters, RpcOption};
/// let mut params = RequestParameters::new();
/// params.insert(RpcOption::MaxResults, 10_i64)?;
/// params.insert(RpcOption::Prefix, "logs/")?;
/// assert_eq!(
///     params.query_pairs(),
///     vec![("prefix", "logs/".to_string()), ("maxResults", "10".to_string())]
/// );
/// assert!(params.insert(RpcOption::Prefix, "other/").is_err());
/// # gcloud_storage::Result::<()>::Ok(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestParameters {
    params: BTreeMap<RpcOption, OptionValue>,
}

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, fails if an option of the same kind is present.
    pub fn insert<V: Into<OptionValue>>(&mut self, option: RpcOption, value: V) -> Result<()> {
        let value = value.into();
        if let Some(existing) = self.params.get(&option) {
            return Err(Error::invalid_argument(format!(
                "duplicate option {option}: {existing} and {value}"
            )));
        }
        self.params.insert(option, value);
        Ok(())
    }

    pub fn get(&self, option: RpcOption) -> Option<&OptionValue> {
        self.params.get(&option)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RpcOption, &OptionValue)> {
        self.params.iter().map(|(k, v)| (*k, v))
    }

    /// The parameters as (name, value) pairs, in [RpcOption] order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.iter().map(|(k, v)| (k.value(), v.to_string())).collect()
    }

    /// Appends the parameters to the query string of `url`.
    pub fn apply(&self, url: &mut url::Url) {
        if self.is_empty() {
            return;
        }
        let mut query = url.query_pairs_mut();
        for (name, value) in self.query_pairs() {
            query.append_pair(name, &value);
        }
    }
}

/// The set of characters that are percent encoded in path segments.
///
/// See https://cloud.google.com/storage/docs/request-endpoints#encoding
const ENCODED_CHARS: percent_encoding::AsciiSet = percent_encoding::CONTROLS
    .add(b'!')
    .add(b'#')
    .add(b'$')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b' ');

/// Percent encode a bucket or object name for use in a request path.
pub(crate) fn enc(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, &ENCODED_CHARS).to_string()
}
