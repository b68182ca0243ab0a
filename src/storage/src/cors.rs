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

//! Cross-origin resource sharing configuration for buckets.
//!
//! See [Cross-origin resource sharing (CORS)] for the details.
//!
//! [Cross-origin resource sharing (CORS)]: https://cloud.google.com/storage/docs/cross-origin

use crate::Result;
use gax::error::Error;

const ANY_URI: &str = "*";

/// An origin allowed by a [Cors] rule.
///
/// # Example
/// ```
/// # use gcloud_storage::cors::Origin;
/// assert!(Origin::any().is_any());
/// let origin = Origin::of("https", "example.com", 8443)?;
/// assert_eq!(origin.value(), "https://example.com:8443");
/// # gcloud_storage::Result::<()>::Ok(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Origin {
    value: String,
}

impl Origin {
    /// The wildcard origin, matching any origin.
    pub fn any() -> Self {
        Self {
            value: ANY_URI.to_string(),
        }
    }

    /// Creates an origin from its components.
    pub fn of(scheme: &str, host: &str, port: u16) -> Result<Self> {
        let value = format!("{scheme}://{host}:{port}");
        let url = url::Url::parse(&value).map_err(Error::invalid_argument)?;
        if url.host_str().is_none() {
            return Err(Error::invalid_argument(format!(
                "the origin {value} must include a host"
            )));
        }
        Ok(Self { value })
    }

    /// Creates an origin from its string representation.
    pub fn new<T: Into<String>>(value: T) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::invalid_argument("the origin cannot be empty"));
        }
        Ok(Self { value })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_any(&self) -> bool {
        self.value == ANY_URI
    }
}

impl TryFrom<String> for Origin {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Origin> for String {
    fn from(value: Origin) -> Self {
        value.value
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// The HTTP methods used in CORS rules and in request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HttpMethod {
    #[serde(rename = "*")]
    Any,
    Get,
    Head,
    Put,
    Post,
    Delete,
    Options,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => ANY_URI,
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CORS rule for a bucket.
///
/// The origins, methods and response headers keep the order in which they
/// were first added, duplicates are dropped.
///
/// # Example
/// ```
/// # use gcloud_storage::cors::{Cors, HttpMethod, Origin};
/// let cors = Cors::builder()
///     .with_max_age_seconds(3600)
///     .with_origins([Origin::any()])
///     .with_methods([HttpMethod::Get, HttpMethod::Head])
///     .build();
/// assert_eq!(cors.max_age_seconds(), Some(3600));
/// assert_eq!(cors.origins(), &[Origin::any()]);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cors {
    max_age_seconds: Option<u32>,
    #[serde(rename = "method")]
    methods: Vec<HttpMethod>,
    #[serde(rename = "origin")]
    origins: Vec<Origin>,
    #[serde(rename = "responseHeader")]
    response_headers: Vec<String>,
}

impl Cors {
    pub fn builder() -> CorsBuilder {
        CorsBuilder::default()
    }

    pub fn to_builder(&self) -> CorsBuilder {
        CorsBuilder {
            inner: self.clone(),
        }
    }

    pub fn max_age_seconds(&self) -> Option<u32> {
        self.max_age_seconds
    }

    pub fn methods(&self) -> &[HttpMethod] {
        &self.methods
    }

    pub fn origins(&self) -> &[Origin] {
        &self.origins
    }

    pub fn response_headers(&self) -> &[String] {
        &self.response_headers
    }
}

/// A builder for [Cors].
#[derive(Clone, Debug, Default)]
pub struct CorsBuilder {
    inner: Cors,
}

impl CorsBuilder {
    /// Sets how long the browser may cache the preflight response.
    pub fn with_max_age_seconds(mut self, v: u32) -> Self {
        self.inner.max_age_seconds = Some(v);
        self
    }

    /// Replaces the HTTP methods.
    pub fn with_methods<I>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = HttpMethod>,
    {
        self.inner.methods = dedup(v);
        self
    }

    /// Replaces the origins.
    pub fn with_origins<I>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = Origin>,
    {
        self.inner.origins = dedup(v);
        self
    }

    /// Replaces the response headers.
    pub fn with_response_headers<I, V>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.inner.response_headers = dedup(v.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Cors {
        self.inner
    }
}

fn dedup<I, T>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: PartialEq,
{
    items.into_iter().fold(Vec::new(), |mut acc, item| {
        if !acc.contains(&item) {
            acc.push(item);
        }
        acc
    })
}
