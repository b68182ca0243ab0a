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

//! Buckets, the containers for objects.

use crate::Result;
use crate::acl::{Acl, Entity};
use crate::cors::Cors;
use crate::names::check_bucket_name;
use chrono::{DateTime, Utc};

/// The metadata of a bucket, identified by its name.
///
/// # Example
/// ```
/// # use gcloud_storage::bucket::Bucket;
/// let bucket = Bucket::builder("my-bucket")
///     .with_location("US")
///     .with_versioning_enabled(true)
///     .build()?;
/// assert_eq!(bucket.location(), Some("US"));
/// assert_eq!(bucket.to_builder().build()?, bucket);
/// # gcloud_storage::Result::<()>::Ok(())
/// ```
#[serde_with::serde_as]
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(deserialize_with = "crate::names::bucket_name")]
    name: String,
    id: Option<String>,
    owner: Option<Entity>,
    location: Option<String>,
    storage_class: Option<String>,
    versioning_enabled: Option<bool>,
    index_page: Option<String>,
    not_found_page: Option<String>,
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    metageneration: Option<i64>,
    etag: Option<String>,
    create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    cors: Vec<Cors>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    acl: Vec<Acl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    default_acl: Vec<Acl>,
}

impl Bucket {
    /// Creates a bucket with only its name.
    pub fn of<T: Into<String>>(name: T) -> Result<Self> {
        Self::builder(name).build()
    }

    pub fn builder<T: Into<String>>(name: T) -> BucketBuilder {
        BucketBuilder {
            inner: Self {
                name: name.into(),
                id: None,
                owner: None,
                location: None,
                storage_class: None,
                versioning_enabled: None,
                index_page: None,
                not_found_page: None,
                metageneration: None,
                etag: None,
                create_time: None,
                cors: Vec::new(),
                acl: Vec::new(),
                default_acl: Vec::new(),
            },
        }
    }

    pub fn to_builder(&self) -> BucketBuilder {
        BucketBuilder {
            inner: self.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn owner(&self) -> Option<&Entity> {
        self.owner.as_ref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn storage_class(&self) -> Option<&str> {
        self.storage_class.as_deref()
    }

    pub fn versioning_enabled(&self) -> Option<bool> {
        self.versioning_enabled
    }

    /// The object served when a website visitor requests a directory.
    pub fn index_page(&self) -> Option<&str> {
        self.index_page.as_deref()
    }

    /// The object served when a website visitor requests a missing object.
    pub fn not_found_page(&self) -> Option<&str> {
        self.not_found_page.as_deref()
    }

    pub fn metageneration(&self) -> Option<i64> {
        self.metageneration
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    pub fn create_time(&self) -> Option<DateTime<Utc>> {
        self.create_time
    }

    pub fn cors(&self) -> &[Cors] {
        &self.cors
    }

    pub fn acl(&self) -> &[Acl] {
        &self.acl
    }

    /// The ACL applied to new objects that do not provide their own.
    pub fn default_acl(&self) -> &[Acl] {
        &self.default_acl
    }
}

/// A builder for [Bucket].
#[derive(Clone, Debug)]
pub struct BucketBuilder {
    inner: Bucket,
}

impl BucketBuilder {
    pub fn with_name<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn with_id<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.id = Some(v.into());
        self
    }

    pub fn with_owner<T: Into<Entity>>(mut self, v: T) -> Self {
        self.inner.owner = Some(v.into());
        self
    }

    pub fn with_location<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.location = Some(v.into());
        self
    }

    pub fn with_storage_class<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.storage_class = Some(v.into());
        self
    }

    pub fn with_versioning_enabled(mut self, v: bool) -> Self {
        self.inner.versioning_enabled = Some(v);
        self
    }

    pub fn with_index_page<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.index_page = Some(v.into());
        self
    }

    pub fn with_not_found_page<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.not_found_page = Some(v.into());
        self
    }

    pub fn with_metageneration(mut self, v: i64) -> Self {
        self.inner.metageneration = Some(v);
        self
    }

    pub fn with_etag<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.etag = Some(v.into());
        self
    }

    pub fn with_create_time(mut self, v: DateTime<Utc>) -> Self {
        self.inner.create_time = Some(v);
        self
    }

    pub fn with_cors<I>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = Cors>,
    {
        self.inner.cors = v.into_iter().collect();
        self
    }

    pub fn with_acl<I>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = Acl>,
    {
        self.inner.acl = v.into_iter().collect();
        self
    }

    pub fn with_default_acl<I>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = Acl>,
    {
        self.inner.default_acl = v.into_iter().collect();
        self
    }

    /// Creates the bucket, the name cannot be empty, `.` or `..`.
    pub fn build(self) -> Result<Bucket> {
        check_bucket_name(&self.inner.name)?;
        Ok(self.inner)
    }
}
