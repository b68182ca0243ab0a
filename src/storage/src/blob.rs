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

//! Objects stored in Cloud Storage.

use crate::Result;
use crate::acl::{Acl, Entity};
use crate::names::{check_bucket_name, check_object_name};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// The metadata of an object, identified by its bucket and name.
///
/// A [Blob] is a handle to the object, it does not contain the object data.
/// All the fields other than the bucket and name are optional, the service
/// fills them in its responses.
///
/// # Example
/// ```
/// # use gcloud_storage::blob::Blob;
/// let blob = Blob::builder("my-bucket", "greetings/hello.txt")
///     .with_content_type("text/plain")
///     .with_metadata([("lang", "en")])
///     .build()?;
/// assert_eq!(blob.name(), "greetings/hello.txt");
/// assert_eq!(blob.content_type(), Some("text/plain"));
/// assert_eq!(blob.to_builder().build()?, blob);
/// # gcloud_storage::Result::<()>::Ok(())
/// ```
#[serde_with::serde_as]
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    #[serde(deserialize_with = "crate::names::bucket_name")]
    bucket: String,
    #[serde(deserialize_with = "crate::names::object_name")]
    name: String,
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    generation: Option<i64>,
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    metageneration: Option<i64>,
    content_type: Option<String>,
    content_encoding: Option<String>,
    content_disposition: Option<String>,
    content_language: Option<String>,
    cache_control: Option<String>,
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    size: Option<u64>,
    md5_hash: Option<String>,
    crc32c: Option<String>,
    etag: Option<String>,
    owner: Option<Entity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    acl: Vec<Acl>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
    update_time: Option<DateTime<Utc>>,
    delete_time: Option<DateTime<Utc>>,
}

impl Blob {
    /// Creates a blob with only the bucket and object name.
    pub fn of<B, N>(bucket: B, name: N) -> Result<Self>
    where
        B: Into<String>,
        N: Into<String>,
    {
        Self::builder(bucket, name).build()
    }

    pub fn builder<B, N>(bucket: B, name: N) -> BlobBuilder
    where
        B: Into<String>,
        N: Into<String>,
    {
        BlobBuilder {
            inner: Self {
                bucket: bucket.into(),
                name: name.into(),
                generation: None,
                metageneration: None,
                content_type: None,
                content_encoding: None,
                content_disposition: None,
                content_language: None,
                cache_control: None,
                size: None,
                md5_hash: None,
                crc32c: None,
                etag: None,
                owner: None,
                acl: Vec::new(),
                metadata: BTreeMap::new(),
                update_time: None,
                delete_time: None,
            },
        }
    }

    pub fn to_builder(&self) -> BlobBuilder {
        BlobBuilder {
            inner: self.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The object generation, changes each time the object data is replaced.
    pub fn generation(&self) -> Option<i64> {
        self.generation
    }

    /// The metadata generation, changes each time the metadata is updated.
    pub fn metageneration(&self) -> Option<i64> {
        self.metageneration
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    pub fn content_disposition(&self) -> Option<&str> {
        self.content_disposition.as_deref()
    }

    pub fn content_language(&self) -> Option<&str> {
        self.content_language.as_deref()
    }

    pub fn cache_control(&self) -> Option<&str> {
        self.cache_control.as_deref()
    }

    /// The object size in bytes.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// The base64 encoded MD5 hash of the object data.
    pub fn md5_hash(&self) -> Option<&str> {
        self.md5_hash.as_deref()
    }

    /// The base64 encoded CRC32C checksum of the object data.
    pub fn crc32c(&self) -> Option<&str> {
        self.crc32c.as_deref()
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    pub fn owner(&self) -> Option<&Entity> {
        self.owner.as_ref()
    }

    pub fn acl(&self) -> &[Acl] {
        &self.acl
    }

    /// User-provided metadata, in key/value pairs.
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn update_time(&self) -> Option<DateTime<Utc>> {
        self.update_time
    }

    pub fn delete_time(&self) -> Option<DateTime<Utc>> {
        self.delete_time
    }
}

/// A builder for [Blob].
#[derive(Clone, Debug)]
pub struct BlobBuilder {
    inner: Blob,
}

impl BlobBuilder {
    pub fn with_bucket<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.bucket = v.into();
        self
    }

    pub fn with_name<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn with_generation(mut self, v: i64) -> Self {
        self.inner.generation = Some(v);
        self
    }

    pub fn with_metageneration(mut self, v: i64) -> Self {
        self.inner.metageneration = Some(v);
        self
    }

    pub fn with_content_type<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.content_type = Some(v.into());
        self
    }

    pub fn with_content_encoding<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.content_encoding = Some(v.into());
        self
    }

    pub fn with_content_disposition<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.content_disposition = Some(v.into());
        self
    }

    pub fn with_content_language<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.content_language = Some(v.into());
        self
    }

    pub fn with_cache_control<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.cache_control = Some(v.into());
        self
    }

    pub fn with_size(mut self, v: u64) -> Self {
        self.inner.size = Some(v);
        self
    }

    pub fn with_md5_hash<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.md5_hash = Some(v.into());
        self
    }

    pub fn with_crc32c<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.crc32c = Some(v.into());
        self
    }

    pub fn with_etag<T: Into<String>>(mut self, v: T) -> Self {
        self.inner.etag = Some(v.into());
        self
    }

    pub fn with_owner<T: Into<Entity>>(mut self, v: T) -> Self {
        self.inner.owner = Some(v.into());
        self
    }

    pub fn with_acl<I>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = Acl>,
    {
        self.inner.acl = v.into_iter().collect();
        self
    }

    /// Replaces the user-provided metadata.
    pub fn with_metadata<I, K, V>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.metadata = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn with_update_time(mut self, v: DateTime<Utc>) -> Self {
        self.inner.update_time = Some(v);
        self
    }

    pub fn with_delete_time(mut self, v: DateTime<Utc>) -> Self {
        self.inner.delete_time = Some(v);
        self
    }

    /// Creates the blob.
    ///
    /// The bucket and object names cannot be empty, `.` or `..`.
    pub fn build(self) -> Result<Blob> {
        check_bucket_name(&self.inner.bucket)?;
        check_object_name(&self.inner.name)?;
        Ok(self.inner)
    }
}
