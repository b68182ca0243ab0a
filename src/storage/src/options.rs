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

//! Per-call options.
//!
//! Each call accepts a slice of options of the type matching the call: list
//! calls take [BlobListOption] or [BucketListOption], read calls take
//! [BlobSourceOption] or [BucketSourceOption], and write calls take
//! [BlobTargetOption] or [BucketTargetOption].
//!
//! Each option is created with a named constructor. Two options are equal
//! if they are the same kind and carry the same value.
//!
//! # Example
//! ```
//! # use gcloud_storage::options::{BlobListOption, BucketListOption};
//! let max = BlobListOption::max_results(100);
//! assert_eq!(max, BlobListOption::max_results(100));
//! assert_ne!(max, BlobListOption::max_results(10));
//! assert_ne!(BlobListOption::prefix("bla"), BlobListOption::start_page_token("bla"));
//! ```
//!
//! The precondition options on [BlobTargetOption] and [BucketTargetOption]
//! carry no value: they take the generation or metageneration from the
//! object or bucket being written.

use crate::Result;
use crate::blob::Blob;
use crate::bucket::Bucket;
use crate::rpc::{OptionValue, RpcOption};
use gax::error::Error;

/// A [predefined ACL] applied to an object or bucket when it is written.
///
/// [predefined ACL]: https://cloud.google.com/storage/docs/access-control/lists#predefined-acl
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PredefinedAcl {
    AuthenticatedRead,
    BucketOwnerFullControl,
    BucketOwnerRead,
    Private,
    ProjectPrivate,
    PublicRead,
    PublicReadWrite,
}

impl PredefinedAcl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticatedRead => "authenticatedRead",
            Self::BucketOwnerFullControl => "bucketOwnerFullControl",
            Self::BucketOwnerRead => "bucketOwnerRead",
            Self::Private => "private",
            Self::ProjectPrivate => "projectPrivate",
            Self::PublicRead => "publicRead",
            Self::PublicReadWrite => "publicReadWrite",
        }
    }
}

/// Options for listing objects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[non_exhaustive]
pub enum BlobListOption {
    MaxResults(i64),
    StartPageToken(String),
    Prefix(String),
    Recursive(bool),
}

impl BlobListOption {
    /// The maximum number of objects returned in a page.
    pub fn max_results(v: i64) -> Self {
        Self::MaxResults(v)
    }

    /// Continue a listing from the given page token.
    pub fn start_page_token<T: Into<String>>(v: T) -> Self {
        Self::StartPageToken(v.into())
    }

    /// Only list objects whose names start with the given prefix.
    pub fn prefix<T: Into<String>>(v: T) -> Self {
        Self::Prefix(v.into())
    }

    /// If false, objects in nested "directories" are not listed.
    ///
    /// A non-recursive listing uses the service
    /// [path delimiter][crate::service_options::StorageServiceOptions::path_delimiter].
    pub fn recursive(v: bool) -> Self {
        Self::Recursive(v)
    }

    /// The wire representation, `None` if the option sends nothing.
    ///
    /// Fails if the maximum number of results is not positive.
    pub fn to_rpc(&self, path_delimiter: &str) -> Result<Option<(RpcOption, OptionValue)>> {
        let pair = match self {
            Self::MaxResults(v) => Some((RpcOption::MaxResults, page_size(*v)?)),
            Self::StartPageToken(v) => Some((RpcOption::PageToken, v.as_str().into())),
            Self::Prefix(v) => Some((RpcOption::Prefix, v.as_str().into())),
            Self::Recursive(true) => None,
            Self::Recursive(false) => Some((RpcOption::Delimiter, path_delimiter.into())),
        };
        Ok(pair)
    }
}

/// Preconditions for reading (or deleting) an object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[non_exhaustive]
pub enum BlobSourceOption {
    GenerationMatch(i64),
    GenerationNotMatch(i64),
    MetagenerationMatch(i64),
    MetagenerationNotMatch(i64),
}

impl BlobSourceOption {
    pub fn generation_match(v: i64) -> Self {
        Self::GenerationMatch(v)
    }

    pub fn generation_not_match(v: i64) -> Self {
        Self::GenerationNotMatch(v)
    }

    pub fn metageneration_match(v: i64) -> Self {
        Self::MetagenerationMatch(v)
    }

    pub fn metageneration_not_match(v: i64) -> Self {
        Self::MetagenerationNotMatch(v)
    }

    pub fn to_rpc(&self) -> (RpcOption, OptionValue) {
        match self {
            Self::GenerationMatch(v) => (RpcOption::IfGenerationMatch, (*v).into()),
            Self::GenerationNotMatch(v) => (RpcOption::IfGenerationNotMatch, (*v).into()),
            Self::MetagenerationMatch(v) => (RpcOption::IfMetagenerationMatch, (*v).into()),
            Self::MetagenerationNotMatch(v) => (RpcOption::IfMetagenerationNotMatch, (*v).into()),
        }
    }
}

/// Options for writing an object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[non_exhaustive]
pub enum BlobTargetOption {
    PredefinedAcl(PredefinedAcl),
    DoesNotExist,
    GenerationMatch,
    GenerationNotMatch,
    MetagenerationMatch,
    MetagenerationNotMatch,
}

impl BlobTargetOption {
    pub fn predefined_acl(v: PredefinedAcl) -> Self {
        Self::PredefinedAcl(v)
    }

    /// The write succeeds only if the object does not exist.
    pub fn does_not_exist() -> Self {
        Self::DoesNotExist
    }

    /// The write succeeds only if the object generation matches the
    /// generation of the [Blob] being written.
    pub fn generation_match() -> Self {
        Self::GenerationMatch
    }

    pub fn generation_not_match() -> Self {
        Self::GenerationNotMatch
    }

    pub fn metageneration_match() -> Self {
        Self::MetagenerationMatch
    }

    pub fn metageneration_not_match() -> Self {
        Self::MetagenerationNotMatch
    }

    /// The wire representation, using the generations of `blob`.
    ///
    /// Fails if the option needs a generation (or metageneration) and `blob`
    /// does not have one.
    pub fn to_rpc(&self, blob: &Blob) -> Result<(RpcOption, OptionValue)> {
        let generation = || required(blob.generation(), "generation", blob.name());
        let metageneration = || required(blob.metageneration(), "metageneration", blob.name());
        let pair: (RpcOption, OptionValue) = match self {
            Self::PredefinedAcl(v) => (RpcOption::PredefinedAcl, v.as_str().into()),
            Self::DoesNotExist => (RpcOption::IfGenerationMatch, 0_i64.into()),
            Self::GenerationMatch => (RpcOption::IfGenerationMatch, generation()?.into()),
            Self::GenerationNotMatch => (RpcOption::IfGenerationNotMatch, generation()?.into()),
            Self::MetagenerationMatch => {
                (RpcOption::IfMetagenerationMatch, metageneration()?.into())
            }
            Self::MetagenerationNotMatch => {
                (RpcOption::IfMetagenerationNotMatch, metageneration()?.into())
            }
        };
        Ok(pair)
    }
}

/// Options for listing buckets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[non_exhaustive]
pub enum BucketListOption {
    MaxResults(i64),
    StartPageToken(String),
    Prefix(String),
}

impl BucketListOption {
    pub fn max_results(v: i64) -> Self {
        Self::MaxResults(v)
    }

    pub fn start_page_token<T: Into<String>>(v: T) -> Self {
        Self::StartPageToken(v.into())
    }

    pub fn prefix<T: Into<String>>(v: T) -> Self {
        Self::Prefix(v.into())
    }

    /// Fails if the maximum number of results is not positive.
    pub fn to_rpc(&self) -> Result<(RpcOption, OptionValue)> {
        let pair = match self {
            Self::MaxResults(v) => (RpcOption::MaxResults, page_size(*v)?),
            Self::StartPageToken(v) => (RpcOption::PageToken, v.as_str().into()),
            Self::Prefix(v) => (RpcOption::Prefix, v.as_str().into()),
        };
        Ok(pair)
    }
}

/// Preconditions for reading (or deleting) a bucket.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[non_exhaustive]
pub enum BucketSourceOption {
    MetagenerationMatch(i64),
    MetagenerationNotMatch(i64),
}

impl BucketSourceOption {
    pub fn metageneration_match(v: i64) -> Self {
        Self::MetagenerationMatch(v)
    }

    pub fn metageneration_not_match(v: i64) -> Self {
        Self::MetagenerationNotMatch(v)
    }

    pub fn to_rpc(&self) -> (RpcOption, OptionValue) {
        match self {
            Self::MetagenerationMatch(v) => (RpcOption::IfMetagenerationMatch, (*v).into()),
            Self::MetagenerationNotMatch(v) => (RpcOption::IfMetagenerationNotMatch, (*v).into()),
        }
    }
}

/// Options for writing a bucket.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[non_exhaustive]
pub enum BucketTargetOption {
    PredefinedAcl(PredefinedAcl),
    MetagenerationMatch,
    MetagenerationNotMatch,
}

impl BucketTargetOption {
    pub fn predefined_acl(v: PredefinedAcl) -> Self {
        Self::PredefinedAcl(v)
    }

    pub fn metageneration_match() -> Self {
        Self::MetagenerationMatch
    }

    pub fn metageneration_not_match() -> Self {
        Self::MetagenerationNotMatch
    }

    /// The wire representation, using the metageneration of `bucket`.
    pub fn to_rpc(&self, bucket: &Bucket) -> Result<(RpcOption, OptionValue)> {
        let metageneration = || required(bucket.metageneration(), "metageneration", bucket.name());
        let pair: (RpcOption, OptionValue) = match self {
            Self::PredefinedAcl(v) => (RpcOption::PredefinedAcl, v.as_str().into()),
            Self::MetagenerationMatch => {
                (RpcOption::IfMetagenerationMatch, metageneration()?.into())
            }
            Self::MetagenerationNotMatch => {
                (RpcOption::IfMetagenerationNotMatch, metageneration()?.into())
            }
        };
        Ok(pair)
    }
}

fn required(value: Option<i64>, field: &str, resource: &str) -> Result<i64> {
    value.ok_or_else(|| {
        Error::invalid_argument(format!(
            "the precondition requires a {field} but {resource} does not have one"
        ))
    })
}

fn page_size(v: i64) -> Result<OptionValue> {
    if v <= 0 {
        return Err(Error::invalid_argument(format!(
            "the maximum number of results must be positive, got {v}"
        )));
    }
    Ok(v.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn discriminant() {
        let max = BlobListOption::max_results(100);
        assert!(matches!(max, BlobListOption::MaxResults(100)), "{max:?}");
        assert_ne!(BlobListOption::prefix("bla"), BlobListOption::start_page_token("bla"));
        assert_ne!(
            BlobSourceOption::generation_match(1),
            BlobSourceOption::metageneration_match(1)
        );
        assert_ne!(
            BucketTargetOption::metageneration_match(),
            BucketTargetOption::metageneration_not_match()
        );
        assert_eq!(
            BucketListOption::prefix("bla"),
            BucketListOption::Prefix("bla".to_string())
        );
    }

    #[test_case(BlobListOption::max_results(100), Some((RpcOption::MaxResults, OptionValue::Integer(100))))]
    #[test_case(BlobListOption::prefix("logs/"), Some((RpcOption::Prefix, OptionValue::from("logs/"))))]
    #[test_case(BlobListOption::start_page_token("t"), Some((RpcOption::PageToken, OptionValue::from("t"))))]
    #[test_case(BlobListOption::recursive(false), Some((RpcOption::Delimiter, OptionValue::from(":"))))]
    #[test_case(BlobListOption::recursive(true), None)]
    fn blob_list(
        option: BlobListOption,
        want: Option<(RpcOption, OptionValue)>,
    ) -> anyhow::Result<()> {
        assert_eq!(option.to_rpc(":")?, want);
        Ok(())
    }

    #[test_case(0)]
    #[test_case(-1)]
    #[test_case(i64::MIN)]
    fn invalid_max_results(v: i64) {
        let got = BlobListOption::max_results(v).to_rpc("/");
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        let got = BucketListOption::max_results(v).to_rpc();
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
    }

    #[test_case(BlobSourceOption::generation_match(1), RpcOption::IfGenerationMatch)]
    #[test_case(BlobSourceOption::generation_not_match(1), RpcOption::IfGenerationNotMatch)]
    #[test_case(BlobSourceOption::metageneration_match(1), RpcOption::IfMetagenerationMatch)]
    #[test_case(BlobSourceOption::metageneration_not_match(1), RpcOption::IfMetagenerationNotMatch)]
    fn blob_source(option: BlobSourceOption, want: RpcOption) {
        assert_eq!(option.to_rpc(), (want, OptionValue::Integer(1)));
    }

    #[test_case(BlobTargetOption::generation_match(), RpcOption::IfGenerationMatch, 7)]
    #[test_case(BlobTargetOption::generation_not_match(), RpcOption::IfGenerationNotMatch, 7)]
    #[test_case(BlobTargetOption::metageneration_match(), RpcOption::IfMetagenerationMatch, 3)]
    #[test_case(BlobTargetOption::metageneration_not_match(), RpcOption::IfMetagenerationNotMatch, 3)]
    #[test_case(BlobTargetOption::does_not_exist(), RpcOption::IfGenerationMatch, 0)]
    fn blob_target(option: BlobTargetOption, want: RpcOption, value: i64) -> anyhow::Result<()> {
        let blob = Blob::builder("b", "n")
            .with_generation(7)
            .with_metageneration(3)
            .build()?;
        assert_eq!(option.to_rpc(&blob)?, (want, OptionValue::Integer(value)));
        Ok(())
    }

    #[test_case(BlobTargetOption::generation_match())]
    #[test_case(BlobTargetOption::generation_not_match())]
    #[test_case(BlobTargetOption::metageneration_match())]
    #[test_case(BlobTargetOption::metageneration_not_match())]
    fn blob_target_missing_generation(option: BlobTargetOption) -> anyhow::Result<()> {
        let blob = Blob::of("b", "n")?;
        let got = option.to_rpc(&blob);
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        Ok(())
    }

    #[test]
    fn blob_target_no_generation_needed() -> anyhow::Result<()> {
        let blob = Blob::of("b", "n")?;
        assert_eq!(
            BlobTargetOption::does_not_exist().to_rpc(&blob)?,
            (RpcOption::IfGenerationMatch, OptionValue::Integer(0))
        );
        assert_eq!(
            BlobTargetOption::predefined_acl(PredefinedAcl::PublicRead).to_rpc(&blob)?,
            (RpcOption::PredefinedAcl, OptionValue::from("publicRead"))
        );
        Ok(())
    }

    #[test]
    fn bucket_options() -> anyhow::Result<()> {
        assert_eq!(
            BucketListOption::max_results(5).to_rpc()?,
            (RpcOption::MaxResults, OptionValue::Integer(5))
        );
        assert_eq!(
            BucketSourceOption::metageneration_not_match(2).to_rpc(),
            (RpcOption::IfMetagenerationNotMatch, OptionValue::Integer(2))
        );

        let bucket = Bucket::builder("b").with_metageneration(9).build()?;
        assert_eq!(
            BucketTargetOption::metageneration_match().to_rpc(&bucket)?,
            (RpcOption::IfMetagenerationMatch, OptionValue::Integer(9))
        );
        let got = BucketTargetOption::metageneration_not_match().to_rpc(&Bucket::of("b")?);
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let json = serde_json::to_value(BlobListOption::max_results(100))?;
        assert_eq!(json, serde_json::json!({"kind": "maxResults", "value": 100}));
        let json = serde_json::to_value(BlobTargetOption::generation_match())?;
        assert_eq!(json, serde_json::json!({"kind": "generationMatch"}));
        let copy = serde_json::from_value::<BlobTargetOption>(json)?;
        assert_eq!(copy, BlobTargetOption::generation_match());
        let json = serde_json::to_value(BucketTargetOption::predefined_acl(PredefinedAcl::Private))?;
        assert_eq!(json, serde_json::json!({"kind": "predefinedAcl", "value": "private"}));
        Ok(())
    }
}
