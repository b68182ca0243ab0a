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

//! The storage service handle.
//!
//! A [StorageService] turns the model and option types into requests for the
//! [Cloud Storage JSON API]. The handle does not send the requests, the
//! transport configured by the application does.
//!
//! [Cloud Storage JSON API]: https://cloud.google.com/storage/docs/json_api

use crate::Result;
use crate::batch::BatchRequest;
use crate::blob::Blob;
use crate::bucket::Bucket;
use crate::cors::HttpMethod;
use crate::options::{
    BlobListOption, BlobSourceOption, BlobTargetOption, BucketListOption, BucketSourceOption,
    BucketTargetOption,
};
use crate::rpc::{RequestParameters, enc};
use crate::service_options::StorageServiceOptions;
use gax::error::Error;

/// The method and URL for one operation.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestTarget {
    method: HttpMethod,
    url: url::Url,
}

impl RequestTarget {
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

/// A handle to the storage service.
///
/// Implementations only need to provide [options()][StorageService::options].
/// The provided methods build the request URLs from those options. Test
/// doubles can override any of them.
pub trait StorageService: std::fmt::Debug + Send + Sync {
    /// The options used to create this handle.
    fn options(&self) -> &StorageServiceOptions;

    /// The URL for a bucket, with the given preconditions.
    fn bucket_url(&self, bucket: &str, options: &[BucketSourceOption]) -> Result<url::Url> {
        let mut params = RequestParameters::new();
        for o in options {
            let (k, v) = o.to_rpc();
            params.insert(k, v)?;
        }
        request_url(self.options(), &["b", bucket], &params)
    }

    /// The URL to update `bucket`, with the given options.
    fn update_bucket_url(
        &self,
        bucket: &Bucket,
        options: &[BucketTargetOption],
    ) -> Result<url::Url> {
        let mut params = RequestParameters::new();
        for o in options {
            let (k, v) = o.to_rpc(bucket)?;
            params.insert(k, v)?;
        }
        request_url(self.options(), &["b", bucket.name()], &params)
    }

    /// The URL to list the buckets in the configured project.
    fn list_buckets_url(&self, options: &[BucketListOption]) -> Result<url::Url> {
        let mut params = RequestParameters::new();
        for o in options {
            let (k, v) = o.to_rpc()?;
            params.insert(k, v)?;
        }
        let mut url = request_url(self.options(), &["b"], &RequestParameters::new())?;
        url.query_pairs_mut()
            .append_pair("project", self.options().project_id());
        params.apply(&mut url);
        Ok(url)
    }

    /// The URL for an object, with the given preconditions.
    fn blob_url(&self, blob: &Blob, options: &[BlobSourceOption]) -> Result<url::Url> {
        let mut params = RequestParameters::new();
        for o in options {
            let (k, v) = o.to_rpc();
            params.insert(k, v)?;
        }
        request_url(
            self.options(),
            &["b", blob.bucket(), "o", blob.name()],
            &params,
        )
    }

    /// The URL to update `blob`, with the given options.
    fn update_blob_url(&self, blob: &Blob, options: &[BlobTargetOption]) -> Result<url::Url> {
        let mut params = RequestParameters::new();
        for o in options {
            let (k, v) = o.to_rpc(blob)?;
            params.insert(k, v)?;
        }
        request_url(
            self.options(),
            &["b", blob.bucket(), "o", blob.name()],
            &params,
        )
    }

    /// The URL to list the objects in `bucket`.
    fn list_blobs_url(&self, bucket: &str, options: &[BlobListOption]) -> Result<url::Url> {
        let delimiter = self.options().path_delimiter();
        let mut params = RequestParameters::new();
        for o in options {
            if let Some((k, v)) = o.to_rpc(delimiter)? {
                params.insert(k, v)?;
            }
        }
        request_url(self.options(), &["b", bucket, "o"], &params)
    }

    /// The targets for each operation in `request`.
    ///
    /// The targets are in the same order as the results in a
    /// [BatchResponse][crate::batch::BatchResponse]: deletes, updates, then
    /// gets.
    fn batch_targets(&self, request: &BatchRequest) -> Result<Vec<RequestTarget>> {
        let deletes = request.to_delete().iter().map(|e| -> Result<RequestTarget> {
            Ok(RequestTarget {
                method: HttpMethod::Delete,
                url: self.blob_url(e.blob(), e.options())?,
            })
        });
        let updates = request.to_update().iter().map(|e| -> Result<RequestTarget> {
            Ok(RequestTarget {
                method: HttpMethod::Patch,
                url: self.update_blob_url(e.blob(), e.options())?,
            })
        });
        let gets = request.to_get().iter().map(|e| -> Result<RequestTarget> {
            Ok(RequestTarget {
                method: HttpMethod::Get,
                url: self.blob_url(e.blob(), e.options())?,
            })
        });
        let targets = deletes
            .chain(updates)
            .chain(gets)
            .collect::<Result<Vec<_>>>()?;
        if self.options().tracing_enabled() {
            tracing::debug!("batch request with {} operations", targets.len());
        }
        Ok(targets)
    }
}

fn request_url(
    options: &StorageServiceOptions,
    segments: &[&str],
    params: &RequestParameters,
) -> Result<url::Url> {
    if let Some(empty) = segments.iter().position(|s| s.is_empty()) {
        return Err(Error::invalid_argument(format!(
            "empty path segment at position {empty} in request URL"
        )));
    }
    if let Some(dots) = segments.iter().find(|s| **s == "." || **s == "..") {
        return Err(Error::invalid_argument(format!(
            "`{dots}` is not a valid path segment in a request URL"
        )));
    }
    let path = segments
        .iter()
        .map(|s| enc(s))
        .collect::<Vec<_>>()
        .join("/");
    let base = options.host().trim_end_matches('/');
    let mut url = url::Url::parse(&format!("{base}/storage/v1/{path}"))
        .map_err(Error::invalid_argument)?;
    params.apply(&mut url);
    if options.tracing_enabled() {
        tracing::debug!("request url={url}");
    }
    Ok(url)
}

/// The default [StorageService] implementation.
#[derive(Clone, Debug)]
pub struct Storage {
    options: StorageServiceOptions,
}

impl Storage {
    pub fn new(options: StorageServiceOptions) -> Self {
        if options.tracing_enabled() {
            tracing::debug!(
                "creating storage service for project={} host={}",
                options.project_id(),
                options.host()
            );
        }
        Self { options }
    }
}

impl StorageService for Storage {
    fn options(&self) -> &StorageServiceOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PredefinedAcl;
    use auth::credentials::AuthCredentials;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn test_service() -> anyhow::Result<Storage> {
        let options = StorageServiceOptions::builder()
            .with_project_id("p1")
            .with_auth_credentials(AuthCredentials::no_credentials())
            .build()?;
        Ok(Storage::new(options))
    }

    #[test_case("hello.txt", "hello.txt")]
    #[test_case("a/b/c.txt", "a%2Fb%2Fc.txt")]
    #[test_case("spaces and ?", "spaces%20and%20%3F")]
    fn blob_url(name: &str, want: &str) -> anyhow::Result<()> {
        let service = test_service()?;
        let url = service.blob_url(&Blob::of("bucket", name)?, &[])?;
        assert_eq!(
            url.as_str(),
            format!("https://www.googleapis.com/storage/v1/b/bucket/o/{want}")
        );
        Ok(())
    }

    #[test]
    fn blob_url_with_options() -> anyhow::Result<()> {
        let service = test_service()?;
        let url = service.blob_url(
            &Blob::of("bucket", "n")?,
            &[
                BlobSourceOption::metageneration_not_match(5),
                BlobSourceOption::generation_match(7),
            ],
        )?;
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/storage/v1/b/bucket/o/n?ifGenerationMatch=7&ifMetagenerationNotMatch=5"
        );

        let got = service.blob_url(
            &Blob::of("bucket", "n")?,
            &[
                BlobSourceOption::generation_match(1),
                BlobSourceOption::generation_match(2),
            ],
        );
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        Ok(())
    }

    #[test]
    fn update_blob_url() -> anyhow::Result<()> {
        let service = test_service()?;
        let blob = Blob::builder("bucket", "n").with_generation(42).build()?;
        let url = service.update_blob_url(
            &blob,
            &[
                BlobTargetOption::generation_match(),
                BlobTargetOption::predefined_acl(PredefinedAcl::Private),
            ],
        )?;
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/storage/v1/b/bucket/o/n?predefinedAcl=private&ifGenerationMatch=42"
        );

        let got = service.update_blob_url(
            &Blob::of("bucket", "n")?,
            &[BlobTargetOption::metageneration_match()],
        );
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        Ok(())
    }

    #[test]
    fn list_blobs_url() -> anyhow::Result<()> {
        let service = test_service()?;
        let url = service.list_blobs_url(
            "bucket",
            &[
                BlobListOption::recursive(false),
                BlobListOption::max_results(10),
                BlobListOption::prefix("logs/"),
            ],
        )?;
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/storage/v1/b/bucket/o?prefix=logs%2F&delimiter=%2F&maxResults=10"
        );

        let url = service.list_blobs_url("bucket", &[BlobListOption::recursive(true)])?;
        assert_eq!(url.as_str(), "https://www.googleapis.com/storage/v1/b/bucket/o");

        let got = service.list_blobs_url("bucket", &[BlobListOption::max_results(0)]);
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        let got = service.list_buckets_url(&[BucketListOption::max_results(-5)]);
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        Ok(())
    }

    #[test]
    fn list_blobs_custom_delimiter() -> anyhow::Result<()> {
        let options = test_service()?
            .options()
            .to_builder()
            .with_path_delimiter(":")
            .with_host("http://localhost:9000/")
            .build()?;
        let service = Storage::new(options);
        let url = service.list_blobs_url("bucket", &[BlobListOption::recursive(false)])?;
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/storage/v1/b/bucket/o?delimiter=%3A"
        );
        Ok(())
    }

    #[test]
    fn bucket_urls() -> anyhow::Result<()> {
        let service = test_service()?;
        let url = service.bucket_url("bucket", &[BucketSourceOption::metageneration_match(1)])?;
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/storage/v1/b/bucket?ifMetagenerationMatch=1"
        );

        let bucket = Bucket::builder("bucket").with_metageneration(4).build()?;
        let url = service.update_bucket_url(&bucket, &[BucketTargetOption::metageneration_not_match()])?;
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/storage/v1/b/bucket?ifMetagenerationNotMatch=4"
        );

        let url = service.list_buckets_url(&[
            BucketListOption::prefix("b"),
            BucketListOption::start_page_token("t"),
        ])?;
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/storage/v1/b?project=p1&prefix=b&pageToken=t"
        );
        Ok(())
    }

    #[test_case(""; "empty")]
    #[test_case("."; "dot")]
    #[test_case(".."; "dot dot")]
    fn invalid_segment(bucket: &str) -> anyhow::Result<()> {
        let service = test_service()?;
        let got = service.bucket_url(bucket, &[]);
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        let got = service.list_blobs_url(bucket, &[]);
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        Ok(())
    }

    #[test_case("."; "dot")]
    #[test_case(".."; "dot dot")]
    fn dot_object_names(name: &str) -> anyhow::Result<()> {
        let got = Blob::of("bucket", name);
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        let got = BatchRequest::builder().delete("bucket", name).build();
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");

        let service = test_service()?;
        let url = service.blob_url(&Blob::of("bucket", format!("{name}/x"))?, &[])?;
        assert_eq!(
            url.as_str(),
            format!("https://www.googleapis.com/storage/v1/b/bucket/o/{name}%2Fx")
        );
        Ok(())
    }

    #[test]
    fn batch_targets() -> anyhow::Result<()> {
        let service = test_service()?;
        let request = BatchRequest::builder()
            .get("b", "g")
            .delete("b", "d1")
            .update(Blob::of("b", "u")?, [])
            .delete_with_options("b", "d2", [BlobSourceOption::generation_match(3)])
            .build()?;
        let got = service
            .batch_targets(&request)?
            .into_iter()
            .map(|t| (t.method(), t.url().to_string()))
            .collect::<Vec<_>>();
        let base = "https://www.googleapis.com/storage/v1/b/b/o";
        assert_eq!(
            got,
            vec![
                (HttpMethod::Delete, format!("{base}/d1")),
                (HttpMethod::Delete, format!("{base}/d2?ifGenerationMatch=3")),
                (HttpMethod::Patch, format!("{base}/u")),
                (HttpMethod::Get, format!("{base}/g")),
            ]
        );
        Ok(())
    }

    #[derive(Debug)]
    struct FakeService(StorageServiceOptions);

    impl StorageService for FakeService {
        fn options(&self) -> &StorageServiceOptions {
            &self.0
        }

        fn bucket_url(&self, _bucket: &str, _options: &[BucketSourceOption]) -> Result<url::Url> {
            Err(Error::invalid_argument("fake"))
        }
    }

    #[test]
    fn override_provided() -> anyhow::Result<()> {
        let fake = FakeService(test_service()?.options().clone());
        assert!(fake.bucket_url("b", &[]).is_err());
        let url = fake.blob_url(&Blob::of("b", "n")?, &[])?;
        assert_eq!(url.as_str(), "https://www.googleapis.com/storage/v1/b/b/o/n");
        Ok(())
    }

    #[test]
    fn send_sync() {
        static_assertions::assert_impl_all!(Storage: Send, Sync, Clone);
    }
}
