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

//! Batch requests and their responses.
//!
//! A [BatchRequest] groups several deletes, updates and gets. The
//! [BatchResponse] has one result per operation, in the same order the
//! operations were added to the request.
//!
//! # Example
//! ```
//! # use gcloud_storage::batch::{BatchRequest, BatchResponse, BatchResult};
//! let request = BatchRequest::builder()
//!     .delete("my-bucket", "a.txt")
//!     .delete("my-bucket", "b.txt")
//!     .build()?;
//! assert_eq!(request.to_delete()[1].blob().name(), "b.txt");
//!
//! let response = BatchResponse::new(
//!     vec![BatchResult::success(true), BatchResult::success(false)],
//!     Vec::new(),
//!     Vec::new(),
//! );
//! response.check_against(&request)?;
//! # gcloud_storage::Result::<()>::Ok(())
//! ```

use crate::Result;
use crate::blob::Blob;
use crate::options::{BlobSourceOption, BlobTargetOption};
use gax::error::Error;

/// One operation in a [BatchRequest]: the target object and its options.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry<O> {
    blob: Blob,
    options: Vec<O>,
}

impl<O> BatchEntry<O> {
    pub fn blob(&self) -> &Blob {
        &self.blob
    }

    pub fn options(&self) -> &[O] {
        &self.options
    }
}

/// A group of operations sent as a single request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    to_delete: Vec<BatchEntry<BlobSourceOption>>,
    to_update: Vec<BatchEntry<BlobTargetOption>>,
    to_get: Vec<BatchEntry<BlobSourceOption>>,
}

impl BatchRequest {
    pub fn builder() -> BatchRequestBuilder {
        BatchRequestBuilder::default()
    }

    pub fn to_delete(&self) -> &[BatchEntry<BlobSourceOption>] {
        &self.to_delete
    }

    pub fn to_update(&self) -> &[BatchEntry<BlobTargetOption>] {
        &self.to_update
    }

    pub fn to_get(&self) -> &[BatchEntry<BlobSourceOption>] {
        &self.to_get
    }

    /// The total number of operations.
    pub fn len(&self) -> usize {
        self.to_delete.len() + self.to_update.len() + self.to_get.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug)]
struct PendingEntry<O> {
    bucket: String,
    name: String,
    options: Vec<O>,
}

impl<O> PendingEntry<O> {
    fn build(self) -> Result<BatchEntry<O>> {
        Ok(BatchEntry {
            blob: Blob::of(self.bucket, self.name)?,
            options: self.options,
        })
    }
}

/// A builder for [BatchRequest].
///
/// The operations keep the order in which they are added. Invalid object
/// names are reported by [build()][BatchRequestBuilder::build].
#[derive(Clone, Debug, Default)]
pub struct BatchRequestBuilder {
    to_delete: Vec<PendingEntry<BlobSourceOption>>,
    to_update: Vec<BatchEntry<BlobTargetOption>>,
    to_get: Vec<PendingEntry<BlobSourceOption>>,
}

impl BatchRequestBuilder {
    /// Deletes an object.
    pub fn delete<B, N>(self, bucket: B, name: N) -> Self
    where
        B: Into<String>,
        N: Into<String>,
    {
        self.delete_with_options(bucket, name, [])
    }

    /// Deletes an object if the preconditions are met.
    pub fn delete_with_options<B, N, I>(mut self, bucket: B, name: N, options: I) -> Self
    where
        B: Into<String>,
        N: Into<String>,
        I: IntoIterator<Item = BlobSourceOption>,
    {
        self.to_delete.push(PendingEntry {
            bucket: bucket.into(),
            name: name.into(),
            options: options.into_iter().collect(),
        });
        self
    }

    /// Updates the metadata of an object.
    pub fn update<I>(mut self, blob: Blob, options: I) -> Self
    where
        I: IntoIterator<Item = BlobTargetOption>,
    {
        self.to_update.push(BatchEntry {
            blob,
            options: options.into_iter().collect(),
        });
        self
    }

    /// Gets the metadata of an object.
    pub fn get<B, N>(self, bucket: B, name: N) -> Self
    where
        B: Into<String>,
        N: Into<String>,
    {
        self.get_with_options(bucket, name, [])
    }

    /// Gets the metadata of an object if the preconditions are met.
    pub fn get_with_options<B, N, I>(mut self, bucket: B, name: N, options: I) -> Self
    where
        B: Into<String>,
        N: Into<String>,
        I: IntoIterator<Item = BlobSourceOption>,
    {
        self.to_get.push(PendingEntry {
            bucket: bucket.into(),
            name: name.into(),
            options: options.into_iter().collect(),
        });
        self
    }

    pub fn build(self) -> Result<BatchRequest> {
        Ok(BatchRequest {
            to_delete: self
                .to_delete
                .into_iter()
                .map(PendingEntry::build)
                .collect::<Result<Vec<_>>>()?,
            to_update: self.to_update,
            to_get: self
                .to_get
                .into_iter()
                .map(PendingEntry::build)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

/// Describes why one operation in a batch failed.
#[derive(
    thiserror::Error, Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "camelCase")]
#[error("batch operation failed with code {code}: {message}")]
pub struct BatchFailure {
    code: u16,
    message: String,
    retryable: bool,
}

impl BatchFailure {
    pub fn new<T: Into<String>>(code: u16, message: T, retryable: bool) -> Self {
        Self {
            code,
            message: message.into(),
            retryable,
        }
    }

    /// The HTTP status code for the operation.
    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn retryable(&self) -> bool {
        self.retryable
    }
}

/// The result of one operation in a batch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchResult<T> {
    Success(T),
    Failure(BatchFailure),
}

impl<T> BatchResult<T> {
    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    pub fn failure(failure: BatchFailure) -> Self {
        Self::Failure(failure)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn failed(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The value, if the operation succeeded.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    /// The failure details, if the operation failed.
    pub fn error(&self) -> Option<&BatchFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(f),
        }
    }

    pub fn into_result(self) -> std::result::Result<T, BatchFailure> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(f) => Err(f),
        }
    }
}

/// The results of a [BatchRequest].
///
/// For deletes the value reports whether the object was deleted. For
/// updates and gets the value is the object metadata.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    delete_results: Vec<BatchResult<bool>>,
    update_results: Vec<BatchResult<Blob>>,
    get_results: Vec<BatchResult<Blob>>,
}

impl BatchResponse {
    pub fn new(
        delete_results: Vec<BatchResult<bool>>,
        update_results: Vec<BatchResult<Blob>>,
        get_results: Vec<BatchResult<Blob>>,
    ) -> Self {
        Self {
            delete_results,
            update_results,
            get_results,
        }
    }

    pub fn deletes(&self) -> &[BatchResult<bool>] {
        &self.delete_results
    }

    pub fn updates(&self) -> &[BatchResult<Blob>] {
        &self.update_results
    }

    pub fn gets(&self) -> &[BatchResult<Blob>] {
        &self.get_results
    }

    /// Verifies this response has one result for each operation in `request`.
    pub fn check_against(&self, request: &BatchRequest) -> Result<()> {
        let counts = [
            ("delete", self.delete_results.len(), request.to_delete.len()),
            ("update", self.update_results.len(), request.to_update.len()),
            ("get", self.get_results.len(), request.to_get.len()),
        ];
        for (kind, got, want) in counts {
            if got != want {
                tracing::warn!("batch response has {got} {kind} results, the request has {want}");
                return Err(Error::invalid_argument(format!(
                    "mismatched {kind} results, expected {want}, got {got}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_order() -> anyhow::Result<()> {
        let request = BatchRequest::builder()
            .delete("b", "n1")
            .get("b", "g1")
            .delete_with_options("b", "n2", [BlobSourceOption::generation_match(3)])
            .update(
                Blob::builder("b", "u1").with_generation(1).build()?,
                [BlobTargetOption::generation_match()],
            )
            .get_with_options("b", "g2", [BlobSourceOption::metageneration_match(2)])
            .build()?;
        let names = |entries: &[BatchEntry<BlobSourceOption>]| {
            entries
                .iter()
                .map(|e| e.blob().name().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(request.to_delete()), vec!["n1", "n2"]);
        assert_eq!(names(request.to_get()), vec!["g1", "g2"]);
        assert_eq!(request.to_update()[0].blob().name(), "u1");
        assert_eq!(
            request.to_delete()[1].options(),
            &[BlobSourceOption::generation_match(3)]
        );
        assert!(request.to_delete()[0].options().is_empty());
        assert_eq!(request.len(), 5);
        assert!(!request.is_empty());
        Ok(())
    }

    #[test]
    fn builder_invalid() {
        let got = BatchRequest::builder().delete("b", "n").delete("", "n").build();
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        let got = BatchRequest::builder().get("b", "").build();
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
    }

    #[test]
    fn empty() -> anyhow::Result<()> {
        let request = BatchRequest::builder().build()?;
        assert!(request.is_empty());
        BatchResponse::new(Vec::new(), Vec::new(), Vec::new()).check_against(&request)?;
        Ok(())
    }

    #[test]
    fn result() {
        let ok = BatchResult::success(true);
        assert!(ok.is_success());
        assert!(!ok.failed());
        assert_eq!(ok.get(), Some(&true));
        assert_eq!(ok.error(), None);
        assert_eq!(ok.into_result(), Ok(true));

        let failure = BatchFailure::new(404, "not found", false);
        let err = BatchResult::<bool>::failure(failure.clone());
        assert!(err.failed());
        assert_eq!(err.get(), None);
        assert_eq!(err.error().map(BatchFailure::code), Some(404));
        assert_eq!(err.error().map(BatchFailure::retryable), Some(false));
        assert_eq!(err.clone().into_result(), Err(failure));
        let msg = err.error().map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("404"), "{msg}");
        assert!(msg.contains("not found"), "{msg}");
    }

    #[test]
    fn check_against() -> anyhow::Result<()> {
        let request = BatchRequest::builder()
            .delete("b", "n1")
            .delete("b", "n2")
            .build()?;
        let response = BatchResponse::new(
            vec![
                BatchResult::success(true),
                BatchResult::failure(BatchFailure::new(412, "precondition failed", false)),
            ],
            Vec::new(),
            Vec::new(),
        );
        response.check_against(&request)?;
        assert!(response.deletes()[0].is_success());
        assert!(response.deletes()[1].failed());
        assert!(response.updates().is_empty());
        assert!(response.gets().is_empty());

        let short = BatchResponse::new(vec![BatchResult::success(true)], Vec::new(), Vec::new());
        let got = short.check_against(&request);
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let response = BatchResponse::new(
            vec![BatchResult::success(true)],
            vec![BatchResult::failure(BatchFailure::new(500, "internal", true))],
            vec![BatchResult::success(Blob::of("b", "n")?)],
        );
        let json = serde_json::to_value(&response)?;
        assert_eq!(json["deleteResults"], serde_json::json!([{"success": true}]));
        assert_eq!(
            json["updateResults"],
            serde_json::json!([{"failure": {"code": 500, "message": "internal", "retryable": true}}])
        );
        let copy = serde_json::from_value::<BatchResponse>(json)?;
        assert_eq!(copy, response);
        Ok(())
    }
}
