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

//! Google Cloud Client Libraries for Rust - Storage
//!
//! This crate contains the model and configuration types to interact with
//! [Google Cloud Storage]. Most applications start with:
//!
//! * [StorageServiceOptions][service_options::StorageServiceOptions] to
//!   configure the service.
//! * [factory::instance()] to obtain a
//!   [StorageService][service::StorageService] handle.
//! * The types in [blob], [bucket], [acl] and [cors] to describe the
//!   resources.
//! * The types in [options] to configure each call.
//!
//! All the types are immutable values with structural equality. They can be
//! persisted and restored with [gax::serialization].
//!
//! ```
//! # use gcloud_storage::service_options::StorageServiceOptions;
//! # use gcloud_storage::blob::Blob;
//! # use gcloud_storage::options::BlobSourceOption;
//! use auth::credentials::AuthCredentials;
//! let options = StorageServiceOptions::builder()
//!     .with_project_id("my-project")
//!     .with_auth_credentials(AuthCredentials::application_default())
//!     .build()?;
//! let service = gcloud_storage::factory::instance().get(options);
//! let blob = Blob::of("my-bucket", "path/to/object")?;
//! let url = service.blob_url(&blob, &[BlobSourceOption::generation_match(42)])?;
//! assert_eq!(
//!     url.as_str(),
//!     "https://www.googleapis.com/storage/v1/b/my-bucket/o/path%2Fto%2Fobject?ifGenerationMatch=42"
//! );
//! # gcloud_storage::Result::<()>::Ok(())
//! ```
//!
//! [Google Cloud Storage]: https://cloud.google.com/storage

pub use gax::Result;
pub use gax::error::Error;

pub mod acl;
pub mod batch;
pub mod blob;
pub mod bucket;
pub mod cors;
pub mod factory;
pub mod list_result;
mod names;
pub mod options;
pub mod rpc;
pub mod service;
pub mod service_options;
