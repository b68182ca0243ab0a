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

//! Configuration for the storage service.

use crate::Result;
use auth::credentials::AuthCredentials;
use gax::error::Error;
use gax::options::{ServiceOptions, ServiceOptionsBuilder};
use gax::retry_params::RetryParams;

const DEFAULT_PATH_DELIMITER: &str = "/";

/// The configuration for a [StorageService][crate::service::StorageService].
///
/// Adds the path delimiter, used in non-recursive listings, to the options
/// shared by all services.
///
/// # Example
/// ```
/// # use gcloud_storage::service_options::StorageServiceOptions;
/// use auth::credentials::AuthCredentials;
/// let options = StorageServiceOptions::builder()
///     .with_project_id("p1")
///     .with_auth_credentials(AuthCredentials::app_engine())
///     .build()?;
/// assert_eq!(options.path_delimiter(), "/");
///
/// let updated = options.to_builder().with_project_id("p2").build()?;
/// assert_eq!(updated.project_id(), "p2");
/// assert_eq!(updated.auth_credentials(), options.auth_credentials());
/// # gcloud_storage::Result::<()>::Ok(())
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageServiceOptions {
    service: ServiceOptions,
    path_delimiter: String,
}

impl StorageServiceOptions {
    pub fn builder() -> StorageServiceOptionsBuilder {
        StorageServiceOptionsBuilder::default()
    }

    pub fn to_builder(&self) -> StorageServiceOptionsBuilder {
        StorageServiceOptionsBuilder {
            service: self.service.to_builder(),
            path_delimiter: Some(self.path_delimiter.clone()),
        }
    }

    pub fn project_id(&self) -> &str {
        self.service.project_id()
    }

    pub fn auth_credentials(&self) -> &AuthCredentials {
        self.service.auth_credentials()
    }

    pub fn retry_params(&self) -> &RetryParams {
        self.service.retry_params()
    }

    pub fn host(&self) -> &str {
        self.service.host()
    }

    /// The separator between "directories" in object names.
    pub fn path_delimiter(&self) -> &str {
        &self.path_delimiter
    }

    pub fn tracing_enabled(&self) -> bool {
        self.service.tracing_enabled()
    }

    /// The options shared with other services.
    pub fn service_options(&self) -> &ServiceOptions {
        &self.service
    }
}

/// A builder for [StorageServiceOptions].
///
/// The builder is consumed by [build()][StorageServiceOptionsBuilder::build].
#[derive(Clone, Debug, Default)]
pub struct StorageServiceOptionsBuilder {
    service: ServiceOptionsBuilder,
    path_delimiter: Option<String>,
}

impl StorageServiceOptionsBuilder {
    /// Sets the project id.
    ///
    /// Defaults to the value of the `GOOGLE_CLOUD_PROJECT` environment
    /// variable.
    pub fn with_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.service = self.service.with_project_id(v);
        self
    }

    pub fn with_auth_credentials(mut self, v: AuthCredentials) -> Self {
        self.service = self.service.with_auth_credentials(v);
        self
    }

    pub fn with_retry_params(mut self, v: RetryParams) -> Self {
        self.service = self.service.with_retry_params(v);
        self
    }

    /// Sets the service endpoint, useful with emulators.
    pub fn with_host<T: Into<String>>(mut self, v: T) -> Self {
        self.service = self.service.with_host(v);
        self
    }

    pub fn with_tracing(mut self, v: bool) -> Self {
        self.service = self.service.with_tracing(v);
        self
    }

    /// Sets the path delimiter, defaults to `/`.
    pub fn with_path_delimiter<T: Into<String>>(mut self, v: T) -> Self {
        self.path_delimiter = Some(v.into());
        self
    }

    /// Creates the options.
    ///
    /// Fails if the project id or the credentials are missing, or the path
    /// delimiter is empty.
    pub fn build(self) -> Result<StorageServiceOptions> {
        let path_delimiter = self
            .path_delimiter
            .unwrap_or_else(|| DEFAULT_PATH_DELIMITER.to_string());
        if path_delimiter.is_empty() {
            return Err(Error::invalid_argument("the path delimiter cannot be empty"));
        }
        Ok(StorageServiceOptions {
            service: self.service.build()?,
            path_delimiter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scoped_env::ScopedEnv;

    fn test_options() -> Result<StorageServiceOptions> {
        StorageServiceOptions::builder()
            .with_project_id("p1")
            .with_auth_credentials(AuthCredentials::app_engine())
            .build()
    }

    #[test]
    fn defaults() -> anyhow::Result<()> {
        let options = test_options()?;
        assert_eq!(options.project_id(), "p1");
        assert_eq!(options.auth_credentials(), &AuthCredentials::app_engine());
        assert_eq!(options.retry_params(), &RetryParams::default_instance());
        assert_eq!(options.host(), gax::options::DEFAULT_HOST);
        assert_eq!(options.path_delimiter(), "/");
        assert_eq!(options.service_options().project_id(), "p1");
        Ok(())
    }

    #[test]
    fn to_builder() -> anyhow::Result<()> {
        let options = test_options()?;
        assert_eq!(options.to_builder().build()?, options);

        let updated = options.to_builder().with_project_id("p2").build()?;
        assert_eq!(updated.project_id(), "p2");
        assert_eq!(updated.auth_credentials(), options.auth_credentials());
        assert_eq!(updated.retry_params(), options.retry_params());
        assert_eq!(updated.path_delimiter(), options.path_delimiter());
        assert_eq!(updated.host(), options.host());

        let updated = options
            .to_builder()
            .with_retry_params(RetryParams::no_retries())
            .with_auth_credentials(AuthCredentials::no_credentials())
            .with_path_delimiter(":")
            .with_host("http://localhost:9000")
            .build()?;
        assert_eq!(updated.project_id(), "p1");
        assert_eq!(updated.retry_params(), &RetryParams::no_retries());
        assert_eq!(updated.auth_credentials(), &AuthCredentials::no_credentials());
        assert_eq!(updated.path_delimiter(), ":");
        assert_eq!(updated.host(), "http://localhost:9000");
        Ok(())
    }

    #[test]
    fn empty_path_delimiter() {
        let got = StorageServiceOptions::builder()
            .with_project_id("p1")
            .with_auth_credentials(AuthCredentials::no_credentials())
            .with_path_delimiter("")
            .build();
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
    }

    #[test]
    #[serial_test::serial]
    fn missing_project() {
        let _e = ScopedEnv::remove(gax::options::PROJECT_VAR);
        let got = StorageServiceOptions::builder()
            .with_auth_credentials(AuthCredentials::no_credentials())
            .build();
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
    }

    #[test]
    #[serial_test::serial]
    fn project_from_environment() -> anyhow::Result<()> {
        let _e = ScopedEnv::set(gax::options::PROJECT_VAR, "env-project");
        let options = StorageServiceOptions::builder()
            .with_auth_credentials(AuthCredentials::no_credentials())
            .build()?;
        assert_eq!(options.project_id(), "env-project");
        Ok(())
    }

    #[test]
    fn missing_credentials() {
        let got = StorageServiceOptions::builder().with_project_id("p1").build();
        assert!(matches!(&got, Err(e) if e.is_invalid_argument()), "{got:?}");
    }

    #[test]
    fn send_sync() {
        static_assertions::assert_impl_all!(StorageServiceOptions: Send, Sync, Clone);
    }
}
