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

//! Service configuration.
//!
//! While the client library defaults are intended to work for most
//! applications, every service needs at least a project and some
//! credentials. [ServiceOptions] holds the configuration shared by all
//! services, the service crates embed it in their own options types.
//!
//! The options are immutable once built. To change a value use
//! [to_builder()][ServiceOptions::to_builder], change the value, and build a
//! new instance.

use crate::Result;
use crate::error::Error;
use crate::retry_params::RetryParams;
use auth::credentials::AuthCredentials;

/// The environment variable used to find the default project id.
pub const PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";

/// The environment variable used to enable tracing in all services.
pub const LOGGING_VAR: &str = "GCLOUD_RUST_LOGGING";

/// The default host for Google Cloud JSON APIs.
pub const DEFAULT_HOST: &str = "https://www.googleapis.com";

/// Configuration shared by all services.
///
/// # Example
/// ```
/// # use gcloud_gax::options::ServiceOptions;
/// use auth::credentials::AuthCredentials;
/// let options = ServiceOptions::builder()
///     .with_project_id("my-project")
///     .with_auth_credentials(AuthCredentials::no_credentials())
///     .build()?;
/// assert_eq!(options.project_id(), "my-project");
/// # gcloud_gax::Result::<()>::Ok(())
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOptions {
    host: String,
    project_id: String,
    auth_credentials: AuthCredentials,
    retry_params: RetryParams,
    tracing: bool,
}

impl ServiceOptions {
    /// Returns a builder with no project and no credentials.
    pub fn builder() -> ServiceOptionsBuilder {
        ServiceOptionsBuilder::default()
    }

    /// Returns a builder initialized with the values of this instance.
    pub fn to_builder(&self) -> ServiceOptionsBuilder {
        ServiceOptionsBuilder {
            host: Some(self.host.clone()),
            project_id: Some(self.project_id.clone()),
            auth_credentials: Some(self.auth_credentials.clone()),
            retry_params: Some(self.retry_params.clone()),
            tracing: self.tracing,
        }
    }

    /// The service endpoint, e.g. `https://www.googleapis.com`.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn auth_credentials(&self) -> &AuthCredentials {
        &self.auth_credentials
    }

    pub fn retry_params(&self) -> &RetryParams {
        &self.retry_params
    }

    /// Returns true if the options or the environment enable tracing.
    pub fn tracing_enabled(&self) -> bool {
        if self.tracing {
            return true;
        }
        std::env::var(LOGGING_VAR)
            .map(|v| v == "true")
            .unwrap_or(false)
    }
}

/// A builder for [ServiceOptions].
///
/// The builder is consumed by [build()][ServiceOptionsBuilder::build]. Use a
/// separate builder in each thread.
#[derive(Clone, Debug, Default)]
pub struct ServiceOptionsBuilder {
    host: Option<String>,
    project_id: Option<String>,
    auth_credentials: Option<AuthCredentials>,
    retry_params: Option<RetryParams>,
    tracing: bool,
}

impl ServiceOptionsBuilder {
    /// Sets the service endpoint.
    pub fn with_host<T: Into<String>>(mut self, v: T) -> Self {
        self.host = Some(v.into());
        self
    }

    /// Sets the project id.
    ///
    /// If not set, [build()][ServiceOptionsBuilder::build] uses the value of
    /// the `GOOGLE_CLOUD_PROJECT` environment variable.
    pub fn with_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = Some(v.into());
        self
    }

    /// Sets the credentials.
    pub fn with_auth_credentials(mut self, v: AuthCredentials) -> Self {
        self.auth_credentials = Some(v);
        self
    }

    /// Sets the retry configuration.
    ///
    /// Defaults to [RetryParams::default_instance].
    pub fn with_retry_params(mut self, v: RetryParams) -> Self {
        self.retry_params = Some(v);
        self
    }

    /// Enables (or disables) tracing for the services using these options.
    pub fn with_tracing(mut self, v: bool) -> Self {
        self.tracing = v;
        self
    }

    /// Creates the options, validating the required fields.
    pub fn build(self) -> Result<ServiceOptions> {
        let project_id = self
            .project_id
            .or_else(|| std::env::var(PROJECT_VAR).ok())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "a project id is required, set it in the builder or with the {PROJECT_VAR} environment variable"
                ))
            })?;
        let auth_credentials = self
            .auth_credentials
            .ok_or_else(|| Error::invalid_argument("the credentials are required"))?;
        let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        check_host(&host)?;
        Ok(ServiceOptions {
            host,
            project_id,
            auth_credentials,
            retry_params: self.retry_params.unwrap_or_default(),
            tracing: self.tracing,
        })
    }
}

fn check_host(host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(Error::invalid_argument("the host cannot be empty"));
    }
    let url = url::Url::parse(host).map_err(Error::invalid_argument)?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(Error::invalid_argument(format!(
            "the host must be an absolute URL with a host name, got {host}"
        )));
    }
    Ok(())
}
