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

//! Creates [StorageService] handles.
//!
//! Application code should receive a `&dyn StorageServiceFactory` (or a
//! generic `F: StorageServiceFactory`) instead of calling [instance()]
//! directly. Tests can then provide a factory that returns a test double.
//!
//! # Example
//! ```
//! # use gcloud_storage::factory::{self, StorageServiceFactory};
//! # use gcloud_storage::service_options::StorageServiceOptions;
//! use auth::credentials::AuthCredentials;
//! fn make_service(factory: &dyn StorageServiceFactory) -> gcloud_storage::Result<()> {
//!     let options = StorageServiceOptions::builder()
//!         .with_project_id("my-project")
//!         .with_auth_credentials(AuthCredentials::compute_engine())
//!         .build()?;
//!     let service = factory.get(options);
//!     assert_eq!(service.options().project_id(), "my-project");
//!     Ok(())
//! }
//! make_service(factory::instance())?;
//! # gcloud_storage::Result::<()>::Ok(())
//! ```

use crate::service::{Storage, StorageService};
use crate::service_options::StorageServiceOptions;

/// Creates a [StorageService] from its options.
pub trait StorageServiceFactory: std::fmt::Debug + Send + Sync {
    /// Returns a new handle configured with `options`.
    fn get(&self, options: StorageServiceOptions) -> Box<dyn StorageService>;
}

/// The factory returned by [instance()].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStorageServiceFactory;

impl StorageServiceFactory for DefaultStorageServiceFactory {
    fn get(&self, options: StorageServiceOptions) -> Box<dyn StorageService> {
        Box::new(Storage::new(options))
    }
}

static INSTANCE: DefaultStorageServiceFactory = DefaultStorageServiceFactory;

/// Returns the default factory.
pub fn instance() -> &'static dyn StorageServiceFactory {
    &INSTANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::credentials::AuthCredentials;

    fn test_options(project: &str) -> anyhow::Result<StorageServiceOptions> {
        let options = StorageServiceOptions::builder()
            .with_project_id(project)
            .with_auth_credentials(AuthCredentials::no_credentials())
            .build()?;
        Ok(options)
    }

    #[test]
    fn default_instance() -> anyhow::Result<()> {
        let options = test_options("p1")?;
        let service = instance().get(options.clone());
        assert_eq!(service.options(), &options);

        let other = instance().get(test_options("p2")?);
        assert_eq!(other.options().project_id(), "p2");
        assert!(std::ptr::addr_eq(instance(), instance()));
        Ok(())
    }

    #[derive(Debug)]
    struct FakeService {
        options: StorageServiceOptions,
    }

    impl StorageService for FakeService {
        fn options(&self) -> &StorageServiceOptions {
            &self.options
        }
    }

    #[derive(Debug)]
    struct FakeFactory;

    impl StorageServiceFactory for FakeFactory {
        fn get(&self, options: StorageServiceOptions) -> Box<dyn StorageService> {
            let options = options.to_builder().with_path_delimiter("|").build();
            match options {
                Ok(options) => Box::new(FakeService { options }),
                Err(e) => panic!("cannot rebuild options: {e}"),
            }
        }
    }

    fn path_delimiter(factory: &dyn StorageServiceFactory) -> anyhow::Result<String> {
        let service = factory.get(test_options("p1")?);
        Ok(service.options().path_delimiter().to_string())
    }

    #[test]
    fn substitute() -> anyhow::Result<()> {
        assert_eq!(path_delimiter(instance())?, "/");
        assert_eq!(path_delimiter(&FakeFactory)?, "|");
        Ok(())
    }

    #[test]
    fn send_sync() {
        static_assertions::assert_impl_all!(DefaultStorageServiceFactory: Send, Sync, Copy);
        static_assertions::assert_impl_all!(Box<dyn StorageService>: Send, Sync);
    }
}
