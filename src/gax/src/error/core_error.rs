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

use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by all client libraries.
///
/// The model and configuration types report errors from a small number of
/// sources: the application may supply an invalid value to a builder, or a
/// persisted object may fail to encode or decode.
///
/// Most applications will just return the error or log it, without any further
/// action. However, some applications may need to interrogate the error
/// details. This type offers a series of predicates to determine the error
/// kind. Applications can query the error [source][std::error::Error::source]
/// for deeper information.
///
/// # Example
/// ```
/// use gcloud_gax::error::Error;
/// match example_function() {
///     Err(e) if e.is_invalid_argument() => { println!("fix the input {e}"); },
///     Err(e) if e.is_deserialization() => { println!("corrupted data {e}"); },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success, how boring"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # Err(Error::invalid_argument("missing project id"))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

impl Error {
    /// Creates an error representing an invalid or missing input.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use gcloud_gax::error::Error;
    /// let error = Error::invalid_argument("the bucket name cannot be empty");
    /// assert!(error.is_invalid_argument());
    /// assert!(error.source().is_some());
    /// ```
    pub fn invalid_argument<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            source: source.into(),
        }
    }

    /// A builder or factory function received an invalid value.
    ///
    /// This is always a client-side generated error, raised before any
    /// request is made. It is never transient: the same inputs will fail
    /// again.
    ///
    /// # Troubleshooting
    ///
    /// The error message names the field or the value that failed
    /// validation. Typically this is a required field that was never set
    /// (e.g. the project id in the service options), or an empty name.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument)
    }

    /// Creates an error representing a serialization problem.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use gcloud_gax::error::Error;
    /// let error = Error::ser("simulated problem");
    /// assert!(error.is_serialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Serialization,
            source: source.into(),
        }
    }

    /// The value could not be serialized.
    ///
    /// The serialization is deterministic (modulo out of memory conditions),
    /// so this error will repeat with the same input data.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// Creates an error representing a deserialization problem.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use gcloud_gax::error::Error;
    /// let error = Error::deser("simulated problem");
    /// assert!(error.is_deserialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Deserialization,
            source: source.into(),
        }
    }

    /// The value could not be reconstructed from its serialized form.
    ///
    /// # Troubleshooting
    ///
    /// The most common causes are corrupted bytes, or bytes produced by a
    /// version of the library with an incompatible schema version. The
    /// error source includes the details reported by the decoder.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::InvalidArgument => write!(f, "invalid argument: {}", self.source),
            ErrorKind::Serialization => write!(f, "cannot serialize the value {}", self.source),
            ErrorKind::Deserialization => {
                write!(f, "cannot deserialize the value {}", self.source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl From<crate::retry_params::Error> for Error {
    fn from(value: crate::retry_params::Error) -> Self {
        Self::invalid_argument(value)
    }
}

impl From<auth::build_errors::Error> for Error {
    fn from(value: auth::build_errors::Error) -> Self {
        Self::invalid_argument(value)
    }
}

/// The type of error held by an [Error] instance.
#[derive(Debug)]
enum ErrorKind {
    InvalidArgument,
    Serialization,
    Deserialization,
}
