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

//! Google APIs helpers.
//!
//! This crate contains the types and functions shared by the service crates
//! in this workspace: the core [Error][error::Error] type, the service
//! configuration ([ServiceOptions][options::ServiceOptions]), the retry
//! configuration ([RetryParams][retry_params::RetryParams]) and the helpers
//! used to persist configuration and model objects as bytes.
//!
//! None of the types in this crate perform any I/O. They describe how a
//! request should be made, the service crates (and the transports behind
//! them) decide how to make it.

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all builders and conversions in the
/// workspace.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the client libraries.
pub mod error;

pub mod options;
pub mod retry_params;
pub mod serialization;
