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

//! Google Cloud Client Libraries for Rust - Datastore
//!
//! This crate contains the property value types used in [Cloud Datastore]
//! entities. Each value wraps its payload with two optional attributes: the
//! legacy `meaning` and the `indexed` flag.
//!
//! [Cloud Datastore]: https://cloud.google.com/datastore

pub use gax::Result;
pub use gax::error::Error;

mod float;
pub mod value;

pub use value::{BooleanValue, DoubleValue, LongValue, NullValue, StringValue, Value};
