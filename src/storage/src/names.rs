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

//! Name validation shared by the constructors and the deserializers.
//!
//! See [Bucket names] and [Object names] for the service rules. Only the
//! rules needed to address the resource are enforced here.
//!
//! [Bucket names]: https://cloud.google.com/storage/docs/buckets#naming
//! [Object names]: https://cloud.google.com/storage/docs/objects#naming

use crate::Result;
use gax::error::Error;
use serde::Deserialize;

// `.` and `..` are path segments with special meaning in a URL.
fn is_dot_segment(name: &str) -> bool {
    name == "." || name == ".."
}

pub(crate) fn check_bucket_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("the bucket name cannot be empty"));
    }
    if is_dot_segment(name) {
        return Err(Error::invalid_argument(format!(
            "the bucket name cannot be `{name}`"
        )));
    }
    Ok(())
}

pub(crate) fn check_object_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("the object name cannot be empty"));
    }
    if is_dot_segment(name) {
        return Err(Error::invalid_argument(format!(
            "the object name cannot be `{name}`"
        )));
    }
    Ok(())
}

fn checked<'de, D, F>(deserializer: D, check: F) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
    F: FnOnce(&str) -> Result<()>,
{
    let value = String::deserialize(deserializer)?;
    check(&value).map_err(serde::de::Error::custom)?;
    Ok(value)
}

pub(crate) fn bucket_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    checked(deserializer, check_bucket_name)
}

pub(crate) fn object_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    checked(deserializer, check_object_name)
}

pub(crate) fn non_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    checked(deserializer, |v| {
        if v.is_empty() {
            return Err(Error::invalid_argument("the value cannot be empty"));
        }
        Ok(())
    })
}
