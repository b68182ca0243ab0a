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

//! Byte-level persistence for configuration and model objects.
//!
//! Applications may need to persist or transmit the configuration and model
//! objects, for example to hand a [ServiceOptions] to a worker process. All
//! these types implement [serde::Serialize] and [serde::Deserialize], the
//! functions in this module wrap them in a small versioned envelope and
//! encode the result as JSON bytes.
//!
//! A round trip produces a value equal to the original:
//!
//! ```
//! # use gcloud_gax::serialization::{from_bytes, to_bytes};
//! # use gcloud_gax::retry_params::RetryParams;
//! let params = RetryParams::no_retries();
//! let bytes = to_bytes(&params)?;
//! let copy: RetryParams = from_bytes(&bytes)?;
//! assert_eq!(copy, params);
//! # gcloud_gax::Result::<()>::Ok(())
//! ```
//!
//! [ServiceOptions]: crate::options::ServiceOptions

use crate::Result;
use crate::error::Error;

/// The schema version written by [to_bytes].
///
/// [from_bytes] rejects envelopes written with any other version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a, T> {
    schema_version: u32,
    value: &'a T,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    schema_version: u32,
    value: serde_json::Value,
}

#[derive(thiserror::Error, Debug)]
#[error("unsupported schema version {got}, expected {SCHEMA_VERSION}")]
struct SchemaVersionMismatch {
    got: u32,
}

/// Serializes `value` into a versioned byte representation.
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: serde::Serialize,
{
    let envelope = EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        value,
    };
    serde_json::to_vec(&envelope).map_err(Error::ser)
}

/// Reconstructs a value from the bytes produced by [to_bytes].
///
/// Fails with a [deserialization][Error::is_deserialization] error if the
/// bytes are corrupted, do not represent a `T`, or were written with an
/// incompatible schema version.
pub fn from_bytes<T>(bytes: &[u8]) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let envelope = serde_json::from_slice::<Envelope>(bytes).map_err(Error::deser)?;
    if envelope.schema_version != SCHEMA_VERSION {
        tracing::warn!(
            got = envelope.schema_version,
            expected = SCHEMA_VERSION,
            "rejecting serialized value"
        );
        return Err(Error::deser(SchemaVersionMismatch {
            got: envelope.schema_version,
        }));
    }
    serde_json::from_value(envelope.value).map_err(Error::deser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry_params::RetryParams;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn round_trip() -> anyhow::Result<()> {
        let params = RetryParams::builder().with_retry_max_attempts(9).build()?;
        let bytes = to_bytes(&params)?;
        let copy = from_bytes::<RetryParams>(&bytes)?;
        assert_eq!(copy, params);

        let map = BTreeMap::from([("a".to_string(), 1_i64), ("b".to_string(), 2_i64)]);
        let copy = from_bytes::<BTreeMap<String, i64>>(&to_bytes(&map)?)?;
        assert_eq!(copy, map);
        Ok(())
    }

    #[test]
    fn envelope_format() -> anyhow::Result<()> {
        let bytes = to_bytes(&"hello")?;
        let got = serde_json::from_slice::<serde_json::Value>(&bytes)?;
        assert_eq!(
            got,
            serde_json::json!({"schemaVersion": SCHEMA_VERSION, "value": "hello"})
        );
        Ok(())
    }

    #[test]
    fn corrupted_bytes() {
        let got = from_bytes::<RetryParams>(b"not json at all");
        assert!(matches!(&got, Err(e) if e.is_deserialization()), "{got:?}");
    }

    #[test]
    fn wrong_type() -> anyhow::Result<()> {
        let bytes = to_bytes(&"a string")?;
        let got = from_bytes::<RetryParams>(&bytes);
        assert!(matches!(&got, Err(e) if e.is_deserialization()), "{got:?}");
        Ok(())
    }

    #[test]
    fn schema_mismatch() -> anyhow::Result<()> {
        let bytes = serde_json::to_vec(&serde_json::json!({
            "schemaVersion": SCHEMA_VERSION + 1,
            "value": "hello",
        }))?;
        let got = from_bytes::<String>(&bytes);
        assert!(matches!(&got, Err(e) if e.is_deserialization()), "{got:?}");
        let message = got.map_err(|e| e.to_string()).unwrap_err();
        assert!(message.contains("unsupported schema version"), "{message}");
        Ok(())
    }
}
