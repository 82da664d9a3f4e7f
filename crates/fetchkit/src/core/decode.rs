use serde::de::DeserializeOwned;

use crate::error::Result;

/// Decode a JSON body into `T`, keeping the decoder's error.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> { Ok(serde_json::from_slice(body)?) }
