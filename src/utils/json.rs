//! Generic JSON object parsing

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::type_name;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("{type_name} must be decoded from a JSON object, got {found}")]
    IncorrectType { type_name: &'static str, found: &'static str },

    #[error("failed to unmarshal json to {type_name}: {source}")]
    Decode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode the first JSON document in `reader` into `T`.
///
/// The document must be an object (struct, boxed struct or map targets).
/// Empty input yields `Ok(None)`; anything after the first document is ignored.
pub fn parse_json<T, R>(reader: R) -> Result<Option<T>, JsonError>
where
    T: DeserializeOwned,
    R: Read,
{
    let decode_err = |source| JsonError::Decode { type_name: type_name::<T>(), source };

    let mut documents = serde_json::Deserializer::from_reader(reader).into_iter::<Value>();
    let value = match documents.next() {
        None => return Ok(None),
        Some(result) => result.map_err(decode_err)?,
    };

    if !value.is_object() {
        return Err(JsonError::IncorrectType { type_name: type_name::<T>(), found: kind(&value) });
    }

    serde_json::from_value(value).map(Some).map_err(decode_err)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
