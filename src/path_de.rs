use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        Error::Options(format!("at JSON path {path} → {}", err.into_inner()))
    })
}
