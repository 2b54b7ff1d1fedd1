//! Extractor configs and schema types attached to each route.
//!
//! The body and path types carry the schema; these configs turn any extractor
//! rejection into a 400 before the handler runs.

use actix_web::web;
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::api::error::ApiError;

const MAX_BODY_BYTES: usize = 16 * 1024;

pub fn json_body() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

pub fn path_params() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

/// A path id that only has to be numeric. `1.5`, `1e3` and `4294967296` all pass;
/// whether they name a todo is decided by [`NumericId::todo_id`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericId(f64);

impl NumericId {
    /// The id as a store key, or `None` when no todo can carry it.
    pub fn todo_id(self) -> Option<i32> {
        let value = self.0;
        if value.fract() == 0.0 && value >= i32::MIN as f64 && value <= i32::MAX as f64 {
            Some(value as i32)
        } else {
            None
        }
    }
}

impl<'de> Deserialize<'de> for NumericId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        if value.is_nan() {
            return Err(de::Error::custom("id must be a number"));
        }
        Ok(NumericId(value))
    }
}
