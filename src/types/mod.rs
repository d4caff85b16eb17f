//! Typed records returned by the Jenkins JSON API.

pub mod builds;
pub mod common;
pub mod jobs;

pub use builds::*;
pub use common::*;
pub use jobs::*;

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
