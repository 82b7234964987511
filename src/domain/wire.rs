//! Serde helpers shared by the wire shapes of the domain.

use serde::{Deserialize, Deserializer};

/// Reads a null as the default value; the service sends `null` for unset fields.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
