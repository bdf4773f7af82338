use serde::{Deserialize, Deserializer};

pub mod freelancer;
pub mod project;

/// Treats an explicit `null` like an absent field so required-field
/// validation reports it.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
