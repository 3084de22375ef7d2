//! This module holds typed parameters for the endpoint inputs.
//!
//! Query strings and JSON bodies are deserialized straight into these structs, so a
//! request that does not fit is rejected by axum before any handler runs. Each type
//! then converts itself into whatever the `domain` layer expects, for example a
//! `QueryFilterMap` or an `ActionItemPatch`.

use serde::{de, Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

pub(crate) mod action_item;
pub(crate) mod transcript;

/// Treats `?key=` the same as leaving `key` out of the query string.
pub(crate) fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Distinguishes a JSON field that is present but `null` (`Some(None)`) from one
/// that is missing entirely (`None`, through `#[serde(default)]`).
pub(crate) fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
