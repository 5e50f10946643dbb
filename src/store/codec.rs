// SPDX-License-Identifier: MPL-2.0
//! Conversions between store values and the strings held in storage slots.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

/// Encodes a value into a slot string and back.
pub trait SlotCodec<T> {
    fn encode(value: &T) -> Result<String>;
    fn decode(raw: &str) -> Result<T>;
}

/// Raw strings and enum-like values: `Display` out, `FromStr` in.
pub struct PlainText<T>(PhantomData<T>);

impl<T> SlotCodec<T> for PlainText<T>
where
    T: Display + FromStr,
    T::Err: Display,
{
    fn encode(value: &T) -> Result<String> {
        Ok(value.to_string())
    }

    fn decode(raw: &str) -> Result<T> {
        raw.parse::<T>()
            .map_err(|err| Error::Serialization(err.to_string()))
    }
}

/// Structured values stored as JSON text.
pub struct Json<T>(PhantomData<T>);

impl<T> SlotCodec<T> for Json<T>
where
    T: Serialize + DeserializeOwned,
{
    fn encode(value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(raw: &str) -> Result<T> {
        Ok(serde_json::from_str(raw)?)
    }
}
