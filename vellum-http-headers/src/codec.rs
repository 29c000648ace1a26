//! Bidirectional conversion between typed values and raw header values.
//!
//! A [`Codec`] is a plain pair of function pointers: one [`Decode`]
//! strategy and one [`Encode`] strategy. Codecs have no state and no
//! identity, which is what allows a [`HeaderAccessor`] to be `const`
//! constructed.
//!
//! [`HeaderAccessor`]: crate::HeaderAccessor

use std::fmt;

use vellum_error::{ErrorContext as _, OpaqueError};
use vellum_http_types::{HeaderName, HeadersError, MutableHeaders, RawValues};
use vellum_utils::collections::NonEmptyVec;

use crate::util::{HttpDate, csv, is_token};
use crate::{HeaderDecode, HeaderEncode};

/// How raw values are decoded.
pub enum Decode<T> {
    /// Only the first raw value is consulted, any extra value is ignored.
    Single(fn(&str) -> Result<T, OpaqueError>),
    /// The decoder receives all raw values, in order.
    Multi(fn(&RawValues) -> Result<T, OpaqueError>),
}

/// How a typed value is encoded.
pub enum Encode<T> {
    /// Encode into exactly one raw value.
    Single(fn(&T) -> String),
    /// Encode into zero or more raw values, zero meaning "absent".
    Multi(fn(&T) -> Vec<String>),
}

/// A decode and encode strategy for values of type `T`.
pub struct Codec<T> {
    /// Decode strategy.
    pub decode: Decode<T>,
    /// Encode strategy.
    pub encode: Encode<T>,
}

impl<T> Codec<T> {
    /// Create a codec from its two halves.
    #[must_use]
    pub const fn new(decode: Decode<T>, encode: Encode<T>) -> Self {
        Self { decode, encode }
    }

    /// Decode the raw values.
    pub fn decode(&self, values: &RawValues) -> Result<T, OpaqueError> {
        match self.decode {
            Decode::Single(decode) => decode(values.first()),
            Decode::Multi(decode) => decode(values),
        }
    }

    /// Encode a value into raw values.
    #[must_use]
    pub fn encode(&self, value: &T) -> Vec<String> {
        match self.encode {
            Encode::Single(encode) => vec![encode(value)],
            Encode::Multi(encode) => encode(value),
        }
    }
}

impl<T: HeaderDecode + HeaderEncode> Codec<T> {
    /// The codec of a library type, driven by its [`HeaderDecode`] and
    /// [`HeaderEncode`] implementations.
    #[must_use]
    pub const fn typed() -> Self {
        Self {
            decode: Decode::Multi(decode_typed::<T>),
            encode: Encode::Multi(encode_typed::<T>),
        }
    }
}

fn decode_typed<T: HeaderDecode>(values: &RawValues) -> Result<T, OpaqueError> {
    T::decode(&mut values.iter())
}

fn encode_typed<T: HeaderEncode>(value: &T) -> Vec<String> {
    let mut values = Vec::new();
    value.encode(&mut values);
    values
}

impl<T> Clone for Decode<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Decode<T> {}

impl<T> Clone for Encode<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Encode<T> {}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Codec<T> {}

impl<T> fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decode = match self.decode {
            Decode::Single(_) => "single",
            Decode::Multi(_) => "multi",
        };
        let encode = match self.encode {
            Encode::Single(_) => "single",
            Encode::Multi(_) => "multi",
        };
        f.debug_struct("Codec")
            .field("decode", &decode)
            .field("encode", &encode)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Non-empty text, surrounding whitespace trimmed.
pub const TEXT: Codec<String> = Codec::new(Decode::Single(decode_text), Encode::Single(String::clone));

fn decode_text(value: &str) -> Result<String, OpaqueError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(OpaqueError::from_display("empty text value"));
    }
    Ok(value.to_owned())
}

/// Unsigned decimal integer, digits only.
pub const U64: Codec<u64> = Codec::new(Decode::Single(decode_u64), Encode::Single(u64::to_string));

fn decode_u64(value: &str) -> Result<u64, OpaqueError> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OpaqueError::from_display(
            "expected decimal digits for integer value",
        ));
    }
    value.parse::<u64>().context("integer value out of range")
}

/// An http date, see [`HttpDate`].
pub const HTTP_DATE: Codec<HttpDate> = Codec::new(
    Decode::Single(decode_http_date),
    Encode::Single(HttpDate::to_string),
);

fn decode_http_date(value: &str) -> Result<HttpDate, OpaqueError> {
    value.trim().parse()
}

/// Comma separated list of tokens, over all raw values.
pub const TOKEN_LIST: Codec<NonEmptyVec<String>> = Codec::new(
    Decode::Multi(decode_token_list),
    Encode::Single(encode_token_list),
);

fn decode_token_list(values: &RawValues) -> Result<NonEmptyVec<String>, OpaqueError> {
    csv::decode_non_empty_list(values.iter(), csv::Separator::Comma, |s| {
        if is_token(s) {
            Ok(s.to_owned())
        } else {
            Err(OpaqueError::from_display("list element is not a token"))
        }
    })
}

fn encode_token_list(values: &NonEmptyVec<String>) -> String {
    values.join(", ")
}

/// The literal `true`; `false` encodes to no value at all, removing the header.
pub const BOOL_TRUE: Codec<bool> = Codec::new(Decode::Single(decode_true), Encode::Multi(encode_true));

fn decode_true(value: &str) -> Result<bool, OpaqueError> {
    if value.trim() == "true" {
        Ok(true)
    } else {
        Err(OpaqueError::from_display("expected literal `true`"))
    }
}

#[expect(clippy::trivially_copy_pass_by_ref, reason = "codec signature")]
fn encode_true(value: &bool) -> Vec<String> {
    if *value {
        vec!["true".to_owned()]
    } else {
        Vec::new()
    }
}

/// A value for a header without a dedicated type.
///
/// Custom headers are written from values of different kinds; this sum
/// type is how such a write states which kind it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomValue {
    /// A single text value.
    Text(String),
    /// An http date.
    Date(HttpDate),
    /// A list, written as one comma separated value.
    List(Vec<String>),
    /// Raw values, written as they are.
    Raw(RawValues),
}

impl CustomValue {
    /// Encode into raw values. An empty list encodes to nothing.
    #[must_use]
    pub fn to_raw_strings(&self) -> Vec<String> {
        match self {
            Self::Text(text) => vec![text.clone()],
            Self::Date(date) => vec![date.to_string()],
            Self::List(items) if items.is_empty() => Vec::new(),
            Self::List(items) => vec![items.join(", ")],
            Self::Raw(values) => values.iter().map(ToOwned::to_owned).collect(),
        }
    }

    /// Write this value as the header `name`, replacing any previous value.
    ///
    /// `None`, or a value encoding to nothing, removes the header.
    pub fn write(
        value: Option<&Self>,
        headers: &mut MutableHeaders,
        name: HeaderName,
    ) -> Result<(), HeadersError> {
        let values = match value {
            Some(value) => RawValues::try_from_iter(value.to_raw_strings())?,
            None => None,
        };
        headers.set(name, values);
        Ok(())
    }
}

impl From<String> for CustomValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CustomValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<HttpDate> for CustomValue {
    fn from(value: HttpDate) -> Self {
        Self::Date(value)
    }
}

impl From<Vec<String>> for CustomValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<RawValues> for CustomValue {
    fn from(value: RawValues) -> Self {
        Self::Raw(value)
    }
}

/// Reads any header as [`CustomValue::Raw`] and writes any [`CustomValue`].
pub const CUSTOM: Codec<CustomValue> = Codec::new(
    Decode::Multi(decode_custom),
    Encode::Multi(CustomValue::to_raw_strings),
);

// raw values are already validated, decoding can't fail
fn decode_custom(values: &RawValues) -> Result<CustomValue, OpaqueError> {
    Ok(CustomValue::Raw(values.clone()))
}
