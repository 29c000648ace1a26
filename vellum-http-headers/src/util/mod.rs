//! Grammar building blocks shared by the typed headers.

use vellum_error::OpaqueError;

pub use self::coding::Coding;
pub use self::entity::EntityTag;
pub use self::http_date::HttpDate;
pub use self::language::LanguageTag;
pub use self::quality::{Quality, QualityValue, sort_by_quality};
pub use self::seconds::Seconds;
pub use self::token::{is_tchar, is_token, quote, quote_if_needed, token_or_quoted, unquote};
pub use self::uri_ref::UriRef;
pub use self::wildcard::WildcardList;

pub(crate) use self::authority::{check_authority, parse_authority};
pub(crate) use self::token::split_param;

pub(crate) mod csv;

mod authority;
mod coding;
mod entity;
mod http_date;
mod language;
mod quality;
mod seconds;
mod token;
mod uri_ref;
mod wildcard;

macro_rules! derive_header {
    ($type:ident(_)) => {
        impl crate::HeaderDecode for $type {
            fn decode<'i, I>(values: &mut I) -> Result<Self, ::vellum_error::OpaqueError>
            where
                I: Iterator<Item = &'i str>,
            {
                crate::util::TryFromValues::try_from_values(values).map($type)
            }
        }

        impl crate::HeaderEncode for $type {
            fn encode<E: Extend<String>>(&self, values: &mut E) {
                values.extend(::std::iter::once(self.0.to_string()));
            }
        }
    };
    ($type:ident) => {
        impl crate::HeaderDecode for $type {
            fn decode<'i, I>(values: &mut I) -> Result<Self, ::vellum_error::OpaqueError>
            where
                I: Iterator<Item = &'i str>,
            {
                <Self as crate::util::TryFromValues>::try_from_values(values)
            }
        }

        impl crate::HeaderEncode for $type {
            fn encode<E: Extend<String>>(&self, values: &mut E) {
                values.extend(::std::iter::once(self.to_string()));
            }
        }
    };
}

macro_rules! derive_non_empty_flat_csv_header {
    (
        #[header(sep = $sep:ident)]
        $(#[$m:meta])*
        pub struct $type:ident(pub NonEmptyVec<$t:ty>);
    ) => {
        derive_non_empty_flat_csv_header! {
            #[header(sep = $sep, parse = crate::util::csv::parse_from_str)]
            $(#[$m])*
            pub struct $type(pub NonEmptyVec<$t>);
        }
    };
    (
        #[header(sep = $sep:ident, parse = $parse:path)]
        $(#[$m:meta])*
        pub struct $type:ident(pub NonEmptyVec<$t:ty>);
    ) => {
        $(#[$m])*
        pub struct $type(pub ::vellum_utils::collections::NonEmptyVec<$t>);

        impl $type {
            /// Create the header with a single value.
            #[must_use]
            pub fn new(value: $t) -> Self {
                Self(::vellum_utils::collections::NonEmptyVec::new(value))
            }

            /// Iterate over the values.
            pub fn iter(&self) -> ::std::slice::Iter<'_, $t> {
                self.0.iter()
            }
        }

        impl crate::HeaderDecode for $type {
            fn decode<'i, I>(values: &mut I) -> Result<Self, ::vellum_error::OpaqueError>
            where
                I: Iterator<Item = &'i str>,
            {
                crate::util::csv::decode_non_empty_list(
                    values,
                    crate::util::csv::Separator::$sep,
                    $parse,
                )
                .map($type)
            }
        }

        impl crate::HeaderEncode for $type {
            fn encode<E: Extend<String>>(&self, values: &mut E) {
                values.extend(::std::iter::once(crate::util::csv::encode_list(
                    self.0.iter(),
                    crate::util::csv::Separator::$sep,
                )));
            }
        }
    };
}

macro_rules! derive_wildcard_list_header {
    (
        $(#[$m:meta])*
        pub struct $type:ident(pub WildcardList<$t:ty>);
    ) => {
        $(#[$m])*
        pub struct $type(pub crate::util::WildcardList<$t>);

        impl $type {
            /// Create the header with a single value.
            #[must_use]
            pub fn new(value: $t) -> Self {
                Self(crate::util::WildcardList::new(value))
            }

            /// Create the header with the given values.
            #[must_use]
            pub fn new_values(values: ::vellum_utils::collections::NonEmptyVec<$t>) -> Self {
                Self(crate::util::WildcardList::Values(values))
            }

            /// Create the wildcard (`*`) header.
            #[must_use]
            pub fn any() -> Self {
                Self(crate::util::WildcardList::Any)
            }

            /// Returns true if this is the wildcard.
            #[must_use]
            pub fn is_any(&self) -> bool {
                self.0.is_any()
            }

            /// The values, `None` for the wildcard.
            #[must_use]
            pub fn values(&self) -> Option<&::vellum_utils::collections::NonEmptyVec<$t>> {
                self.0.values()
            }
        }

        impl crate::HeaderDecode for $type {
            fn decode<'i, I>(values: &mut I) -> Result<Self, ::vellum_error::OpaqueError>
            where
                I: Iterator<Item = &'i str>,
            {
                crate::util::WildcardList::decode(values).map($type)
            }
        }

        impl crate::HeaderEncode for $type {
            fn encode<E: Extend<String>>(&self, values: &mut E) {
                values.extend(::std::iter::once(self.0.to_string()));
            }
        }
    };
}

/// A closed set of case-insensitive tokens.
macro_rules! token_enum {
    (
        $(#[$m:meta])*
        pub enum $type:ident {
            $(
                $(#[$vm:meta])*
                $variant:ident => $lit:literal,
            )+
        }
    ) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $type {
            $(
                $(#[$vm])*
                $variant,
            )+
        }

        impl $type {
            /// The canonical token.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $lit,)+
                }
            }
        }

        impl ::std::str::FromStr for $type {
            type Err = ::vellum_error::OpaqueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ::vellum_utils::macros::match_ignore_ascii_case_str! {
                    match (s) {
                        $($lit => Ok(Self::$variant),)+
                        _ => Err(::vellum_error::OpaqueError::from_display(concat!(
                            "unknown ",
                            stringify!($type),
                            " token"
                        ))),
                    }
                }
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// A header whose value is a single token of a closed set.
macro_rules! token_enum_header {
    (@codec $(#[$m:meta])* pub enum $type:ident { $($rest:tt)* }) => {
        impl crate::HeaderDecode for $type {
            fn decode<'i, I>(values: &mut I) -> Result<Self, ::vellum_error::OpaqueError>
            where
                I: Iterator<Item = &'i str>,
            {
                crate::util::TryFromValues::try_from_values(values)
            }
        }

        impl crate::util::TryFromValues for $type {
            fn try_from_values<'i, I>(values: &mut I) -> Result<Self, ::vellum_error::OpaqueError>
            where
                I: Iterator<Item = &'i str>,
            {
                use ::vellum_error::ErrorContext as _;
                values.next().context("missing header value")?.parse()
            }
        }

        impl crate::HeaderEncode for $type {
            fn encode<E: Extend<String>>(&self, values: &mut E) {
                values.extend(::std::iter::once(self.as_str().to_owned()));
            }
        }
    };
    ($($tt:tt)+) => {
        token_enum! { $($tt)+ }
        token_enum_header!(@codec $($tt)+);
    };
}

/// A helper trait for use when deriving `Header`.
pub(crate) trait TryFromValues: Sized {
    /// Try to convert from the values into an instance of `Self`.
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>;
}

pub(crate) trait IterExt: Iterator {
    /// The only item, `None` if there are zero or several.
    fn just_one(&mut self) -> Option<Self::Item> {
        let one = self.next()?;
        match self.next() {
            Some(_) => None,
            None => Some(one),
        }
    }
}

impl<T: Iterator> IterExt for T {}
