use std::fmt;
use std::time::Duration;

use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::{Seconds, csv, is_token, quote, split_param, token_or_quoted};
use crate::{HeaderDecode, HeaderEncode};

/// `Cache-Control` header, defined in [RFC9111](https://www.rfc-editor.org/rfc/rfc9111#section-5.2)
/// with extensions in [RFC8246](https://www.rfc-editor.org/rfc/rfc8246) and
/// [RFC5861](https://www.rfc-editor.org/rfc/rfc5861)
///
/// The `Cache-Control` header field is used to specify directives for
/// caches along the request/response chain.  Such cache directives are
/// unidirectional in that the presence of a directive in a request does
/// not imply that the same directive is to be given in the response.
///
/// Decoding is strict: unknown directives, directives given twice,
/// malformed arguments and `public` together with `private` are all
/// rejected.
///
/// ## ABNF
///
/// ```text
/// Cache-Control   = 1#cache-directive
/// cache-directive = token [ "=" ( token / quoted-string ) ]
/// ```
///
/// ## Example values
///
/// * `no-cache`
/// * `private, max-age=30`
/// * `no-cache="set-cookie", max-age=0`
///
/// # Example
///
/// ```
/// use vellum_http_headers::CacheControl;
///
/// let cc = CacheControl::new().with_public().with_max_age_seconds(3600);
/// assert!(cc.public());
/// assert_eq!(cc.to_string(), "public, max-age=3600");
/// ```
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct CacheControl {
    flags: Flags,
    no_cache_fields: Vec<String>,
    private_fields: Vec<String>,
    max_age: Option<Seconds>,
    s_max_age: Option<Seconds>,
    max_stale: Option<Seconds>,
    min_fresh: Option<Seconds>,
    stale_while_revalidate: Option<Seconds>,
    stale_if_error: Option<Seconds>,
}

/// The argument of a `max-stale` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxStale {
    /// Stale responses of any age are accepted.
    Any,
    /// Stale responses up to this age are accepted.
    Limit(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Flags(u32);

impl Flags {
    const NO_CACHE: Self = Self(1 << 0);
    const NO_STORE: Self = Self(1 << 1);
    const NO_TRANSFORM: Self = Self(1 << 2);
    const ONLY_IF_CACHED: Self = Self(1 << 3);
    const MUST_REVALIDATE: Self = Self(1 << 4);
    const MUST_UNDERSTAND: Self = Self(1 << 5);
    const PROXY_REVALIDATE: Self = Self(1 << 6);
    const PUBLIC: Self = Self(1 << 7);
    const PRIVATE: Self = Self(1 << 8);
    const IMMUTABLE: Self = Self(1 << 9);
    // max-stale without a limit
    const MAX_STALE_ANY: Self = Self(1 << 10);

    fn contains(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    fn insert(&mut self, flag: Self) {
        self.0 |= flag.0;
    }

    fn remove(&mut self, flag: Self) {
        self.0 &= !flag.0;
    }
}

macro_rules! flag_directives {
    ($(
        $directive:literal: $flag:ident, $getter:ident, $with:ident, $set:ident;
    )+) => {
        impl CacheControl {
            $(
                #[doc = concat!("Check if the `", $directive, "` directive is set.")]
                #[must_use]
                pub fn $getter(&self) -> bool {
                    self.flags.contains(Flags::$flag)
                }

                #[doc = concat!("Set the `", $directive, "` directive.")]
                #[must_use]
                pub fn $with(mut self) -> Self {
                    self.$set();
                    self
                }

                #[doc = concat!("Set the `", $directive, "` directive.")]
                pub fn $set(&mut self) -> &mut Self {
                    self.flags.insert(Flags::$flag);
                    self
                }
            )+
        }
    };
}

flag_directives! {
    "no-store": NO_STORE, no_store, with_no_store, set_no_store;
    "no-transform": NO_TRANSFORM, no_transform, with_no_transform, set_no_transform;
    "only-if-cached": ONLY_IF_CACHED, only_if_cached, with_only_if_cached, set_only_if_cached;
    "must-revalidate": MUST_REVALIDATE, must_revalidate, with_must_revalidate, set_must_revalidate;
    "must-understand": MUST_UNDERSTAND, must_understand, with_must_understand, set_must_understand;
    "proxy-revalidate": PROXY_REVALIDATE, proxy_revalidate, with_proxy_revalidate, set_proxy_revalidate;
    "immutable": IMMUTABLE, immutable, with_immutable, set_immutable;
}

macro_rules! seconds_directives {
    ($(
        $directive:literal: $field:ident, $with:ident, $set:ident;
    )+) => {
        impl CacheControl {
            $(
                #[doc = concat!("Get the value of the `", $directive, "` directive if set.")]
                #[must_use]
                pub fn $field(&self) -> Option<Duration> {
                    self.$field.map(Into::into)
                }

                #[doc = concat!("Set the `", $directive, "` directive, in seconds.")]
                #[must_use]
                pub fn $with(mut self, seconds: u64) -> Self {
                    self.$set(seconds);
                    self
                }

                #[doc = concat!("Set the `", $directive, "` directive, in seconds.")]
                pub fn $set(&mut self, seconds: u64) -> &mut Self {
                    self.$field = Some(Seconds::new(seconds));
                    self
                }
            )+
        }
    };
}

seconds_directives! {
    "max-age": max_age, with_max_age_seconds, set_max_age_seconds;
    "s-maxage": s_max_age, with_s_max_age_seconds, set_s_max_age_seconds;
    "min-fresh": min_fresh, with_min_fresh_seconds, set_min_fresh_seconds;
    "stale-while-revalidate": stale_while_revalidate, with_stale_while_revalidate_seconds, set_stale_while_revalidate_seconds;
    "stale-if-error": stale_if_error, with_stale_if_error_seconds, set_stale_if_error_seconds;
}

impl CacheControl {
    /// Construct a new empty `CacheControl` header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the `no-cache` directive is set, with or without fields.
    #[must_use]
    pub fn no_cache(&self) -> bool {
        self.flags.contains(Flags::NO_CACHE)
    }

    /// The field names of a qualified `no-cache="..."` directive.
    #[must_use]
    pub fn no_cache_fields(&self) -> &[String] {
        &self.no_cache_fields
    }

    /// Set the unqualified `no-cache` directive.
    #[must_use]
    pub fn with_no_cache(mut self) -> Self {
        self.set_no_cache();
        self
    }

    /// Set the unqualified `no-cache` directive.
    pub fn set_no_cache(&mut self) -> &mut Self {
        self.flags.insert(Flags::NO_CACHE);
        self.no_cache_fields.clear();
        self
    }

    /// Set `no-cache` qualified with field names.
    pub fn with_no_cache_fields<I, S>(mut self, fields: I) -> Result<Self, OpaqueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.no_cache_fields = field_names(fields)?;
        self.flags.insert(Flags::NO_CACHE);
        Ok(self)
    }

    /// Check if the `public` directive is set.
    #[must_use]
    pub fn public(&self) -> bool {
        self.flags.contains(Flags::PUBLIC)
    }

    /// Set the `public` directive, replacing `private` if set.
    #[must_use]
    pub fn with_public(mut self) -> Self {
        self.set_public();
        self
    }

    /// Set the `public` directive, replacing `private` if set.
    pub fn set_public(&mut self) -> &mut Self {
        self.flags.remove(Flags::PRIVATE);
        self.private_fields.clear();
        self.flags.insert(Flags::PUBLIC);
        self
    }

    /// Check if the `private` directive is set, with or without fields.
    #[must_use]
    pub fn private(&self) -> bool {
        self.flags.contains(Flags::PRIVATE)
    }

    /// The field names of a qualified `private="..."` directive.
    #[must_use]
    pub fn private_fields(&self) -> &[String] {
        &self.private_fields
    }

    /// Set the unqualified `private` directive, replacing `public` if set.
    #[must_use]
    pub fn with_private(mut self) -> Self {
        self.set_private();
        self
    }

    /// Set the unqualified `private` directive, replacing `public` if set.
    pub fn set_private(&mut self) -> &mut Self {
        self.flags.remove(Flags::PUBLIC);
        self.private_fields.clear();
        self.flags.insert(Flags::PRIVATE);
        self
    }

    /// Get the `max-stale` directive if set.
    #[must_use]
    pub fn max_stale(&self) -> Option<MaxStale> {
        if self.flags.contains(Flags::MAX_STALE_ANY) {
            Some(MaxStale::Any)
        } else {
            self.max_stale.map(|secs| MaxStale::Limit(secs.into()))
        }
    }

    /// Set `max-stale` with a limit in seconds.
    #[must_use]
    pub fn with_max_stale_seconds(mut self, seconds: u64) -> Self {
        self.flags.remove(Flags::MAX_STALE_ANY);
        self.max_stale = Some(Seconds::new(seconds));
        self
    }

    /// Set `max-stale` without a limit.
    #[must_use]
    pub fn with_max_stale_any(mut self) -> Self {
        self.max_stale = None;
        self.flags.insert(Flags::MAX_STALE_ANY);
        self
    }

    /// Returns true if no directive is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn field_names<I, S>(fields: I) -> Result<Vec<String>, OpaqueError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let fields: Vec<String> = fields
        .into_iter()
        .map(|field| field.into().to_ascii_lowercase())
        .collect();
    if fields.is_empty() {
        return Err(OpaqueError::from_display("field list may not be empty"));
    }
    if let Some(field) = fields.iter().find(|field| !is_token(field)) {
        return Err(OpaqueError::from_display(format!(
            "field name {field:?} is not a token"
        )));
    }
    Ok(fields)
}

fn parse_field_list(arg: &str) -> Result<Vec<String>, OpaqueError> {
    field_names(csv::elements([arg], csv::Separator::Comma))
}

fn parse_seconds(directive: &str, arg: Option<String>) -> Result<Seconds, OpaqueError> {
    arg.with_context(|| format!("{directive} requires a value"))?
        .parse()
}

fn no_argument(directive: &str, arg: Option<&String>) -> Result<(), OpaqueError> {
    match arg {
        None => Ok(()),
        Some(_) => Err(OpaqueError::from_display(format!(
            "{directive} does not take a value"
        ))),
    }
}

impl HeaderDecode for CacheControl {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let mut cc = Self::new();
        let mut seen: Vec<String> = Vec::new();

        for element in csv::elements(values, csv::Separator::Comma) {
            let (name, arg) = split_param(element);
            let directive = name.to_ascii_lowercase();
            if seen.contains(&directive) {
                return Err(OpaqueError::from_display(format!(
                    "duplicate cache directive {directive}"
                )));
            }
            let arg = arg.map(token_or_quoted).transpose()?;

            match directive.as_str() {
                "no-cache" => {
                    cc.flags.insert(Flags::NO_CACHE);
                    if let Some(arg) = arg {
                        cc.no_cache_fields = parse_field_list(&arg)?;
                    }
                }
                "private" => {
                    cc.flags.insert(Flags::PRIVATE);
                    if let Some(arg) = arg {
                        cc.private_fields = parse_field_list(&arg)?;
                    }
                }
                "no-store" | "no-transform" | "only-if-cached" | "must-revalidate"
                | "must-understand" | "proxy-revalidate" | "public" | "immutable" => {
                    no_argument(&directive, arg.as_ref())?;
                    cc.flags.insert(match directive.as_str() {
                        "no-store" => Flags::NO_STORE,
                        "no-transform" => Flags::NO_TRANSFORM,
                        "only-if-cached" => Flags::ONLY_IF_CACHED,
                        "must-revalidate" => Flags::MUST_REVALIDATE,
                        "must-understand" => Flags::MUST_UNDERSTAND,
                        "proxy-revalidate" => Flags::PROXY_REVALIDATE,
                        "public" => Flags::PUBLIC,
                        _ => Flags::IMMUTABLE,
                    });
                }
                "max-age" => cc.max_age = Some(parse_seconds(&directive, arg)?),
                "s-maxage" => cc.s_max_age = Some(parse_seconds(&directive, arg)?),
                "min-fresh" => cc.min_fresh = Some(parse_seconds(&directive, arg)?),
                "stale-while-revalidate" => {
                    cc.stale_while_revalidate = Some(parse_seconds(&directive, arg)?);
                }
                "stale-if-error" => cc.stale_if_error = Some(parse_seconds(&directive, arg)?),
                "max-stale" => match arg {
                    Some(arg) => cc.max_stale = Some(arg.parse()?),
                    None => cc.flags.insert(Flags::MAX_STALE_ANY),
                },
                _ => {
                    return Err(OpaqueError::from_display(format!(
                        "unknown cache directive {directive}"
                    )));
                }
            }
            seen.push(directive);
        }

        if seen.is_empty() {
            return Err(OpaqueError::from_display("cache-control without directives"));
        }
        if cc.public() && cc.private() {
            return Err(OpaqueError::from_display(
                "public and private are mutually exclusive",
            ));
        }
        Ok(cc)
    }
}

impl HeaderEncode for CacheControl {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        if !self.is_empty() {
            values.extend(::std::iter::once(self.to_string()));
        }
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut directives: Vec<String> = Vec::new();

        let mut flag = |flag: Flags, name: &str, fields: &[String]| {
            if self.flags.contains(flag) {
                if fields.is_empty() {
                    directives.push(name.to_owned());
                } else {
                    directives.push(format!("{name}={}", quote(&fields.join(", "))));
                }
            }
        };
        flag(Flags::NO_CACHE, "no-cache", &self.no_cache_fields);
        flag(Flags::NO_STORE, "no-store", &[]);
        flag(Flags::NO_TRANSFORM, "no-transform", &[]);
        flag(Flags::ONLY_IF_CACHED, "only-if-cached", &[]);
        flag(Flags::MUST_REVALIDATE, "must-revalidate", &[]);
        flag(Flags::MUST_UNDERSTAND, "must-understand", &[]);
        flag(Flags::PROXY_REVALIDATE, "proxy-revalidate", &[]);
        flag(Flags::PUBLIC, "public", &[]);
        flag(Flags::PRIVATE, "private", &self.private_fields);
        flag(Flags::IMMUTABLE, "immutable", &[]);
        flag(Flags::MAX_STALE_ANY, "max-stale", &[]);

        for (name, secs) in [
            ("max-age", self.max_age),
            ("s-maxage", self.s_max_age),
            ("max-stale", self.max_stale),
            ("min-fresh", self.min_fresh),
            ("stale-while-revalidate", self.stale_while_revalidate),
            ("stale-if-error", self.stale_if_error),
        ] {
            if let Some(secs) = secs {
                directives.push(format!("{name}={secs}"));
            }
        }

        f.write_str(&directives.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;

    fn encoded(cc: CacheControl) -> String {
        test_encode(cc)
            .get_str("cache-control")
            .unwrap()
            .joined()
    }

    #[test]
    fn test_parse_multiple_headers() {
        assert_eq!(
            test_decode::<CacheControl>(&["no-cache", "private"]).unwrap(),
            CacheControl::new().with_no_cache().with_private(),
        );
    }

    #[test]
    fn test_parse_argument() {
        assert_eq!(
            test_decode::<CacheControl>(&["max-age=100, private"]).unwrap(),
            CacheControl::new().with_max_age_seconds(100).with_private(),
        );
    }

    #[test]
    fn test_parse_quote_form() {
        assert_eq!(
            test_decode::<CacheControl>(&["max-age=\"200\""]).unwrap(),
            CacheControl::new().with_max_age_seconds(200),
        );
    }

    #[test]
    fn test_parse_case_insensitive_names() {
        assert_eq!(
            test_decode::<CacheControl>(&["No-Cache, MAX-AGE=5"]).unwrap(),
            CacheControl::new().with_no_cache().with_max_age_seconds(5),
        );
    }

    #[test]
    fn test_parse_field_lists() {
        let cc = test_decode::<CacheControl>(&["no-cache=\"Set-Cookie, x-foo\", private=bar"])
            .unwrap();
        assert!(cc.no_cache());
        assert_eq!(cc.no_cache_fields(), ["set-cookie", "x-foo"]);
        assert_eq!(cc.private_fields(), ["bar"]);
        assert_eq!(
            encoded(cc),
            "no-cache=\"set-cookie, x-foo\", private=\"bar\""
        );
    }

    #[test]
    fn test_public_and_private_are_exclusive() {
        assert_eq!(
            test_decode::<CacheControl>(&["max-age=3600, public", "private"]),
            None
        );
        let cc = CacheControl::new().with_private().with_public();
        assert!(cc.public());
        assert!(!cc.private());
    }

    #[test]
    fn test_parse_strict() {
        for bad in [
            "max-age=lolz",
            "max-age",
            "max-age=-1",
            "public=1",
            "foo, no-cache",
            "no-cache, no-cache",
            "max-age=1, max-age=2",
            "no-cache=\"\"",
            "",
            " , ",
        ] {
            assert_eq!(test_decode::<CacheControl>(&[bad]), None, "{bad:?}");
        }
    }

    #[test]
    fn test_max_stale() {
        let cc = test_decode::<CacheControl>(&["max-stale"]).unwrap();
        assert_eq!(cc.max_stale(), Some(MaxStale::Any));
        assert_eq!(encoded(cc), "max-stale");

        let cc = test_decode::<CacheControl>(&["max-stale=60"]).unwrap();
        assert_eq!(
            cc.max_stale(),
            Some(MaxStale::Limit(Duration::from_secs(60)))
        );
        assert_eq!(CacheControl::new().max_stale(), None);
    }

    #[test]
    fn test_stale_extensions() {
        let cc = test_decode::<CacheControl>(&["max-age=1, stale-while-revalidate=59, stale-if-error=300"])
            .unwrap();
        assert_eq!(cc.stale_while_revalidate(), Some(Duration::from_secs(59)));
        assert_eq!(cc.stale_if_error(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_immutable() {
        let cc = CacheControl::new().with_immutable();
        assert_eq!(encoded(cc.clone()), "immutable");
        assert_eq!(test_decode::<CacheControl>(&["immutable"]).unwrap(), cc);
        assert!(cc.immutable());
    }

    #[test]
    fn test_must_understand() {
        let cc = CacheControl::new().with_must_understand().with_no_store();
        assert_eq!(encoded(cc.clone()), "no-store, must-understand");
        assert_eq!(
            test_decode::<CacheControl>(&["must-understand, no-store"]).unwrap(),
            cc
        );
    }

    #[test]
    fn encode_two_directive() {
        assert_eq!(
            encoded(CacheControl::new().with_no_cache().with_private()),
            "no-cache, private"
        );
        assert_eq!(
            encoded(CacheControl::new().with_no_cache().with_max_age_seconds(100)),
            "no-cache, max-age=100"
        );
    }

    #[test]
    fn empty_encodes_to_nothing() {
        let headers = test_encode(CacheControl::new());
        assert!(headers.is_empty());
    }

    #[test]
    fn set_in_place() {
        let mut cc = CacheControl::new();
        cc.set_no_store().set_max_age_seconds(0);
        assert_eq!(cc.to_string(), "no-store, max-age=0");
    }
}
