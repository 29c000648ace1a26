use std::fmt;
use std::time::Duration;

use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::{Seconds, TryFromValues, csv, split_param, token_or_quoted};

/// `StrictTransportSecurity` header, defined in [RFC6797](https://www.rfc-editor.org/rfc/rfc6797)
///
/// RFC 6797 defines a mechanism enabling web sites to declare
/// themselves accessible only via secure connections and/or for users to be
/// able to direct their user agent(s) to interact with given sites only over
/// secure connections.  This overall policy is referred to as HTTP Strict
/// Transport Security (HSTS).  The policy is declared by web sites via the
/// Strict-Transport-Security HTTP response header field and/or by other means,
/// such as user agent configuration, for example.
///
/// # ABNF
///
/// ```text
///      [ directive ]  *( ";" [ directive ] )
///
///      directive                 = directive-name [ "=" directive-value ]
///      directive-name            = token
///      directive-value           = token | quoted-string
///
/// ```
///
/// Unknown directives are ignored, as section 6.1 asks. `max-age` is
/// required and every directive may appear at most once.
///
/// # Example values
///
/// * `max-age=31536000`
/// * `max-age=15768000 ; includeSubdomains`
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vellum_http_headers::StrictTransportSecurity;
///
/// let sts = StrictTransportSecurity::including_subdomains(Duration::from_secs(31_536_000));
/// assert_eq!(sts.to_string(), "max-age=31536000; includeSubDomains");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrictTransportSecurity {
    /// Signals the UA that the HSTS Policy applies to this HSTS Host as well as
    /// any subdomains of the host's domain name.
    include_subdomains: bool,

    /// Specifies the number of seconds, after the reception of the STS header
    /// field, during which the UA regards the host (from whom the message was
    /// received) as a Known HSTS Host.
    max_age: Seconds,

    /// Consent to be included in browser preload lists.
    preload: bool,
}

derive_header!(StrictTransportSecurity);

impl StrictTransportSecurity {
    // NOTE: The two constructors exist to make a user *have* to decide if
    // subdomains can be included or not, instead of forgetting due to an
    // incorrect assumption about a default.

    /// Create an STS header that includes subdomains
    #[must_use]
    pub fn including_subdomains(max_age: Duration) -> Self {
        Self {
            max_age: max_age.into(),
            include_subdomains: true,
            preload: false,
        }
    }

    /// Create an STS header that excludes subdomains
    #[must_use]
    pub fn excluding_subdomains(max_age: Duration) -> Self {
        Self {
            max_age: max_age.into(),
            include_subdomains: false,
            preload: false,
        }
    }

    /// Add the `preload` directive.
    #[must_use]
    pub fn with_preload(mut self) -> Self {
        self.preload = true;
        self
    }

    // getters

    /// Get whether this should include subdomains.
    #[must_use]
    pub fn include_subdomains(&self) -> bool {
        self.include_subdomains
    }

    /// Get the max-age.
    #[must_use]
    pub fn max_age(&self) -> Duration {
        self.max_age.into()
    }

    /// Get whether `preload` is set.
    #[must_use]
    pub fn preload(&self) -> bool {
        self.preload
    }
}

impl TryFromValues for StrictTransportSecurity {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let value = values.next().context("missing strict-transport-security value")?;

        let mut max_age = None;
        let mut include_subdomains = false;
        let mut preload = false;

        for directive in csv::elements([value], csv::Separator::SemiColon) {
            let (name, arg) = split_param(directive);
            let name = name.to_ascii_lowercase();
            match name.as_str() {
                "max-age" => {
                    if max_age.is_some() {
                        return Err(OpaqueError::from_display("duplicate max-age directive"));
                    }
                    let arg = token_or_quoted(arg.context("max-age requires a value")?)?;
                    max_age = Some(arg.parse::<Seconds>()?);
                }
                "includesubdomains" | "preload" => {
                    if arg.is_some() {
                        return Err(OpaqueError::from_display(format!(
                            "{name} does not take a value"
                        )));
                    }
                    let flag = if name == "preload" {
                        &mut preload
                    } else {
                        &mut include_subdomains
                    };
                    if *flag {
                        return Err(OpaqueError::from_display(format!(
                            "duplicate {name} directive"
                        )));
                    }
                    *flag = true;
                }
                _ => (),
            }
        }

        Ok(Self {
            max_age: max_age.context("strict-transport-security without max-age")?,
            include_subdomains,
            preload,
        })
    }
}

impl fmt::Display for StrictTransportSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "max-age={}", self.max_age)?;
        if self.include_subdomains {
            f.write_str("; includeSubDomains")?;
        }
        if self.preload {
            f.write_str("; preload")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::StrictTransportSecurity;
    use std::time::Duration;

    #[test]
    fn test_parse_max_age() {
        let h = test_decode::<StrictTransportSecurity>(&["max-age=31536000"]).unwrap();
        assert_eq!(
            h,
            StrictTransportSecurity::excluding_subdomains(Duration::from_secs(31536000))
        );
    }

    #[test]
    fn test_parse_max_age_no_value() {
        assert_eq!(test_decode::<StrictTransportSecurity>(&["max-age"]), None);
    }

    #[test]
    fn test_parse_quoted_max_age() {
        let h = test_decode::<StrictTransportSecurity>(&["max-age=\"31536000\""]).unwrap();
        assert_eq!(
            h,
            StrictTransportSecurity::excluding_subdomains(Duration::from_secs(31536000))
        );
    }

    #[test]
    fn test_parse_spaces_max_age() {
        let h = test_decode::<StrictTransportSecurity>(&["max-age = 31536000"]).unwrap();
        assert_eq!(
            h,
            StrictTransportSecurity::excluding_subdomains(Duration::from_secs(31536000))
        );
    }

    #[test]
    fn test_parse_include_subdomains() {
        let h = test_decode::<StrictTransportSecurity>(&["max-age=15768000 ; includeSubDomains"])
            .unwrap();
        assert_eq!(
            h,
            StrictTransportSecurity::including_subdomains(Duration::from_secs(15768000))
        );
    }

    #[test]
    fn test_parse_preload_and_unknown() {
        let h = test_decode::<StrictTransportSecurity>(&["max-age=60; preload; foo=bar"]).unwrap();
        assert!(h.preload());
        assert!(!h.include_subdomains());
        assert_eq!(h.to_string(), "max-age=60; preload");
    }

    #[test]
    fn test_parse_no_max_age() {
        assert_eq!(
            test_decode::<StrictTransportSecurity>(&["includeSubdomains"]),
            None
        );
    }

    #[test]
    fn test_parse_max_age_nan() {
        assert_eq!(
            test_decode::<StrictTransportSecurity>(&["max-age = izzy"]),
            None
        );
    }

    #[test]
    fn test_parse_duplicate_directives() {
        assert_eq!(
            test_decode::<StrictTransportSecurity>(&["max-age=100; max-age=5; max-age=0"]),
            None
        );
        assert_eq!(
            test_decode::<StrictTransportSecurity>(&["max-age=1; preload; Preload"]),
            None
        );
    }
}
