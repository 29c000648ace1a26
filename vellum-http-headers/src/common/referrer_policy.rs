use vellum_error::OpaqueError;

use crate::util::csv;
use crate::{HeaderDecode, HeaderEncode};

token_enum! {
    /// `Referrer-Policy` header, part of
    /// [Referrer Policy](https://www.w3.org/TR/referrer-policy/#referrer-policy-header)
    ///
    /// The `Referrer-Policy` HTTP header specifies the referrer
    /// policy that the user agent applies when determining what
    /// referrer information should be included with requests made,
    /// and with browsing contexts created from the context of the
    /// protected resource.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Referrer-Policy: 1#policy-token
    /// policy-token   = "no-referrer" / "no-referrer-when-downgrade"
    ///                  / "same-origin" / "origin"
    ///                  / "origin-when-cross-origin" / "unsafe-url"
    /// ```
    ///
    /// When several tokens are given the last known one applies; unknown
    /// tokens are skipped.
    ///
    /// # Example values
    ///
    /// * `no-referrer`
    /// * `no-referrer, strict-origin-when-cross-origin`
    pub enum ReferrerPolicy {
        /// `no-referrer`
        NoReferrer => "no-referrer",
        /// `no-referrer-when-downgrade`
        NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
        /// `same-origin`
        SameOrigin => "same-origin",
        /// `origin`
        Origin => "origin",
        /// `origin-when-cross-origin`
        OriginWhenCrossOrigin => "origin-when-cross-origin",
        /// `strict-origin`
        StrictOrigin => "strict-origin",
        /// `strict-origin-when-cross-origin`
        StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        /// `unsafe-url`
        UnsafeUrl => "unsafe-url",
    }
}

impl HeaderDecode for ReferrerPolicy {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        // See https://www.w3.org/TR/referrer-policy/#determine-policy-for-token
        // tl;dr - Pick *last* known policy in the list
        let mut known = None;
        for token in csv::elements(values, csv::Separator::Comma) {
            let policy = vellum_utils::macros::match_ignore_ascii_case_str! {
                match (token) {
                    "never" => Some(Self::NoReferrer),
                    "default" => Some(Self::NoReferrerWhenDowngrade),
                    "always" => Some(Self::UnsafeUrl),
                    _ => token.parse().ok(),
                }
            };
            if policy.is_some() {
                known = policy;
            }
        }
        known.ok_or_else(|| OpaqueError::from_display("no known referrer policy token"))
    }
}

impl HeaderEncode for ReferrerPolicy {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(::std::iter::once(self.as_str().to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::ReferrerPolicy;
    use vellum_http_types::header;

    #[test]
    fn decode_as_last_policy() {
        assert_eq!(
            test_decode::<ReferrerPolicy>(&["same-origin, origin"]),
            Some(ReferrerPolicy::Origin),
        );

        assert_eq!(
            test_decode::<ReferrerPolicy>(&["origin", "same-origin"]),
            Some(ReferrerPolicy::SameOrigin),
        );
    }

    #[test]
    fn decode_as_last_known() {
        assert_eq!(
            test_decode::<ReferrerPolicy>(&["origin, nope, nope, nope"]),
            Some(ReferrerPolicy::Origin),
        );

        assert_eq!(
            test_decode::<ReferrerPolicy>(&["nope, origin", "nope, nope"]),
            Some(ReferrerPolicy::Origin),
        );
    }

    #[test]
    fn decode_legacy_tokens() {
        assert_eq!(
            test_decode::<ReferrerPolicy>(&["never"]),
            Some(ReferrerPolicy::NoReferrer),
        );
        assert_eq!(
            test_decode::<ReferrerPolicy>(&["always"]),
            Some(ReferrerPolicy::UnsafeUrl),
        );
    }

    #[test]
    fn decode_unknown() {
        assert_eq!(test_decode::<ReferrerPolicy>(&["nope"]), None);
    }

    #[test]
    fn encode() {
        let headers = test_encode(ReferrerPolicy::StrictOriginWhenCrossOrigin);
        assert_eq!(
            headers.get(&header::REFERRER_POLICY).unwrap().first(),
            "strict-origin-when-cross-origin"
        );
    }
}
