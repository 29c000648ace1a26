use std::fmt;

use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::IterExt as _;
use crate::{HeaderDecode, HeaderEncode};

/// `Expect` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.1.1)
///
/// The "Expect" header field in a request indicates a certain set of
/// behaviors (expectations) that need to be supported by the server in
/// order to properly handle this request.
///
/// The only expectation defined by RFC 9110 is `100-continue`,
/// which is matched case-insensitively.
///
/// # ABNF
///
/// ```text
/// Expect  = "100-continue"
/// ```
///
/// # Example
///
/// ```
/// use vellum_http_headers::Expect;
///
/// let expect = Expect::CONTINUE;
/// assert_eq!(expect.to_string(), "100-continue");
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Expect(());

impl Expect {
    /// "100-continue"
    pub const CONTINUE: Self = Self(());
}

impl HeaderDecode for Expect {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let value = values.just_one().context("expected exactly one expectation")?;
        if value.trim().eq_ignore_ascii_case("100-continue") {
            Ok(Self::CONTINUE)
        } else {
            Err(OpaqueError::from_display("unsupported expectation"))
        }
    }
}

impl HeaderEncode for Expect {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(std::iter::once(self.to_string()));
    }
}

impl fmt::Debug for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expect").field(&"100-continue").finish()
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("100-continue")
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::Expect;

    #[test]
    fn expect_continue() {
        assert_eq!(test_decode(&["100-continue"]), Some(Expect::CONTINUE));
        assert_eq!(test_decode(&["100-Continue "]), Some(Expect::CONTINUE));
    }

    #[test]
    fn expectation_failed() {
        assert_eq!(test_decode::<Expect>(&["sandwich"]), None);
        assert_eq!(test_decode::<Expect>(&["100-continue", "100-continue"]), None);
    }
}
