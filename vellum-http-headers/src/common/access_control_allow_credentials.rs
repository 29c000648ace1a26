use vellum_error::{ErrorContext as _, OpaqueError};

use crate::{HeaderDecode, HeaderEncode};

/// `Access-Control-Allow-Credentials` header, part of
/// [CORS](http://www.w3.org/TR/cors/#access-control-allow-headers-response-header)
///
/// > The Access-Control-Allow-Credentials HTTP response header indicates whether the
/// > response to request can be exposed when the credentials flag is true. When part
/// > of the response to an preflight request it indicates that the actual request can
/// > be made with credentials. The Access-Control-Allow-Credentials HTTP header must
/// > match the following ABNF:
///
/// # ABNF
///
/// ```text
/// Access-Control-Allow-Credentials: "Access-Control-Allow-Credentials" ":" "true"
/// ```
///
/// Since there is only one acceptable field value, the header struct does not accept
/// any values at all. Setting an empty `AccessControlAllowCredentials` header is
/// sufficient. See the examples below.
///
/// # Example values
/// * "true"
///
/// # Examples
///
/// ```
/// use vellum_http_headers::AccessControlAllowCredentials;
///
/// let allow_creds = AccessControlAllowCredentials;
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AccessControlAllowCredentials;

impl HeaderDecode for AccessControlAllowCredentials {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let value = values
            .next()
            .context("missing access-control-allow-credentials value")?;
        // case-sensitive, as the fetch standard requires
        if value.trim() == "true" {
            Ok(Self)
        } else {
            Err(OpaqueError::from_display(
                "access-control-allow-credentials must be the literal true",
            ))
        }
    }
}

impl HeaderEncode for AccessControlAllowCredentials {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(::std::iter::once("true".to_owned()));
    }
}
