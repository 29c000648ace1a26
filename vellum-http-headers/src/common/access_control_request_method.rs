use http::Method;
use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::{IterExt as _, is_token};
use crate::{HeaderDecode, HeaderEncode};

/// `Access-Control-Request-Method` header, as defined on
/// [mdn](https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Headers/Access-Control-Request-Method).
///
/// The `Access-Control-Request-Method` header indicates which method will be
/// used in the actual request as part of the preflight request.
///
/// # ABNF
///
/// ```text
/// Access-Control-Request-Method: "Access-Control-Request-Method" ":" Method
/// ```
///
/// # Example values
/// * `GET`
///
/// # Examples
///
/// ```
/// use vellum_http_headers::AccessControlRequestMethod;
/// use http::Method;
///
/// let req_method = AccessControlRequestMethod::from(Method::GET);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessControlRequestMethod(Method);

impl AccessControlRequestMethod {
    /// The requested method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.0
    }
}

impl HeaderDecode for AccessControlRequestMethod {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let value = values
            .just_one()
            .context("expected exactly one request method")?
            .trim();
        if !is_token(value) {
            return Err(OpaqueError::from_display("method must be a token"));
        }
        value
            .parse()
            .map(Self)
            .context("parse request method")
    }
}

impl HeaderEncode for AccessControlRequestMethod {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(::std::iter::once(self.0.as_str().to_owned()));
    }
}

impl From<Method> for AccessControlRequestMethod {
    fn from(method: Method) -> Self {
        Self(method)
    }
}

impl From<AccessControlRequestMethod> for Method {
    fn from(method: AccessControlRequestMethod) -> Self {
        method.0
    }
}
