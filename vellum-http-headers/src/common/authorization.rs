//! Authorization header and types.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as ENGINE;
use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::{IterExt as _, TryFromValues, is_token};

/// `Authorization` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-11.6.2)
///
/// The `Authorization` header field allows a user agent to authenticate
/// itself with an origin server -- usually, but not necessarily, after
/// receiving a 401 (Unauthorized) response.  Its value consists of
/// credentials containing the authentication information of the user
/// agent for the realm of the resource being requested.
///
/// # ABNF
///
/// ```text
/// Authorization = credentials
/// credentials   = auth-scheme [ 1*SP ( token68 / #auth-param ) ]
/// ```
///
/// Schemes are matched case-insensitively. `Basic` and `Bearer` are
/// decoded into their own types, any other scheme is kept verbatim.
///
/// # Example values
/// * `Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==`
/// * `Bearer fpKL54jvWmEGVoRdCNjG`
///
/// # Examples
///
/// ```
/// use vellum_http_headers::Authorization;
///
/// let basic = Authorization::basic("Aladdin", "open sesame").unwrap();
/// assert_eq!(basic.to_string(), "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
///
/// let bearer = Authorization::bearer("some-opaque-token").unwrap();
/// assert_eq!(bearer.token(), Some("some-opaque-token"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Authorization(pub Credentials);

derive_header!(Authorization);

/// Credentials carried by an [`Authorization`] header.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Credentials {
    /// `Basic` credentials, RFC 7617.
    Basic(Basic),
    /// `Bearer` token, RFC 6750.
    Bearer(Bearer),
    /// Any other scheme, with its raw parameters.
    Other {
        /// The auth-scheme token, as received.
        scheme: String,
        /// Everything after the scheme, trimmed. May be empty.
        params: String,
    },
}

const BASIC_SCHEME: &str = "Basic";
const BEARER_SCHEME: &str = "Bearer";

impl Authorization {
    /// Create a `Basic` authorization header.
    pub fn basic(username: &str, password: &str) -> Result<Self, OpaqueError> {
        Basic::new(username, password).map(|basic| Self(Credentials::Basic(basic)))
    }

    /// Create a `Bearer` authorization header.
    pub fn bearer(token: &str) -> Result<Self, OpaqueError> {
        Bearer::new(token).map(|bearer| Self(Credentials::Bearer(bearer)))
    }

    /// The auth-scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        match &self.0 {
            Credentials::Basic(_) => BASIC_SCHEME,
            Credentials::Bearer(_) => BEARER_SCHEME,
            Credentials::Other { scheme, .. } => scheme,
        }
    }

    /// The basic credentials, if this is the `Basic` scheme.
    #[must_use]
    pub fn as_basic(&self) -> Option<&Basic> {
        match &self.0 {
            Credentials::Basic(basic) => Some(basic),
            _ => None,
        }
    }

    /// The bearer token, if this is the `Bearer` scheme.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match &self.0 {
            Credentials::Bearer(bearer) => Some(bearer.token()),
            _ => None,
        }
    }
}

impl TryFromValues for Authorization {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        let value = values
            .just_one()
            .context("expected exactly one authorization value")?
            .trim();
        let (scheme, params) = match value.split_once(' ') {
            Some((scheme, params)) => (scheme, params.trim_start()),
            None => (value, ""),
        };
        if !is_token(scheme) {
            return Err(OpaqueError::from_display("auth-scheme must be a token"));
        }

        let credentials = if scheme.eq_ignore_ascii_case(BASIC_SCHEME) {
            Credentials::Basic(Basic::decode(params)?)
        } else if scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            Credentials::Bearer(Bearer::new(params)?)
        } else {
            Credentials::Other {
                scheme: scheme.to_owned(),
                params: params.to_owned(),
            }
        };
        Ok(Self(credentials))
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Credentials::Basic(basic) => {
                write!(f, "{BASIC_SCHEME} {}", ENGINE.encode(basic.as_clear_string()))
            }
            Credentials::Bearer(bearer) => write!(f, "{BEARER_SCHEME} {}", bearer.token()),
            Credentials::Other { scheme, params } if params.is_empty() => f.write_str(scheme),
            Credentials::Other { scheme, params } => write!(f, "{scheme} {params}"),
        }
    }
}

/// Basic credentials: a user-id and a password.
#[derive(Clone, PartialEq, Eq)]
pub struct Basic {
    username: String,
    password: String,
}

impl Basic {
    /// Creates a new [`Basic`] credential.
    ///
    /// The username may not be empty nor contain a colon.
    pub fn new(username: &str, password: &str) -> Result<Self, OpaqueError> {
        if username.is_empty() || username.contains(':') {
            return Err(OpaqueError::from_display(
                "basic username must be non-empty and colon free",
            ));
        }
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// View the decoded username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// View the decoded password, empty if none was given.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Serialize as the clear (not encoded) `username:password` string.
    #[must_use]
    pub fn as_clear_string(&self) -> String {
        format!("{}:{}", self.username, self.password)
    }

    fn decode(encoded: &str) -> Result<Self, OpaqueError> {
        let bytes = ENGINE
            .decode(encoded)
            .context("failed to decode base64 basic credentials")?;
        let decoded =
            String::from_utf8(bytes).context("base64 decoded basic credentials are not utf-8")?;
        let (username, password) = decoded
            .split_once(':')
            .context("missing colon separator in basic credentials")?;
        Self::new(username, password)
    }
}

impl fmt::Debug for Basic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Basic")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A bearer token, `token68` syntax.
#[derive(Clone, PartialEq, Eq)]
pub struct Bearer(String);

impl Bearer {
    /// Create a bearer credential, failing if `token` is not a `token68`.
    pub fn new(token: &str) -> Result<Self, OpaqueError> {
        let body = token.trim_end_matches('=');
        let valid = !body.is_empty()
            && body.bytes().all(|b| {
                b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b'+' | b'/')
            });
        if valid {
            Ok(Self(token.to_owned()))
        } else {
            Err(OpaqueError::from_display("bearer token must be a token68"))
        }
    }

    /// View the token part as a `&str`.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Bearer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Bearer").field(&"***").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    fn encoded(auth: Authorization) -> String {
        test_encode(auth)
            .get(&header::AUTHORIZATION)
            .unwrap()
            .first()
            .to_owned()
    }

    #[test]
    fn basic_encode() {
        let auth = Authorization::basic("Aladdin", "open sesame").unwrap();
        assert_eq!(encoded(auth), "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    }

    #[test]
    fn basic_encode_no_password() {
        let auth = Authorization::basic("Aladdin", "").unwrap();
        assert_eq!(encoded(auth), "Basic QWxhZGRpbjo=");
    }

    #[test]
    fn basic_decode() {
        let auth: Authorization = test_decode(&["Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="]).unwrap();
        let basic = auth.as_basic().unwrap();
        assert_eq!(basic.username(), "Aladdin");
        assert_eq!(basic.password(), "open sesame");
    }

    #[test]
    fn basic_decode_case_insensitive() {
        let auth: Authorization = test_decode(&["basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="]).unwrap();
        assert_eq!(auth.as_basic().unwrap().username(), "Aladdin");
    }

    #[test]
    fn basic_decode_extra_whitespaces() {
        let auth: Authorization = test_decode(&["Basic  QWxhZGRpbjpvcGVuIHNlc2FtZQ=="]).unwrap();
        assert_eq!(auth.as_basic().unwrap().password(), "open sesame");
    }

    #[test]
    fn basic_decode_password_with_colon() {
        // "user:pa:ss"
        let auth: Authorization = test_decode(&["Basic dXNlcjpwYTpzcw=="]).unwrap();
        assert_eq!(auth.as_basic().unwrap().password(), "pa:ss");
    }

    #[test]
    fn basic_decode_invalid() {
        // "Aladdin" without colon, and ":secret" without username
        for bad in ["Basic QWxhZGRpbg==", "Basic OnNlY3JldA==", "Basic !!!", "Basic"] {
            assert_eq!(test_decode::<Authorization>(&[bad]), None, "{bad:?}");
        }
    }

    #[test]
    fn basic_debug_hides_password() {
        let basic = Basic::new("Aladdin", "open sesame").unwrap();
        assert!(!format!("{basic:?}").contains("sesame"));
    }

    #[test]
    fn bearer_encode() {
        let auth = Authorization::bearer("fpKL54jvWmEGVoRdCNjG").unwrap();
        assert_eq!(encoded(auth), "Bearer fpKL54jvWmEGVoRdCNjG");
    }

    #[test]
    fn bearer_decode() {
        let auth: Authorization = test_decode(&["bearer   fpKL54jvWmEGVoRdCNjG=="]).unwrap();
        assert_eq!(auth.token(), Some("fpKL54jvWmEGVoRdCNjG=="));
        assert_eq!(auth.scheme(), "Bearer");
        assert!(test_decode::<Authorization>(&["Bearer a b"]).is_none());
        assert!(Authorization::bearer("").is_err());
    }

    #[test]
    fn other_scheme_kept_verbatim() {
        let value = r#"Digest username="Mufasa", realm="http-auth@example.org""#;
        let auth: Authorization = test_decode(&[value]).unwrap();
        assert_eq!(auth.scheme(), "Digest");
        assert_eq!(auth.token(), None);
        assert_eq!(encoded(auth), value);
    }
}
