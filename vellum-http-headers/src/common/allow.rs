use http::Method;
use vellum_error::OpaqueError;

use crate::util::csv;
use crate::{HeaderDecode, HeaderEncode};

/// `Allow` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.2.1)
///
/// The "Allow" header field lists the set of methods advertised as
/// supported by the target resource.
///
/// An empty Allow field value indicates that the resource allows no
/// methods, which might occur in a 405 response if the resource has been
/// temporarily disabled by configuration.
///
/// # ABNF
///
/// ```text
/// Allow = #method
/// ```
///
/// # Example values
///
/// * `GET, HEAD, PUT`
/// * `OPTIONS, GET, PUT, POST, DELETE, CONNECT, TRACE`
/// * (empty)
///
/// # Example
///
/// ```
/// use http::Method;
/// use vellum_http_headers::Allow;
///
/// let allow = Allow::from_iter([Method::GET, Method::HEAD]);
/// assert!(allow.allows(&Method::HEAD));
/// assert!(!Allow::none().allows(&Method::GET));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Allow(Vec<Method>);

impl Allow {
    /// An empty `Allow` header, no method is allowed.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if `method` is allowed.
    #[must_use]
    pub fn allows(&self, method: &Method) -> bool {
        self.0.contains(method)
    }

    /// Iterate over the allowed methods.
    pub fn iter(&self) -> std::slice::Iter<'_, Method> {
        self.0.iter()
    }

    /// Returns true if no method is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Method> for Allow {
    fn from_iter<T: IntoIterator<Item = Method>>(iter: T) -> Self {
        let mut methods = Vec::new();
        for method in iter {
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
        Self(methods)
    }
}

impl HeaderDecode for Allow {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        csv::decode_list(values, csv::Separator::Comma, csv::parse_from_str::<Method>)
            .map(Self::from_iter)
    }
}

impl HeaderEncode for Allow {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(std::iter::once(csv::encode_list(
            self.0.iter(),
            csv::Separator::Comma,
        )));
    }
}
