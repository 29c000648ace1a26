use vellum_error::OpaqueError;
use vellum_utils::collections::NonEmptyVec;

use crate::util::{WildcardList, quote, unquote};
use crate::{HeaderDecode, HeaderEncode};

/// `Clear-Site-Data` header, defined in
/// [Clear Site Data](https://www.w3.org/TR/clear-site-data/#header)
///
/// Asks the user agent to clear browsing data associated with the origin
/// of the response.
///
/// Unlike most list headers every item, the wildcard included, is a
/// quoted string.
///
/// # ABNF
///
/// ```text
/// Clear-Site-Data = 1#( quoted-string )
/// ```
///
/// # Example values
///
/// * `"cache"`
/// * `"cookies", "storage"`
/// * `"*"`
///
/// # Example
///
/// ```
/// use vellum_http_headers::{ClearSiteData, ClearSiteDataType};
///
/// let csd = ClearSiteData::new(ClearSiteDataType::Cookies);
/// assert!(csd.clears(ClearSiteDataType::Cookies));
/// assert!(!csd.clears(ClearSiteDataType::Cache));
/// assert!(ClearSiteData::any().clears(ClearSiteDataType::Cache));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearSiteData(pub WildcardList<ClearSiteDataType>);

const WILDCARD: &str = "\"*\"";

impl ClearSiteData {
    /// Clear a single type of data.
    #[must_use]
    pub fn new(value: ClearSiteDataType) -> Self {
        Self(WildcardList::new(value))
    }

    /// Clear the given types of data.
    #[must_use]
    pub fn new_values(values: NonEmptyVec<ClearSiteDataType>) -> Self {
        Self(WildcardList::Values(values))
    }

    /// Clear all data, `"*"`.
    #[must_use]
    pub fn any() -> Self {
        Self(WildcardList::Any)
    }

    /// Returns true if this is the wildcard.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.0.is_any()
    }

    /// Returns true if the given type of data is to be cleared.
    #[must_use]
    pub fn clears(&self, data: ClearSiteDataType) -> bool {
        self.0.any_matches(|value| *value == data)
    }
}

impl HeaderDecode for ClearSiteData {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        WildcardList::decode_with(values, WILDCARD, |element| {
            if !element.starts_with('"') {
                return Err(OpaqueError::from_display(
                    "clear-site-data types must be quoted",
                ));
            }
            unquote(element)?.parse()
        })
        .map(Self)
    }
}

impl HeaderEncode for ClearSiteData {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(std::iter::once(
            self.0.encode_with(WILDCARD, |data| quote(data.as_str())),
        ));
    }
}

token_enum! {
    /// A type of data named by [`ClearSiteData`].
    pub enum ClearSiteDataType {
        /// `"cache"`
        Cache => "cache",
        /// `"clientHints"`
        ClientHints => "clientHints",
        /// `"cookies"`
        Cookies => "cookies",
        /// `"executionContexts"`
        ExecutionContexts => "executionContexts",
        /// `"prefetchCache"`
        PrefetchCache => "prefetchCache",
        /// `"prerenderCache"`
        PrerenderCache => "prerenderCache",
        /// `"storage"`
        Storage => "storage",
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_quoted_types() {
        let csd = test_decode::<ClearSiteData>(&["\"cache\", \"cookies\"", "\"storage\""]).unwrap();
        assert!(csd.clears(ClearSiteDataType::Cache));
        assert!(csd.clears(ClearSiteDataType::Storage));
        assert!(!csd.clears(ClearSiteDataType::ExecutionContexts));

        let headers = test_encode(csd);
        assert_eq!(
            headers.get(&header::CLEAR_SITE_DATA).unwrap().first(),
            "\"cache\", \"cookies\", \"storage\""
        );
    }

    #[test]
    fn decode_wildcard() {
        let csd = test_decode::<ClearSiteData>(&["\"*\""]).unwrap();
        assert!(csd.is_any());

        let headers = test_encode(csd);
        assert_eq!(headers.get(&header::CLEAR_SITE_DATA).unwrap().first(), "\"*\"");
    }

    #[test]
    fn decode_invalid() {
        for value in ["cache", "*", "\"*\", \"cache\"", "\"history\"", ""] {
            assert_eq!(test_decode::<ClearSiteData>(&[value]), None, "{value:?}");
        }
    }
}
