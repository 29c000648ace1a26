use vellum_http_types::HeaderName;

derive_non_empty_flat_csv_header! {
    #[header(sep = Comma)]
    /// `Connection` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-7.6.1)
    ///
    /// The "Connection" header field allows the sender to list desired
    /// control options for the current connection and to list the
    /// connection-specific fields that a proxy must remove before
    /// forwarding the message.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Connection        = #connection-option
    /// connection-option = token
    /// ```
    ///
    /// # Example values
    ///
    /// * `close`
    /// * `keep-alive, upgrade`
    ///
    /// # Example
    ///
    /// ```
    /// use vellum_http_headers::Connection;
    ///
    /// let conn = Connection::close();
    /// assert!(conn.contains("Close"));
    /// ```
    #[derive(Clone, Debug, PartialEq)]
    pub struct Connection(pub NonEmptyVec<HeaderName>);
}

impl Connection {
    /// A constructor to easily create a `Connection: close` header.
    #[must_use]
    pub fn close() -> Self {
        Self::new(HeaderName::from_static("close"))
    }

    /// A constructor to easily create a `Connection: keep-alive` header.
    #[must_use]
    pub fn keep_alive() -> Self {
        Self::new(HeaderName::from_static("keep-alive"))
    }

    /// A constructor to easily create a `Connection: upgrade` header.
    #[must_use]
    pub fn upgrade() -> Self {
        Self::new(HeaderName::from_static("upgrade"))
    }

    /// Check if this header contains a given "connection option".
    ///
    /// Connection options are case-insensitive.
    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.iter()
            .any(|opt| opt.as_str().eq_ignore_ascii_case(option.trim()))
    }

    /// Returns true if the connection is to be closed after this message.
    #[must_use]
    pub fn is_close(&self) -> bool {
        self.contains("close")
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_options() {
        let conn = test_decode::<Connection>(&["keep-alive, Upgrade"]).unwrap();
        assert!(conn.contains("keep-alive"));
        assert!(conn.contains("upgrade"));
        assert!(!conn.is_close());
        assert!(test_decode::<Connection>(&[""]).is_none());
    }

    #[test]
    fn connection_header_names() {
        let conn = test_decode::<Connection>(&["close, x-hop-by-hop"]).unwrap();
        assert!(conn.is_close());

        let headers = test_encode(conn);
        assert_eq!(
            headers.get(&header::CONNECTION).unwrap().first(),
            "close, x-hop-by-hop"
        );
    }
}
