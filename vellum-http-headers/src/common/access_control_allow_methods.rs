use http::Method;

derive_wildcard_list_header! {
    /// `Access-Control-Allow-Methods` header, as defined on
    /// [mdn](https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Headers/Access-Control-Allow-Methods).
    ///
    /// The `Access-Control-Allow-Methods` header indicates, as part of the
    /// response to a preflight request, which methods can be used during the
    /// actual request.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Access-Control-Allow-Methods: "Access-Control-Allow-Methods" ":" #Method | *
    /// ```
    ///
    /// # Example values
    /// * `PUT, DELETE, XMODIFY`
    /// * `*`
    ///
    /// # Examples
    ///
    /// ```
    /// use http::Method;
    /// use vellum_utils::collections::non_empty_vec;
    /// use vellum_http_headers::AccessControlAllowMethods;
    ///
    /// let allow_methods = AccessControlAllowMethods::new_values(
    ///     non_empty_vec![Method::GET, Method::PUT],
    /// );
    /// assert!(allow_methods.allows(&Method::PUT));
    ///
    /// let allow_any_methods = AccessControlAllowMethods::any();
    /// ```
    #[derive(Clone, Debug, PartialEq)]
    pub struct AccessControlAllowMethods(pub WildcardList<Method>);
}

impl AccessControlAllowMethods {
    /// Returns true if `method` is allowed, always for `*`.
    #[must_use]
    pub fn allows(&self, method: &Method) -> bool {
        self.0.any_matches(|allowed| allowed == method)
    }
}
