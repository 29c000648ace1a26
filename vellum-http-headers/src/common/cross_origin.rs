//! The `Cross-Origin-*-Policy` isolation headers.

token_enum_header! {
    /// `Cross-Origin-Embedder-Policy` header, defined in the
    /// [HTML standard](https://html.spec.whatwg.org/multipage/browsers.html#coep)
    ///
    /// Configures embedding cross-origin resources into the document.
    ///
    /// # Example values
    /// * `require-corp`
    /// * `credentialless`
    pub enum CrossOriginEmbedderPolicy {
        /// Allows fetching cross-origin resources without explicit permission.
        UnsafeNone => "unsafe-none",
        /// Only resources granting permission through CORP or CORS load.
        RequireCorp => "require-corp",
        /// No-cors cross-origin requests are sent without credentials.
        Credentialless => "credentialless",
    }
}

token_enum_header! {
    /// `Cross-Origin-Opener-Policy` header, defined in the
    /// [HTML standard](https://html.spec.whatwg.org/multipage/browsers.html#cross-origin-opener-policies)
    ///
    /// Allows a top-level document to be isolated from cross-origin
    /// documents opening it or opened by it.
    ///
    /// # Example values
    /// * `same-origin`
    /// * `same-origin-allow-popups`
    pub enum CrossOriginOpenerPolicy {
        /// Share the browsing context group with any opener.
        UnsafeNone => "unsafe-none",
        /// Keep references to opened windows that do not set a policy.
        SameOriginAllowPopups => "same-origin-allow-popups",
        /// Isolate the browsing context to same-origin documents.
        SameOrigin => "same-origin",
        /// Always open popups in a new browsing context group.
        NoopenerAllowPopups => "noopener-allow-popups",
    }
}

token_enum_header! {
    /// `Cross-Origin-Resource-Policy` header, defined in the
    /// [Fetch standard](https://fetch.spec.whatwg.org/#cross-origin-resource-policy-header)
    ///
    /// Asks the browser to block no-cors cross-origin or cross-site
    /// requests to the given resource.
    ///
    /// # Example values
    /// * `same-origin`
    pub enum CrossOriginResourcePolicy {
        /// Only same-site requests can read the resource.
        SameSite => "same-site",
        /// Only same-origin requests can read the resource.
        SameOrigin => "same-origin",
        /// Any origin can read the resource.
        CrossOrigin => "cross-origin",
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode() {
        assert_eq!(
            test_decode(&["require-corp"]),
            Some(CrossOriginEmbedderPolicy::RequireCorp)
        );
        assert_eq!(
            test_decode(&["Same-Origin-Allow-Popups"]),
            Some(CrossOriginOpenerPolicy::SameOriginAllowPopups)
        );
        assert_eq!(
            test_decode(&["cross-origin"]),
            Some(CrossOriginResourcePolicy::CrossOrigin)
        );
        assert_eq!(test_decode::<CrossOriginResourcePolicy>(&["same-origin-ish"]), None);
    }

    #[test]
    fn encode() {
        let headers = test_encode(CrossOriginOpenerPolicy::SameOrigin);
        assert_eq!(
            headers.get(&header::CROSS_ORIGIN_OPENER_POLICY).unwrap().first(),
            "same-origin"
        );
    }
}
