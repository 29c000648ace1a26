use std::fmt;

use vellum_error::{ErrorContext as _, OpaqueError};
use vellum_utils::collections::NonEmptyVec;

use crate::util::csv;
use crate::{HeaderDecode, HeaderEncode};

/// `Content-Security-Policy` header, defined in
/// [CSP Level 3](https://www.w3.org/TR/CSP3/#csp-header)
///
/// Restricts the resources a document may load and the contexts it may be
/// embedded in.
///
/// # ABNF
///
/// ```text
/// Content-Security-Policy = 1#serialized-policy
///
/// serialized-policy = serialized-directive *( OWS ";" [ OWS serialized-directive ] )
/// serialized-directive = directive-name [ required-ascii-whitespace directive-value ]
/// directive-value = *( required-ascii-whitespace / ( %x21-%x2B / %x2D-%x3A / %x3C-%x7E ) )
/// ```
///
/// Every header value (and every comma separated element of one) is a
/// separate policy, all of which are enforced. Directive names are matched
/// case-insensitively against the known directives; an unknown or repeated
/// directive makes the value invalid.
///
/// # Example values
///
/// * `default-src 'self'`
/// * `default-src 'none'; img-src https:; frame-ancestors 'none'`
///
/// # Example
///
/// ```
/// use vellum_http_headers::{ContentSecurityPolicy, CspDirective, CspPolicy};
///
/// let policy = CspPolicy::new()
///     .with_directive(CspDirective::DefaultSrc, ["'self'"])
///     .unwrap()
///     .with_directive(CspDirective::UpgradeInsecureRequests, [""; 0])
///     .unwrap();
/// let csp = ContentSecurityPolicy::new(policy);
/// assert_eq!(
///     csp.policies().first().to_string(),
///     "default-src 'self'; upgrade-insecure-requests",
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentSecurityPolicy(NonEmptyVec<CspPolicy>);

impl ContentSecurityPolicy {
    /// Create the header from a single policy.
    #[must_use]
    pub fn new(policy: CspPolicy) -> Self {
        Self(NonEmptyVec::new(policy))
    }

    /// Add another policy to enforce next to the existing ones.
    #[must_use]
    pub fn with_policy(mut self, policy: CspPolicy) -> Self {
        self.0.push(policy);
        self
    }

    /// All policies, in header order.
    #[must_use]
    pub fn policies(&self) -> &NonEmptyVec<CspPolicy> {
        &self.0
    }
}

impl HeaderDecode for ContentSecurityPolicy {
    fn decode<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        csv::decode_non_empty_list(values, csv::Separator::Comma, CspPolicy::parse).map(Self)
    }
}

impl HeaderEncode for ContentSecurityPolicy {
    fn encode<E: Extend<String>>(&self, values: &mut E) {
        values.extend(self.0.iter().map(ToString::to_string));
    }
}

/// A single serialized policy: an ordered set of directives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CspPolicy {
    directives: Vec<(CspDirective, Vec<String>)>,
}

impl CspPolicy {
    /// An empty policy, add directives with [`Self::with_directive`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a directive and its value, replacing a previous one of that name.
    ///
    /// Fails when a source expression contains whitespace, `,`, `;`, or
    /// non visible ASCII, or when a value is given to a flag directive.
    pub fn with_directive<I, S>(
        mut self,
        directive: CspDirective,
        sources: I,
    ) -> Result<Self, OpaqueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        if let Some(source) = sources.iter().find(|s| !is_source_expression(s)) {
            return Err(OpaqueError::from_display(format!(
                "invalid source expression {source:?}"
            )));
        }
        if directive.is_flag() && !sources.is_empty() {
            return Err(OpaqueError::from_display(format!(
                "{directive} does not take a value"
            )));
        }
        self.directives.retain(|(d, _)| *d != directive);
        self.directives.push((directive, sources));
        Ok(self)
    }

    /// The value of a directive, `None` if absent.
    #[must_use]
    pub fn directive(&self, directive: CspDirective) -> Option<&[String]> {
        self.directives
            .iter()
            .find(|(d, _)| *d == directive)
            .map(|(_, sources)| sources.as_slice())
    }

    /// Returns true if the directive is present.
    #[must_use]
    pub fn contains(&self, directive: CspDirective) -> bool {
        self.directive(directive).is_some()
    }

    /// The value that governs a fetch directive, following the
    /// `default-src` fallback for the fetch directives that have one.
    #[must_use]
    pub fn effective_sources(&self, directive: CspDirective) -> Option<&[String]> {
        self.directive(directive).or_else(|| {
            directive
                .falls_back_to_default_src()
                .then(|| self.directive(CspDirective::DefaultSrc))
                .flatten()
        })
    }

    /// Iterate over the directives in order.
    pub fn iter(&self) -> impl Iterator<Item = (CspDirective, &[String])> {
        self.directives
            .iter()
            .map(|(d, sources)| (*d, sources.as_slice()))
    }

    fn parse(s: &str) -> Result<Self, OpaqueError> {
        let mut policy = Self::new();
        for serialized in s.split(';') {
            let mut parts = serialized.split_ascii_whitespace();
            let Some(name) = parts.next() else {
                continue;
            };
            let directive: CspDirective = name.parse()?;
            if policy.contains(directive) {
                return Err(OpaqueError::from_display(format!(
                    "duplicate {directive} directive"
                )));
            }
            policy = policy
                .with_directive(directive, parts)
                .with_context(|| format!("parse {directive} directive"))?;
        }
        if policy.directives.is_empty() {
            return Err(OpaqueError::from_display("policy without directives"));
        }
        Ok(policy)
    }
}

impl fmt::Display for CspPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (directive, sources)) in self.directives.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            f.write_str(directive.as_str())?;
            for source in sources {
                write!(f, " {source}")?;
            }
        }
        Ok(())
    }
}

fn is_source_expression(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_graphic() && b != b',' && b != b';')
}

token_enum! {
    /// The directives known to a CSP Level 3 user agent.
    pub enum CspDirective {
        /// `base-uri`
        BaseUri => "base-uri",
        /// `block-all-mixed-content`, deprecated
        BlockAllMixedContent => "block-all-mixed-content",
        /// `child-src`
        ChildSrc => "child-src",
        /// `connect-src`
        ConnectSrc => "connect-src",
        /// `default-src`
        DefaultSrc => "default-src",
        /// `fenced-frame-src`
        FencedFrameSrc => "fenced-frame-src",
        /// `font-src`
        FontSrc => "font-src",
        /// `form-action`
        FormAction => "form-action",
        /// `frame-ancestors`
        FrameAncestors => "frame-ancestors",
        /// `frame-src`
        FrameSrc => "frame-src",
        /// `img-src`
        ImgSrc => "img-src",
        /// `manifest-src`
        ManifestSrc => "manifest-src",
        /// `media-src`
        MediaSrc => "media-src",
        /// `object-src`
        ObjectSrc => "object-src",
        /// `report-to`
        ReportTo => "report-to",
        /// `report-uri`, deprecated
        ReportUri => "report-uri",
        /// `require-trusted-types-for`
        RequireTrustedTypesFor => "require-trusted-types-for",
        /// `sandbox`
        Sandbox => "sandbox",
        /// `script-src`
        ScriptSrc => "script-src",
        /// `script-src-attr`
        ScriptSrcAttr => "script-src-attr",
        /// `script-src-elem`
        ScriptSrcElem => "script-src-elem",
        /// `style-src`
        StyleSrc => "style-src",
        /// `style-src-attr`
        StyleSrcAttr => "style-src-attr",
        /// `style-src-elem`
        StyleSrcElem => "style-src-elem",
        /// `trusted-types`
        TrustedTypes => "trusted-types",
        /// `upgrade-insecure-requests`
        UpgradeInsecureRequests => "upgrade-insecure-requests",
        /// `webrtc`
        Webrtc => "webrtc",
        /// `worker-src`
        WorkerSrc => "worker-src",
    }
}

impl CspDirective {
    /// Directives which take no value.
    #[must_use]
    pub fn is_flag(self) -> bool {
        matches!(self, Self::UpgradeInsecureRequests | Self::BlockAllMixedContent)
    }

    fn falls_back_to_default_src(self) -> bool {
        matches!(
            self,
            Self::ChildSrc
                | Self::ConnectSrc
                | Self::FencedFrameSrc
                | Self::FontSrc
                | Self::FrameSrc
                | Self::ImgSrc
                | Self::ManifestSrc
                | Self::MediaSrc
                | Self::ObjectSrc
                | Self::ScriptSrc
                | Self::ScriptSrcAttr
                | Self::ScriptSrcElem
                | Self::StyleSrc
                | Self::StyleSrcAttr
                | Self::StyleSrcElem
                | Self::WorkerSrc
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_single_policy() {
        let csp = test_decode::<ContentSecurityPolicy>(&[
            "default-src 'none'; IMG-SRC https: data:; frame-ancestors 'none';",
        ])
        .unwrap();
        let policy = csp.policies().first();
        assert_eq!(policy.directive(CspDirective::DefaultSrc).unwrap(), ["'none'"]);
        assert_eq!(
            policy.directive(CspDirective::ImgSrc).unwrap(),
            ["https:", "data:"]
        );
        assert_eq!(policy.iter().count(), 3);
        assert_eq!(
            policy.to_string(),
            "default-src 'none'; img-src https: data:; frame-ancestors 'none'"
        );
    }

    #[test]
    fn decode_multiple_policies() {
        let csp = test_decode::<ContentSecurityPolicy>(&[
            "script-src 'self', object-src 'none'",
            "upgrade-insecure-requests",
        ])
        .unwrap();
        assert_eq!(csp.policies().len(), 3);

        let headers = test_encode(csp);
        let values = headers.get(&header::CONTENT_SECURITY_POLICY).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values.first(), "script-src 'self'");
    }

    #[test]
    fn decode_invalid() {
        for value in [
            "",
            " ; ",
            "default-src 'self'; default-src 'none'",
            "script-source 'self'",
            "upgrade-insecure-requests yes",
        ] {
            assert_eq!(test_decode::<ContentSecurityPolicy>(&[value]), None, "{value:?}");
        }
    }

    #[test]
    fn default_src_fallback() {
        let policy = CspPolicy::new()
            .with_directive(CspDirective::DefaultSrc, ["'self'"])
            .unwrap()
            .with_directive(CspDirective::ImgSrc, ["*"])
            .unwrap();
        assert_eq!(policy.effective_sources(CspDirective::ImgSrc).unwrap(), ["*"]);
        assert_eq!(
            policy.effective_sources(CspDirective::ScriptSrc).unwrap(),
            ["'self'"]
        );
        assert_eq!(policy.effective_sources(CspDirective::FormAction), None);
    }

    #[test]
    fn builder_rejects_bad_sources() {
        assert!(
            CspPolicy::new()
                .with_directive(CspDirective::ScriptSrc, ["'self'; img-src *"])
                .is_err()
        );
        assert!(
            CspPolicy::new()
                .with_directive(CspDirective::ScriptSrc, ["a b"])
                .is_err()
        );
    }
}
