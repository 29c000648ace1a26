use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};
use vellum_error::{ErrorContext as _, OpaqueError};

use crate::util::{LanguageTag, TryFromValues, csv, is_token, quote, split_param, token_or_quoted};

/// `Content-Disposition` header, defined in
/// [RFC6266](https://www.rfc-editor.org/rfc/rfc6266) with extended
/// parameters from [RFC8187](https://www.rfc-editor.org/rfc/rfc8187)
/// (formerly RFC5987).
///
/// The Content-Disposition response header field is used to convey
/// additional information about how to process the response payload, and
/// also can be used to attach additional metadata, such as the filename
/// to use when saving the response payload locally.
///
/// # ABNF
///
/// ```text
/// content-disposition = "Content-Disposition" ":"
///                       disposition-type *( ";" disposition-parm )
///
/// disposition-type    = "inline" | "attachment" | disp-ext-type
///                       ; case-insensitive
///
/// disp-ext-type       = token
///
/// disposition-parm    = filename-parm | disp-ext-parm
///
/// filename-parm       = "filename" "=" value
///                     | "filename*" "=" ext-value
///
/// disp-ext-parm       = token "=" value
///                     | ext-token "=" ext-value
///
/// ext-token           = <the characters in token, followed by "*">
/// ```
///
/// A parameter may appear at most once. When both `filename` and
/// `filename*` are given, [`ContentDisposition::filename`] prefers the
/// extended form.
///
/// # Example values
///
/// * `inline`
/// * `attachment; filename="hello.txt"`
/// * `attachment; filename="EURO rates"; filename*=utf-8''%e2%82%ac%20rates`
/// * `form-data; name="field1"`
///
/// # Examples
///
/// ```
/// use vellum_http_headers::ContentDisposition;
///
/// let cd = ContentDisposition::attachment().with_filename("€ rates.txt");
/// assert_eq!(
///     cd.to_string(),
///     "attachment; filename=\"_ rates.txt\"; filename*=UTF-8''%E2%82%AC%20rates.txt",
/// );
/// assert_eq!(cd.filename(), Some("€ rates.txt"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentDisposition {
    kind: DispositionType,
    params: Vec<DispositionParam>,
}

derive_header!(ContentDisposition);

/// The disposition type of a [`ContentDisposition`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DispositionType {
    /// `inline`
    Inline,
    /// `attachment`
    Attachment,
    /// `form-data`, used for `multipart/form-data` parts.
    FormData,
    /// Any other disposition type, lowercase.
    Ext(String),
}

impl DispositionType {
    /// The disposition type token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Inline => "inline",
            Self::Attachment => "attachment",
            Self::FormData => "form-data",
            Self::Ext(token) => token,
        }
    }
}

impl FromStr for DispositionType {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !is_token(s) {
            return Err(OpaqueError::from_display("disposition type must be a token"));
        }
        Ok(vellum_utils::macros::match_ignore_ascii_case_str! {
            match (s) {
                "inline" => Self::Inline,
                "attachment" => Self::Attachment,
                "form-data" => Self::FormData,
                _ => Self::Ext(s.to_ascii_lowercase()),
            }
        })
    }
}

/// A single `name=value` or `name*=ext-value` parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispositionParam {
    name: String,
    value: ParamValue,
}

impl DispositionParam {
    /// The parameter name, lowercase and without the trailing `*` of
    /// extended parameters.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter value.
    #[must_use]
    pub fn value(&self) -> &ParamValue {
        &self.value
    }
}

/// The value of a [`DispositionParam`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A token or quoted-string value, unquoted.
    Regular(String),
    /// An RFC 8187 `ext-value`.
    Extended(ExtendedValue),
}

impl ParamValue {
    /// The decoded text of the value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Regular(value) => value,
            Self::Extended(value) => value.value(),
        }
    }

    fn is_extended(&self) -> bool {
        matches!(self, Self::Extended(_))
    }
}

/// The charset of an [`ExtendedValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Charset {
    /// `UTF-8`
    Utf8,
    /// `ISO-8859-1`
    Iso88591,
}

impl Charset {
    fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Iso88591 => "ISO-8859-1",
        }
    }
}

/// An extended parameter value, `charset'[language]'value-chars`, with
/// the percent-encoded value decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedValue {
    charset: Charset,
    language: Option<LanguageTag>,
    value: String,
}

// attr-char = ALPHA / DIGIT / "!" / "#" / "$" / "&" / "+" / "-" / "."
//           / "^" / "_" / "`" / "|" / "~"
const ATTR_CHAR_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

fn is_attr_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        )
}

impl ExtendedValue {
    /// Create a `UTF-8` extended value.
    #[must_use]
    pub fn new(value: impl Into<String>, language: Option<LanguageTag>) -> Self {
        Self {
            charset: Charset::Utf8,
            language,
            value: value.into(),
        }
    }

    /// The charset the value was encoded with.
    #[must_use]
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// The optional language tag.
    #[must_use]
    pub fn language(&self) -> Option<&LanguageTag> {
        self.language.as_ref()
    }

    /// The decoded value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for ExtendedValue {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '\'');
        let charset = parts.next().unwrap_or_default();
        let language = parts.next().context("ext-value without language part")?;
        let encoded = parts.next().context("ext-value without value part")?;

        let charset = vellum_utils::macros::match_ignore_ascii_case_str! {
            match (charset) {
                "utf-8" => Charset::Utf8,
                "iso-8859-1" => Charset::Iso88591,
                _ => return Err(OpaqueError::from_display("unsupported ext-value charset")),
            }
        };
        let language = if language.is_empty() {
            None
        } else {
            Some(language.parse()?)
        };

        let bytes = encoded.as_bytes();
        let mut index = 0;
        while index < bytes.len() {
            match bytes[index] {
                b'%' if bytes.len() > index + 2
                    && bytes[index + 1].is_ascii_hexdigit()
                    && bytes[index + 2].is_ascii_hexdigit() =>
                {
                    index += 3;
                }
                b if is_attr_char(b) => index += 1,
                _ => {
                    return Err(OpaqueError::from_display(
                        "invalid character in ext-value",
                    ));
                }
            }
        }

        let decoded: Vec<u8> = percent_decode_str(encoded).collect();
        let value = match charset {
            Charset::Utf8 => String::from_utf8(decoded).map_err(OpaqueError::from_std)?,
            Charset::Iso88591 => decoded.into_iter().map(char::from).collect(),
        };

        Ok(Self {
            charset,
            language,
            value,
        })
    }
}

impl fmt::Display for ExtendedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'", self.charset.as_str())?;
        if let Some(language) = &self.language {
            write!(f, "{language}")?;
        }
        f.write_str("'")?;
        match self.charset {
            Charset::Utf8 => {
                write!(f, "{}", percent_encode(self.value.as_bytes(), ATTR_CHAR_ENCODE_SET))
            }
            Charset::Iso88591 => {
                let bytes: Vec<u8> = self
                    .value
                    .chars()
                    .map(|c| u8::try_from(c).unwrap_or(b'?'))
                    .collect();
                write!(f, "{}", percent_encode(&bytes, ATTR_CHAR_ENCODE_SET))
            }
        }
    }
}

impl ContentDisposition {
    /// Create a disposition of the given type, without parameters.
    #[must_use]
    pub fn new(kind: DispositionType) -> Self {
        Self {
            kind,
            params: Vec::new(),
        }
    }

    /// `Content-Disposition: inline`
    #[must_use]
    pub fn inline() -> Self {
        Self::new(DispositionType::Inline)
    }

    /// `Content-Disposition: attachment`
    #[must_use]
    pub fn attachment() -> Self {
        Self::new(DispositionType::Attachment)
    }

    /// `Content-Disposition: form-data; name="..."`
    #[must_use]
    pub fn form_data(name: impl Into<String>) -> Self {
        Self::new(DispositionType::FormData)
            .with_param("name", ParamValue::Regular(name.into()))
    }

    /// Set the filename.
    ///
    /// Names which are not printable ASCII are written as `filename*` in
    /// UTF-8, with an ASCII `filename` fallback for older recipients.
    #[must_use]
    pub fn with_filename(mut self, filename: &str) -> Self {
        self.params.retain(|param| param.name != "filename");
        if filename.bytes().all(|b| b.is_ascii() && !b.is_ascii_control()) {
            return self.with_param("filename", ParamValue::Regular(filename.to_owned()));
        }
        let fallback: String = filename
            .chars()
            .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '_' })
            .collect();
        self.with_param("filename", ParamValue::Regular(fallback))
            .with_param(
                "filename",
                ParamValue::Extended(ExtendedValue::new(filename, None)),
            )
    }

    fn with_param(mut self, name: &str, value: ParamValue) -> Self {
        self.params.push(DispositionParam {
            name: name.to_owned(),
            value,
        });
        self
    }

    /// The disposition type.
    #[must_use]
    pub fn kind(&self) -> &DispositionType {
        &self.kind
    }

    /// Returns true for `inline`.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.kind == DispositionType::Inline
    }

    /// Returns true for `attachment`.
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.kind == DispositionType::Attachment
    }

    /// Returns true for `form-data`.
    #[must_use]
    pub fn is_form_data(&self) -> bool {
        self.kind == DispositionType::FormData
    }

    /// All parameters in the order given.
    #[must_use]
    pub fn params(&self) -> &[DispositionParam] {
        &self.params
    }

    /// The value of a parameter by (case-insensitive) name, preferring the
    /// extended form when both are present.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        let mut found = None;
        for param in self.params.iter().filter(|p| p.name.eq_ignore_ascii_case(name)) {
            if param.value.is_extended() {
                return Some(param.value.as_str());
            }
            found = Some(param.value.as_str());
        }
        found
    }

    /// The `filename` or `filename*` parameter.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.param("filename")
    }

    /// The `name` parameter of a `form-data` disposition.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.param("name")
    }
}

impl FromStr for ContentDisposition {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = csv::split_str(s, ';').map(str::trim);
        let kind: DispositionType = parts.next().unwrap_or_default().parse()?;

        let mut params: Vec<DispositionParam> = Vec::new();
        for part in parts.filter(|part| !part.is_empty()) {
            let (name, value) = split_param(part);
            let value = value.with_context(|| format!("parameter {name:?} without value"))?;
            let (name, value) = match name.strip_suffix('*') {
                Some(name) => (name, ParamValue::Extended(value.parse()?)),
                None => (name, ParamValue::Regular(token_or_quoted(value)?)),
            };
            if !is_token(name) {
                return Err(OpaqueError::from_display("parameter name must be a token"));
            }
            let name = name.to_ascii_lowercase();
            if params
                .iter()
                .any(|p| p.name == name && p.value.is_extended() == value.is_extended())
            {
                return Err(OpaqueError::from_display(format!(
                    "duplicate disposition parameter {name}"
                )));
            }
            params.push(DispositionParam { name, value });
        }

        Ok(Self { kind, params })
    }
}

impl TryFromValues for ContentDisposition {
    fn try_from_values<'i, I>(values: &mut I) -> Result<Self, OpaqueError>
    where
        I: Iterator<Item = &'i str>,
    {
        values
            .next()
            .context("missing content-disposition value")?
            .parse()
    }
}

impl fmt::Display for ContentDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        for param in &self.params {
            match &param.value {
                ParamValue::Regular(value) => write!(f, "; {}={}", param.name, quote(value))?,
                ParamValue::Extended(value) => write!(f, "; {}*={value}", param.name)?,
            }
        }
        Ok(())
    }
}
