use std::fmt;
use std::str::FromStr;

use vellum_error::{BoxError, OpaqueError};

use super::csv::split_str;
use super::token::split_param;

/// A quality value, as defined in RFC 9110 section 12.4.2.
///
/// Stored as thousandths: `1000` is `q=1`, `500` is `q=0.5`. The default
/// is `q=1`.
///
/// ```text
/// weight = OWS ";" OWS "q=" qvalue
/// qvalue = ( "0" [ "." 0*3DIGIT ] )
///        / ( "1" [ "." 0*3("0") ] )
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u16);

impl Quality {
    /// `q=1`
    pub const ONE: Self = Self(1000);
    /// `q=0`, meaning "not acceptable".
    pub const ZERO: Self = Self(0);

    /// Create a quality from thousandths, `None` if above `1000`.
    #[must_use]
    pub const fn new(thousandths: u16) -> Option<Self> {
        if thousandths > 1000 {
            None
        } else {
            Some(Self(thousandths))
        }
    }

    /// Create a quality from thousandths, clamping to `1000`.
    #[must_use]
    pub const fn new_clamped(thousandths: u16) -> Self {
        if thousandths > 1000 {
            Self::ONE
        } else {
            Self(thousandths)
        }
    }

    /// The quality in thousandths.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::ONE
    }
}

impl FromStr for Quality {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (int, frac) = s.split_once('.').unwrap_or((s, ""));
        if frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OpaqueError::from_display(
                "quality value allows at most three decimal digits",
            ));
        }
        let mut thousandths: u16 = 0;
        for (i, b) in frac.bytes().enumerate() {
            thousandths += u16::from(b - b'0') * [100, 10, 1][i];
        }
        match int {
            "0" => Ok(Self(thousandths)),
            "1" if thousandths == 0 => Ok(Self::ONE),
            _ => Err(OpaqueError::from_display(
                "quality value must be between 0 and 1",
            )),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1000 => f.write_str("1"),
            0 => f.write_str("0"),
            mut x => {
                f.write_str("0.")?;
                let mut digits = 3;
                while x % 10 == 0 {
                    x /= 10;
                    digits -= 1;
                }
                write!(f, "{x:0digits$}")
            }
        }
    }
}

/// A value paired with its [`Quality`].
///
/// Encoding omits `;q=1`, so a value that was received with an explicit
/// `q=1` does not round-trip byte for byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualityValue<T> {
    /// The value.
    pub value: T,
    /// Its weight.
    pub quality: Quality,
}

impl<T> QualityValue<T> {
    /// Create a value with an explicit quality.
    pub const fn new(value: T, quality: Quality) -> Self {
        Self { value, quality }
    }

    /// Create a value with the default quality, `q=1`.
    pub const fn new_value(value: T) -> Self {
        Self::new(value, Quality::ONE)
    }

    /// Map the value, keeping the quality.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QualityValue<U> {
        QualityValue {
            value: f(self.value),
            quality: self.quality,
        }
    }
}

impl<T> From<T> for QualityValue<T> {
    fn from(value: T) -> Self {
        Self::new_value(value)
    }
}

impl<T> QualityValue<T> {
    /// Parse `value[;params][;q=x]` with a parser for the value part.
    ///
    /// Any parameter before `q` stays part of the value (media type
    /// parameters, for example). Parameters after `q` are accept-extensions
    /// and are ignored.
    pub fn parse_with<F>(s: &str, parse_value: F) -> Result<Self, OpaqueError>
    where
        F: FnOnce(&str) -> Result<T, OpaqueError>,
    {
        let mut offset = 0;
        let mut weight = None;
        for (index, part) in split_str(s, ';').enumerate() {
            if index > 0 {
                let (name, value) = split_param(part);
                if name.eq_ignore_ascii_case("q") {
                    let value = value.ok_or_else(|| {
                        OpaqueError::from_display("quality parameter without value")
                    })?;
                    weight = Some((offset - 1, value.parse::<Quality>()?));
                    break;
                }
            }
            offset += part.len() + 1;
        }

        let (value, quality) = match weight {
            Some((end, quality)) => (s[..end].trim(), quality),
            None => (s.trim(), Quality::ONE),
        };
        if value.is_empty() {
            return Err(OpaqueError::from_display("quality value without a value"));
        }
        Ok(Self::new(parse_value(value)?, quality))
    }
}

impl<T> FromStr for QualityValue<T>
where
    T: FromStr<Err: Into<BoxError>>,
{
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, super::csv::parse_from_str)
    }
}

impl<T: fmt::Display> fmt::Display for QualityValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)?;
        if self.quality != Quality::ONE {
            write!(f, ";q={}", self.quality)?;
        }
        Ok(())
    }
}

/// Sort by descending quality, keeping the original order for equal weights.
pub fn sort_by_quality<T>(values: &mut [QualityValue<T>]) {
    values.sort_by(|a, b| b.quality.cmp(&a.quality));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_parse() {
        for (s, expected) in [
            ("1", 1000),
            ("1.", 1000),
            ("1.000", 1000),
            ("0", 0),
            ("0.5", 500),
            ("0.05", 50),
            ("0.123", 123),
            (" 0.8 ", 800),
        ] {
            assert_eq!(s.parse::<Quality>().unwrap().as_u16(), expected, "{s}");
        }
        for s in ["", "2", "1.001", "0.1234", "-0.5", ".5", "0.a", "01"] {
            assert!(s.parse::<Quality>().is_err(), "{s:?}");
        }
    }

    #[test]
    fn quality_display_trims_zeros() {
        for (q, expected) in [
            (1000, "1"),
            (0, "0"),
            (500, "0.5"),
            (50, "0.05"),
            (5, "0.005"),
            (123, "0.123"),
        ] {
            assert_eq!(Quality::new(q).unwrap().to_string(), expected);
        }
        assert!(Quality::new(1001).is_none());
        assert_eq!(Quality::new_clamped(5000), Quality::ONE);
    }

    #[test]
    fn quality_value_parse() {
        let v: QualityValue<String> = "gzip;q=0.5".parse().unwrap();
        assert_eq!(v, QualityValue::new("gzip".to_owned(), Quality::new_clamped(500)));

        let v: QualityValue<String> = "text/html;level=1 ; Q=0.7;ext=1".parse().unwrap();
        assert_eq!(v.value, "text/html;level=1");
        assert_eq!(v.quality.as_u16(), 700);

        let v: QualityValue<String> = "deflate".parse().unwrap();
        assert_eq!(v.quality, Quality::ONE);

        for bad in [";q=0.5", "gzip;q=", "gzip;q=1.5", "gzip;q"] {
            assert!(bad.parse::<QualityValue<String>>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn quality_value_display_omits_one() {
        assert_eq!(QualityValue::new_value("br").to_string(), "br");
        assert_eq!(
            QualityValue::new("br", Quality::new_clamped(250)).to_string(),
            "br;q=0.25"
        );
    }

    #[test]
    fn sort_is_stable_and_descending() {
        let mut values = vec![
            QualityValue::new("a", Quality::new_clamped(500)),
            QualityValue::new_value("b"),
            QualityValue::new("c", Quality::new_clamped(500)),
        ];
        sort_by_quality(&mut values);
        let order: Vec<_> = values.iter().map(|v| v.value).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }
}
