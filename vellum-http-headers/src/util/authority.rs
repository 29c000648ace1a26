use std::str::FromStr;

use http::uri::Authority;
use vellum_error::{ErrorContext as _, OpaqueError};

/// Parse `uri-host [ ":" port ]`, without user info.
///
/// [`Authority`] keeps a port it cannot read as a number, so the port is
/// checked here to be `*DIGIT` and fit in a `u16`.
pub(crate) fn parse_authority(s: &str) -> Result<Authority, OpaqueError> {
    let authority = Authority::from_str(s.trim()).context("parse uri authority")?;
    check_authority(&authority)?;
    Ok(authority)
}

/// Reject user info and ports that are not a `u16` number.
pub(crate) fn check_authority(authority: &Authority) -> Result<(), OpaqueError> {
    if authority.as_str().contains('@') {
        return Err(OpaqueError::from_display("authority may not carry user info"));
    }
    let rest = authority
        .as_str()
        .strip_prefix(authority.host())
        .context("authority does not start with its host")?;
    match rest.strip_prefix(':') {
        None if rest.is_empty() => Ok(()),
        Some("") => Ok(()),
        Some(port) if port.bytes().all(|b| b.is_ascii_digit()) && port.parse::<u16>().is_ok() => {
            Ok(())
        }
        _ => Err(OpaqueError::from_display(format!(
            "invalid authority port in {:?}",
            authority.as_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_ports() {
        for ok in ["example.com", "example.com:8080", "example.com:", "[::1]:443", "127.0.0.1"] {
            assert!(parse_authority(ok).is_ok(), "{ok:?}");
        }
    }

    #[test]
    fn rejects_bad_ports_and_user_info() {
        for bad in [
            "example.com:port",
            "example.com:80a",
            "example.com:99999",
            "[::1]:x",
            "user@example.com",
            "",
        ] {
            assert!(parse_authority(bad).is_err(), "{bad:?}");
        }
    }
}
