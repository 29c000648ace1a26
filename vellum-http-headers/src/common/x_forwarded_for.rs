use std::net::IpAddr;

derive_non_empty_flat_csv_header! {
    #[header(sep = Comma)]
    /// `X-Forwarded-For` header, the de-facto predecessor of `Forwarded`.
    ///
    /// Identifies the originating IP address of a client connecting through
    /// one or more proxies. Each proxy appends the address it received the
    /// request from, so the left-most entry is the client.
    ///
    /// # ABNF
    ///
    /// ```text
    /// X-Forwarded-For = 1#( IPv4address / IPv6address )
    /// ```
    ///
    /// # Example values
    ///
    /// * `203.0.113.195`
    /// * `203.0.113.195, 2001:db8:85a3:8d3:1319:8a2e:370:7348, 198.51.100.178`
    ///
    /// # Example
    ///
    /// ```
    /// use std::net::{IpAddr, Ipv4Addr};
    /// use vellum_http_headers::XForwardedFor;
    ///
    /// let xff = XForwardedFor::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 195)));
    /// assert_eq!(xff.client_ip(), IpAddr::V4(Ipv4Addr::new(203, 0, 113, 195)));
    /// ```
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct XForwardedFor(pub NonEmptyVec<IpAddr>);
}

impl XForwardedFor {
    /// The left-most address, the original client.
    #[must_use]
    pub fn client_ip(&self) -> IpAddr {
        *self.0.first()
    }

    /// The addresses appended by proxies, after the client.
    pub fn proxies(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.iter().skip(1).copied()
    }

    /// Append the address of the next hop.
    #[must_use]
    pub fn with_hop(mut self, ip: IpAddr) -> Self {
        self.0.push(ip);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use vellum_http_types::header;

    #[test]
    fn decode_chain() {
        let xff = test_decode::<XForwardedFor>(&[
            "203.0.113.195, 2001:db8:85a3:8d3:1319:8a2e:370:7348",
            "198.51.100.178",
        ])
        .unwrap();
        assert_eq!(xff.client_ip(), "203.0.113.195".parse::<IpAddr>().unwrap());
        assert_eq!(xff.proxies().count(), 2);

        let headers = test_encode(xff.with_hop("10.0.0.1".parse().unwrap()));
        assert_eq!(
            headers.get(&header::X_FORWARDED_FOR).unwrap().first(),
            "203.0.113.195, 2001:db8:85a3:8d3:1319:8a2e:370:7348, 198.51.100.178, 10.0.0.1"
        );
    }

    #[test]
    fn decode_invalid() {
        for bad in ["", "unknown", "203.0.113.195:80", "example.com"] {
            assert_eq!(test_decode::<XForwardedFor>(&[bad]), None, "{bad:?}");
        }
    }
}
